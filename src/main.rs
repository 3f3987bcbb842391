// src/main.rs

// --- Modules ---
mod config;
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

// --- Imports ---
use crate::{
    config::Config,
    services::{
        embedding::{Embedder, FastEmbedder, HttpEmbedder},
        job_api::JSearchClient,
        nco_dataset::NcoDataset,
        search_service::JobSearchService,
        translation_service::GoogleTranslator,
    },
    state::AppState,
};
use axum::serve;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tower_cookies::Key;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "jobmatch=debug,tower_http=info,sqlx=warn,tower_sessions=info".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Starting job matching server...");

    let config = Config::from_env()?;

    // --- Database ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Could not initialise the database: {}", e);
            return Err(anyhow::anyhow!("Failed to connect/migrate DB: {}", e));
        }
    };

    match services::user_service::count_users(&db_pool).await {
        Ok(count) => tracing::info!("👥 {} registered students.", count),
        Err(e) => tracing::warn!("Could not count users: {}", e),
    }

    // --- Sessions ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Failed to create session store: {}", e))?;
    session_store.migrate().await?;

    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = cleanup_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Session cleanup task failed: {:?}", e);
        }
    });
    tracing::info!("🧹 Session cleanup task started.");

    let key = Key::try_from(config.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid SESSION_SECRET: {}", e))?;

    // --- Services ---
    let embedder: Arc<dyn Embedder> = match &config.embedding_url {
        Some(url) => {
            tracing::info!("🧠 Using embedding service at {}", url);
            Arc::new(HttpEmbedder::new(url.clone(), config.http_timeout)?)
        }
        None => {
            tracing::info!("🧠 Loading all-MiniLM-L12-v2 in-process (first run downloads it)...");
            let cache_dir = config.embedding_cache_dir.clone();
            let embedder = tokio::task::spawn_blocking(move || FastEmbedder::try_new(cache_dir))
                .await
                .map_err(|e| anyhow::anyhow!("Embedding model loader panicked: {}", e))?
                .map_err(|e| anyhow::anyhow!("Could not load embedding model: {}", e))?;
            Arc::new(embedder)
        }
    };
    let job_search = JobSearchService::new(
        Arc::new(JSearchClient::new(config.jsearch.clone(), config.http_timeout)?),
        Arc::new(NcoDataset::new(config.nco_dataset_path.clone())),
        embedder,
        config.results_snapshot_path.clone(),
    );
    let translator = GoogleTranslator::new(
        config.translate_base_url.clone(),
        config.translate_target.clone(),
        config.http_timeout,
    )?;
    tracing::info!(
        "🔎 Job search ready (dataset: {}, snapshot: {}, timeout: {:?})",
        config.nco_dataset_path.display(),
        config.results_snapshot_path.display(),
        config.http_timeout
    );

    let app_state = AppState {
        db_pool,
        job_search,
        translator: Arc::new(translator),
    };

    // --- Listener ---
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Could not listen on {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Listening on http://{}", config.bind_addr);

    let app = web::routes::create_app(app_state, session_store, key);

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Fatal server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
