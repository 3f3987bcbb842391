// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, RegisterForm},
    services::auth_service,
    state::AppState,
    templates::{render, LoginPage, RegisterPage},
    web::{
        flash::{self, Flash},
        mw_auth::SESSION_USER_KEY,
    },
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    if session.get::<i64>(SESSION_USER_KEY).await.ok().flatten().is_some() {
        tracing::debug!("GET /login: already logged in, redirecting to /index");
        return Ok(Redirect::to("/index").into_response());
    }

    let page = LoginPage { flashes: flash::take(&session).await };
    Ok(render(&page)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for: {}", form.email);

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(user) => {
            // New session id on privilege change
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("Failed to cycle id: {}", e)))?;
            session
                .insert(SESSION_USER_KEY, user.id)
                .await
                .map_err(|e| AppError::SessionError(format!("Failed to store user_id: {}", e)))?;

            tracing::info!("✅ Login succeeded for user {}", user.id);
            flash::push(&session, "success", "Welcome back!").await;
            Ok(Redirect::to("/index").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            let mut flashes = flash::take(&session).await;
            flashes.push(Flash::new("danger", "Invalid credentials"));
            Ok(render(&LoginPage { flashes })?.into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /register
pub async fn show_register_form(session: Session) -> AppResult<Response> {
    let page = RegisterPage { flashes: flash::take(&session).await };
    Ok(render(&page)?.into_response())
}

// POST /register (Post/Redirect/Get in every outcome)
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Redirect> {
    tracing::info!("Registration attempt for: {}", form.email);

    match auth_service::register(&state.db_pool, &form).await {
        Ok(_) => {
            flash::push(&session, "success", "Registration successful. Please login.").await;
            Ok(Redirect::to("/login"))
        }
        Err(AppError::Validation(_)) => {
            flash::push(&session, "danger", "Passwords do not match").await;
            Ok(Redirect::to("/register"))
        }
        Err(AppError::Conflict(_)) => {
            flash::push(&session, "warning", "Email already registered. Please login.").await;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get(SESSION_USER_KEY).await.ok().flatten();

    session
        .flush()
        .await
        .map_err(|e| AppError::SessionError(format!("Failed to delete session: {}", e)))?;

    match user_id {
        Some(id) => tracing::info!("🚪 User {} logged out.", id),
        None => tracing::info!("🚪 Anonymous session closed."),
    }

    flash::push(&session, "info", "You have been logged out.").await;
    Ok(Redirect::to("/login"))
}
