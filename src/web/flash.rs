// src/web/flash.rs
//! One-shot messages carried in the session across a redirect.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flashes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

impl Flash {
    pub fn new(level: &str, message: &str) -> Self {
        Self {
            level: level.to_string(),
            message: message.to_string(),
        }
    }
}

/// Queues a message for the next rendered page. Session failures are logged, not raised.
pub async fn push(session: &Session, level: &str, message: &str) {
    let mut flashes: Vec<Flash> = session.get(FLASH_KEY).await.ok().flatten().unwrap_or_default();
    flashes.push(Flash::new(level, message));
    if let Err(e) = session.insert(FLASH_KEY, flashes).await {
        tracing::error!("Could not store flash message: {:?}", e);
    }
}

/// Drains every queued message.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(flashes) => flashes.unwrap_or_default(),
        Err(e) => {
            tracing::error!("Could not read flash messages: {:?}", e);
            Vec::new()
        }
    }
}
