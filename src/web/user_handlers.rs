// src/web/user_handlers.rs
use crate::{
    error::AppResult,
    templates::{render, IndexPage, ProfilePage},
    web::{flash, mw_auth::CurrentUser},
};
use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

// GET /index (behind require_auth)
pub async fn index_handler(
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Response> {
    tracing::debug!("GET /index for user {}", user.id);
    let page = IndexPage {
        flashes: flash::take(&session).await,
        username: user.username,
    };
    Ok(render(&page)?.into_response())
}

// GET /profile (behind require_auth)
pub async fn profile_handler(
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Response> {
    tracing::debug!("GET /profile for user {}", user.id);
    let page = ProfilePage {
        flashes: flash::take(&session).await,
        user,
    };
    Ok(render(&page)?.into_response())
}
