// src/web/landing_handlers.rs
use crate::{
    error::AppResult,
    templates::{render, CheckRolePage, HomePage, NoAccessPage},
    web::flash,
};
use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /
pub async fn root() -> Redirect {
    Redirect::to("/check_role")
}

// GET /check_role
pub async fn check_role(session: Session) -> AppResult<Response> {
    let page = CheckRolePage { flashes: flash::take(&session).await };
    Ok(render(&page)?.into_response())
}

// GET /role_response/{choice}: only "yes" gets through to /home
pub async fn role_response(session: Session, Path(choice): Path<String>) -> AppResult<Response> {
    if choice == "yes" {
        return Ok(Redirect::to("/home").into_response());
    }
    tracing::debug!("Role check answered '{}', showing no-access page", choice);
    let page = NoAccessPage { flashes: flash::take(&session).await };
    Ok(render(&page)?.into_response())
}

// GET /home
pub async fn home(session: Session) -> AppResult<Response> {
    let page = HomePage { flashes: flash::take(&session).await };
    Ok(render(&page)?.into_response())
}
