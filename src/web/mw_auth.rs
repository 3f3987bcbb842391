// src/web/mw_auth.rs
use crate::{
    error::AppError,
    models::user::User,
    services::user_service,
    state::AppState,
    web::flash,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub const SESSION_USER_KEY: &str = "user_id";

// The logged-in user, put in request extensions by `require_auth`
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Lets a request through only when the session holds the id of an existing user.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = session
        .get::<i64>(SESSION_USER_KEY)
        .await
        .map_err(|e| {
            tracing::error!("Auth MW: failed to read session: {:?}", e);
            AppError::SessionError(format!("Failed to check session: {}", e))
        })?;

    let Some(user_id) = user_id else {
        tracing::debug!("Auth MW: no user_id in session, redirecting to /login");
        flash::push(&session, "info", "Please log in to access this page.").await;
        return Err(AppError::Unauthorized);
    };

    match user_service::find_user_by_id(&state.db_pool, user_id).await? {
        Some(user) => {
            tracing::debug!("Auth MW: user {} authenticated.", user.id);
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        None => {
            // Session points at a user that no longer exists
            tracing::warn!("Auth MW: session user {} not found, clearing session.", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::SessionError(format!("Failed to clear session: {}", e)))?;
            Ok(Redirect::to("/login").into_response())
        }
    }
}
