// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    // Bad or missing user input (blank description, mismatched passwords, ...)
    #[error("{0}")]
    Validation(String),

    // Duplicate email at registration
    #[error("{0}")]
    Conflict(String),

    #[error("Failed to process password")]
    PasswordHashingError,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session error: {0}")]
    SessionError(String),

    // Job API, embedding service or translation service failure
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Unexpected internal error")]
    InternalServerError,

    #[error("Not authenticated")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Handled error: {:?}", self);

        // Missing session: behave like a login gate, not an error page
        if matches!(self, AppError::Unauthorized) {
            return Redirect::to("/login").into_response();
        }

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not access the data store.".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not process credentials.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Your session could not be handled.".to_string())
            }
            AppError::ExternalService(_) => {
                (StatusCode::BAD_GATEWAY, "An external service is unavailable right now.".to_string())
            }
            AppError::Io(_) | AppError::Csv(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "The occupation dataset is unavailable.".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.".to_string()),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Error</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Error {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Back</a></body></html>
         "#, status_code=status.as_u16(), message=escape_html(&user_message)))).into_response()
    }
}

// Validation messages may echo user input
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub type AppResult<T = ()> = Result<T, AppError>;
