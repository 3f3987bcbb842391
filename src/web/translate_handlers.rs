// src/web/translate_handlers.rs
use crate::{
    error::AppError,
    models::translation::{TranslateErrorResponse, TranslateRequest, TranslateResponse},
    services::translation_service,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

// POST /translate; a body that is not a JSON object counts as `{}`
pub async fn handle_translate(State(state): State<AppState>, body: Bytes) -> Response {
    let request: TranslateRequest = serde_json::from_slice(&body).unwrap_or_default();
    let text = request.text.unwrap_or_default();

    match translation_service::translate_text(state.translator.as_ref(), &text).await {
        Ok(translated) => Json(TranslateResponse { text: translated }).into_response(),
        Err(AppError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(TranslateErrorResponse { error: message })).into_response()
        }
        Err(e) => {
            tracing::error!("Translation failed: {}", e);
            let error = match e {
                AppError::ExternalService(message) => message,
                other => other.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(TranslateErrorResponse { error })).into_response()
        }
    }
}
