// src/web/search_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::job::SearchForm,
    state::AppState,
    templates::{render, IndexPage, ResultsPage},
    web::{
        flash::{self, Flash},
        mw_auth::CurrentUser,
    },
};
use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

// POST /search (behind require_auth)
pub async fn handle_search(
    State(state): State<AppState>,
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<SearchForm>,
) -> AppResult<Response> {
    let description = form.description.trim();
    let industry = form.industry.trim();
    tracing::info!("User {} searching for '{}'", user.id, description);

    match state.job_search.search(description, industry, &form.experience).await {
        Ok(jobs) => {
            let page = ResultsPage {
                flashes: flash::take(&session).await,
                username: user.username,
                description: description.to_string(),
                career_goal: form.career_goal,
                jobs,
            };
            Ok(render(&page)?.into_response())
        }
        Err(AppError::Validation(message)) => {
            let mut flashes = flash::take(&session).await;
            flashes.push(Flash::new("danger", &message));
            let page = IndexPage {
                flashes,
                username: user.username,
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(e),
    }
}
