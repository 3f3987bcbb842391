// src/templates.rs
use crate::{
    error::{AppError, AppResult},
    models::{job::JobRecord, user::User},
    web::flash::Flash,
};
use askama::Template;
use axum::response::Html;

// Every page extends base.html, which renders `flashes`

#[derive(Template)]
#[template(path = "check_role.html")]
pub struct CheckRolePage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "no_access.html")]
pub struct NoAccessPage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flashes: Vec<Flash>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub flashes: Vec<Flash>,
    pub username: String,
    pub description: String,
    pub career_goal: String,
    pub jobs: Vec<JobRecord>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub flashes: Vec<Flash>,
    pub user: User,
}

/// Renders a page, logging and mapping template failures.
pub fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    page.render().map(Html).map_err(|e| {
        tracing::error!("Failed to render template: {}", e);
        AppError::TemplateError(e)
    })
}
