// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, RegisterForm, User},
    services::user_service,
};
use sqlx::SqlitePool;

/// Checks a password against the stored bcrypt hash.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verifying bcrypt hash...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt failed to verify password: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Produces a salted bcrypt hash for a password.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Generating bcrypt hash...");
        bcrypt::hash(&password, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt failed to hash password: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Registers a student.
///
/// Mismatched passwords fail with `Validation`, a known email with `Conflict`;
/// neither touches the store.
pub async fn register(db_pool: &SqlitePool, form: &RegisterForm) -> AppResult<User> {
    if form.password != form.confirm {
        tracing::warn!("Registration for '{}' rejected: passwords differ.", form.email);
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    if user_service::find_user_by_email(db_pool, &form.email).await?.is_some() {
        tracing::warn!("Registration for '{}' rejected: email taken.", form.email);
        return Err(AppError::Conflict("Email already registered.".to_string()));
    }

    let password_hash = hash_password(&form.password).await?;
    let new_user = NewUser {
        username: &form.username,
        email: &form.email,
        password_hash: &password_hash,
        mobile: &form.mobile,
        roll_no: &form.roll_no,
        college: &form.college,
        class_name: &form.class_name,
    };
    user_service::create_user(db_pool, &new_user).await
}

/// Resolves an email/password pair to its user, or `InvalidCredentials`.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let Some(user) = user_service::find_user_by_email(db_pool, email).await? else {
        tracing::warn!("Login failed: unknown email '{}'", email);
        return Err(AppError::InvalidCredentials);
    };

    if verify_password(password, &user.password_hash).await? {
        Ok(user)
    } else {
        tracing::warn!("Login failed: wrong password for '{}'", email);
        Err(AppError::InvalidCredentials)
    }
}
