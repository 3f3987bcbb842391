// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, User},
};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = r#"
    id,
    username,
    email,
    password_hash,
    mobile,
    roll_no,
    college,
    class_name,
    created_at
"#;

/// Looks a user up by numeric id (the id stored in the session).
pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by id: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
    ))
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Looks a user up by email (the login key).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by email: {}", email);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    if user.is_none() {
        tracing::debug!("No user for email '{}'.", email);
    }
    Ok(user)
}

pub async fn count_users(db_pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await?;
    Ok(count)
}

/// Inserts a user whose password is already hashed and returns the stored row.
///
/// A UNIQUE violation on `email` becomes `AppError::Conflict`.
pub async fn create_user(db_pool: &SqlitePool, new_user: &NewUser<'_>) -> AppResult<User> {
    tracing::info!("Creating user: {}", new_user.email);

    let insert_result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, mobile, roll_no, college, class_name)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(new_user.username)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.mobile)
    .bind(new_user.roll_no)
    .bind(new_user.college)
    .bind(new_user.class_name)
    .execute(db_pool)
    .await;

    let user_id = match insert_result {
        Ok(done) => done.last_insert_rowid(),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Email '{}' is already registered.", new_user.email);
            return Err(AppError::Conflict("Email already registered.".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let user = find_user_by_id(db_pool, user_id).await?.ok_or_else(|| {
        tracing::error!("User {} vanished right after insert", user_id);
        AppError::InternalServerError
    })?;
    tracing::info!("✅ User '{}' created with id {}.", user.email, user.id);
    Ok(user)
}
