// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// A row of the 'users' table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub mobile: String,
    pub roll_no: String,
    pub college: String,
    pub class_name: String,
    pub created_at: NaiveDateTime,
}

// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// Registration form fields (`password` is raw here, hashed by auth_service)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub mobile: String,
    pub roll_no: String,
    pub college: String,
    pub class_name: String,
}

/// Validated user data ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub mobile: &'a str,
    pub roll_no: &'a str,
    pub college: &'a str,
    pub class_name: &'a str,
}
