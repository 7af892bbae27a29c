/// Authentication Routes
///
/// Handles account creation and credential login.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{generate_access_token, hash_password, verify_password};
use crate::error::{AppError, AuthError, ValidationError};

/// Account creation request
#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Credential login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /signup
///
/// Create a new account: hash the password, issue the opaque access token,
/// persist the row. The token is bound to the account here but deliberately
/// NOT echoed back; clients obtain it through login.
///
/// # Errors
/// - 400: missing/empty field, or username already taken (the insert's
///   unique violation is the sole duplicate arbiter; no pre-check)
pub async fn signup(
    form: web::Json<SignupRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    require_field("username", &form.username)?;
    require_field("password", &form.password)?;
    require_field("email", &form.email)?;

    let password_hash = hash_password(&form.password)?;
    let access_token = generate_access_token();
    let user_id = Uuid::new_v4();

    // On a duplicate username the insert fails and the freshly issued
    // token is discarded along with it.
    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, email, access_token, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(user_id)
    .bind(&form.username)
    .bind(&password_hash)
    .bind(&form.email)
    .bind(&access_token)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await?;

    tracing::info!(
        user_id = %user_id,
        username = %form.username,
        "Account created"
    );

    Ok(HttpResponse::Created().json(json!({
        "response": {
            "name": form.username,
            "id": user_id.to_string()
        },
        "success": true
    })))
}

/// POST /login
///
/// Verify username/password and return the access token bound at signup.
/// Unknown username and wrong password share one outcome so callers cannot
/// probe which half failed.
///
/// # Errors
/// - 401: unknown username or password mismatch
/// - 400: storage fault during the lookup
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    require_field("username", &form.username)?;
    require_field("password", &form.password)?;

    let row = sqlx::query_as::<_, (Uuid, String, String, String)>(
        "SELECT id, username, password_hash, access_token FROM users WHERE username = $1",
    )
    .bind(&form.username)
    .fetch_optional(pool.get_ref())
    .await?;

    let (user_id, username, password_hash, access_token) = match row {
        Some(row) => row,
        None => return Err(AppError::Auth(AuthError::InvalidCredentials)),
    };

    if !verify_password(&form.password, &password_hash)? {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    tracing::info!(user_id = %user_id, "User logged in");

    Ok(HttpResponse::Ok().json(json!({
        "response": {
            "username": username,
            "userId": user_id.to_string(),
            "accessToken": access_token
        },
        "success": true
    })))
}

fn require_field(name: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(ValidationError::EmptyField(
            name.to_string(),
        )));
    }
    Ok(())
}
