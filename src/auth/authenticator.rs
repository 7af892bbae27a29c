/// Token Authenticator
///
/// Resolves a presented access token to the single account that owns it.
/// Token possession alone authenticates; no password is involved here.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AuthError, StoreError};

/// Account identity as established by a successful token lookup.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

/// Authenticate a presented access token
///
/// The match is exact and whole-value. Zero matching accounts is the
/// unauthenticated outcome. More than one matching account means the
/// token-uniqueness contract is broken; the lookup fails closed rather
/// than picking an arbitrary row.
///
/// # Errors
/// - `AuthError::NotLoggedIn` if no account holds the token
/// - `StoreError::TokenCollision` if several accounts hold the token
/// - storage errors from the underlying query
pub async fn authenticate(
    pool: &PgPool,
    presented_token: &str,
) -> Result<AuthenticatedUser, AppError> {
    let matches = sqlx::query_as::<_, AuthenticatedUser>(
        "SELECT id, username FROM users WHERE access_token = $1",
    )
    .bind(presented_token)
    .fetch_all(pool)
    .await?;

    match matches.as_slice() {
        [] => Err(AppError::Auth(AuthError::NotLoggedIn)),
        [user] => Ok(user.clone()),
        _ => {
            tracing::error!(
                count = matches.len(),
                "Multiple accounts share one access token"
            );
            Err(AppError::Store(StoreError::TokenCollision))
        }
    }
}
