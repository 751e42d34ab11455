use std::sync::OnceLock;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{DbError, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::user::{CredentialsPayload, User};
use crate::utils::jwt::JwtKeys;
use crate::utils::security::{hash_password, verify_password};

const DUPLICATE: &str = "User already exists";

/// Hash checked against when the email is unknown, so both login failures
/// cost one Argon2 verification.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("ctv-admin-dummy-password").unwrap_or_default())
}

fn required(payload: CredentialsPayload) -> AppResult<(String, String)> {
    let email = payload.email.map(|e| e.trim().to_string()).unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    Ok((email, password))
}

pub async fn register<U: UserRepository + ?Sized>(
    repo: &U,
    payload: CredentialsPayload,
) -> AppResult<User> {
    let (email, password) = required(payload)?;

    if repo.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE.to_string()));
    }

    // Never store the plain password
    let password_hash =
        hash_password(&password).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))?;

    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        created_at: Utc::now(),
    };
    match repo.insert_user(&user).await {
        Ok(()) => {}
        Err(DbError::UniqueViolation(_)) => return Err(AppError::Conflict(DUPLICATE.to_string())),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(id = %user.id, "User registered");
    Ok(user)
}

/// Returns a signed session token. Unknown email and wrong password fail the same way.
pub async fn login<U: UserRepository + ?Sized>(
    repo: &U,
    keys: &JwtKeys,
    payload: CredentialsPayload,
) -> AppResult<String> {
    let (email, password) = required(payload)?;

    let Some(user) = repo.find_user_by_email(&email).await? else {
        verify_password(&password, dummy_hash());
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    keys.issue(&user)
        .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}
