use base64::Engine;
use camp_db::repositories::token as token_repo;
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Generate an opaque refresh token.
///
/// Returns the token for the client and its SHA-256 hex digest for storage.
pub fn generate_refresh_token() -> (String, String) {
    let mut token_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut token_bytes);

    let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(token_bytes);
    let token_hash = hash_refresh_token(&token);

    (token, token_hash)
}

pub fn hash_refresh_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Issue and persist a new refresh token for `user_id`, returning the raw token
pub async fn issue_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    expiry_days: i64,
) -> Result<String, ApiError> {
    let (token, token_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(expiry_days);

    token_repo::store_refresh_token(pool, user_id, &token_hash, expires_at).await?;

    Ok(token)
}

/// Consume `token` and issue its replacement in one transaction.
///
/// Returns the owning user id and the new raw token. Expired tokens are
/// deleted and rejected.
pub async fn verify_and_rotate_refresh_token(
    pool: &PgPool,
    token: &str,
    expiry_days: i64,
) -> Result<(Uuid, String), ApiError> {
    let token_hash = hash_refresh_token(token);

    let mut tx = pool.begin().await?;

    let record = token_repo::find_refresh_token_by_hash(&mut *tx, &token_hash)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid refresh token".to_string()))?;

    token_repo::delete_refresh_token(&mut *tx, record.id).await?;

    if record.expires_at < Utc::now() {
        tx.commit().await?;
        return Err(ApiError::Auth("Refresh token expired".to_string()));
    }

    let (new_token, new_token_hash) = generate_refresh_token();
    let new_expires_at = Utc::now() + chrono::Duration::days(expiry_days);
    token_repo::store_refresh_token(&mut *tx, record.user_id, &new_token_hash, new_expires_at)
        .await?;

    tx.commit().await?;

    Ok((record.user_id, new_token))
}

/// Revoke one refresh token. Unknown tokens are not an error.
pub async fn revoke_refresh_token(pool: &PgPool, token: &str) -> Result<u64, ApiError> {
    let rows = token_repo::delete_refresh_token_by_hash(pool, &hash_refresh_token(token)).await?;
    Ok(rows)
}

/// Revoke every refresh token of a user (sign out everywhere)
pub async fn revoke_all_user_tokens(pool: &PgPool, user_id: Uuid) -> Result<u64, ApiError> {
    let rows = token_repo::delete_all_user_refresh_tokens(pool, user_id).await?;
    Ok(rows)
}
