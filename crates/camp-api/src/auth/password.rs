//! bcrypt hashing off the async runtime.

use std::sync::Arc;

use crate::error::ApiError;

/// Hash compared against when a username does not exist.
///
/// Built with the configured cost so unknown and known usernames cost the
/// same bcrypt work.
pub fn dummy_hash(cost: u32) -> Option<Arc<str>> {
    bcrypt::hash("camp-registry-dummy-password", cost)
        .ok()
        .map(Arc::from)
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}

/// Burn one verification for a username that does not exist
pub async fn verify_dummy(password: &str, dummy_hash: Option<Arc<str>>) {
    let Some(hash) = dummy_hash else {
        return;
    };
    let password = password.to_owned();
    let _ = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await;
}
