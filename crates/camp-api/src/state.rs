use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

use crate::{ApiConfig, auth::password, config::Environment};

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub cookie_key: Key,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
    pub bcrypt_cost: u32,
    pub environment: Environment,
    pub cookie_domain: Option<String>,
    pub max_import_bytes: usize,
    /// See [`password::dummy_hash`]
    pub dummy_password_hash: Option<Arc<str>>,
}

impl ApiState {
    /// Build the shared state. `config` must already be validated, the cookie
    /// key derivation panics on secrets shorter than 64 bytes.
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        Self {
            pool,
            cookie_key: Key::from(config.cookie_secret.as_bytes()),
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiry_minutes: config.jwt_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
            bcrypt_cost: config.bcrypt_cost,
            environment: config.env,
            cookie_domain: config.cookie_domain.clone(),
            max_import_bytes: config.max_import_bytes,
            dummy_password_hash: password::dummy_hash(config.bcrypt_cost),
        }
    }

    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            environment: self.environment,
            domain: self.cookie_domain.clone(),
            access_expiry_minutes: self.jwt_expiry_minutes,
            refresh_expiry_days: self.refresh_token_expiry_days,
        }
    }
}

/// The slice of state the auth extractors need
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Attributes shared by every cookie the API sets
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub environment: Environment,
    pub domain: Option<String>,
    pub access_expiry_minutes: i64,
    pub refresh_expiry_days: i64,
}

impl FromRef<ApiState> for Key {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<ApiState> for PgPool {
    fn from_ref(state: &ApiState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        Self {
            jwt_secret: state.jwt_secret.clone(),
        }
    }
}

impl FromRef<ApiState> for CookieConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_config()
    }
}
