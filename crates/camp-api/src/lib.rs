pub mod admin;
pub mod auth;
pub mod bootstrap;
pub mod bulk;
pub mod camp;
pub mod child;
pub mod config;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod metrics;
pub mod middleware;
pub mod normalization;
pub mod pregnant_woman;
pub mod router;
pub mod state;
pub mod stats;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig, CookieConfig};
