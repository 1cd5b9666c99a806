//! Admin-only management of user accounts and system settings.

pub mod settings;
pub mod users;

use axum::Router;

use crate::{ApiState, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .merge(users::routes())
        .merge(settings::routes())
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}
