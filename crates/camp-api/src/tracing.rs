//! Log output setup.
//!
//! Development gets pretty, multi-line events with source locations.
//! Production emits one JSON object per event, flattened, with the current
//! request span (and its `request_id`) attached. `RUST_LOG` overrides the
//! default filter in both modes.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sqlx=warn,calamine=warn";
const PRODUCTION_FILTER: &str = "info,tower_http=info,sqlx=warn,calamine=warn";

pub fn init_tracing(env: Environment) {
    let default_filter = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    if env.is_development() {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .with_target(true),
            )
            .init();
    }

    tracing::info!(environment = ?env, "Tracing initialized");
}
