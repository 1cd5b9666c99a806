use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use camp_api::{ApiConfig, ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from `.env` and the environment
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    camp_api::tracing::init_tracing(config.env);
    let metrics_handle = camp_api::metrics::init_metrics()?;

    let pool = camp_db::create_pool(&config.database_url, config.db_max_connections).await?;
    camp_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    if config.seed_default_camps {
        let seeded = camp_db::seed_default_camps(&pool).await?;
        if seeded > 0 {
            tracing::info!(seeded, "Default camps created");
        }
    }
    camp_api::bootstrap::bootstrap_admin(&pool, &config).await?;

    let state = ApiState::new(&config, pool);
    let job_handles = camp_api::jobs::start_background_jobs(state.pool.clone());

    let cors = camp_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(camp_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = camp_api::router::router(&state)
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(camp_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            camp_api::middleware::request_id::request_id_middleware,
        ));

    let app = camp_api::middleware::security_headers::apply_security_headers(app, config.env);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, environment = ?config.env, "Server listening");

    // Rate limiting keys on the peer address when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    for handle in job_handles {
        handle.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = wait_for_sigterm(tokio::signal::unix::signal(
        tokio::signal::unix::SignalKind::terminate(),
    ));

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Resolves on SIGTERM. A failed registration never resolves, so the server
/// keeps running until Ctrl+C.
#[cfg(unix)]
async fn wait_for_sigterm(registration: std::io::Result<tokio::signal::unix::Signal>) {
    match registration {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}
