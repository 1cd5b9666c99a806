//! Periodic maintenance tasks.

use std::time::Duration;

use camp_db::repositories::token as token_repo;
use sqlx::PgPool;
use tokio::{task::JoinHandle, time::interval};

const FIRST_RUN_DELAY: Duration = Duration::from_secs(60 * 60);
const TOKEN_CLEANUP_PERIOD: Duration = Duration::from_secs(6 * 60 * 60);

/// Start all background jobs; the handles can be aborted on shutdown
pub fn start_background_jobs(pool: PgPool) -> Vec<JoinHandle<()>> {
    vec![tokio::spawn(periodic_refresh_token_cleanup(pool))]
}

/// Delete expired refresh tokens every six hours.
///
/// Rotation already removes tokens that are presented after expiry; this
/// catches the ones that are never presented again.
async fn periodic_refresh_token_cleanup(pool: PgPool) {
    tokio::time::sleep(FIRST_RUN_DELAY).await;

    let mut interval = interval(TOKEN_CLEANUP_PERIOD);
    loop {
        interval.tick().await;

        match token_repo::cleanup_expired_refresh_tokens(&pool).await {
            Ok(deleted) if deleted > 0 => {
                tracing::info!(deleted, "Expired refresh tokens cleaned up");
            }
            Ok(_) => {
                tracing::debug!("Token cleanup complete: no expired tokens found");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clean up expired refresh tokens");
            }
        }
    }
}
