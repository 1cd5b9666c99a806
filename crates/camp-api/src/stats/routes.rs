use axum::{Json, Router, extract::State, routing::get};
use camp_db::{
    models::{GenderCount, MonthCount, StatusCount},
    repositories::stats as stats_repo,
};
use serde::Serialize;

use crate::{ApiState, auth::AuthUser, error::ApiError, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/api/stats/dashboard", get(dashboard))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_children: i64,
    pub total_pregnant_women: i64,
    pub total_camps: i64,
    /// Children currently breastfeeding
    pub total_mothers: i64,
    pub children_by_gender: Vec<GenderCount>,
    pub pregnant_women_by_month: Vec<MonthCount>,
    pub children_health_status_counts: Vec<StatusCount>,
    pub pregnant_women_health_status_counts: Vec<StatusCount>,
}

async fn dashboard(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let pool = &state.pool;

    let (totals, by_gender, by_month, child_statuses, woman_statuses) = tokio::try_join!(
        stats_repo::totals(pool),
        stats_repo::children_by_gender(pool),
        stats_repo::pregnant_women_by_month(pool),
        stats_repo::children_health_statuses(pool),
        stats_repo::pregnant_women_health_statuses(pool),
    )?;

    Ok(Json(DashboardStats {
        total_children: totals.total_children,
        total_pregnant_women: totals.total_pregnant_women,
        total_camps: totals.total_camps,
        total_mothers: totals.total_mothers,
        children_by_gender: by_gender,
        pregnant_women_by_month: by_month,
        children_health_status_counts: child_statuses,
        pregnant_women_health_status_counts: woman_statuses,
    }))
}
