use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use camp_db::{models::Camp, repositories::camp as camp_repo};
use validator::Validate;

use super::model::{CreateCamp, UpdateCamp};
use crate::{
    ApiState, auth::AuthUser, error::ApiError, extract::ApiJson, middleware::rate_limit,
};

const DUPLICATE_CAMP: &str = "A camp with this name already exists";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // The registration form needs the camp dropdown before anyone signs in
    let public_routes = Router::new()
        .route("/api/camps", get(list_camps))
        .layer(make_rate_limit_layer!(
            rate_limit::PUBLIC_REPLENISH_MS,
            rate_limit::PUBLIC_BURST_SIZE
        ));

    let staff_routes = Router::new()
        .route("/api/camps", post(create_camp))
        .route("/api/camps/{id}", put(update_camp).delete(delete_camp))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(public_routes).merge(staff_routes)
}

fn camp_not_found() -> ApiError {
    ApiError::NotFound("Camp not found".to_string())
}

async fn list_camps(State(state): State<ApiState>) -> Result<Json<Vec<Camp>>, ApiError> {
    let camps = camp_repo::list(&state.pool).await?;
    Ok(Json(camps))
}

async fn create_camp(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<CreateCamp>,
) -> Result<(StatusCode, Json<Camp>), ApiError> {
    payload.validate()?;

    let camp = camp_repo::create(&state.pool, payload.name.trim(), payload.location.trim())
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_CAMP))?;

    tracing::info!(camp_id = camp.id, "Camp created");
    Ok((StatusCode::CREATED, Json(camp)))
}

async fn update_camp(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(camp_id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateCamp>,
) -> Result<Json<Camp>, ApiError> {
    payload.validate()?;

    let camp = camp_repo::update(
        &state.pool,
        camp_id,
        payload.name.as_deref().map(str::trim),
        payload.location.as_deref().map(str::trim),
    )
    .await
    .map_err(|e| ApiError::from_write(e, DUPLICATE_CAMP))?
    .ok_or_else(camp_not_found)?;

    Ok(Json(camp))
}

async fn delete_camp(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(camp_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if camp_repo::delete(&state.pool, camp_id).await? == 0 {
        return Err(camp_not_found());
    }

    tracing::info!(camp_id, "Camp deleted");
    Ok(StatusCode::NO_CONTENT)
}
