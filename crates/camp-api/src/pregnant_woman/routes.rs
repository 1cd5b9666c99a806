use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use camp_db::{models::PregnantWoman, repositories::pregnant_woman as woman_repo};

use super::model::{PregnantWomanPatch, PregnantWomanPayload, SpouseLookup};
use crate::{
    ApiState,
    auth::{AuthUser, HouseholdRequester, ensure_household_member},
    error::ApiError,
    extract::ApiJson,
    middleware::rate_limit,
    normalization::normalize_id_number,
};

pub const DUPLICATE_WOMAN: &str = "A pregnant woman with this ID number is already registered";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    let public_routes = Router::new()
        .route("/api/pregnant-women", post(create_pregnant_woman))
        .route(
            "/api/public/pregnant-women/{id}",
            put(update_own_pregnant_woman).delete(delete_own_pregnant_woman),
        )
        .route("/api/lookup/pregnant-women", get(lookup_pregnant_women))
        .layer(make_rate_limit_layer!(
            rate_limit::PUBLIC_REPLENISH_MS,
            rate_limit::PUBLIC_BURST_SIZE
        ));

    let staff_routes = Router::new()
        .route("/api/pregnant-women", get(list_pregnant_women))
        .route(
            "/api/pregnant-women/{id}",
            get(get_pregnant_woman)
                .put(update_pregnant_woman)
                .delete(delete_pregnant_woman),
        )
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(public_routes).merge(staff_routes)
}

fn not_found() -> ApiError {
    ApiError::NotFound("Pregnant woman not found".to_string())
}

async fn list_pregnant_women(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<PregnantWoman>>, ApiError> {
    Ok(Json(woman_repo::list(&state.pool).await?))
}

async fn create_pregnant_woman(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<PregnantWomanPayload>,
) -> Result<(StatusCode, Json<PregnantWoman>), ApiError> {
    let new_woman = payload.into_new_pregnant_woman()?;

    let woman = woman_repo::create(&state.pool, &new_woman)
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_WOMAN))?;

    tracing::info!(pregnant_woman_id = woman.id, "Pregnant woman registered");
    Ok((StatusCode::CREATED, Json(woman)))
}

async fn get_pregnant_woman(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(woman_id): Path<i32>,
) -> Result<Json<PregnantWoman>, ApiError> {
    let woman = woman_repo::find_by_id(&state.pool, woman_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(woman))
}

async fn patch_pregnant_woman(
    state: &ApiState,
    woman_id: i32,
    patch: PregnantWomanPatch,
    requester: Option<&HouseholdRequester>,
) -> Result<PregnantWoman, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = woman_repo::find_by_id_for_update(&mut *tx, woman_id)
        .await?
        .ok_or_else(not_found)?;
    if let Some(requester) = requester {
        ensure_household_member(&existing, requester)?;
    }

    let updated = patch.apply(existing).into_new_pregnant_woman()?;
    if let Some(requester) = requester {
        ensure_household_member(&updated, requester)?;
    }

    let woman = woman_repo::update(&mut *tx, woman_id, &updated)
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_WOMAN))?
        .ok_or_else(not_found)?;

    tx.commit().await?;
    Ok(woman)
}

async fn update_pregnant_woman(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(woman_id): Path<i32>,
    ApiJson(patch): ApiJson<PregnantWomanPatch>,
) -> Result<Json<PregnantWoman>, ApiError> {
    let woman = patch_pregnant_woman(&state, woman_id, patch, None).await?;
    Ok(Json(woman))
}

async fn update_own_pregnant_woman(
    requester: HouseholdRequester,
    State(state): State<ApiState>,
    Path(woman_id): Path<i32>,
    ApiJson(patch): ApiJson<PregnantWomanPatch>,
) -> Result<Json<PregnantWoman>, ApiError> {
    let woman = patch_pregnant_woman(&state, woman_id, patch, Some(&requester)).await?;
    Ok(Json(woman))
}

async fn delete_pregnant_woman(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(woman_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if woman_repo::delete(&state.pool, woman_id).await? == 0 {
        return Err(not_found());
    }

    tracing::info!(pregnant_woman_id = woman_id, "Pregnant woman deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_own_pregnant_woman(
    requester: HouseholdRequester,
    State(state): State<ApiState>,
    Path(woman_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = woman_repo::find_by_id_for_update(&mut *tx, woman_id)
        .await?
        .ok_or_else(not_found)?;
    ensure_household_member(&existing, &requester)?;

    woman_repo::delete(&mut *tx, woman_id).await?;
    tx.commit().await?;

    tracing::info!(pregnant_woman_id = woman_id, "Pregnant woman deleted by household");
    Ok(StatusCode::NO_CONTENT)
}

/// Matches the husband's ID as well as the woman's own
async fn lookup_pregnant_women(
    State(state): State<ApiState>,
    Query(query): Query<SpouseLookup>,
) -> Result<Json<Vec<PregnantWoman>>, ApiError> {
    let spouse_id = query
        .spouse_id
        .as_deref()
        .map(normalize_id_number)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::invalid_field("spouseId", "spouseId is required"))?;

    let women = woman_repo::lookup_by_spouse_id(&state.pool, &spouse_id).await?;
    Ok(Json(women))
}
