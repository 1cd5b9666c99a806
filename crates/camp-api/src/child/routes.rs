use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use camp_db::{models::Child, repositories::child as child_repo};

use super::model::{ChildPatch, ChildPayload, ParentLookup};
use crate::{
    ApiState,
    auth::{AuthUser, HouseholdRequester, ensure_household_member},
    error::ApiError,
    extract::ApiJson,
    middleware::rate_limit,
    normalization::normalize_id_number,
};

pub const DUPLICATE_CHILD: &str = "A child with this ID number is already registered";

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // Household self-service: registration, lookup, and edits guarded by `requesterId`
    let public_routes = Router::new()
        .route("/api/children", post(create_child))
        .route(
            "/api/public/children/{id}",
            put(update_own_child).delete(delete_own_child),
        )
        .route("/api/lookup/children", get(lookup_children))
        .layer(make_rate_limit_layer!(
            rate_limit::PUBLIC_REPLENISH_MS,
            rate_limit::PUBLIC_BURST_SIZE
        ));

    let staff_routes = Router::new()
        .route("/api/children", get(list_children))
        .route(
            "/api/children/{id}",
            get(get_child).put(update_child).delete(delete_child),
        )
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(public_routes).merge(staff_routes)
}

fn child_not_found() -> ApiError {
    ApiError::NotFound("Child not found".to_string())
}

async fn list_children(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Child>>, ApiError> {
    let children = child_repo::list(&state.pool).await?;
    Ok(Json(children))
}

async fn create_child(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<ChildPayload>,
) -> Result<(StatusCode, Json<Child>), ApiError> {
    let new_child = payload.into_new_child()?;

    let child = child_repo::create(&state.pool, &new_child)
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_CHILD))?;

    tracing::info!(child_id = child.id, "Child registered");
    Ok((StatusCode::CREATED, Json(child)))
}

async fn get_child(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(child_id): Path<i32>,
) -> Result<Json<Child>, ApiError> {
    let child = child_repo::find_by_id(&state.pool, child_id)
        .await?
        .ok_or_else(child_not_found)?;
    Ok(Json(child))
}

/// Lock, patch, validate, and write back a child.
///
/// With a requester, the stored record must belong to their household and
/// the patched record must still do so.
async fn patch_child(
    state: &ApiState,
    child_id: i32,
    patch: ChildPatch,
    requester: Option<&HouseholdRequester>,
) -> Result<Child, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = child_repo::find_by_id_for_update(&mut *tx, child_id)
        .await?
        .ok_or_else(child_not_found)?;
    if let Some(requester) = requester {
        ensure_household_member(&existing, requester)?;
    }

    let updated = patch.apply(existing).into_new_child()?;
    if let Some(requester) = requester {
        ensure_household_member(&updated, requester)?;
    }

    let child = child_repo::update(&mut *tx, child_id, &updated)
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_CHILD))?
        .ok_or_else(child_not_found)?;

    tx.commit().await?;
    Ok(child)
}

async fn update_child(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(child_id): Path<i32>,
    ApiJson(patch): ApiJson<ChildPatch>,
) -> Result<Json<Child>, ApiError> {
    let child = patch_child(&state, child_id, patch, None).await?;
    Ok(Json(child))
}

async fn update_own_child(
    requester: HouseholdRequester,
    State(state): State<ApiState>,
    Path(child_id): Path<i32>,
    ApiJson(patch): ApiJson<ChildPatch>,
) -> Result<Json<Child>, ApiError> {
    let child = patch_child(&state, child_id, patch, Some(&requester)).await?;
    Ok(Json(child))
}

async fn delete_child(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(child_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if child_repo::delete(&state.pool, child_id).await? == 0 {
        return Err(child_not_found());
    }

    tracing::info!(child_id, "Child deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_own_child(
    requester: HouseholdRequester,
    State(state): State<ApiState>,
    Path(child_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = child_repo::find_by_id_for_update(&mut *tx, child_id)
        .await?
        .ok_or_else(child_not_found)?;
    ensure_household_member(&existing, &requester)?;

    child_repo::delete(&mut *tx, child_id).await?;
    tx.commit().await?;

    tracing::info!(child_id, "Child deleted by household");
    Ok(StatusCode::NO_CONTENT)
}

async fn lookup_children(
    State(state): State<ApiState>,
    Query(query): Query<ParentLookup>,
) -> Result<Json<Vec<Child>>, ApiError> {
    let parent_id = query
        .parent_id
        .as_deref()
        .map(normalize_id_number)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::invalid_field("parentId", "parentId is required"))?;

    let children = child_repo::lookup_by_parent_id(&state.pool, &parent_id).await?;
    Ok(Json(children))
}
