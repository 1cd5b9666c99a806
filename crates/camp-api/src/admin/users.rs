use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use camp_db::{
    models::{UserAccount, UserRole},
    repositories::user as user_repo,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    ApiState,
    auth::{
        AdminUser,
        password::hash_password,
        refresh_token::revoke_all_user_tokens,
        validation::{validate_password, validate_username},
    },
    error::ApiError,
    extract::ApiJson,
};

const DUPLICATE_USERNAME: &str = "Username already exists";

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/api/admin/users", get(list_users).post(create_user))
        .route(
            "/api/admin/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateUserRequest {
    username: String,
    password: String,
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateUserRequest {
    username: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

fn parse_role(role: &str) -> Result<UserRole, ApiError> {
    match role.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(UserRole::Admin),
        "user" => Ok(UserRole::User),
        _ => Err(ApiError::invalid_field("role", "Role must be 'admin' or 'user'")),
    }
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

async fn list_users(
    _admin: AdminUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<UserAccount>>, ApiError> {
    Ok(Json(user_repo::list(&state.pool).await?))
}

async fn get_user(
    _admin: AdminUser,
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserAccount>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(user))
}

/// Accounts created from the admin screen are admins unless a role is given
async fn create_user(
    AdminUser(admin): AdminUser,
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserAccount>), ApiError> {
    let username = payload.username.trim();
    validate_username(username)?;
    validate_password(&payload.password)?;
    let role = payload
        .role
        .as_deref()
        .map(parse_role)
        .transpose()?
        .unwrap_or(UserRole::Admin);

    let password_hash = hash_password(&payload.password, state.bcrypt_cost).await?;
    let user = user_repo::create(&state.pool, username, &password_hash, role)
        .await
        .map_err(|e| ApiError::from_write(e, DUPLICATE_USERNAME))?;

    tracing::info!(
        created_by = %admin.user_id,
        user_id = %user.id,
        role = role.as_str(),
        "User created"
    );
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    AdminUser(admin): AdminUser,
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    let username = payload.username.as_deref().map(str::trim);
    if let Some(username) = username {
        validate_username(username)?;
    }
    let role = payload.role.as_deref().map(parse_role).transpose()?;
    if user_id == admin.user_id && role == Some(UserRole::User) {
        return Err(ApiError::Forbidden(
            "You cannot remove your own admin role".to_string(),
        ));
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password, state.bcrypt_cost).await?)
        }
        None => None,
    };

    let user = user_repo::update(
        &state.pool,
        user_id,
        username,
        password_hash.as_deref(),
        role,
    )
    .await
    .map_err(|e| ApiError::from_write(e, DUPLICATE_USERNAME))?
    .ok_or_else(user_not_found)?;

    // Sessions carry the old role and credentials until their refresh tokens go
    if password_hash.is_some() || role.is_some() {
        let revoked = revoke_all_user_tokens(&state.pool, user_id).await?;
        tracing::info!(user_id = %user_id, revoked, "Refresh tokens revoked after account change");
    }

    Ok(Json(user))
}

async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if user_id == admin.user_id {
        return Err(ApiError::Forbidden(
            "You cannot delete your own account".to_string(),
        ));
    }

    if user_repo::delete(&state.pool, user_id).await? == 0 {
        return Err(user_not_found());
    }

    tracing::info!(deleted_by = %admin.user_id, user_id = %user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
