use camp_db::{
    models::{UserAccount, UserRole},
    repositories::user as user_repo,
};
use sqlx::PgPool;

use crate::{
    ApiConfig,
    auth::{
        password::hash_password,
        validation::{validate_password, validate_username},
    },
    error::ApiError,
};

/// Create the first admin account from `BOOTSTRAP_ADMIN_*` when no admin
/// exists yet. Returns the created account, if any.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &ApiConfig,
) -> Result<Option<UserAccount>, ApiError> {
    if user_repo::count_admins(pool).await? > 0 {
        return Ok(None);
    }

    let (Some(username), Some(password)) = (
        config.bootstrap_admin_username.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) else {
        tracing::warn!(
            "No admin account exists; set BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD to create one"
        );
        return Ok(None);
    };

    let username = username.trim();
    validate_username(username)?;
    validate_password(password)?;

    let password_hash = hash_password(password, config.bcrypt_cost).await?;
    let admin = user_repo::create(pool, username, &password_hash, UserRole::Admin)
        .await
        .map_err(|e| ApiError::from_write(e, "Bootstrap admin username is already taken"))?;

    tracing::info!(user_id = %admin.id, username = %admin.username, "Bootstrap admin created");
    Ok(Some(admin))
}
