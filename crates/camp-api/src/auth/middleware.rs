use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use camp_db::{models::UserRole, repositories::user as user_repo};
use sqlx::PgPool;
use uuid::Uuid;

use super::{cookies::AUTH_COOKIE, jwt::verify_jwt_token};
use crate::{error::ApiError, state::AuthConfig};

/// Authenticated user extractor.
///
/// Reads the access token from `Authorization: Bearer`, falling back to the
/// encrypted `auth_token` cookie. Rejects with 401.
///
/// # Example
/// ```
/// use camp_api::{auth::AuthUser, error::ApiError};
///
/// async fn protected_route(auth_user: AuthUser) -> Result<String, ApiError> {
///     Ok(auth_user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let token = match bearer_token(&parts.headers) {
            Some(token) => token.to_owned(),
            None => {
                let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::Auth("Failed to read cookies".to_string()))?;
                jar.get(AUTH_COOKIE)
                    .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?
                    .value()
                    .to_owned()
            }
        };

        let claims = verify_jwt_token(&token, &auth_config.jwt_secret)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Auth("Invalid user ID in token".to_string()))?;

        Ok(Self {
            user_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

/// An [`AuthUser`] whose stored role is admin.
///
/// The token's role claim is checked first, then the account is re-read so a
/// demoted admin loses access before their access token expires. Deleted
/// accounts are rejected with 401, other roles with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

fn admin_required(user_id: Uuid) -> ApiError {
    tracing::warn!(user_id = %user_id, "Non-admin user denied admin route");
    ApiError::Forbidden("Admin access required".to_string())
}

impl<S> FromRequestParts<S> for AdminUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let mut user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(admin_required(user.user_id));
        }

        let pool = PgPool::from_ref(state);
        let account = user_repo::find_by_id(&pool, user.user_id)
            .await?
            .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;
        if !account.role.is_admin() {
            return Err(admin_required(user.user_id));
        }

        user.username = account.username;
        user.role = account.role;
        Ok(Self(user))
    }
}
