use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use camp_db::{models::UserAccount, repositories::user as user_repo};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    cookies::{
        AUTH_COOKIE, REFRESH_COOKIE, create_auth_cookie, create_refresh_token_cookie,
        removal_cookie,
    },
    jwt,
    middleware::AuthUser,
    refresh_token as rt,
    service::{self, SessionResponse},
};
use crate::{
    ApiState, error::ApiError, extract::ApiJson, metrics::record_auth_event,
    middleware::rate_limit,
};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    let login_routes = Router::new()
        .route("/api/auth/login", post(login))
        .layer(make_rate_limit_layer!(
            rate_limit::AUTH_REPLENISH_MS,
            rate_limit::AUTH_BURST_SIZE
        ));
    let login_routes = rate_limit::apply_timing_safe(login_routes);

    let session_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/user", get(current_user))
        .route("/api/refresh", post(refresh))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(login_routes).merge(session_routes)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    refresh_token: Option<String>,
}

fn session_cookies(
    jar: PrivateCookieJar,
    state: &ApiState,
    session: &SessionResponse,
) -> PrivateCookieJar {
    let cookie_config = state.cookie_config();
    jar.add(create_auth_cookie(session.access_token.clone(), &cookie_config))
        .add(create_refresh_token_cookie(
            session.refresh_token.clone(),
            &cookie_config,
        ))
}

/// Body token first, then the `refresh_token` cookie
fn presented_refresh_token(body: Option<RefreshRequest>, jar: &PrivateCookieJar) -> Option<String> {
    body.and_then(|body| body.refresh_token)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| jar.get(REFRESH_COOKIE).map(|cookie| cookie.value().to_owned()))
}

async fn login(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<SessionResponse>), ApiError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::invalid_field("username", "Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::invalid_field("password", "Password is required"));
    }

    let user = match service::authenticate(&state, username, &payload.password).await {
        Ok(user) => user,
        Err(err) => {
            record_auth_event("login", false);
            tracing::info!(username, "Failed login attempt");
            return Err(err);
        }
    };

    let session = service::start_session(&state, user).await?;
    record_auth_event("login", true);
    tracing::info!(user_id = %session.user.id, "User logged in");

    let jar = session_cookies(jar, &state, &session);
    Ok((jar, Json(session)))
}

async fn logout(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    body: Option<ApiJson<RefreshRequest>>,
) -> Result<(PrivateCookieJar, Json<Value>), ApiError> {
    if let Some(token) = presented_refresh_token(body.map(|ApiJson(body)| body), &jar) {
        rt::revoke_refresh_token(&state.pool, &token).await?;
    }
    record_auth_event("logout", true);

    let cookie_config = state.cookie_config();
    let jar = jar
        .remove(removal_cookie(AUTH_COOKIE, &cookie_config))
        .remove(removal_cookie(REFRESH_COOKIE, &cookie_config));

    Ok((jar, Json(json!({ "message": "Logged out successfully" }))))
}

async fn current_user(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserAccount>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    Ok(Json(user))
}

async fn refresh(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    body: Option<ApiJson<RefreshRequest>>,
) -> Result<(PrivateCookieJar, Json<SessionResponse>), ApiError> {
    let token = presented_refresh_token(body.map(|ApiJson(body)| body), &jar)
        .ok_or_else(|| ApiError::Auth("No refresh token provided".to_string()))?;

    let (user_id, refresh_token) =
        match rt::verify_and_rotate_refresh_token(&state.pool, &token, state.refresh_token_expiry_days)
            .await
        {
            Ok(rotated) => rotated,
            Err(err) => {
                record_auth_event("refresh", false);
                return Err(err);
            }
        };

    let Some(user) = user_repo::find_by_id(&state.pool, user_id).await? else {
        rt::revoke_refresh_token(&state.pool, &refresh_token).await?;
        return Err(ApiError::Auth("User not found".to_string()));
    };

    let access_token = jwt::generate_jwt_token(
        user.id,
        &user.username,
        user.role,
        &state.jwt_secret,
        state.jwt_expiry_minutes,
    )?;
    record_auth_event("refresh", true);

    let session = SessionResponse {
        user,
        access_token,
        refresh_token,
    };
    let jar = session_cookies(jar, &state, &session);
    Ok((jar, Json(session)))
}
