use camp_db::{models::UserAccount, repositories::user as user_repo};
use serde::Serialize;

use super::{jwt, password, refresh_token as rt};
use crate::{ApiState, error::ApiError};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Tokens returned by login and refresh
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserAccount,
    pub access_token: String,
    pub refresh_token: String,
}

/// Check a username/password pair.
///
/// Unknown usernames and wrong passwords fail with the same 401 message.
pub async fn authenticate(
    state: &ApiState,
    username: &str,
    password_input: &str,
) -> Result<UserAccount, ApiError> {
    let Some(credentials) = user_repo::find_credentials_by_username(&state.pool, username).await?
    else {
        password::verify_dummy(password_input, state.dummy_password_hash.clone()).await;
        return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
    };

    if !password::verify_password(password_input, &credentials.password_hash).await? {
        return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    Ok(credentials.into())
}

/// Sign an access token and issue a fresh refresh token for `user`
pub async fn start_session(state: &ApiState, user: UserAccount) -> Result<SessionResponse, ApiError> {
    let access_token = jwt::generate_jwt_token(
        user.id,
        &user.username,
        user.role,
        &state.jwt_secret,
        state.jwt_expiry_minutes,
    )?;
    let refresh_token =
        rt::issue_refresh_token(&state.pool, user.id, state.refresh_token_expiry_days).await?;

    Ok(SessionResponse {
        user,
        access_token,
        refresh_token,
    })
}
