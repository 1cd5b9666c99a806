use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_field(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ApiError::invalid_field(
            "password",
            format!("Password must be at most {MAX_PASSWORD_LEN} characters long"),
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let len = username.chars().count();
    if username.is_empty() {
        return Err(ApiError::invalid_field("username", "Username cannot be empty"));
    }
    if len < 3 {
        return Err(ApiError::invalid_field(
            "username",
            "Username must be at least 3 characters long",
        ));
    }
    if len > 30 {
        return Err(ApiError::invalid_field(
            "username",
            "Username must be at most 30 characters long",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::invalid_field(
            "username",
            "Username can only contain letters, numbers, underscores, and hyphens",
        ));
    }
    Ok(())
}
