//! JSON body extractor whose rejections use the API error body.

use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Drop-in for [`axum::Json`] on request bodies.
///
/// Malformed bodies are answered with 400 `{error, field?}` instead of
/// axum's plain-text 400/415/422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `None` when the request carries no JSON content type
impl<S, T> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|Json(value)| Self(value)))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => data_error(&err.body_text()),
            JsonRejection::JsonSyntaxError(_) => {
                Self::Validation("Request body is not valid JSON".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                Self::Validation("Expected a JSON body with `Content-Type: application/json`".to_string())
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Self::PayloadTooLarge("Request body is too large".to_string())
            }
            other => Self::Validation(other.body_text()),
        }
    }
}

/// `pregnancyMonth: invalid type: ... at line 1 column 30` names the field
fn data_error(body_text: &str) -> ApiError {
    let detail = body_text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(body_text);
    let detail = detail
        .rsplit_once(" at line ")
        .map_or(detail, |(message, _)| message);

    match detail.split_once(": ") {
        Some((path, message)) if is_field_path(path) => ApiError::invalid_field(path, message),
        _ => ApiError::Validation(detail.to_string()),
    }
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}
