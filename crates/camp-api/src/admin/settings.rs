use axum::{Json, Router, extract::State, routing::get};
use camp_db::{models::SettingEntry, repositories::setting as setting_repo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    ApiState, auth::AdminUser, error::ApiError, extract::ApiJson, validation::language,
};

pub const WELCOME_MESSAGE_KEY: &str = "welcome_message";
pub const SYSTEM_NAME_KEY: &str = "system_name";
/// Spreadsheet header language when a request names none
pub const DEFAULT_LANGUAGE_KEY: &str = "default_language";

pub fn routes() -> Router<ApiState> {
    Router::new().route("/api/admin/settings", get(get_settings).put(update_settings))
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
}

impl From<Vec<SettingEntry>> for SystemSettings {
    /// Unknown keys are ignored
    fn from(entries: Vec<SettingEntry>) -> Self {
        let mut settings = Self::default();
        for SettingEntry { key, value } in entries {
            match key.as_str() {
                WELCOME_MESSAGE_KEY => settings.welcome_message = Some(value),
                SYSTEM_NAME_KEY => settings.system_name = Some(value),
                DEFAULT_LANGUAGE_KEY => settings.default_language = Some(value),
                _ => {}
            }
        }
        settings
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSettings {
    pub welcome_message: Option<String>,
    pub system_name: Option<String>,
    #[validate(custom(function = "language"))]
    pub default_language: Option<String>,
}

impl UpdateSettings {
    fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (WELCOME_MESSAGE_KEY, self.welcome_message.as_deref()),
            (SYSTEM_NAME_KEY, self.system_name.as_deref()),
            (DEFAULT_LANGUAGE_KEY, self.default_language.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    }
}

async fn get_settings(
    _admin: AdminUser,
    State(state): State<ApiState>,
) -> Result<Json<SystemSettings>, ApiError> {
    let entries = setting_repo::get_all(&state.pool).await?;
    Ok(Json(entries.into()))
}

/// Upsert the provided keys and return the full set
async fn update_settings(
    AdminUser(admin): AdminUser,
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<UpdateSettings>,
) -> Result<Json<SystemSettings>, ApiError> {
    payload.validate()?;

    let mut tx = state.pool.begin().await?;
    for (key, value) in payload.entries() {
        setting_repo::upsert(&mut *tx, key, value).await?;
    }
    let entries = setting_repo::get_all(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!(updated_by = %admin.user_id, "System settings updated");
    Ok(Json(entries.into()))
}
