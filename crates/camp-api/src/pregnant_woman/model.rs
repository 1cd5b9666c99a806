use camp_db::models::{NewPregnantWoman, PregnantWoman};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::ApiError,
    normalization::{normalize_id_number, normalize_optional_text},
    validation::{double_option, non_blank},
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PregnantWomanPayload {
    #[validate(custom(function = "non_blank"))]
    pub full_name: String,
    #[validate(custom(function = "non_blank"))]
    pub id_number: String,
    #[validate(custom(function = "non_blank"))]
    pub health_status: String,
    #[validate(range(min = 1, max = 9, message = "Pregnancy month must be between 1 and 9"))]
    pub pregnancy_month: i32,
    #[validate(custom(function = "non_blank"))]
    pub spouse_name: String,
    #[validate(custom(function = "non_blank"))]
    pub spouse_id: String,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
}

impl PregnantWomanPayload {
    pub fn into_new_pregnant_woman(self) -> Result<NewPregnantWoman, ApiError> {
        self.validate()?;

        Ok(NewPregnantWoman {
            full_name: self.full_name.trim().to_string(),
            id_number: normalize_id_number(&self.id_number),
            health_status: self.health_status.trim().to_string(),
            pregnancy_month: self.pregnancy_month,
            spouse_name: self.spouse_name.trim().to_string(),
            spouse_id: normalize_id_number(&self.spouse_id),
            health_notes: normalize_optional_text(self.health_notes),
            camp_id: self.camp_id,
        })
    }
}

impl From<NewPregnantWoman> for PregnantWomanPayload {
    fn from(woman: NewPregnantWoman) -> Self {
        Self {
            full_name: woman.full_name,
            id_number: woman.id_number,
            health_status: woman.health_status,
            pregnancy_month: woman.pregnancy_month,
            spouse_name: woman.spouse_name,
            spouse_id: woman.spouse_id,
            health_notes: woman.health_notes,
            camp_id: woman.camp_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PregnantWomanPatch {
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub health_status: Option<String>,
    pub pregnancy_month: Option<i32>,
    pub spouse_name: Option<String>,
    pub spouse_id: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub health_notes: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub camp_id: Option<Option<i32>>,
}

impl PregnantWomanPatch {
    pub fn apply(self, woman: PregnantWoman) -> PregnantWomanPayload {
        let mut payload = PregnantWomanPayload::from(NewPregnantWoman::from(woman));

        if let Some(value) = self.full_name {
            payload.full_name = value;
        }
        if let Some(value) = self.id_number {
            payload.id_number = value;
        }
        if let Some(value) = self.health_status {
            payload.health_status = value;
        }
        if let Some(value) = self.pregnancy_month {
            payload.pregnancy_month = value;
        }
        if let Some(value) = self.spouse_name {
            payload.spouse_name = value;
        }
        if let Some(value) = self.spouse_id {
            payload.spouse_id = value;
        }
        if let Some(value) = self.health_notes {
            payload.health_notes = value;
        }
        if let Some(value) = self.camp_id {
            payload.camp_id = value;
        }

        payload
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseLookup {
    pub spouse_id: Option<String>,
}
