use camp_db::models::{Child, NewChild};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::ApiError,
    normalization::{normalize_id_number, normalize_optional_text},
    validation::{date_of_birth, double_option, gender, non_blank},
};

/// Child registration as submitted by the form or a spreadsheet row.
///
/// Every field defaults so a missing key is reported as a validation error
/// naming the field rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildPayload {
    #[validate(custom(function = "non_blank"))]
    pub full_name: String,
    #[validate(custom(function = "non_blank"))]
    pub id_number: String,
    #[validate(custom(function = "date_of_birth"))]
    pub date_of_birth: String,
    #[validate(custom(function = "gender"))]
    pub gender: String,
    #[validate(custom(function = "non_blank"))]
    pub health_status: String,
    #[validate(custom(function = "non_blank"))]
    pub father_name: String,
    #[validate(custom(function = "non_blank"))]
    pub father_id: String,
    #[validate(custom(function = "non_blank"))]
    pub mother_name: String,
    #[validate(custom(function = "non_blank"))]
    pub mother_id: String,
    pub is_breastfeeding: bool,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
}

impl ChildPayload {
    /// Validate, then trim text and normalize identity numbers
    pub fn into_new_child(self) -> Result<NewChild, ApiError> {
        self.validate()?;

        Ok(NewChild {
            full_name: self.full_name.trim().to_string(),
            id_number: normalize_id_number(&self.id_number),
            date_of_birth: self.date_of_birth.trim().to_string(),
            gender: self.gender.trim().to_string(),
            health_status: self.health_status.trim().to_string(),
            father_name: self.father_name.trim().to_string(),
            father_id: normalize_id_number(&self.father_id),
            mother_name: self.mother_name.trim().to_string(),
            mother_id: normalize_id_number(&self.mother_id),
            is_breastfeeding: self.is_breastfeeding,
            health_notes: normalize_optional_text(self.health_notes),
            camp_id: self.camp_id,
        })
    }
}

impl From<NewChild> for ChildPayload {
    fn from(child: NewChild) -> Self {
        Self {
            full_name: child.full_name,
            id_number: child.id_number,
            date_of_birth: child.date_of_birth,
            gender: child.gender,
            health_status: child.health_status,
            father_name: child.father_name,
            father_id: child.father_id,
            mother_name: child.mother_name,
            mother_id: child.mother_id,
            is_breastfeeding: child.is_breastfeeding,
            health_notes: child.health_notes,
            camp_id: child.camp_id,
        }
    }
}

/// Partial update. `healthNotes` and `campId` accept an explicit `null` to
/// clear the value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildPatch {
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub health_status: Option<String>,
    pub father_name: Option<String>,
    pub father_id: Option<String>,
    pub mother_name: Option<String>,
    pub mother_id: Option<String>,
    pub is_breastfeeding: Option<bool>,
    #[serde(deserialize_with = "double_option")]
    pub health_notes: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub camp_id: Option<Option<i32>>,
}

impl ChildPatch {
    /// Overlay the provided fields on a stored child
    pub fn apply(self, child: Child) -> ChildPayload {
        let mut payload = ChildPayload::from(NewChild::from(child));

        if let Some(value) = self.full_name {
            payload.full_name = value;
        }
        if let Some(value) = self.id_number {
            payload.id_number = value;
        }
        if let Some(value) = self.date_of_birth {
            payload.date_of_birth = value;
        }
        if let Some(value) = self.gender {
            payload.gender = value;
        }
        if let Some(value) = self.health_status {
            payload.health_status = value;
        }
        if let Some(value) = self.father_name {
            payload.father_name = value;
        }
        if let Some(value) = self.father_id {
            payload.father_id = value;
        }
        if let Some(value) = self.mother_name {
            payload.mother_name = value;
        }
        if let Some(value) = self.mother_id {
            payload.mother_id = value;
        }
        if let Some(value) = self.is_breastfeeding {
            payload.is_breastfeeding = value;
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
pub struct ParentLookup {
    pub parent_id: Option<String>,
}
