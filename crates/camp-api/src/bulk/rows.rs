//! Conversion between sheet rows and record payloads.

use std::collections::HashMap;

use camp_db::models::{Camp, Child, PregnantWoman};
use camp_sheet::{CellValue, Locale, SheetRow, parse_bool, parse_int};

use crate::{
    child::model::ChildPayload, error::ApiError, pregnant_woman::model::PregnantWomanPayload,
};

/// Camps indexed both ways: by case-folded name for import, by id for export
#[derive(Debug, Default)]
pub struct CampIndex {
    by_name: HashMap<String, i32>,
    by_id: HashMap<i32, String>,
}

impl CampIndex {
    pub fn new(camps: Vec<Camp>) -> Self {
        let mut index = Self::default();
        for camp in camps {
            index.by_name.insert(fold_name(&camp.name), camp.id);
            index.by_id.insert(camp.id, camp.name);
        }
        index
    }

    fn resolve(&self, name: Option<&str>) -> Result<Option<i32>, ApiError> {
        let Some(name) = name else {
            return Ok(None);
        };
        self.by_name
            .get(&fold_name(name))
            .copied()
            .map(Some)
            .ok_or_else(|| ApiError::invalid_field("camp", format!("Camp '{name}' not found")))
    }

    fn name_of(&self, camp_id: Option<i32>) -> CellValue {
        camp_id
            .and_then(|id| self.by_id.get(&id))
            .map_or(CellValue::Blank, |name| CellValue::Text(name.clone()))
    }
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn text(row: &SheetRow, key: &str) -> String {
    row.get(key).unwrap_or_default().to_string()
}

/// Gender as written in either locale; unrecognized values pass through so
/// validation reports them
fn gender(value: &str) -> String {
    match value.trim().to_lowercase().as_str() {
        "male" | "m" | "ذكر" => "male".to_string(),
        "female" | "f" | "أنثى" | "انثى" => "female".to_string(),
        other => other.to_string(),
    }
}

fn yes_no(value: bool, locale: Locale) -> CellValue {
    let label = match (locale, value) {
        (Locale::Ar, true) => "نعم",
        (Locale::Ar, false) => "لا",
        (Locale::En, true) => "Yes",
        (Locale::En, false) => "No",
    };
    CellValue::from(label)
}

pub fn child_payload(row: &SheetRow, camps: &CampIndex) -> Result<ChildPayload, ApiError> {
    let is_breastfeeding = match row.get("isBreastfeeding") {
        None => false,
        Some(value) => parse_bool(value).ok_or_else(|| {
            ApiError::invalid_field("isBreastfeeding", "Breastfeeding must be yes or no")
        })?,
    };

    Ok(ChildPayload {
        full_name: text(row, "fullName"),
        id_number: text(row, "idNumber"),
        date_of_birth: text(row, "dateOfBirth"),
        gender: gender(row.get("gender").unwrap_or_default()),
        health_status: text(row, "healthStatus"),
        father_name: text(row, "fatherName"),
        father_id: text(row, "fatherId"),
        mother_name: text(row, "motherName"),
        mother_id: text(row, "motherId"),
        is_breastfeeding,
        health_notes: row.get("healthNotes").map(str::to_string),
        camp_id: camps.resolve(row.get("camp"))?,
    })
}

pub fn pregnant_woman_payload(
    row: &SheetRow,
    camps: &CampIndex,
) -> Result<PregnantWomanPayload, ApiError> {
    let pregnancy_month = match row.get("pregnancyMonth") {
        // Missing month falls through to the 1..=9 range check
        None => 0,
        Some(value) => parse_int(value).ok_or_else(|| {
            ApiError::invalid_field("pregnancyMonth", "Pregnancy month must be a number")
        })?,
    };

    Ok(PregnantWomanPayload {
        full_name: text(row, "fullName"),
        id_number: text(row, "idNumber"),
        health_status: text(row, "healthStatus"),
        pregnancy_month,
        spouse_name: text(row, "spouseName"),
        spouse_id: text(row, "spouseId"),
        health_notes: row.get("healthNotes").map(str::to_string),
        camp_id: camps.resolve(row.get("camp"))?,
    })
}

/// Cells in `CHILD_COLUMNS` order
pub fn child_cells(child: Child, camps: &CampIndex, locale: Locale) -> Vec<CellValue> {
    vec![
        child.full_name.into(),
        child.id_number.into(),
        child.date_of_birth.into(),
        child.gender.into(),
        child.health_status.into(),
        child.father_name.into(),
        child.father_id.into(),
        child.mother_name.into(),
        child.mother_id.into(),
        yes_no(child.is_breastfeeding, locale),
        child.health_notes.into(),
        camps.name_of(child.camp_id),
    ]
}

/// Cells in `PREGNANT_WOMAN_COLUMNS` order
pub fn pregnant_woman_cells(woman: PregnantWoman, camps: &CampIndex) -> Vec<CellValue> {
    vec![
        woman.full_name.into(),
        woman.id_number.into(),
        woman.health_status.into(),
        woman.pregnancy_month.into(),
        woman.spouse_name.into(),
        woman.spouse_id.into(),
        woman.health_notes.into(),
        camps.name_of(woman.camp_id),
    ]
}
