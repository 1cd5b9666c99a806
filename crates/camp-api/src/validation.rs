use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Languages the client ships translations for
const SUPPORTED_LANGUAGES: &[&str] = &["ar", "en"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

/// `YYYY-MM-DD`, not after today (UTC)
pub fn date_of_birth(value: &str) -> Result<(), ValidationError> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| error("date", "Date must use the YYYY-MM-DD format"))?;
    if date > Utc::now().date_naive() {
        return Err(error("date", "Date of birth cannot be in the future"));
    }
    Ok(())
}

pub fn gender(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "male" | "female" => Ok(()),
        _ => Err(error("gender", "Gender must be 'male' or 'female'")),
    }
}

pub fn language(value: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LANGUAGES.contains(&value) {
        Ok(())
    } else {
        Err(error("language", "Language must be 'ar' or 'en'"))
    }
}

impl From<ValidationErrors> for ApiError {
    /// Reports a single field, the first in alphabetical order, so the
    /// response is stable across runs.
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let Some((field, errs)) = fields.first() else {
            return Self::Validation("Invalid input".to_string());
        };
        let message = errs
            .first()
            .and_then(|e| e.message.as_ref())
            .map_or_else(|| "Invalid value".to_string(), ToString::to_string);

        Self::invalid_field(to_camel_case(field), message)
    }
}

/// `date_of_birth` -> `dateOfBirth`, matching the JSON field names
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates. Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
