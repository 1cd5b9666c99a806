use base64::Engine;
use camp_sheet::{Locale, SUPPORTED_EXTENSIONS, is_supported_file_name};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Uploaded workbook, base64 encoded by the client
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportRequest {
    /// Raw base64 or a `data:...;base64,` URL
    pub file_content: String,
    pub file_name: String,
}

impl ImportRequest {
    /// Check the extension, then decode the workbook bytes.
    ///
    /// Uploads larger than `max_bytes` once decoded are rejected with 413.
    pub fn decode(&self, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
        if !is_supported_file_name(self.file_name.trim()) {
            return Err(ApiError::invalid_field(
                "fileName",
                format!(
                    "Unsupported file type, expected one of: .{}",
                    SUPPORTED_EXTENSIONS.join(", .")
                ),
            ));
        }

        let encoded = strip_data_url(&self.file_content);
        let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if encoded.is_empty() {
            return Err(ApiError::invalid_field("fileContent", "File content is required"));
        }
        if encoded.len() / 4 * 3 > max_bytes.saturating_add(3) {
            return Err(too_large(max_bytes));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|_| ApiError::invalid_field("fileContent", "File content is not valid base64"))?;
        if bytes.len() > max_bytes {
            return Err(too_large(max_bytes));
        }

        Ok(bytes)
    }
}

fn too_large(max_bytes: usize) -> ApiError {
    ApiError::PayloadTooLarge(format!("File exceeds the {max_bytes} byte import limit"))
}

fn strip_data_url(content: &str) -> &str {
    let content = content.trim();
    match content.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => content,
    }
}

/// Room for base64 expansion and the JSON envelope around the file
pub fn request_body_limit(max_import_bytes: usize) -> usize {
    max_import_bytes.div_ceil(3).saturating_mul(4).saturating_add(64 * 1024)
}

#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub success: usize,
    pub failed: usize,
    /// `Row N: ...`, one entry per rejected row
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn record_failure(&mut self, row_number: u32, err: &ApiError) {
        self.failed += 1;
        let reason = match err {
            ApiError::InvalidField { field, message } => format!("{field}: {message}"),
            other => other.to_string(),
        };
        self.errors.push(format!("Row {row_number}: {reason}"));
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    /// `None` when no locale was requested
    pub fn parse(&self) -> Result<Option<Locale>, ApiError> {
        match self.locale.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|()| ApiError::invalid_field("locale", "Locale must be 'ar' or 'en'")),
        }
    }
}
