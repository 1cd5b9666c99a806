use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Could not read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    #[error("Spreadsheet contains no worksheet")]
    NoWorksheet,

    #[error("Spreadsheet has no header row")]
    EmptySheet,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Could not write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

impl SheetError {
    /// Errors caused by the uploaded file rather than the server
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Write(_))
    }
}
