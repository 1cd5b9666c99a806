//! Spreadsheet import and export of child and pregnant-woman records.

pub mod model;
pub mod routes;
pub mod rows;

pub use routes::routes;
