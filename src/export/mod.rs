//! File outputs: workbook, charts, and JSON.
pub mod charts;
pub mod error;
pub mod json;
pub mod workbook;

pub use charts::write_charts;
pub use error::ReportError;
pub use json::{load_assumptions, write_report};
pub use workbook::write_workbook;
