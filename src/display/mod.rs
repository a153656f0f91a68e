//! Plain-text rendering for the terminal.
pub mod format;
pub mod report;
pub mod table;

pub use report::render_report;
