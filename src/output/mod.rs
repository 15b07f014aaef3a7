//! Run output files

pub mod report;

pub use report::{ReportWriter, SavedReport};
