//! Reports about problems found while reading addon files.
//!
//! Reports are values: they are collected in a [`Reports`] owned by the run that produced them,
//! and printed by the caller in either the human-readable or the JSON format.

pub use builder::{err, tips, warn, ReportBuilderStage1, ReportBuilderStage2, ReportBuilderStage3};
pub use errorkey::ErrorKey;
pub use output_style::OutputStyle;
pub use report_struct::{LogReport, PointedMessage, Severity};
pub use reports::Reports;
pub use writer::ReportWriter;
pub use writer_json::log_reports_json;

mod builder;
mod errorkey;
mod output_style;
mod report_struct;
mod reports;
mod writer;
mod writer_json;
