//! By splitting the builder up into stages, we achieve two goals.
//! - The order of calls is enforced, leading to more consistent code.
//! - The user is forced to add at least one pointer, making it impossible to create a report
//!   without pointers.

use crate::report::{ErrorKey, LogReport, PointedMessage, Reports, Severity};
use crate::token::Loc;

// =================================================================================================
// =============== Starting points:
// =================================================================================================

pub fn tips(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Tips)
}

pub fn warn(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Warning)
}

pub fn err(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1::new(key, Severity::Error)
}

// =================================================================================================
// =============== Builder internals:
// =================================================================================================

#[derive(Debug, Clone, Copy)]
pub struct ReportBuilderStage1(ErrorKey, Severity);

impl ReportBuilderStage1 {
    /// For internal use only.
    fn new(key: ErrorKey, severity: Severity) -> Self {
        Self(key, severity)
    }
    /// Sets the main report message.
    pub fn msg<S: Into<String>>(self, msg: S) -> ReportBuilderStage2 {
        ReportBuilderStage2 { stage1: self, msg: msg.into(), info: None }
    }
}

#[derive(Debug)]
pub struct ReportBuilderStage2 {
    stage1: ReportBuilderStage1,
    msg: String,
    info: Option<String>,
}

impl ReportBuilderStage2 {
    /// Optional step. Adds an info section to the report.
    pub fn info<S: Into<String>>(mut self, info: S) -> Self {
        let info = info.into();
        self.info = if info.is_empty() { None } else { Some(info) };
        self
    }
    pub fn loc(self, loc: &Loc) -> ReportBuilderStage3 {
        self.pointers(vec![PointedMessage::new(loc.clone())])
    }
    pub fn loc_msg<S: Into<String>>(self, loc: &Loc, msg: S) -> ReportBuilderStage3 {
        let pointer = PointedMessage { loc: loc.clone(), length: 1, msg: Some(msg.into()) };
        self.pointers(vec![pointer])
    }
    pub fn pointers(self, pointers: Vec<PointedMessage>) -> ReportBuilderStage3 {
        ReportBuilderStage3 { stage1: self.stage1, msg: self.msg, info: self.info, pointers }
    }
}

#[derive(Debug)]
pub struct ReportBuilderStage3 {
    stage1: ReportBuilderStage1,
    msg: String,
    info: Option<String>,
    pointers: Vec<PointedMessage>,
}

impl ReportBuilderStage3 {
    pub fn loc_msg<S: Into<String>>(mut self, loc: &Loc, msg: S) -> Self {
        self.pointers.push(PointedMessage { loc: loc.clone(), length: 1, msg: Some(msg.into()) });
        self
    }
    /// Build the report and returns it.
    pub fn build(self) -> LogReport {
        LogReport {
            key: self.stage1.0,
            severity: self.stage1.1,
            msg: self.msg,
            info: self.info,
            pointers: self.pointers,
        }
    }
    /// Build the report and add it to the reports of the current run.
    pub fn push(self, reports: &mut Reports) {
        reports.push(self.build());
    }
}
