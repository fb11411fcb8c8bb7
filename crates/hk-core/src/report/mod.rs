//! Report domain module.
//!
//! This module defines the report reasons, report targets and the report
//! dialog state machine.

pub mod reason;
pub mod state_machine;
pub mod target;

pub use reason::{ReasonParseError, ReportReason};
pub use state_machine::{
    ReportAction, ReportEvent, ReportFailure, ReportState, ReportStateMachine, ReportStep,
};
pub use target::{ReportKind, ReportSummary, ReportTarget};
