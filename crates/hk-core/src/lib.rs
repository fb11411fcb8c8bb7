//! # hk-core
//!
//! Core domain models and business logic for hive-auth-kit.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod config;
pub mod ports;
pub mod report;
pub mod security;

// Re-export commonly used types at the crate root
pub use auth::{AuthState, HiveAuthResult, LoggedInUser, PersistedSession, ServerAuthResponse};
pub use config::WidgetConfig;
pub use report::{
    ReportAction, ReportEvent, ReportFailure, ReportKind, ReportReason, ReportState,
    ReportStateMachine, ReportStep, ReportSummary, ReportTarget,
};
pub use security::{EncryptionKey, EncryptionKeyError, EncryptionKeyState};
