//! hive-auth-kit application layer
//!
//! This crate contains the use cases driving the report dialog, the
//! authentication store and login preparation. All I/O goes through the
//! ports defined in `hk-core`.

pub mod usecases;

pub use usecases::{
    AuthStore, AuthenticateOutcome, LoginChallenge, PrepareLogin, PrepareLoginError,
    RehydrateOutcome, ReportWorkflow, ReportWorkflowError, SubmitOutcome,
};
