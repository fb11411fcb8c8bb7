//! Business logic use cases

pub mod auth_store;
pub mod prepare_login;
pub mod report_workflow;

pub use auth_store::{AuthStore, AuthenticateOutcome, RehydrateOutcome};
pub use prepare_login::{LoginChallenge, PrepareLogin, PrepareLoginError};
pub use report_workflow::{ReportWorkflow, ReportWorkflowError, SubmitOutcome};
