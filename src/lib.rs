//! hive-auth-kit
//!
//! Headless core of a Hive login widget: multi-account auth store with
//! encrypted session persistence, login preparation and the report dialog
//! workflow.

pub mod bootstrap;

pub use bootstrap::{build_auth_kit, init_tracing_subscriber, load_config, AuthKit};
pub use hk_app::{
    AuthStore, AuthenticateOutcome, LoginChallenge, PrepareLogin, PrepareLoginError,
    RehydrateOutcome, ReportWorkflow, ReportWorkflowError, SubmitOutcome,
};
pub use hk_core::{
    AuthState, EncryptionKey, EncryptionKeyError, HiveAuthResult, LoggedInUser, ReportReason,
    ReportState, ReportSummary, ReportTarget, WidgetConfig,
};
pub use hk_infra::{EncryptedFileSessionStorage, InMemoryEncryptionKeyHolder};
