//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and the host application or infrastructure implementations. Everything
//! that reaches the network (reporting, authentication, challenge signing)
//! is a host-supplied port; the crate itself performs no network calls.

pub mod auth;
pub mod report;
pub mod security;

pub use auth::{AuthCallbackError, AuthenticatePort, ChallengeSignerPort};
pub use report::{DialogHostPort, ReportError, ReportPort};
pub use security::encryption_key::EncryptionKeyPort;
pub use security::session_storage::{SessionStorageError, SessionStoragePort};
