//! Authentication domain module.

pub mod model;
pub mod state;
pub mod username;

pub use model::{HiveAuthResult, LoggedInUser, ServerAuthResponse};
pub use state::{AuthState, PersistedSession};
pub use username::{normalize_username, validate_username, HiveUsernameError};
