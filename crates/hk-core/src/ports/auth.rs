use async_trait::async_trait;
use thiserror::Error;

use crate::auth::HiveAuthResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthCallbackError {
    #[error("server rejected authentication: {0}")]
    Rejected(String),
    #[error("authentication callback failed: {0}")]
    Failed(String),
}

/// Host-supplied authenticate callback (`onAuthenticate`).
///
/// Receives the raw Hive login result and returns the server-issued
/// token/response serialized as a string.
#[async_trait]
pub trait AuthenticatePort: Send + Sync {
    async fn authenticate(&self, result: &HiveAuthResult) -> Result<String, AuthCallbackError>;
}

/// Host-supplied challenge provider (`onSignMessage`).
///
/// Returns the message the user's wallet is asked to sign for `username`.
pub trait ChallengeSignerPort: Send + Sync {
    fn sign_message(&self, username: &str) -> String;
}
