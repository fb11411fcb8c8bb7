//! Prepare a Hive login: validate the account name and fetch the challenge
//! the user's wallet will sign.

use std::sync::Arc;

use tracing::{debug, info_span};

use hk_core::auth::{normalize_username, HiveUsernameError};
use hk_core::ports::ChallengeSignerPort;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrepareLoginError {
    #[error("invalid Hive username: {0}")]
    InvalidUsername(#[from] HiveUsernameError),

    #[error("challenge provider returned an empty message")]
    EmptyChallenge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginChallenge {
    pub username: String,
    /// Message to be signed with the user's posting key.
    pub message: String,
}

pub struct PrepareLogin {
    signer: Arc<dyn ChallengeSignerPort>,
}

impl PrepareLogin {
    pub fn new(signer: Arc<dyn ChallengeSignerPort>) -> Self {
        Self { signer }
    }

    pub fn execute(&self, username: &str) -> Result<LoginChallenge, PrepareLoginError> {
        let span = info_span!("usecase.prepare_login.execute");
        let _enter = span.enter();

        let username = normalize_username(username)?;
        let message = self.signer.sign_message(&username);
        if message.is_empty() {
            return Err(PrepareLoginError::EmptyChallenge);
        }

        debug!(username = %username, "login challenge prepared");
        Ok(LoginChallenge { username, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Signer {}

        impl ChallengeSignerPort for Signer {
            fn sign_message(&self, username: &str) -> String;
        }
    }

    #[test]
    fn normalizes_username_before_asking_for_challenge() {
        let mut signer = MockSigner::new();
        signer
            .expect_sign_message()
            .with(eq("alice"))
            .times(1)
            .returning(|u| format!("login:{u}:1737100000"));

        let challenge = PrepareLogin::new(Arc::new(signer))
            .execute(" @Alice ")
            .expect("prepare login");

        assert_eq!(challenge.username, "alice");
        assert_eq!(challenge.message, "login:alice:1737100000");
    }

    #[test]
    fn invalid_username_never_reaches_signer() {
        let mut signer = MockSigner::new();
        signer.expect_sign_message().never();

        let err = PrepareLogin::new(Arc::new(signer))
            .execute("x")
            .expect_err("too short");

        assert!(matches!(err, PrepareLoginError::InvalidUsername(_)));
    }

    #[test]
    fn empty_challenge_is_an_error() {
        let mut signer = MockSigner::new();
        signer.expect_sign_message().returning(|_| String::new());

        let err = PrepareLogin::new(Arc::new(signer))
            .execute("alice")
            .expect_err("empty challenge");

        assert_eq!(err, PrepareLoginError::EmptyChallenge);
    }
}
