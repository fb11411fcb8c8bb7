use async_trait::async_trait;
use thiserror::Error;

use crate::auth::PersistedSession;
use crate::security::EncryptionKey;

#[derive(Debug, Error)]
pub enum SessionStorageError {
    #[error("session storage I/O failed: {0}")]
    Io(String),
    #[error("persisted session is corrupt: {0}")]
    Corrupt(String),
    #[error("failed to decrypt persisted session (wrong key or tampered data)")]
    DecryptFailed,
    #[error("failed to encrypt session")]
    EncryptFailed,
}

/// Encrypted persistence for the auth session.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Load and decrypt. `Ok(None)` when nothing has been stored yet.
    async fn load(&self, key: &EncryptionKey)
        -> Result<Option<PersistedSession>, SessionStorageError>;

    /// Encrypt and store, replacing any previous session.
    async fn save(
        &self,
        key: &EncryptionKey,
        session: &PersistedSession,
    ) -> Result<(), SessionStorageError>;

    /// Remove the stored session. Idempotent.
    async fn clear(&self) -> Result<(), SessionStorageError>;
}
