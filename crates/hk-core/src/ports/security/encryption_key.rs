use async_trait::async_trait;

use crate::security::{EncryptionKey, EncryptionKeyError, EncryptionKeyState};

/// Single-slot holder for the session encryption key.
///
/// Shared explicitly (e.g. `Arc<dyn EncryptionKeyPort>`) by every component
/// that reads or writes the persisted session.
#[async_trait]
pub trait EncryptionKeyPort: Send + Sync {
    /// Current state. `Uninitialized` means encryption is unavailable;
    /// callers must not substitute a default key.
    async fn state(&self) -> EncryptionKeyState;

    /// Get a copy of the current key.
    async fn current_key(&self) -> Result<EncryptionKey, EncryptionKeyError>;

    /// Set or replace the key. Overwrites unconditionally.
    async fn set_key(&self, key: EncryptionKey);

    /// Forget the key.
    async fn clear(&self);
}
