use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use hk_core::ports::EncryptionKeyPort;
use hk_core::security::{EncryptionKey, EncryptionKeyError, EncryptionKeyState};

/// Process-local holder for the session encryption key.
///
/// Share one instance (behind `Arc`) between the bootstrap code that sets the
/// key and every store that reads it.
pub struct InMemoryEncryptionKeyHolder {
    state: RwLock<EncryptionKeyState>,
}

impl InMemoryEncryptionKeyHolder {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EncryptionKeyState::Uninitialized),
        }
    }

    pub fn with_key(key: EncryptionKey) -> Self {
        Self {
            state: RwLock::new(EncryptionKeyState::Initialized(key)),
        }
    }
}

impl Default for InMemoryEncryptionKeyHolder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncryptionKeyPort for InMemoryEncryptionKeyHolder {
    async fn state(&self) -> EncryptionKeyState {
        self.state.read().await.clone()
    }

    async fn current_key(&self) -> Result<EncryptionKey, EncryptionKeyError> {
        self.state
            .read()
            .await
            .key()
            .cloned()
            .ok_or(EncryptionKeyError::NotInitialized)
    }

    async fn set_key(&self, key: EncryptionKey) {
        let mut state = self.state.write().await;
        if state.is_initialized() {
            debug!("replacing session encryption key");
        }
        *state = EncryptionKeyState::Initialized(key);
    }

    async fn clear(&self) {
        *self.state.write().await = EncryptionKeyState::Uninitialized;
    }
}
