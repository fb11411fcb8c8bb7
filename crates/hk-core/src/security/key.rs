use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionKeyError {
    #[error("encryption key not initialized")]
    NotInitialized,
    #[error("encryption key must not be empty")]
    EmptyKey,
}

/// Symmetric key string used to encrypt the persisted auth session.
///
/// - Debug / Display never print the key
/// - Not Serialize / Deserialize
/// - Zeroized on drop
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    inner: String,
}

impl EncryptionKey {
    pub fn new(value: impl Into<String>) -> Result<Self, EncryptionKeyError> {
        let inner = value.into();
        if inner.is_empty() {
            return Err(EncryptionKeyError::EmptyKey);
        }
        Ok(Self { inner })
    }

    /// Borrow the key material.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

impl fmt::Display for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

/// Whether the host has provided an encryption key yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EncryptionKeyState {
    #[default]
    Uninitialized,
    Initialized(EncryptionKey),
}

impl EncryptionKeyState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, EncryptionKeyState::Initialized(_))
    }

    pub fn key(&self) -> Option<&EncryptionKey> {
        match self {
            EncryptionKeyState::Initialized(key) => Some(key),
            EncryptionKeyState::Uninitialized => None,
        }
    }
}
