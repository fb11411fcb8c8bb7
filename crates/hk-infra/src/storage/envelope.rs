//! On-disk format of the encrypted session.
//!
//! ```json
//! { "version": 1, "nonce": "<hex, 24 bytes>", "ciphertext": "<hex>" }
//! ```
//!
//! The plaintext is the JSON-encoded `PersistedSession`. The cipher key is
//! derived from the host's key string with BLAKE3 in key-derivation mode, so
//! any non-empty string yields a full-strength XChaCha20-Poly1305 key.

use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{Key, KeyInit, XChaCha20Poly1305, XNonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use hk_core::auth::PersistedSession;
use hk_core::ports::SessionStorageError;
use hk_core::security::EncryptionKey;

const ENVELOPE_VERSION: u8 = 1;
const NONCE_LEN: usize = 24;
const KDF_CONTEXT: &str = "hive-auth-kit 2025 session storage v1";
const AAD: &[u8] = b"hive-auth-kit/session/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub version: u8,
    pub nonce: String,
    pub ciphertext: String,
}

/// XChaCha20-Poly1305 cipher bound to one encryption key.
pub struct SessionCipher {
    cipher: XChaCha20Poly1305,
}

impl SessionCipher {
    pub fn new(key: &EncryptionKey) -> Self {
        let derived = blake3::derive_key(KDF_CONTEXT, key.as_bytes());
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(&derived)),
        }
    }

    pub fn seal(&self, session: &PersistedSession) -> Result<SessionEnvelope, SessionStorageError> {
        let plaintext = encode_plaintext(session)?;

        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: &plaintext,
                    aad: AAD,
                },
            )
            .map_err(|_| SessionStorageError::EncryptFailed)?;

        Ok(SessionEnvelope {
            version: ENVELOPE_VERSION,
            nonce: hex::encode(nonce),
            ciphertext: hex::encode(ciphertext),
        })
    }

    pub fn open(&self, envelope: &SessionEnvelope) -> Result<PersistedSession, SessionStorageError> {
        if envelope.version != ENVELOPE_VERSION {
            return Err(SessionStorageError::Corrupt(format!(
                "unsupported envelope version {}",
                envelope.version
            )));
        }
        let nonce = hex::decode(&envelope.nonce)
            .map_err(|e| SessionStorageError::Corrupt(format!("nonce: {e}")))?;
        if nonce.len() != NONCE_LEN {
            return Err(SessionStorageError::Corrupt(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce.len()
            )));
        }
        let ciphertext = hex::decode(&envelope.ciphertext)
            .map_err(|e| SessionStorageError::Corrupt(format!("ciphertext: {e}")))?;

        let plaintext = self
            .cipher
            .decrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: &ciphertext,
                    aad: AAD,
                },
            )
            .map_err(|_| SessionStorageError::DecryptFailed)?;

        serde_json::from_slice(&plaintext).map_err(|e| SessionStorageError::Corrupt(e.to_string()))
    }
}

// Serialization happens before encryption, so its failure is a seal failure.
fn encode_plaintext<T: Serialize>(value: &T) -> Result<Vec<u8>, SessionStorageError> {
    serde_json::to_vec(value).map_err(|_| SessionStorageError::EncryptFailed)
}
