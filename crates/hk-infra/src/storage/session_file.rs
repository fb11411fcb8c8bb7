use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use hk_core::auth::PersistedSession;
use hk_core::ports::{SessionStorageError, SessionStoragePort};
use hk_core::security::EncryptionKey;

use super::envelope::{SessionCipher, SessionEnvelope};

const SESSION_FILE: &str = "auth-session.json";

/// Encrypted session persisted as a JSON envelope in `<dir>/auth-session.json`.
pub struct EncryptedFileSessionStorage {
    path: PathBuf,
}

impl EncryptedFileSessionStorage {
    pub fn new(session_dir: PathBuf) -> Self {
        Self {
            path: session_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn io_err(err: std::io::Error) -> SessionStorageError {
    SessionStorageError::Io(err.to_string())
}

#[async_trait]
impl SessionStoragePort for EncryptedFileSessionStorage {
    async fn load(
        &self,
        key: &EncryptionKey,
    ) -> Result<Option<PersistedSession>, SessionStorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_err(err)),
        };
        let envelope: SessionEnvelope = serde_json::from_str(&content)
            .map_err(|e| SessionStorageError::Corrupt(e.to_string()))?;

        SessionCipher::new(key).open(&envelope).map(Some)
    }

    async fn save(
        &self,
        key: &EncryptionKey,
        session: &PersistedSession,
    ) -> Result<(), SessionStorageError> {
        let envelope = SessionCipher::new(key).seal(session)?;
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| SessionStorageError::Corrupt(e.to_string()))?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;

        debug!(users = session.logged_in_users.len(), "session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_core::auth::LoggedInUser;
    use tempfile::TempDir;

    fn key(value: &str) -> EncryptionKey {
        EncryptionKey::new(value).expect("key")
    }

    fn session(names: &[&str]) -> PersistedSession {
        PersistedSession {
            current_user: names.last().map(|n| n.to_string()),
            logged_in_users: names
                .iter()
                .map(|n| LoggedInUser {
                    username: n.to_string(),
                    provider: "keychain".into(),
                    challenge: "c".into(),
                    public_key: "STM".into(),
                    proof: "1".into(),
                    server_response: "r".into(),
                    private_posting_key: None,
                    private_active_key: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());

        let loaded = storage.load(&key("k")).await.expect("load");
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn save_then_load_with_same_key() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().join("nested"));
        let stored = session(&["alice", "bob"]);

        storage.save(&key("k"), &stored).await.expect("save");

        let loaded = storage.load(&key("k")).await.expect("load");
        assert_eq!(loaded, Some(stored));
        assert!(
            !storage.path().with_extension("json.tmp").exists(),
            "tmp file should be removed after rename"
        );
    }

    #[tokio::test]
    async fn save_replaces_previous_session() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());

        storage
            .save(&key("k"), &session(&["alice"]))
            .await
            .expect("save");
        storage
            .save(&key("k"), &session(&["carol"]))
            .await
            .expect("save");

        let loaded = storage.load(&key("k")).await.expect("load");
        assert_eq!(loaded, Some(session(&["carol"])));
    }

    #[tokio::test]
    async fn load_with_wrong_key_returns_decrypt_failed() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());
        storage
            .save(&key("right"), &session(&["alice"]))
            .await
            .expect("save");

        let err = storage
            .load(&key("wrong"))
            .await
            .expect_err("expected DecryptFailed");
        assert!(matches!(err, SessionStorageError::DecryptFailed));
    }

    #[tokio::test]
    async fn load_corrupt_json_returns_corrupt() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());
        tokio::fs::write(storage.path(), "not-json")
            .await
            .expect("write corrupt json");

        let err = storage.load(&key("k")).await.expect_err("expected Corrupt");
        assert!(matches!(err, SessionStorageError::Corrupt(_)));
    }

    #[tokio::test]
    async fn clear_on_missing_directory_is_ok() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().join("never-created"));

        storage.clear().await.expect("clear");
        assert_eq!(storage.load(&key("k")).await.expect("load"), None);
    }

    #[tokio::test]
    async fn load_of_unreadable_path_is_io_error() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());
        tokio::fs::create_dir(storage.path())
            .await
            .expect("directory in place of session file");

        let err = storage.load(&key("k")).await.expect_err("expected Io");
        assert!(matches!(err, SessionStorageError::Io(_)));
    }

    #[tokio::test]
    async fn clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().expect("temp dir");
        let storage = EncryptedFileSessionStorage::new(dir.path().to_path_buf());
        storage
            .save(&key("k"), &session(&["alice"]))
            .await
            .expect("save");

        storage.clear().await.expect("clear");
        storage.clear().await.expect("clear again");

        assert!(!storage.path().exists());
        assert_eq!(storage.load(&key("k")).await.expect("load"), None);
    }
}
