//! Authentication session store.
//!
//! Holds the logged-in Hive identities and mirrors the user collection into
//! encrypted storage whenever an encryption key is available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use hk_core::auth::{AuthState, HiveAuthResult, LoggedInUser};
use hk_core::ports::{AuthenticatePort, EncryptionKeyPort, SessionStoragePort};
use hk_core::security::EncryptionKeyState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateOutcome {
    Authenticated { username: String },
    /// The callback rejected; the message is also stored in the state's `error`.
    Failed { error: String },
    /// Another authentication attempt is in flight; the callback was not invoked.
    AlreadyInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// No encryption key yet; persisted state cannot be read.
    KeyUnavailable,
    NothingStored,
    /// Stored data could not be decrypted or decoded.
    Unreadable,
    Restored { users: usize },
}

pub struct AuthStore {
    // Never held across an await.
    state: RwLock<AuthState>,
    storage: Arc<dyn SessionStoragePort>,
    encryption_key: Arc<dyn EncryptionKeyPort>,
    auth_in_flight: AtomicBool,
    // Orders storage writes: held from snapshot to completed save or clear.
    persist_gate: Mutex<()>,
}

/// Clears the loading flag and the in-flight marker however an
/// authentication attempt ends, including when its future is dropped.
struct AuthAttemptGuard<'a> {
    store: &'a AuthStore,
}

impl Drop for AuthAttemptGuard<'_> {
    fn drop(&mut self) {
        self.store.write_state().is_loading = false;
        self.store.auth_in_flight.store(false, Ordering::Release);
    }
}

impl AuthStore {
    pub fn new(
        storage: Arc<dyn SessionStoragePort>,
        encryption_key: Arc<dyn EncryptionKeyPort>,
    ) -> Self {
        Self {
            state: RwLock::new(AuthState::default()),
            storage,
            encryption_key,
            auth_in_flight: AtomicBool::new(false),
            persist_gate: Mutex::new(()),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Read-only state =====

    pub fn snapshot(&self) -> AuthState {
        self.read_state().clone()
    }

    pub fn current_user(&self) -> Option<LoggedInUser> {
        self.read_state().current_user().cloned()
    }

    pub fn logged_in_users(&self) -> Vec<LoggedInUser> {
        self.read_state().logged_in_users().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.read_state().error.clone()
    }

    pub fn hive_auth_payload(&self) -> Option<String> {
        self.read_state().hive_auth_payload.clone()
    }

    // ===== Actions =====

    /// Switch the active identity. `Some` also adds the user if it is not
    /// logged in yet.
    pub async fn set_current_user(&self, user: Option<LoggedInUser>) {
        self.write_state().set_current(user);
        self.persist().await;
    }

    pub async fn add_logged_in_user(&self, user: LoggedInUser) {
        debug!(username = %user.username, "adding logged-in user");
        self.write_state().upsert_user(user);
        self.persist().await;
    }

    pub async fn remove_logged_in_user(&self, username: &str) {
        let removed = self.write_state().remove_user(username);
        if !removed {
            debug!(username, "remove requested for unknown user");
            return;
        }
        info!(username, "Logged-in user removed");
        self.persist().await;
    }

    /// Log out every user. Waits for an in-flight save so it cannot land
    /// after the storage is cleared.
    pub async fn clear_all_users(&self) {
        let _gate = self.persist_gate.lock().await;
        self.write_state().clear_users();
        if let Err(err) = self.storage.clear().await {
            warn!(error = %err, "Failed to clear persisted session");
        }
        info!("All logged-in users cleared");
    }

    pub fn set_loading(&self, loading: bool) {
        self.write_state().is_loading = loading;
    }

    pub fn set_error(&self, error: Option<String>) {
        self.write_state().error = error;
    }

    pub fn set_hive_auth_payload(&self, payload: Option<String>) {
        self.write_state().hive_auth_payload = payload;
    }

    /// Re-read the persisted session with the current encryption key.
    ///
    /// Never fails: a missing key, missing data or unreadable data all leave
    /// the store without a persisted session.
    pub async fn rehydrate_from_storage(&self) -> RehydrateOutcome {
        let span = info_span!("usecase.auth_store.rehydrate_from_storage");

        async {
            let key = match self.encryption_key.state().await {
                EncryptionKeyState::Initialized(key) => key,
                EncryptionKeyState::Uninitialized => {
                    info!("Encryption key not set, skipping rehydrate");
                    return RehydrateOutcome::KeyUnavailable;
                }
            };

            match self.storage.load(&key).await {
                Ok(None) => {
                    debug!("no persisted session");
                    RehydrateOutcome::NothingStored
                }
                Ok(Some(session)) => {
                    let mut state = self.write_state();
                    state.restore(session);
                    let users = state.logged_in_users().len();
                    info!(users, "Session rehydrated");
                    RehydrateOutcome::Restored { users }
                }
                Err(err) => {
                    warn!(error = %err, "Persisted session unreadable, starting empty");
                    RehydrateOutcome::Unreadable
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Exchange a Hive login result for a server session via `callback`.
    ///
    /// On success the user becomes current and the error is cleared. On
    /// failure only `error` changes. Errors are never returned to the caller;
    /// observe the store instead.
    pub async fn authenticate_with_callback(
        &self,
        hive_result: HiveAuthResult,
        callback: &dyn AuthenticatePort,
    ) -> AuthenticateOutcome {
        let span = info_span!(
            "usecase.auth_store.authenticate_with_callback",
            username = %hive_result.username,
            provider = %hive_result.provider,
        );

        async {
            if self
                .auth_in_flight
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                warn!("Authentication already in flight, ignoring");
                return AuthenticateOutcome::AlreadyInFlight;
            }
            let _attempt = AuthAttemptGuard { store: self };

            self.write_state().is_loading = true;

            match callback.authenticate(&hive_result).await {
                Ok(server_response) => {
                    let user = LoggedInUser::from_auth_result(hive_result, server_response);
                    let username = user.username.clone();
                    {
                        let mut state = self.write_state();
                        state.set_current(Some(user));
                        state.error = None;
                        state.hive_auth_payload = None;
                        state.is_loading = false;
                    }
                    self.persist().await;
                    info!("Authentication succeeded");
                    AuthenticateOutcome::Authenticated { username }
                }
                Err(err) => {
                    let error = err.to_string();
                    {
                        let mut state = self.write_state();
                        state.error = Some(error.clone());
                        state.is_loading = false;
                    }
                    warn!(error = %error, "Authentication failed");
                    AuthenticateOutcome::Failed { error }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Write the user collection to encrypted storage. Without a key the
    /// in-memory state is kept and nothing is written.
    async fn persist(&self) {
        let key = match self.encryption_key.state().await {
            EncryptionKeyState::Initialized(key) => key,
            EncryptionKeyState::Uninitialized => {
                debug!("encryption key not set, session kept in memory only");
                return;
            }
        };
        let _gate = self.persist_gate.lock().await;
        let session = self.read_state().to_persisted();
        if let Err(err) = self.storage.save(&key, &session).await {
            warn!(error = %err, "Failed to persist session");
        }
    }
}
