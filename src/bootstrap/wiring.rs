//! # Dependency wiring
//!
//! The only place that depends on `hk-app` and `hk-infra` at once. It
//! assembles adapters behind their ports and hands out use cases; decisions
//! about missing keys or unreadable sessions stay in the use cases.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, info_span, Instrument};

use hk_app::{AuthStore, PrepareLogin, RehydrateOutcome, ReportWorkflow};
use hk_core::config::WidgetConfig;
use hk_core::ports::{ChallengeSignerPort, DialogHostPort, EncryptionKeyPort, ReportPort};
use hk_core::report::ReportTarget;
use hk_core::security::{EncryptionKey, EncryptionKeyError};
use hk_infra::{EncryptedFileSessionStorage, InMemoryEncryptionKeyHolder};

use super::config::default_data_dir;

/// Assembled widget core.
///
/// One `AuthKit` per host process; clone the inner `Arc`s to share the
/// store with UI components.
pub struct AuthKit {
    config: WidgetConfig,
    encryption_key: Arc<InMemoryEncryptionKeyHolder>,
    auth_store: Arc<AuthStore>,
}

impl AuthKit {
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn auth_store(&self) -> Arc<AuthStore> {
        Arc::clone(&self.auth_store)
    }

    pub fn encryption_key(&self) -> Arc<dyn EncryptionKeyPort> {
        self.encryption_key.clone()
    }

    /// Install (or replace) the session key and re-read the stored session.
    pub async fn set_encryption_key(
        &self,
        key: &str,
    ) -> Result<RehydrateOutcome, EncryptionKeyError> {
        let key = EncryptionKey::new(key)?;
        self.encryption_key.set_key(key).await;
        Ok(self.auth_store.rehydrate_from_storage().await)
    }

    /// New report dialog for `target`, closed until `open` is called.
    pub fn report_workflow(
        &self,
        target: ReportTarget,
        reporter: Arc<dyn ReportPort>,
        host: Arc<dyn DialogHostPort>,
    ) -> ReportWorkflow {
        ReportWorkflow::new(target, reporter, host)
    }

    pub fn prepare_login(&self, signer: Arc<dyn ChallengeSignerPort>) -> PrepareLogin {
        PrepareLogin::new(signer)
    }
}

/// Wire the widget from a loaded configuration.
///
/// An empty `session_dir` falls back to the platform data directory. When
/// the configuration carries a key the stored session is rehydrated before
/// returning; otherwise the store starts empty until
/// [`AuthKit::set_encryption_key`] is called.
pub async fn build_auth_kit(mut config: WidgetConfig) -> anyhow::Result<AuthKit> {
    let span = info_span!("bootstrap.build_auth_kit");

    async move {
        if config.session_dir.as_os_str().is_empty() {
            config.session_dir = default_data_dir()?.join("session");
        }

        let encryption_key = Arc::new(InMemoryEncryptionKeyHolder::new());
        let storage = Arc::new(EncryptedFileSessionStorage::new(config.session_dir.clone()));
        let auth_store = Arc::new(AuthStore::new(storage, encryption_key.clone()));

        let kit = AuthKit {
            config,
            encryption_key,
            auth_store,
        };

        if kit.config.encryption_key.is_empty() {
            info!("No encryption key configured, session persistence disabled until set");
        } else {
            let key = kit.config.encryption_key.clone();
            let outcome = kit
                .set_encryption_key(&key)
                .await
                .context("Failed to install configured encryption key")?;
            info!(?outcome, "Configured encryption key installed");
        }

        Ok::<_, anyhow::Error>(kit)
    }
    .instrument(span)
    .await
}
