//! Bootstrap: configuration loading, tracing initialization and wiring of
//! infrastructure adapters into the use cases.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, default_data_dir, load_config, ENCRYPTION_KEY_ENV};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_auth_kit, AuthKit};
