//! # Pure Data Module - Data Transfer Objects Only
//!
//! Defines the widget configuration DTO and its TOML mapping.
//! No validation and no policy live here; an empty string is a valid fact
//! (an empty encryption key simply means "not provided").

mod widget_config;

pub use widget_config::{LoggingConfig, WidgetConfig};
