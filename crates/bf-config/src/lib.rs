//! bfplot configuration loading and validation.
//!
//! This crate provides:
//! - Typed plot defaults (backend, colors, figure size, KDE settings)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots for result reporting

pub mod defaults;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use defaults::{HistDefaults, PlotDefaults};
pub use resolve::{load_file, resolve_config, ConfigError, ConfigPaths, ConfigSource, CONFIG_ENV};
pub use snapshot::ConfigSnapshot;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
