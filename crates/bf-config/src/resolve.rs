//! Config file discovery and loading.
//!
//! Resolution order, first hit wins:
//! 1. explicit path (CLI `--config`)
//! 2. `BFPLOT_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/bfplot/config.toml`, then `config.json`
//! 4. built-in defaults
//!
//! An explicit or env path that does not exist is an error; a missing XDG
//! file just falls through to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::PlotDefaults;
use crate::snapshot::ConfigSnapshot;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "BFPLOT_CONFIG";

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported config format (expected .toml or .json): {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("config validation failed: {0}")]
    Validation(String),
}

impl ConfigError {
    fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::NotFound(p) | ConfigError::UnsupportedFormat(p) => Some(p),
            ConfigError::Read { path, .. }
            | ConfigError::Json { path, .. }
            | ConfigError::Toml { path, .. } => Some(path),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<ConfigError> for bf_common::Error {
    fn from(err: ConfigError) -> Self {
        match err.path() {
            Some(path) => bf_common::Error::InvalidConfig {
                path: path.display().to_string(),
                reason: err.to_string(),
            },
            None => bf_common::Error::Config(err.to_string()),
        }
    }
}

/// Where the effective config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Explicit,
    Env,
    Xdg,
    Defaults,
}

/// Candidate config locations, gathered once.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub explicit: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Gather candidates from the CLI value, environment, and XDG dirs.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            env: std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            xdg_dir: dirs::config_dir().map(|d| d.join("bfplot")),
        }
    }

    /// Pick the file to load, if any.
    pub fn select(&self) -> Result<Option<(ConfigSource, PathBuf)>, ConfigError> {
        if let Some(path) = &self.explicit {
            return require(path).map(|p| Some((ConfigSource::Explicit, p)));
        }
        if let Some(path) = &self.env {
            return require(path).map(|p| Some((ConfigSource::Env, p)));
        }
        if let Some(dir) = &self.xdg_dir {
            for name in ["config.toml", "config.json"] {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(Some((ConfigSource::Xdg, candidate)));
                }
            }
        }
        Ok(None)
    }
}

fn require(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ConfigError::NotFound(path.to_path_buf()))
    }
}

/// Load and validate a single config file, format chosen by extension.
pub fn load_file(path: &Path) -> Result<PlotDefaults, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let defaults: PlotDefaults = match ext.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Some("toml") => toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    let report = crate::validate::validate(&defaults);
    if !report.is_valid() {
        return Err(ConfigError::Validation(report.to_string()));
    }
    Ok(defaults)
}

/// Resolve the effective defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ConfigSnapshot, ConfigError> {
    resolve_from(&ConfigPaths::discover(explicit))
}

/// Resolve from an already gathered set of candidates.
pub fn resolve_from(paths: &ConfigPaths) -> Result<ConfigSnapshot, ConfigError> {
    match paths.select()? {
        Some((source, path)) => {
            let config = load_file(&path)?;
            Ok(ConfigSnapshot::new(source, Some(path), config))
        }
        None => Ok(ConfigSnapshot::new(
            ConfigSource::Defaults,
            None,
            PlotDefaults::default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_candidates_use_defaults() {
        let snap = resolve_from(&ConfigPaths::default()).unwrap();
        assert_eq!(snap.source, ConfigSource::Defaults);
        assert!(snap.path.is_none());
        assert_eq!(snap.config, PlotDefaults::default());
    }

    #[test]
    fn explicit_beats_env_and_xdg() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("mine.json");
        fs::write(&explicit, r#"{"backend": "html"}"#).unwrap();
        let env = dir.path().join("env.toml");
        fs::write(&env, "backend = \"svg\"\n").unwrap();

        let paths = ConfigPaths {
            explicit: Some(explicit.clone()),
            env: Some(env),
            xdg_dir: Some(dir.path().to_path_buf()),
        };
        let snap = resolve_from(&paths).unwrap();
        assert_eq!(snap.source, ConfigSource::Explicit);
        assert_eq!(snap.path.as_deref(), Some(explicit.as_path()));
        assert_eq!(snap.config.backend, "html");
    }

    #[test]
    fn xdg_toml_is_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "show = true\n").unwrap();
        let paths = ConfigPaths {
            xdg_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let snap = resolve_from(&paths).unwrap();
        assert_eq!(snap.source, ConfigSource::Xdg);
        assert!(snap.config.show);
    }

    #[test]
    fn missing_xdg_file_falls_back() {
        let dir = tempdir().unwrap();
        let paths = ConfigPaths {
            xdg_dir: Some(dir.path().join("nope")),
            ..Default::default()
        };
        assert_eq!(resolve_from(&paths).unwrap().source, ConfigSource::Defaults);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let paths = ConfigPaths {
            explicit: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_from(&paths).unwrap_err(),
            ConfigError::NotFound(_)
        ));
    }

    #[test]
    fn malformed_and_invalid_files_are_errors() {
        let dir = tempdir().unwrap();
        let bad_json = dir.path().join("bad.json");
        fs::write(&bad_json, "{not json").unwrap();
        assert!(matches!(
            load_file(&bad_json).unwrap_err(),
            ConfigError::Json { .. }
        ));

        let bad_value = dir.path().join("neg.toml");
        fs::write(&bad_value, "dpi = -5.0\n").unwrap();
        assert!(matches!(
            load_file(&bad_value).unwrap_err(),
            ConfigError::Validation(_)
        ));

        let yaml = dir.path().join("config.yaml");
        fs::write(&yaml, "backend: svg\n").unwrap();
        assert!(matches!(
            load_file(&yaml).unwrap_err(),
            ConfigError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn converts_into_common_error_with_path() {
        let err: bf_common::Error = ConfigError::NotFound(PathBuf::from("/x/y.toml")).into();
        assert_eq!(err.code(), 11);
        assert!(err.to_string().contains("/x/y.toml"));
    }
}
