//! Snapshot of the effective configuration for result reporting.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::PlotDefaults;
use crate::resolve::ConfigSource;

/// The resolved defaults plus where and when they were loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub source: ConfigSource,
    pub path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
    pub config: PlotDefaults,
}

impl ConfigSnapshot {
    pub fn new(source: ConfigSource, path: Option<PathBuf>, config: PlotDefaults) -> Self {
        Self {
            source,
            path,
            loaded_at: Utc::now(),
            config,
        }
    }

    pub fn using_defaults(&self) -> bool {
        self.source == ConfigSource::Defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_source_tag() {
        let snap = ConfigSnapshot::new(ConfigSource::Defaults, None, PlotDefaults::default());
        assert!(snap.using_defaults());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["source"], "defaults");
        assert_eq!(json["config"]["backend"], "svg");
        assert!(json["loaded_at"].is_string());
    }
}
