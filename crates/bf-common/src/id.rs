//! Figure identity types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier stamped on every rendered figure and result document.
///
/// Format: `fig-<date>-<time>-<random>`
/// Example: `fig-20260115-143022-abc123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct FigureId(pub String);

impl FigureId {
    /// Generate a new figure ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let random: String = uuid::Uuid::new_v4()
            .to_string()
            .chars()
            .take(6)
            .collect();
        FigureId(format!("fig-{}-{}", now.format("%Y%m%d-%H%M%S"), random))
    }

    /// Parse an existing figure ID string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with("fig-") && s.len() > 19 {
            Some(FigureId(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FigureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_id_format() {
        let id = FigureId::new();
        assert!(id.0.starts_with("fig-"));
        assert!(id.0.len() > 19);
        assert!(FigureId::parse(id.as_str()).is_some());
    }

    #[test]
    fn test_figure_id_parse_rejects_foreign() {
        assert!(FigureId::parse("sess-20260115-143022-abc123").is_none());
        assert!(FigureId::parse("fig-1").is_none());
    }

    #[test]
    fn test_figure_ids_are_unique() {
        assert_ne!(FigureId::new(), FigureId::new());
    }
}
