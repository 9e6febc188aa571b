//! Semantic validation of plot defaults.

use std::fmt;

use bf_math::Bandwidth;
use serde::Serialize;

use crate::defaults::PlotDefaults;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failures found in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Check every field; color spellings are checked by the renderer.
pub fn validate(d: &PlotDefaults) -> ValidationResult {
    let mut errors = Vec::new();

    if !crate::CONFIG_SCHEMA_VERSION
        .split('.')
        .next()
        .is_some_and(|major| d.schema_version.split('.').next() == Some(major))
    {
        errors.push(ValidationError::new(
            "schema_version",
            format!("unsupported version {}", d.schema_version),
        ));
    }
    if d.backend.trim().is_empty() {
        errors.push(ValidationError::new("backend", "must not be empty"));
    }
    for (i, c) in d.colors.iter().enumerate() {
        if c.trim().is_empty() {
            errors.push(ValidationError::new(
                &format!("colors[{i}]"),
                "must not be empty",
            ));
        }
    }
    if let Some((w, h)) = d.figsize {
        if !positive(w) || !positive(h) {
            errors.push(ValidationError::new(
                "figsize",
                format!("width and height must be positive, got ({w}, {h})"),
            ));
        }
    }
    if let Some(t) = d.textsize {
        if !positive(t) {
            errors.push(ValidationError::new("textsize", format!("must be positive, got {t}")));
        }
    }
    if !positive(d.dpi) {
        errors.push(ValidationError::new("dpi", format!("must be positive, got {}", d.dpi)));
    }
    if d.kde.grid_points < 2 {
        errors.push(ValidationError::new(
            "kde.grid_points",
            format!("must be at least 2, got {}", d.kde.grid_points),
        ));
    }
    if !d.kde.cut.is_finite() || d.kde.cut < 0.0 {
        errors.push(ValidationError::new(
            "kde.cut",
            format!("must be non-negative, got {}", d.kde.cut),
        ));
    }
    if let Bandwidth::Fixed(h) = d.kde.bandwidth {
        if !positive(h) {
            errors.push(ValidationError::new(
                "kde.bandwidth",
                format!("fixed bandwidth must be positive, got {h}"),
            ));
        }
    }
    if d.hist.bins == Some(0) {
        errors.push(ValidationError::new("hist.bins", "must be at least 1"));
    }

    ValidationResult { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&PlotDefaults::default()).is_valid());
    }

    #[test]
    fn collects_every_problem() {
        let mut d = PlotDefaults::default();
        d.figsize = Some((-1.0, 4.0));
        d.dpi = 0.0;
        d.kde.grid_points = 1;
        d.kde.bandwidth = Bandwidth::Fixed(0.0);
        d.hist.bins = Some(0);
        d.colors[1] = " ".to_string();

        let report = validate(&d);
        let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "colors[1]",
                "figsize",
                "dpi",
                "kde.grid_points",
                "kde.bandwidth",
                "hist.bins"
            ]
        );
        assert!(report.to_string().contains("figsize: width and height"));
    }

    #[test]
    fn rejects_future_major_version() {
        let d = PlotDefaults {
            schema_version: "2.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(validate(&d).errors[0].field, "schema_version");
    }
}
