//! Error types for bfplot.

use thiserror::Error;

/// Result type alias for bfplot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for bfplot.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // Data access errors (20-29)
    #[error("variable '{var}' not found in group '{group}'")]
    VariableNotFound { group: String, var: String },

    #[error("group '{group}' not found in inference data")]
    GroupNotFound { group: String },

    #[error("invalid inference data: {0}")]
    InvalidDataset(String),

    #[error("no draws for variable '{var}' in group '{group}'")]
    EmptySamples { group: String, var: String },

    // Estimation errors (30-39)
    #[error("bayes factor estimation failed: {0}")]
    Estimation(String),

    #[error("numerical instability detected: {0}")]
    NumericalInstability(String),

    // Capability errors (40-49)
    #[error("capability not available: {0}")]
    CapabilityMissing(String),

    #[error("bayes factor function '{function}' not found in the statistics backend")]
    EstimatorNotFound {
        function: String,
        #[source]
        source: Box<Error>,
    },

    // Rendering errors (50-59)
    #[error("unsupported backend '{backend}' for {plot_kind} (available: {available})")]
    UnsupportedBackend {
        backend: String,
        plot_kind: String,
        available: String,
    },

    #[error("malformed display parameter '{name}': {reason}")]
    MalformedDisplayParameter { name: String, reason: String },

    #[error("rendering failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig { .. } => 11,
            Error::VariableNotFound { .. } => 20,
            Error::GroupNotFound { .. } => 21,
            Error::InvalidDataset(_) => 22,
            Error::EmptySamples { .. } => 23,
            Error::Estimation(_) => 30,
            Error::NumericalInstability(_) => 31,
            Error::CapabilityMissing(_) => 40,
            Error::EstimatorNotFound { .. } => 41,
            Error::UnsupportedBackend { .. } => 50,
            Error::MalformedDisplayParameter { .. } => 51,
            Error::Render(_) => 52,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Shorthand for a display-parameter validation failure.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedDisplayParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True for the "requested data is absent" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::VariableNotFound { .. } | Error::GroupNotFound { .. }
        )
    }

    /// True when the statistics backend lacks a required entry point,
    /// either as raised or after clarification.
    pub fn is_capability_missing(&self) -> bool {
        matches!(
            self,
            Error::CapabilityMissing(_) | Error::EstimatorNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn codes_are_grouped_by_family() {
        let not_found = Error::VariableNotFound {
            group: "prior".into(),
            var: "a".into(),
        };
        assert_eq!(not_found.code() / 10, 2);
        assert_eq!(Error::malformed("figsize", "negative").code(), 51);
        assert_eq!(Error::CapabilityMissing("x".into()).code(), 40);
    }

    #[test]
    fn estimator_not_found_chains_cause() {
        let cause = Error::CapabilityMissing("bayes_factor".into());
        let err = Error::EstimatorNotFound {
            function: "bayes_factor".into(),
            source: Box::new(cause),
        };
        assert!(err.is_capability_missing());
        let source = err.source().expect("cause should be chained");
        assert!(source.to_string().contains("bayes_factor"));
    }

    #[test]
    fn not_found_messages_name_group_and_var() {
        let err = Error::VariableNotFound {
            group: "posterior".into(),
            var: "theta".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "variable 'theta' not found in group 'posterior'"
        );
    }
}
