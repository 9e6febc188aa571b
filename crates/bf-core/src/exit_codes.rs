//! Exit codes for the bfplot CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.

use bf_common::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Configuration error
    ConfigError = 10,

    /// Dataset missing, unreadable or malformed
    DataError = 11,

    /// Bayes factor estimation failed
    EstimationError = 12,

    /// I/O error
    IoError = 13,

    /// Unknown backend or figure drawing failure
    RenderError = 14,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Exit code for a failed command.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidConfig { .. } => ExitCode::ConfigError,
            Error::VariableNotFound { .. }
            | Error::GroupNotFound { .. }
            | Error::InvalidDataset(_)
            | Error::EmptySamples { .. }
            | Error::Json(_) => ExitCode::DataError,
            Error::Estimation(_)
            | Error::NumericalInstability(_)
            | Error::CapabilityMissing(_)
            | Error::EstimatorNotFound { .. } => ExitCode::EstimationError,
            Error::UnsupportedBackend { .. }
            | Error::MalformedDisplayParameter { .. }
            | Error::Render(_) => ExitCode::RenderError,
            Error::Io(_) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_map_to_codes() {
        let cases = [
            (Error::Config("x".into()), 10),
            (
                Error::VariableNotFound {
                    group: "posterior".into(),
                    var: "a".into(),
                },
                11,
            ),
            (Error::NumericalInstability("x".into()), 12),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x")),
                13,
            ),
            (Error::malformed("dpi", "x"), 14),
        ];
        for (err, code) in cases {
            assert_eq!(ExitCode::from_error(&err).as_i32(), code, "{err}");
        }
        assert!(!ExitCode::Clean.is_error());
        assert!(ExitCode::RenderError.is_error());
    }
}
