//! Figure rendering for bfplot.
//!
//! Plots are drawn onto a backend-neutral [`canvas::Canvas`] and finished
//! either as a standalone SVG document or as an HTML page that embeds it.

pub mod canvas;
pub mod color;
pub mod figure;
pub mod html;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod svg;

pub use canvas::Canvas;
pub use color::Color;
pub use figure::Axes;
pub use plots::bf::{BfScene, LineOverlay, Series};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed display parameter '{name}': {reason}")]
    Parameter { name: String, reason: String },
    #[error("nothing to draw: {0}")]
    EmptyScene(String),
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to keep figure file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl RenderError {
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<RenderError> for bf_common::Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Parameter { name, reason } => {
                bf_common::Error::MalformedDisplayParameter { name, reason }
            }
            RenderError::Io(e) => bf_common::Error::Io(e),
            other => bf_common::Error::Render(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
