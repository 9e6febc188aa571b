//! bfplot common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the bfplot crates:
//! - Figure identity for rendered outputs
//! - Result schema versioning
//! - The unified error type with stable codes
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::FigureId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
