//! bfplot core library.
//!
//! Savage-Dickey Bayes factors for a point-null hypothesis, computed from
//! prior and posterior draws and drawn as a density comparison figure.
//!
//! ```no_run
//! use bf_core::data::InferenceData;
//! use bf_core::plot::{plot_bf, BfPlotArgs};
//!
//! let idata = InferenceData::from_path("idata.json".as_ref())?;
//! let (bf, axes) = plot_bf(&idata, "a", BfPlotArgs::new().ref_val(0.0))?;
//! println!("BF10 = {} ({} backend)", bf.bf10, axes.backend);
//! # Ok::<(), bf_core::Error>(())
//! ```

pub mod data;
pub mod exit_codes;
pub mod logging;
pub mod plot;
pub mod report;
pub mod stats;

pub use bf_common::{Error, Result};
pub use data::{extract, InferenceData, SampleArray};
pub use plot::{plot_bf, BfPlotArgs, BfPlotter};
pub use stats::{BayesFactor, DensityAtRef};
