//! bfplot math utilities.

pub mod math;

pub use math::histogram::{binned_histogram, integer_histogram, Histogram, MAX_INTEGER_BINS};
pub use math::kde::*;
pub use math::savage_dickey::*;
pub use math::DensityError;
