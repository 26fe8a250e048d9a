//! isoline-transform - Resampling for the isoline contour filter
//!
//! - [`sample_bicubic`] - one interpolated pixel at normalized coordinates
//! - [`resample_row`] - one output row of a resize
//! - [`scale_to_size`] - a whole serial resize, used as the reference for the
//!   parallel rescale stage

pub mod bicubic;
mod error;
pub mod scale;

pub use bicubic::{cubic_hermite, sample_bicubic};
pub use error::{TransformError, TransformResult};
pub use scale::{normalized_coord, resample_row, scale_to_size};
