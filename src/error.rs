//! Construction-error taxonomy.

use thiserror::Error;

/// Errors raised while building an [`crate::axis::Axis`].
///
/// All variants are fatal to the instance under construction; there is no
/// partially built axis to fall back on.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AxisError {
    /// The axis range must satisfy `max > min`.
    #[error("axis range requires max > min (got min = {min}, max = {max})")]
    EmptyRange {
        /// Lower bound that was supplied.
        min: f64,
        /// Upper bound that was supplied.
        max: f64,
    },

    /// The device size must be positive.
    #[error("device size must be positive (got {0})")]
    NonPositiveSize(i32),

    /// The border offset must be positive.
    #[error("border offset must be positive (got {0})")]
    NonPositiveOffset(i32),

    /// The usable axis length must be positive.
    #[error("axis length must be positive (got {0})")]
    NonPositiveLength(i32),

    /// Border plus axis length must fit into the device size.
    #[error("device size {total_size} too small for offset {offset} + length {length}")]
    ExtentTooSmall {
        /// Total device size in pixels.
        total_size: i32,
        /// Reserved border in pixels.
        offset: i32,
        /// Usable axis length in pixels.
        length: i32,
    },
}
