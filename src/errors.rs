//! Error types for transform construction and polynomial multiplication.

use thiserror::Error;

/// Errors surfaced while building a transform or multiplying polynomials.
///
/// Every operation in this crate is a pure deterministic computation, so all
/// failures are input errors and are detected at construction time rather than
/// deep inside an evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GdftError {
    /// A transform mode token other than the two recognized values.
    #[error("unrecognized transform mode {0:?}, expected \"GDFT\" or \"iGDFT\"")]
    InvalidMode(String),

    /// A vector whose length does not match the dimensionality it must pair with.
    #[error("{context}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being paired, e.g. an offset vector or tensor storage.
        context: &'static str,
        /// The length implied by the grid shape.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A zero-length coefficient sequence where at least one coefficient is required.
    #[error("polynomial operand must have at least one coefficient")]
    DegenerateInput,

    /// A padding target shorter than the coefficient sequence it should hold.
    #[error("cannot pad {len} coefficients to shorter order {order}")]
    OrderTooSmall {
        /// The requested transform length.
        order: usize,
        /// The number of coefficients that must fit in it.
        len: usize,
    },
}
