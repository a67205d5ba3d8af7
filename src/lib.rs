//! Generalized discrete Fourier transforms over offset index grids.
//!
//! The [`transform::Gdft`] engine evaluates a DFT whose frequency index K and
//! sample index N both carry arbitrary real-valued per-axis offsets, over
//! arrays of any dimension, by direct summation. [`poly::Polynomial`] uses a
//! forward/pointwise-multiply/inverse round trip of that engine to multiply
//! polynomials via the convolution theorem.

pub mod errors;
pub mod mesh;
pub mod poly;
pub mod tensor;
pub mod transform;

pub use errors::GdftError;
pub use mesh::build_meshgrid;
pub use poly::Polynomial;
pub use tensor::{LexIndices, Tensor};
pub use transform::{Gdft, Mode, Normalization, Offset};
