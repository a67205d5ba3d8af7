//! Polynomial multiplication through the convolution theorem.
//!
//! Multiplying two polynomials convolves their coefficient sequences. Instead
//! of the schoolbook double loop, both sequences are padded to the convolution
//! length, transformed forward, multiplied pointwise, and transformed back.
//! The transforms use the asymmetric normalization so the single inverse pass
//! carries the whole `1/len` scale.

use std::fmt::{self, Display, Formatter};
use std::ops::Mul;

use num_complex::Complex64;
use tracing::instrument;

use crate::errors::GdftError;
use crate::tensor::Tensor;
use crate::transform::{Gdft, Mode, Normalization, Offset};

/// A polynomial stored by coefficients of ascending power.
///
/// Immutable after construction; multiplication produces a new instance and
/// never touches its operands. Coefficients are complex in general — products
/// of real polynomials come back with vanishing imaginary parts up to floating
/// point noise.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<Complex64>,
}

impl Polynomial {
    /// Wraps a coefficient sequence, `coefficients[i]` scaling `x^i`.
    #[must_use]
    pub fn new(coefficients: Vec<Complex64>) -> Self {
        Self { coefficients }
    }

    /// Widens real coefficients into the complex plane.
    #[must_use]
    pub fn from_real(coefficients: &[f64]) -> Self {
        Self {
            coefficients: coefficients
                .iter()
                .map(|&c| Complex64::new(c, 0.0))
                .collect(),
        }
    }

    /// The coefficient sequence, ascending power.
    #[must_use]
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Number of stored coefficients (degree plus one, counting zeros).
    #[must_use]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Forward transform of the coefficients zero-padded to `order`.
    ///
    /// Fails when `order` is smaller than the coefficient count.
    pub fn dft(&self, order: usize) -> Result<Tensor<Complex64>, GdftError> {
        if order < self.coefficients.len() {
            return Err(GdftError::OrderTooSmall {
                order,
                len: self.coefficients.len(),
            });
        }
        let mut padded = vec![Complex64::new(0.0, 0.0); order];
        padded[..self.coefficients.len()].copy_from_slice(&self.coefficients);

        let engine = Gdft::new(
            Tensor::new(padded, vec![order])?,
            &Offset::Zero,
            &Offset::Zero,
            Mode::Forward,
            Normalization::Asymmetric,
        )?;
        Ok(engine.evaluate())
    }

    /// Multiplies two polynomials, convolving their coefficient sequences.
    ///
    /// Fails when either operand has no coefficients: the convolution length
    /// `len(p) + len(q) - 1` is only well defined from one coefficient per
    /// operand upward.
    #[instrument(skip_all, fields(lhs = self.coefficients.len(), rhs = other.coefficients.len()))]
    pub fn multiply(&self, other: &Self) -> Result<Self, GdftError> {
        if self.is_empty() || other.is_empty() {
            return Err(GdftError::DegenerateInput);
        }
        let result_len = self.len() + other.len() - 1;

        let lhs = self.dft(result_len)?;
        let rhs = other.dft(result_len)?;

        let product: Vec<Complex64> = lhs
            .values()
            .iter()
            .zip(rhs.values())
            .map(|(&l, &r)| l * r)
            .collect();

        let inverse = Gdft::new(
            Tensor::new(product, vec![result_len])?,
            &Offset::Zero,
            &Offset::Zero,
            Mode::Inverse,
            Normalization::Asymmetric,
        )?;
        Ok(Self::new(inverse.evaluate().into_values()))
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Operator form of [`Polynomial::multiply`].
    ///
    /// Panics when either operand has no coefficients; call `multiply` to
    /// handle that case as an error instead.
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        self.multiply(rhs)
            .expect("polynomial operands must be non-empty")
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial(real part = [")?;
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.6}", c.re)?;
        }
        write!(f, "], imaginary part = [")?;
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.6}", c.im)?;
        }
        write!(f, "])")
    }
}
