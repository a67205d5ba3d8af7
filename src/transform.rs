//! Generalized discrete Fourier transform over offset index grids.
//!
//! The engine generalizes the standard DFT in two directions: both the
//! frequency index K and the sample index N may carry arbitrary real-valued
//! per-axis offsets (centered spectra for odd-length signals being the common
//! use), and the input array may have any dimension. Evaluation is direct
//! summation over the whole grid; there is deliberately no fast transform path.
//!
//! Construction resolves the offsets, precomputes one broadcast index mesh per
//! index space and the normalization scalar, and is the only place errors can
//! occur. Instances are immutable and every evaluation is pure.

use std::f64::consts::TAU;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use itertools::izip;
use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::errors::GdftError;
use crate::mesh::build_meshgrid;
use crate::tensor::{LexIndices, Tensor};

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    /// Forward transform, token `"GDFT"`. Positive phase sign.
    #[default]
    Forward,
    /// Inverse transform, token `"iGDFT"`. Negative phase sign.
    Inverse,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "GDFT",
            Self::Inverse => "iGDFT",
        })
    }
}

impl FromStr for Mode {
    type Err = GdftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GDFT" => Ok(Self::Forward),
            "iGDFT" => Ok(Self::Inverse),
            _ => Err(GdftError::InvalidMode(s.to_string())),
        }
    }
}

/// Normalization convention.
///
/// | convention | mode    | scalar                  |
/// |------------|---------|-------------------------|
/// | Symmetric  | either  | `1 / sqrt(prod(shape))` |
/// | Asymmetric | Forward | `1`                     |
/// | Asymmetric | Inverse | `1 / prod(shape)`       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Normalization {
    /// `1/√(prod(shape))` in both directions, making forward and inverse
    /// mirror images.
    #[default]
    Symmetric,
    /// No forward scaling; the inverse carries the whole `1/prod(shape)`.
    /// This is the convolution-theorem convention.
    Asymmetric,
}

impl Normalization {
    fn scale(self, mode: Mode, grid_size: f64) -> f64 {
        match (self, mode) {
            (Self::Symmetric, _) => 1.0 / grid_size.sqrt(),
            (Self::Asymmetric, Mode::Forward) => 1.0,
            (Self::Asymmetric, Mode::Inverse) => 1.0 / grid_size,
        }
    }
}

/// Per-axis offset specification for one index space.
///
/// Offsets shift where an index space places its origin. They are real-valued:
/// fractional offsets are legal and shift the evaluation grid off the integer
/// lattice.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Offset {
    /// All-zero offsets: the standard DFT origin.
    #[default]
    Zero,
    /// `-(shape[i] - 1) / 2` per axis, placing the origin mid-grid.
    Centered,
    /// One explicit real offset per axis.
    Custom(Vec<f64>),
}

impl Offset {
    /// Resolves to one concrete offset per axis.
    ///
    /// `Custom` vectors must have exactly one entry per array axis.
    fn resolve(&self, shape: &[usize], context: &'static str) -> Result<Vec<f64>, GdftError> {
        match self {
            Self::Zero => Ok(vec![0.0; shape.len()]),
            Self::Centered => Ok(shape.iter().map(|&s| -((s as f64 - 1.0) / 2.0)).collect()),
            Self::Custom(offsets) => {
                if offsets.len() != shape.len() {
                    return Err(GdftError::ShapeMismatch {
                        context,
                        expected: shape.len(),
                        actual: offsets.len(),
                    });
                }
                Ok(offsets.clone())
            }
        }
    }
}

/// `offset, offset + 1, ..., offset + extent - 1`.
fn arange(extent: usize, offset: f64) -> Vec<f64> {
    (0..extent).map(|i| i as f64 + offset).collect()
}

/// Direct-summation generalized DFT engine over an immutable input array.
///
/// Both index meshes and the normalization scalar are computed once at
/// construction. There are no mutation methods; evaluation at any position is
/// pure with respect to instance state, so instances may be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct Gdft {
    array: Tensor<Complex64>,
    /// Float copy of the grid shape, one divisor per axis.
    shape: Vec<f64>,
    offset_k: Vec<f64>,
    offset_n: Vec<f64>,
    mode: Mode,
    normalization: f64,
    /// Index-N grid plus `offset_n`, one full-shape array per axis.
    mesh_n: Vec<Tensor<f64>>,
    /// Index-K grid plus `offset_k`, one full-shape array per axis.
    mesh_k: Vec<Tensor<f64>>,
}

impl Gdft {
    /// Builds an engine over `array`.
    ///
    /// Fails when a `Custom` offset vector does not have one entry per array
    /// axis. Mode strings are not accepted here; parse them up front with
    /// [`Mode::from_str`](std::str::FromStr).
    pub fn new(
        array: Tensor<Complex64>,
        offset_k: &Offset,
        offset_n: &Offset,
        mode: Mode,
        normalization: Normalization,
    ) -> Result<Self, GdftError> {
        let grid_shape = array.shape().to_vec();
        let offset_k = offset_k.resolve(&grid_shape, "offsetK")?;
        let offset_n = offset_n.resolve(&grid_shape, "offsetN")?;
        let shape: Vec<f64> = grid_shape.iter().map(|&s| s as f64).collect();

        let ns: Vec<Vec<f64>> = izip!(&grid_shape, &offset_n)
            .map(|(&extent, &offset)| arange(extent, offset))
            .collect();
        let ks: Vec<Vec<f64>> = izip!(&grid_shape, &offset_k)
            .map(|(&extent, &offset)| arange(extent, offset))
            .collect();

        let mesh_n = build_meshgrid(&ns);
        let mesh_k = build_meshgrid(&ks);
        let normalization = normalization.scale(mode, shape.iter().product());

        Ok(Self {
            array,
            shape,
            offset_k,
            offset_n,
            mode,
            normalization,
            mesh_n,
            mesh_k,
        })
    }

    /// The input array.
    #[must_use]
    pub fn array(&self) -> &Tensor<Complex64> {
        &self.array
    }

    /// The grid shape, outermost axis first.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.array.shape()
    }

    /// Number of grid axes.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.array.dimension()
    }

    /// The transform direction selected at construction.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The resolved per-axis frequency-index offsets.
    #[must_use]
    pub fn offset_k(&self) -> &[f64] {
        &self.offset_k
    }

    /// The resolved per-axis sample-index offsets.
    #[must_use]
    pub fn offset_n(&self) -> &[f64] {
        &self.offset_n
    }

    /// The scalar every evaluation is multiplied by.
    #[must_use]
    pub const fn normalization(&self) -> f64 {
        self.normalization
    }

    /// The precomputed sample-index meshes (`arange + offsetN` per axis).
    #[must_use]
    pub fn mesh_n(&self) -> &[Tensor<f64>] {
        &self.mesh_n
    }

    /// The precomputed frequency-index meshes (`arange + offsetK` per axis).
    #[must_use]
    pub fn mesh_k(&self) -> &[Tensor<f64>] {
        &self.mesh_k
    }

    /// Evaluates the forward transform at one frequency position `k`.
    ///
    /// `k` may be fractional and need not lie on the default grid. Its length
    /// must equal the array dimension.
    ///
    /// Computes `K' = (k + offsetK) / shape` per axis, then
    /// `normalization * Σ A ⊙ exp(2πi · Σ_i (meshN[i] + offsetN[i]) · K'[i])`.
    /// The mesh already carries `offsetN`; the phase applies the offset a
    /// second time on top of it.
    #[must_use]
    pub fn evaluate_at_k(&self, k: &[f64]) -> Complex64 {
        assert_eq!(
            k.len(),
            self.dimension(),
            "position length must match array dimension"
        );
        let scaled: Vec<f64> = izip!(k, &self.offset_k, &self.shape)
            .map(|(&k_i, &offset, &extent)| (k_i + offset) / extent)
            .collect();
        self.phase_sum(&scaled, &self.mesh_n, &self.offset_n, 1.0)
    }

    /// Evaluates the inverse transform at one sample position `n`.
    ///
    /// Mirror of [`Self::evaluate_at_k`] with the phase sign flipped and the
    /// two index spaces exchanged: `N' = (n + offsetN) / shape`, phase
    /// `-Σ_i (meshK[i] + offsetK[i]) · N'[i]`.
    #[must_use]
    pub fn evaluate_at_n(&self, n: &[f64]) -> Complex64 {
        assert_eq!(
            n.len(),
            self.dimension(),
            "position length must match array dimension"
        );
        let scaled: Vec<f64> = izip!(n, &self.offset_n, &self.shape)
            .map(|(&n_i, &offset, &extent)| (n_i + offset) / extent)
            .collect();
        self.phase_sum(&scaled, &self.mesh_k, &self.offset_k, -1.0)
    }

    /// `normalization * Σ_j A[j] · exp(2πi · sign · Φ[j])` with
    /// `Φ[j] = Σ_i (mesh[i][j] + offset[i]) · scaled[i]`.
    fn phase_sum(
        &self,
        scaled: &[f64],
        meshes: &[Tensor<f64>],
        offsets: &[f64],
        sign: f64,
    ) -> Complex64 {
        let total: Complex64 = self
            .array
            .values()
            .iter()
            .enumerate()
            .map(|(j, &a)| {
                let phase: f64 = izip!(meshes, offsets, scaled)
                    .map(|(mesh, &offset, &s)| (mesh.values()[j] + offset) * s)
                    .sum();
                a * Complex64::cis(sign * TAU * phase)
            })
            .sum();
        total * self.normalization
    }

    /// Evaluates over the full Cartesian product of per-axis positions.
    ///
    /// The result has shape `(positions[0].len(), ..., positions[D-1].len())`,
    /// assembled in lexicographic order with axis 0 outermost. Each position is
    /// routed through [`Self::evaluate_at_k`] or [`Self::evaluate_at_n`]
    /// according to the mode. Positions are independent pure evaluations and
    /// run in parallel when the `parallel` feature is enabled.
    #[instrument(skip_all, fields(dimension = positions.len()), level = "debug")]
    #[must_use]
    pub fn evaluate_grid(&self, positions: &[Vec<f64>]) -> Tensor<Complex64> {
        assert_eq!(
            positions.len(),
            self.dimension(),
            "one position vector per array axis required"
        );
        let grid_shape: Vec<usize> = positions.iter().map(Vec::len).collect();
        let points: Vec<Vec<f64>> = LexIndices::new(&grid_shape)
            .map(|index| {
                izip!(positions, &index)
                    .map(|(axis_positions, &i)| axis_positions[i])
                    .collect()
            })
            .collect();

        #[cfg(feature = "parallel")]
        let values: Vec<Complex64> = points
            .par_iter()
            .map(|point| self.evaluate_point(point))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let values: Vec<Complex64> = points
            .iter()
            .map(|point| self.evaluate_point(point))
            .collect();

        Tensor::from_parts(values, grid_shape)
    }

    fn evaluate_point(&self, point: &[f64]) -> Complex64 {
        match self.mode {
            Mode::Forward => self.evaluate_at_k(point),
            Mode::Inverse => self.evaluate_at_n(point),
        }
    }

    /// Evaluates the default grid `0, 1, ..., shape[i] - 1` per axis.
    #[must_use]
    pub fn evaluate(&self) -> Tensor<Complex64> {
        let positions: Vec<Vec<f64>> = self
            .array
            .shape()
            .iter()
            .map(|&extent| arange(extent, 0.0))
            .collect();
        self.evaluate_grid(&positions)
    }
}
