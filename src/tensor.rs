//! Dense row-major N-dimensional buffers.
//!
//! Broadcasting is materialized rather than simulated with strides: a tensor is
//! a flat `Vec` plus a shape, and axis repetition copies data. The last axis is
//! contiguous; axis 0 is outermost.

use crate::errors::GdftError;

/// A dense N-dimensional array stored in row-major order.
///
/// The empty shape `[]` is the degenerate zero-dimensional tensor holding a
/// single value. A shape containing a zero extent holds no values at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    values: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Creates a tensor after checking that `values` fills `shape` exactly.
    pub fn new(values: Vec<T>, shape: Vec<usize>) -> Result<Self, GdftError> {
        let expected = shape.iter().product::<usize>();
        if values.len() != expected {
            return Err(GdftError::ShapeMismatch {
                context: "tensor values",
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { values, shape })
    }

    /// Non-validating constructor for callers that built `values` from `shape`.
    pub(crate) fn from_parts(values: Vec<T>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(values.len(), shape.iter().product::<usize>());
        Self { values, shape }
    }

    /// The extent of every axis, outermost first.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.shape.len()
    }

    /// The flat row-major storage.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Consumes the tensor, returning its flat storage.
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Total number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat offset of a multi-index under row-major layout.
    #[must_use]
    pub fn flat_index(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.shape.len());
        index.iter().zip(&self.shape).fold(0, |acc, (&i, &extent)| {
            debug_assert!(i < extent);
            acc * extent + i
        })
    }

    /// Element at a multi-index.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> &T {
        &self.values[self.flat_index(index)]
    }

    /// Applies `f` to every element, preserving the shape.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Tensor<U> {
        Tensor {
            values: self.values.into_iter().map(f).collect(),
            shape: self.shape,
        }
    }
}

impl<T: Clone> Tensor<T> {
    /// Repeats each slice along `axis` `reps` times consecutively, multiplying
    /// that axis extent by `reps`.
    ///
    /// Matches numpy's `repeat(reps, axis=axis)`: the element at position `j`
    /// along the grown axis is the source element at `j / reps`.
    #[must_use]
    pub fn repeat(&self, axis: usize, reps: usize) -> Self {
        assert!(
            axis < self.shape.len(),
            "repeat axis {axis} out of range for a {}-dimensional tensor",
            self.shape.len()
        );
        let mut shape = self.shape.clone();
        shape[axis] *= reps;

        if self.values.is_empty() || reps == 0 {
            return Self {
                values: Vec::new(),
                shape,
            };
        }

        // Non-empty storage means every extent is positive, so both chunk
        // sizes below are non-zero.
        let extent = self.shape[axis];
        let inner: usize = self.shape[axis + 1..].iter().product();

        let mut values = Vec::with_capacity(self.values.len() * reps);
        for block in self.values.chunks(extent * inner) {
            for slice in block.chunks(inner) {
                for _ in 0..reps {
                    values.extend_from_slice(slice);
                }
            }
        }
        Self { values, shape }
    }
}

/// Lexicographic multi-index iterator over a grid shape, axis 0 outermost.
///
/// An odometer-style counter: finite, restartable via [`LexIndices::new`], and
/// free of recursion regardless of dimension. The empty shape yields exactly
/// one empty index; a shape with a zero extent yields nothing.
#[derive(Debug, Clone)]
pub struct LexIndices {
    shape: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl LexIndices {
    /// Starts the counter at the all-zero index.
    #[must_use]
    pub fn new(shape: &[usize]) -> Self {
        let next = if shape.contains(&0) {
            None
        } else {
            Some(vec![0; shape.len()])
        };
        Self {
            shape: shape.to_vec(),
            next,
        }
    }
}

impl Iterator for LexIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut bumped = current.clone();
        for axis in (0..self.shape.len()).rev() {
            bumped[axis] += 1;
            if bumped[axis] < self.shape[axis] {
                self.next = Some(bumped);
                break;
            }
            bumped[axis] = 0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_storage() {
        let err = Tensor::new(vec![1.0; 5], vec![2, 3]).unwrap_err();
        assert_eq!(
            err,
            GdftError::ShapeMismatch {
                context: "tensor values",
                expected: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn flat_index_is_row_major() {
        let t = Tensor::new((0..24).collect(), vec![2, 3, 4]).unwrap();
        assert_eq!(*t.get(&[0, 0, 0]), 0);
        assert_eq!(*t.get(&[0, 0, 3]), 3);
        assert_eq!(*t.get(&[0, 1, 0]), 4);
        assert_eq!(*t.get(&[1, 0, 0]), 12);
        assert_eq!(*t.get(&[1, 2, 3]), 23);
    }

    #[test]
    fn zero_dimensional_tensor_holds_one_value() {
        let t = Tensor::new(vec![7], vec![]).unwrap();
        assert_eq!(t.dimension(), 0);
        assert_eq!(*t.get(&[]), 7);
    }

    #[test]
    fn map_transforms_values_and_keeps_the_shape() {
        let t = Tensor::new(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let doubled = t.map(|v| f64::from(v) * 2.0);
        assert_eq!(doubled.shape(), &[2, 3]);
        assert_eq!(doubled.values(), &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn repeat_grows_the_target_axis() {
        // shape [2, 1] -> repeat axis 1 by 3 -> shape [2, 3]
        let t = Tensor::new(vec![0.0, 1.0], vec![2, 1]).unwrap();
        let r = t.repeat(1, 3);
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.values(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn repeat_duplicates_slices_consecutively() {
        // numpy: [[a, b]].repeat(2, axis=1) == [[a, a, b, b]]
        let t = Tensor::new(vec!['a', 'b'], vec![1, 2]).unwrap();
        let r = t.repeat(1, 2);
        assert_eq!(r.shape(), &[1, 4]);
        assert_eq!(r.values(), &['a', 'a', 'b', 'b']);
    }

    #[test]
    fn repeat_on_outer_axis_tiles_whole_blocks() {
        let t = Tensor::new(vec![0.0, 1.0, 2.0], vec![1, 3]).unwrap();
        let r = t.repeat(0, 2);
        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.values(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn repeat_with_zero_reps_empties_the_axis() {
        let t = Tensor::new(vec![1, 2, 3], vec![3]).unwrap();
        let r = t.repeat(0, 0);
        assert_eq!(r.shape(), &[0]);
        assert!(r.is_empty());
    }

    #[test]
    fn lex_indices_cover_the_grid_in_order() {
        let indices: Vec<_> = LexIndices::new(&[2, 3]).collect();
        assert_eq!(
            indices,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn lex_indices_of_empty_shape_yield_one_empty_index() {
        let indices: Vec<_> = LexIndices::new(&[]).collect();
        assert_eq!(indices, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn lex_indices_of_zero_extent_yield_nothing() {
        assert_eq!(LexIndices::new(&[2, 0, 3]).count(), 0);
    }
}
