//! Outer-product broadcast ("meshgrid") construction.
//!
//! Given one coordinate vector per axis, produces one full-grid array per axis
//! in which the value varies only along that axis and is replicated along every
//! other one. Summing corresponding elements across the returned arrays at a
//! fixed multi-index reconstructs the per-axis contributions of that grid
//! point, which is what the transform's phase computation consumes.

use crate::tensor::Tensor;

/// Builds one broadcast array per input axis.
///
/// Output array `i` has shape `(positions[0].len(), ..., positions[D-1].len())`
/// and takes the value `positions[i][idx[i]]` at multi-index `idx`.
///
/// Construction per axis: reshape the 1-D coordinate vector to a shape that is
/// 1 everywhere except the target axis, then repeat along every other axis out
/// to the full grid shape. Zero-length coordinate vectors are legal and yield
/// degenerate empty meshes.
#[must_use]
pub fn build_meshgrid(positions: &[Vec<f64>]) -> Vec<Tensor<f64>> {
    let dimension = positions.len();
    let shape: Vec<usize> = positions.iter().map(Vec::len).collect();

    positions
        .iter()
        .enumerate()
        .map(|(axis, coordinates)| {
            let mut raw_shape = vec![1; dimension];
            raw_shape[axis] = coordinates.len();
            let mut mesh = Tensor::from_parts(coordinates.clone(), raw_shape);

            for (other, &extent) in shape.iter().enumerate() {
                if other != axis {
                    mesh = mesh.repeat(other, extent);
                }
            }
            mesh
        })
        .collect()
}
