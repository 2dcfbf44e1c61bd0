//! Chroma resampling
//!
//! Separable resize with pixel-centre alignment
//! (`src = (dst + 0.5) * in / out - 0.5`) and edge clamping. Resizing to the
//! same length is an exact copy for both kernels, so 4:4:4 passes through
//! untouched.

use crate::error::{Error, Result};
use crate::plane::{Plane, Shape};
use crate::types::{ChromaMode, Interpolation};

/// Keys cubic convolution parameter
const CUBIC_A: f64 = -0.75;

/// Filter taps contributing to one output sample.
#[derive(Debug, Clone)]
struct Taps {
    indices: Vec<usize>,
    weights: Vec<f64>,
}

impl Interpolation {
    /// Kernel support radius in source samples
    fn radius(self) -> isize {
        match self {
            Interpolation::Linear => 1,
            Interpolation::Cubic => 2,
        }
    }

    fn weight(self, distance: f64) -> f64 {
        let x = distance.abs();
        match self {
            Interpolation::Linear => (1.0 - x).max(0.0),
            Interpolation::Cubic => {
                if x <= 1.0 {
                    ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
                } else if x < 2.0 {
                    ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
                } else {
                    0.0
                }
            }
        }
    }
}

/// Compute taps mapping `in_len` source samples onto `out_len` outputs.
fn compute_taps(in_len: usize, out_len: usize, kernel: Interpolation) -> Vec<Taps> {
    let scale = in_len as f64 / out_len as f64;
    let last = in_len as isize - 1;
    let radius = kernel.radius();

    (0..out_len)
        .map(|dst| {
            let src = (dst as f64 + 0.5) * scale - 0.5;
            let base = src.floor() as isize;
            let frac = src - base as f64;

            let mut indices = Vec::with_capacity(2 * radius as usize);
            let mut weights = Vec::with_capacity(2 * radius as usize);
            for k in (1 - radius)..=radius {
                let w = kernel.weight(k as f64 - frac);
                if w == 0.0 {
                    continue;
                }
                indices.push((base + k).clamp(0, last) as usize);
                weights.push(w);
            }

            // Normalise so flat input stays flat
            let sum: f64 = weights.iter().sum();
            if sum != 0.0 && sum != 1.0 {
                for w in &mut weights {
                    *w /= sum;
                }
            }
            Taps { indices, weights }
        })
        .collect()
}

/// Resize `plane` to `target` with the given kernel.
pub fn resize(plane: &Plane<f64>, target: Shape, kernel: Interpolation) -> Plane<f64> {
    if plane.shape() == target {
        return plane.clone();
    }
    if plane.shape().is_empty() || target.is_empty() {
        return Plane::new(target.height, target.width);
    }

    // Horizontal pass
    let col_taps = compute_taps(plane.width(), target.width, kernel);
    let horizontal = Plane::from_fn(plane.height(), target.width, |row, col| {
        let taps = &col_taps[col];
        let src = plane.row(row);
        taps.indices
            .iter()
            .zip(&taps.weights)
            .map(|(&i, &w)| src[i] * w)
            .sum::<f64>()
    });

    // Vertical pass
    let row_taps = compute_taps(plane.height(), target.height, kernel);
    Plane::from_fn(target.height, target.width, |row, col| {
        let taps = &row_taps[row];
        taps.indices
            .iter()
            .zip(&taps.weights)
            .map(|(&i, &w)| horizontal.get(i, col) * w)
            .sum::<f64>()
    })
}

/// Reduce a chroma plane according to `mode`.
///
/// 4:2:0 halves both dimensions, 4:2:2 halves the width, 4:4:4 is identity.
pub fn downsample(plane: &Plane<f64>, mode: ChromaMode, kernel: Interpolation) -> Plane<f64> {
    if mode == ChromaMode::S444 {
        return plane.clone();
    }
    resize(plane, mode.subsampled_shape(plane.shape()), kernel)
}

/// Restore a chroma plane produced by [`downsample`] to `target` (the luma shape).
///
/// The plane must have the shape `downsample` would have produced for
/// `target`; anything else means the data was encoded with another mode.
pub fn upsample(
    plane: &Plane<f64>,
    mode: ChromaMode,
    target: Shape,
    kernel: Interpolation,
) -> Result<Plane<f64>> {
    let expected = mode.subsampled_shape(target);
    if plane.shape() != expected {
        return Err(Error::ShapeMismatch {
            stage: "chroma upsample",
            expected,
            actual: plane.shape(),
        });
    }
    if mode == ChromaMode::S444 {
        return Ok(plane.clone());
    }
    Ok(resize(plane, target, kernel))
}
