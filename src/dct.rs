//! Block DCT (Discrete Cosine Transform)
//!
//! Orthonormal type-II forward transform and its type-III inverse, applied
//! per `n x n` tile as a 1D pass over rows followed by a pass over columns.
//! With this normalization a constant block of value `v` has DC `v * n` and
//! `inverse(forward(x))` reproduces `x` up to floating-point rounding.

use crate::error::{Error, Result};
use crate::plane::Plane;

/// Cached cosine basis for one block size.
#[derive(Debug, Clone)]
pub struct BlockDct {
    size: usize,
    /// `basis[u * n + x] = c(u) * cos((2x + 1) * u * PI / 2n)`
    basis: Vec<f64>,
}

impl BlockDct {
    /// Build the basis for `size x size` blocks. `size` must be a power of two.
    pub fn new(size: usize) -> Result<Self> {
        validate_block_size(size)?;

        let n = size as f64;
        let dc_norm = (1.0 / n).sqrt();
        let ac_norm = (2.0 / n).sqrt();

        let mut basis = vec![0.0f64; size * size];
        for u in 0..size {
            let norm = if u == 0 { dc_norm } else { ac_norm };
            for x in 0..size {
                let angle = (2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / (2.0 * n);
                basis[u * size + x] = norm * angle.cos();
            }
        }

        Ok(Self { size, basis })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward 2D DCT of one row-major block, in place.
    pub fn forward_block(&self, block: &mut [f64]) {
        self.apply(block, false);
    }

    /// Inverse 2D DCT of one row-major block, in place.
    pub fn inverse_block(&self, block: &mut [f64]) {
        self.apply(block, true);
    }

    #[inline]
    fn coef(&self, k: usize, i: usize, inverse: bool) -> f64 {
        if inverse {
            self.basis[i * self.size + k]
        } else {
            self.basis[k * self.size + i]
        }
    }

    fn apply(&self, block: &mut [f64], inverse: bool) {
        let n = self.size;
        debug_assert_eq!(block.len(), n * n);
        let mut temp = vec![0.0f64; n * n];

        // 1D transform over each row
        for r in 0..n {
            let row = &block[r * n..(r + 1) * n];
            for k in 0..n {
                let mut acc = 0.0;
                for (i, &v) in row.iter().enumerate() {
                    acc += self.coef(k, i, inverse) * v;
                }
                temp[r * n + k] = acc;
            }
        }

        // Same transform over each resulting column
        for c in 0..n {
            for k in 0..n {
                let mut acc = 0.0;
                for i in 0..n {
                    acc += self.coef(k, i, inverse) * temp[i * n + c];
                }
                block[k * n + c] = acc;
            }
        }
    }

    /// Transform every block of `plane`.
    pub fn forward(&self, plane: &Plane<f64>) -> Result<Plane<f64>> {
        self.transform_plane(plane, false)
    }

    /// Invert every block of `plane`.
    pub fn inverse(&self, plane: &Plane<f64>) -> Result<Plane<f64>> {
        self.transform_plane(plane, true)
    }

    fn transform_plane(&self, plane: &Plane<f64>, inverse: bool) -> Result<Plane<f64>> {
        let n = self.size;
        plane.ensure_block_aligned(n, if inverse { "inverse dct" } else { "forward dct" })?;

        let mut out = Plane::new(plane.height(), plane.width());
        let mut block = vec![0.0f64; n * n];
        for br in 0..plane.block_rows(n) {
            for bc in 0..plane.block_cols(n) {
                plane.read_block(br, bc, n, &mut block);
                self.apply(&mut block, inverse);
                out.write_block(br, bc, n, &block);
            }
        }
        Ok(out)
    }
}

/// Block sizes must be positive powers of two.
pub fn validate_block_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidBlockSize {
            value: size,
            reason: "must be positive",
        });
    }
    if !size.is_power_of_two() {
        return Err(Error::InvalidBlockSize {
            value: size,
            reason: "must be a power of two",
        });
    }
    Ok(())
}

/// Forward block DCT of a block-aligned plane.
pub fn forward(plane: &Plane<f64>, block_size: usize) -> Result<Plane<f64>> {
    BlockDct::new(block_size)?.forward(plane)
}

/// Inverse block DCT of a block-aligned plane.
pub fn inverse(plane: &Plane<f64>, block_size: usize) -> Result<Plane<f64>> {
    BlockDct::new(block_size)?.inverse(plane)
}
