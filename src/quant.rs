//! Quantization table handling
//!
//! The standard luminance table is scaled by a factor derived from the
//! quality factor:
//!
//! - `Q < 50`: `scale = 50 / Q`
//! - `Q >= 50`: `scale = (100 - Q) / 50`
//!
//! Entries are `round(base * scale)` clamped to `[1, 255]`, so `Q = 100`
//! yields an all-ones table. Block sizes other than 8 sample the 8x8 table by
//! nearest index: entry `(i, j)` of an `n x n` table is
//! `base[i * 8 / n][j * 8 / n]`.

use log::warn;

use crate::consts::{MAX_QUALITY, MIN_QUALITY, QUANT_TABLE_SIZE, STD_LUMA_QUANT};
use crate::dct::validate_block_size;
use crate::error::Result;
use crate::plane::Plane;

/// Clamp a requested quality factor into `[1, 100]`.
pub fn clamp_quality(quality_factor: i32) -> u8 {
    let clamped = quality_factor.clamp(MIN_QUALITY, MAX_QUALITY);
    if clamped != quality_factor {
        warn!(
            "quality factor {} outside [{}, {}], using {}",
            quality_factor, MIN_QUALITY, MAX_QUALITY, clamped
        );
    }
    clamped as u8
}

/// Scale factor applied to the base table for a (clamped) quality factor.
pub fn quality_scale(quality: u8) -> f64 {
    let q = f64::from(quality.clamp(1, 100));
    if q < 50.0 {
        50.0 / q
    } else {
        (100.0 - q) / 50.0
    }
}

/// Quantization matrix for one quality factor and block size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantMatrix {
    block_size: usize,
    quality: u8,
    /// Step sizes in natural (row-major) order, `block_size^2` entries
    values: Vec<u16>,
}

impl QuantMatrix {
    /// Derive the matrix for `quality_factor` (clamped to [1, 100]).
    pub fn for_quality(quality_factor: i32, block_size: usize) -> Result<Self> {
        validate_block_size(block_size)?;
        let quality = clamp_quality(quality_factor);
        let scale = quality_scale(quality);

        let base = scaled_base(scale);
        let values = if block_size == QUANT_TABLE_SIZE {
            base.to_vec()
        } else {
            let n = block_size;
            let mut values = Vec::with_capacity(n * n);
            for i in 0..n {
                for j in 0..n {
                    let bi = i * QUANT_TABLE_SIZE / n;
                    let bj = j * QUANT_TABLE_SIZE / n;
                    values.push(base[bi * QUANT_TABLE_SIZE + bj]);
                }
            }
            values
        };

        Ok(Self {
            block_size,
            quality,
            values,
        })
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Quality factor this matrix was derived for, after clamping
    #[inline]
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Step size at frequency (`i`, `j`)
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> u16 {
        self.values[i * self.block_size + j]
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

fn scaled_base(scale: f64) -> [u16; 64] {
    let mut values = [0u16; 64];
    for (v, &base) in values.iter_mut().zip(STD_LUMA_QUANT.iter()) {
        *v = (f64::from(base) * scale).round().clamp(1.0, 255.0) as u16;
    }
    values
}

/// Quantize a block-aligned coefficient plane: `round(coeff / q[i, j])`.
pub fn quantize_with(coeffs: &Plane<f64>, matrix: &QuantMatrix) -> Result<Plane<i32>> {
    let n = matrix.block_size();
    coeffs.ensure_block_aligned(n, "quantize")?;
    Ok(Plane::from_fn(coeffs.height(), coeffs.width(), |row, col| {
        let q = f64::from(matrix.at(row % n, col % n));
        (coeffs.get(row, col) / q).round() as i32
    }))
}

/// Dequantize a block-aligned integer plane: `value * q[i, j]`.
pub fn dequantize_with(quantized: &Plane<i32>, matrix: &QuantMatrix) -> Result<Plane<f64>> {
    let n = matrix.block_size();
    quantized.ensure_block_aligned(n, "dequantize")?;
    Ok(Plane::from_fn(quantized.height(), quantized.width(), |row, col| {
        f64::from(quantized.get(row, col)) * f64::from(matrix.at(row % n, col % n))
    }))
}

/// Quantize with the matrix for `quality_factor` and `block_size`.
pub fn quantize(coeffs: &Plane<f64>, quality_factor: i32, block_size: usize) -> Result<Plane<i32>> {
    quantize_with(coeffs, &QuantMatrix::for_quality(quality_factor, block_size)?)
}

/// Dequantize with the matrix for `quality_factor` and `block_size`.
///
/// Supplying a different quality factor than was used to quantize is not an
/// error, but the result is numerically meaningless.
pub fn dequantize(
    quantized: &Plane<i32>,
    quality_factor: i32,
    block_size: usize,
) -> Result<Plane<f64>> {
    dequantize_with(quantized, &QuantMatrix::for_quality(quality_factor, block_size)?)
}
