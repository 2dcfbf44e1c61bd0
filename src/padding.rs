//! Edge-replicating block padding
//!
//! Planes are extended on the bottom and right only, by replicating the last
//! row and column. Zero fill would bias the DC coefficient of border blocks.

use crate::error::{Error, Result};
use crate::plane::{Plane, Shape};

/// Samples needed to bring `dim` up to a multiple of `multiple`.
///
/// A zero `multiple` cannot be reached by padding and yields 0.
#[inline]
pub fn padding_amount(dim: usize, multiple: usize) -> usize {
    if multiple == 0 {
        return 0;
    }
    (multiple - dim % multiple) % multiple
}

/// Pad `plane` so both dimensions are multiples of `block_size`.
pub fn pad<T: Copy>(plane: &Plane<T>, block_size: usize) -> Result<Plane<T>> {
    pad_to_multiple(plane, block_size, block_size)
}

/// Pad rows to a multiple of `row_multiple` and columns to a multiple of
/// `col_multiple`. Returns an unchanged copy when already aligned.
pub fn pad_to_multiple<T: Copy>(
    plane: &Plane<T>,
    row_multiple: usize,
    col_multiple: usize,
) -> Result<Plane<T>> {
    if row_multiple == 0 || col_multiple == 0 {
        return Err(Error::InvalidBlockSize {
            value: 0,
            reason: "padding multiple must be positive",
        });
    }

    let height = plane.height();
    let width = plane.width();
    let padded_height = height + padding_amount(height, row_multiple);
    let padded_width = width + padding_amount(width, col_multiple);

    if padded_height == height && padded_width == width {
        return Ok(plane.clone());
    }

    Ok(Plane::from_fn(padded_height, padded_width, |row, col| {
        plane.get(row.min(height - 1), col.min(width - 1))
    }))
}

/// Crop `plane` to `target` from the top-left corner.
///
/// This inverts [`pad`] when `target` is the shape recorded before padding.
pub fn unpad<T: Copy>(plane: &Plane<T>, target: Shape) -> Result<Plane<T>> {
    if target.height > plane.height() || target.width > plane.width() {
        return Err(Error::ShapeMismatch {
            stage: "crop",
            expected: target,
            actual: plane.shape(),
        });
    }
    if target == plane.shape() {
        return Ok(plane.clone());
    }
    Ok(Plane::from_fn(target.height, target.width, |row, col| {
        plane.get(row, col)
    }))
}
