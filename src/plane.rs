//! Sample planes and block-grid access
//!
//! A [`Plane`] is a single channel stored row-major with the origin at the
//! top-left. Block-based stages view it as a grid of non-overlapping
//! `n x n` tiles in row-major tile order.

use std::fmt;

use crate::error::{Error, Result};

/// Plane dimensions in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}

impl Shape {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total sample count
    #[must_use]
    pub const fn len(self) -> usize {
        self.height * self.width
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.height == 0 || self.width == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A 2D array of samples for one channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    /// Create a plane with every sample set to `value`.
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Wrap a row-major buffer.
    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != height * width {
            return Err(Error::InvalidPixelData {
                expected: height * width,
                actual: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build a plane by evaluating `f(row, col)` for every sample.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            height,
            width,
            data,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.height, self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.width + col] = value;
    }

    /// One row of samples.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every sample, producing a new plane of the same shape.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Plane<U> {
        Plane {
            height: self.height,
            width: self.width,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Number of block rows for block size `n`.
    #[inline]
    pub fn block_rows(&self, n: usize) -> usize {
        self.height / n
    }

    /// Number of block columns for block size `n`.
    #[inline]
    pub fn block_cols(&self, n: usize) -> usize {
        self.width / n
    }

    /// Fail unless both dimensions are multiples of `n`.
    pub(crate) fn ensure_block_aligned(&self, n: usize, stage: &'static str) -> Result<()> {
        if n == 0 || self.height % n != 0 || self.width % n != 0 {
            let round_up = |v: usize| if n == 0 { v } else { v.div_ceil(n) * n };
            return Err(Error::ShapeMismatch {
                stage,
                expected: Shape::new(round_up(self.height), round_up(self.width)),
                actual: self.shape(),
            });
        }
        Ok(())
    }

    /// Copy block (`block_row`, `block_col`) of size `n` into `out` (row-major, `n*n`).
    pub(crate) fn read_block(&self, block_row: usize, block_col: usize, n: usize, out: &mut [T]) {
        let top = block_row * n;
        let left = block_col * n;
        for r in 0..n {
            let start = (top + r) * self.width + left;
            out[r * n..(r + 1) * n].copy_from_slice(&self.data[start..start + n]);
        }
    }

    /// Write `src` (row-major, `n*n`) into block (`block_row`, `block_col`).
    pub(crate) fn write_block(&mut self, block_row: usize, block_col: usize, n: usize, src: &[T]) {
        let top = block_row * n;
        let left = block_col * n;
        for r in 0..n {
            let start = (top + r) * self.width + left;
            self.data[start..start + n].copy_from_slice(&src[r * n..(r + 1) * n]);
        }
    }
}

impl<T: Copy + Default> Plane<T> {
    /// Create a plane of default-valued samples.
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, T::default())
    }
}

impl Plane<f64> {
    /// Lossless widening of an 8-bit plane.
    pub fn from_u8(plane: &Plane<u8>) -> Self {
        plane.map(f64::from)
    }

    /// Round and clamp every sample to an 8-bit value.
    pub fn to_u8(&self) -> Plane<u8> {
        self.map(|v| v.round().clamp(0.0, 255.0) as u8)
    }
}

/// Apply `f` to each of the Y, Cb, Cr items in order, stopping at the first error.
pub(crate) fn try_map_components<T, U>(
    items: &[T; 3],
    mut f: impl FnMut(crate::types::Component, &T) -> Result<U>,
) -> Result<[U; 3]> {
    use crate::types::Component;

    let [y, cb, cr] = items;
    Ok([
        f(Component::Y, y)?,
        f(Component::Cb, cb)?,
        f(Component::Cr, cr)?,
    ])
}
