//! Reconstruction error metrics
//!
//! `max_diff`, `min_diff` and `avg_diff` summarise `|original - reconstructed|`
//! in `f64`. SNR and PSNR are reported in decibels:
//!
//! - `snr = 10 log10(mean(original^2) / mse)`
//! - `psnr = 10 log10(max(original)^2 / mse)`
//!
//! Both are `+inf` when the reconstruction is exact.

use std::fmt;

use crate::error::{Error, Result};
use crate::image::RgbImage;
use crate::plane::Plane;

/// Summary statistics of the difference between two planes or images
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMetrics {
    /// Largest absolute difference
    pub max_diff: f64,
    /// Smallest absolute difference
    pub min_diff: f64,
    /// Mean absolute difference
    pub avg_diff: f64,
    pub mse: f64,
    pub rmse: f64,
    pub snr: f64,
    pub psnr: f64,
}

impl ErrorMetrics {
    /// Whether the two inputs were identical.
    pub fn is_exact(&self) -> bool {
        self.mse == 0.0
    }
}

impl fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "max diff: {:.4}", self.max_diff)?;
        writeln!(f, "min diff: {:.4}", self.min_diff)?;
        writeln!(f, "avg diff: {:.4}", self.avg_diff)?;
        writeln!(f, "MSE:      {:.4}", self.mse)?;
        writeln!(f, "RMSE:     {:.4}", self.rmse)?;
        writeln!(f, "SNR:      {:.2} dB", self.snr)?;
        write!(f, "PSNR:     {:.2} dB", self.psnr)
    }
}

/// Running sums over `(original, reconstructed)` sample pairs.
#[derive(Default)]
struct Accumulator {
    count: usize,
    max_diff: f64,
    min_diff: f64,
    sum_abs_diff: f64,
    sum_sq_diff: f64,
    sum_sq_orig: f64,
    max_orig: f64,
}

impl Accumulator {
    fn push(&mut self, original: f64, reconstructed: f64) {
        let diff = original - reconstructed;
        let abs_diff = diff.abs();
        if self.count == 0 {
            self.max_diff = abs_diff;
            self.min_diff = abs_diff;
            self.max_orig = original;
        } else {
            self.max_diff = self.max_diff.max(abs_diff);
            self.min_diff = self.min_diff.min(abs_diff);
            self.max_orig = self.max_orig.max(original);
        }
        self.count += 1;
        self.sum_abs_diff += abs_diff;
        self.sum_sq_diff += diff * diff;
        self.sum_sq_orig += original * original;
    }

    fn finish(self) -> ErrorMetrics {
        let n = self.count as f64;
        let mse = self.sum_sq_diff / n;
        let (snr, psnr) = if mse == 0.0 {
            (f64::INFINITY, f64::INFINITY)
        } else {
            (
                10.0 * (self.sum_sq_orig / n / mse).log10(),
                10.0 * (self.max_orig * self.max_orig / mse).log10(),
            )
        };
        ErrorMetrics {
            max_diff: self.max_diff,
            min_diff: self.min_diff,
            avg_diff: self.sum_abs_diff / n,
            mse,
            rmse: mse.sqrt(),
            snr,
            psnr,
        }
    }
}

fn check_shapes<T: Copy, U: Copy>(original: &Plane<T>, other: &Plane<U>) -> Result<()> {
    if original.shape() != other.shape() {
        return Err(Error::ShapeMismatch {
            stage: "error metrics",
            expected: original.shape(),
            actual: other.shape(),
        });
    }
    if original.shape().is_empty() {
        return Err(Error::InvalidDimensions {
            width: original.width(),
            height: original.height(),
            reason: "no samples to compare",
        });
    }
    Ok(())
}

/// Metrics between two planes of equal shape.
pub fn plane_metrics<T>(original: &Plane<T>, reconstructed: &Plane<T>) -> Result<ErrorMetrics>
where
    T: Copy + Into<f64>,
{
    check_shapes(original, reconstructed)?;
    let mut acc = Accumulator::default();
    for (&a, &b) in original.as_slice().iter().zip(reconstructed.as_slice()) {
        acc.push(a.into(), b.into());
    }
    Ok(acc.finish())
}

/// Metrics over all samples of all three channels of two images.
pub fn image_metrics(original: &RgbImage, reconstructed: &RgbImage) -> Result<ErrorMetrics> {
    check_shapes(original.red(), reconstructed.red())?;
    let mut acc = Accumulator::default();
    for (a, b) in original.planes().iter().zip(reconstructed.planes()) {
        for (&x, &y) in a.as_slice().iter().zip(b.as_slice()) {
            acc.push(f64::from(x), f64::from(y));
        }
    }
    Ok(acc.finish())
}

/// Per-channel metrics for a YCbCr triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMetrics {
    pub y: ErrorMetrics,
    pub cb: ErrorMetrics,
    pub cr: ErrorMetrics,
}

/// Metrics for Y, Cb and Cr separately, e.g. between the planes recorded by
/// an encode trace and those recorded by the matching decode trace.
pub fn channel_metrics(
    original: &[Plane<f64>; 3],
    reconstructed: &[Plane<f64>; 3],
) -> Result<ChannelMetrics> {
    Ok(ChannelMetrics {
        y: plane_metrics(&original[0], &reconstructed[0])?,
        cb: plane_metrics(&original[1], &reconstructed[1])?,
        cr: plane_metrics(&original[2], &reconstructed[2])?,
    })
}

/// Per-sample `|original - reconstructed|`.
pub fn absolute_difference<T>(original: &Plane<T>, reconstructed: &Plane<T>) -> Result<Plane<f64>>
where
    T: Copy + Into<f64>,
{
    check_shapes(original, reconstructed)?;
    Ok(Plane::from_fn(original.height(), original.width(), |r, c| {
        let a: f64 = original.get(r, c).into();
        let b: f64 = reconstructed.get(r, c).into();
        (a - b).abs()
    }))
}
