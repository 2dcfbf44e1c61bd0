//! Common test utilities for dctcodec tests.
//!
//! Synthetic image generators, so no test depends on files on disk.

#![allow(dead_code)]

use dctcodec::{Plane, RgbImage};

/// Initialise logging once; `RUST_LOG=debug` shows pipeline stages.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every channel set to `value`.
pub fn uniform(width: usize, height: usize, value: u8) -> RgbImage {
    let plane = Plane::filled(height, width, value);
    RgbImage::from_planes(plane.clone(), plane.clone(), plane).unwrap()
}

/// Smooth diagonal gradients, different per channel.
pub fn gradient(width: usize, height: usize) -> RgbImage {
    let w = width.max(2) as f64 - 1.0;
    let h = height.max(2) as f64 - 1.0;
    let r = Plane::from_fn(height, width, |_, x| (x as f64 / w * 255.0).round() as u8);
    let g = Plane::from_fn(height, width, |y, _| (y as f64 / h * 255.0).round() as u8);
    let b = Plane::from_fn(height, width, |y, x| {
        ((x as f64 / w + y as f64 / h) * 127.5).round() as u8
    });
    RgbImage::from_planes(r, g, b).unwrap()
}

/// Gradients mixed with periodic patterns, similar to photographic texture.
pub fn textured(width: usize, height: usize) -> RgbImage {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 / width as f32;
            let fy = y as f32 / height as f32;

            let r = ((fx * 200.0 + fy * 50.0) % 256.0) as u8;
            let g = ((fy * 180.0 + (x * 3) as f32 % 100.0) as u32 % 256) as u8;
            let b = (((x + y) % 64) as f32 / 64.0 * 128.0 + 64.0) as u8;

            pixels.extend_from_slice(&[r, g, b]);
        }
    }
    RgbImage::from_interleaved(&pixels, width, height).unwrap()
}

/// Deterministic xorshift32 generator.
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    /// Uniform in `[lo, hi)`.
    pub fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * (f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0))
    }

    /// Uniform in `[lo, hi]`.
    pub fn next_i32(&mut self, lo: i32, hi: i32) -> i32 {
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        (i64::from(lo) + (u64::from(self.next_u32()) % span) as i64) as i32
    }
}

/// Random 8-bit noise image.
pub fn noise(width: usize, height: usize, seed: u32) -> RgbImage {
    let mut rng = XorShift::new(seed);
    let pixels: Vec<u8> = (0..width * height * 3).map(|_| rng.next_u32() as u8).collect();
    RgbImage::from_interleaved(&pixels, width, height).unwrap()
}
