//! Coefficient sink interface for the downstream entropy coder
//!
//! The encoder hands each channel's quantized, DC-predicted coefficient plane
//! to a [`CoefficientEncoder`] once the transform chain has finished. The
//! default sink does nothing; [`ZigzagCollector`] reorders blocks into the
//! zigzag scan a run-length stage consumes.

use crate::error::{Error, Result};
use crate::plane::Plane;
use crate::types::Component;

/// Consumer of quantized coefficient planes.
pub trait CoefficientEncoder {
    /// Receive one channel's coefficients. Called for Y, Cb, Cr in order.
    fn encode_component(
        &mut self,
        component: Component,
        coefficients: &Plane<i32>,
        block_size: usize,
    ) -> Result<()>;

    /// Called once after all components were delivered.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<C: CoefficientEncoder + ?Sized> CoefficientEncoder for &mut C {
    fn encode_component(
        &mut self,
        component: Component,
        coefficients: &Plane<i32>,
        block_size: usize,
    ) -> Result<()> {
        (**self).encode_component(component, coefficients, block_size)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCoefficientEncoder;

impl CoefficientEncoder for NoopCoefficientEncoder {
    fn encode_component(&mut self, _: Component, _: &Plane<i32>, _: usize) -> Result<()> {
        Ok(())
    }
}

/// Zigzag scan order for an `n x n` block: maps scan position to natural
/// (row-major) index. For `n = 8` this is the JPEG order.
pub fn zigzag_order(n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n * n);
    if n == 0 {
        return order;
    }
    for s in 0..(2 * n - 1) {
        let lo = s.saturating_sub(n - 1);
        let hi = s.min(n - 1);
        if s % 2 == 1 {
            for row in lo..=hi {
                order.push(row * n + (s - row));
            }
        } else {
            for row in (lo..=hi).rev() {
                order.push(row * n + (s - row));
            }
        }
    }
    order
}

/// Collects every block of every component in zigzag order.
#[derive(Debug, Clone, Default)]
pub struct ZigzagCollector {
    block_size: Option<usize>,
    blocks: [Vec<Vec<i32>>; 3],
    finished: bool,
}

impl ZigzagCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zigzag-ordered blocks of `component`, in row-major block order.
    pub fn blocks(&self, component: Component) -> &[Vec<i32>] {
        &self.blocks[component.index()]
    }

    /// Block size seen by the collector, if any component was delivered
    pub fn block_size(&self) -> Option<usize> {
        self.block_size
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl CoefficientEncoder for ZigzagCollector {
    fn encode_component(
        &mut self,
        component: Component,
        coefficients: &Plane<i32>,
        block_size: usize,
    ) -> Result<()> {
        match self.block_size {
            Some(n) if n != block_size => {
                return Err(Error::Coefficient {
                    reason: format!(
                        "{} delivered with block size {}, expected {}",
                        component, block_size, n
                    ),
                });
            }
            _ => self.block_size = Some(block_size),
        }
        coefficients.ensure_block_aligned(block_size, "zigzag scan")?;

        let order = zigzag_order(block_size);
        let mut natural = vec![0i32; block_size * block_size];
        let out = &mut self.blocks[component.index()];
        out.clear();
        for br in 0..coefficients.block_rows(block_size) {
            for bc in 0..coefficients.block_cols(block_size) {
                coefficients.read_block(br, bc, block_size, &mut natural);
                out.push(order.iter().map(|&i| natural[i]).collect());
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
