//! Codec configuration
//!
//! One immutable value shared by an encode/decode pair. Decoding must use the
//! same chroma mode, block size and quality factor as encoding.

use crate::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_QUALITY};
use crate::dct::validate_block_size;
use crate::error::Result;
use crate::quant::clamp_quality;
use crate::types::{ChromaMode, Interpolation};

/// Encoding/decoding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    quality_factor: i32,
    chroma_mode: ChromaMode,
    block_size: usize,
    interpolation: Interpolation,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecConfig {
    /// Quality 100, 4:2:0, 8x8 blocks, linear interpolation
    pub const fn new() -> Self {
        Self {
            quality_factor: DEFAULT_QUALITY,
            chroma_mode: ChromaMode::S420,
            block_size: DEFAULT_BLOCK_SIZE,
            interpolation: Interpolation::Linear,
        }
    }

    /// Set the quality factor. Values outside [1, 100] are clamped when used.
    pub fn quality(mut self, quality_factor: i32) -> Self {
        self.quality_factor = quality_factor;
        self
    }

    /// Set chroma subsampling mode
    pub fn chroma_mode(mut self, mode: ChromaMode) -> Self {
        self.chroma_mode = mode;
        self
    }

    /// Set the block dimension. 8 is the only size with a native
    /// quantization table; other powers of two sample it by nearest index.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the chroma resampling kernel
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Check the configuration before any processing starts.
    pub fn validate(&self) -> Result<()> {
        validate_block_size(self.block_size)
    }

    /// Quality factor as requested
    pub fn requested_quality(&self) -> i32 {
        self.quality_factor
    }

    /// Quality factor clamped to [1, 100]
    pub fn effective_quality(&self) -> u8 {
        clamp_quality(self.quality_factor)
    }

    pub fn get_chroma_mode(&self) -> ChromaMode {
        self.chroma_mode
    }

    pub fn get_block_size(&self) -> usize {
        self.block_size
    }

    pub fn get_interpolation(&self) -> Interpolation {
        self.interpolation
    }
}
