//! # dctcodec - Baseline Block-Transform Image Codec
//!
//! dctcodec models the transform chain of JPEG-style compression: RGB to
//! YCbCr, chroma subsampling, block DCT, quantization and DC prediction. The
//! encoder produces quantized coefficient planes plus the metadata needed to
//! invert them; the decoder reconstructs an 8-bit RGB image of the original
//! size.
//!
//! Entropy coding is not performed. The quantized coefficients can be handed
//! to any [`CoefficientEncoder`] as they are produced.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dctcodec::{ChromaMode, CodecConfig, Decoder, Encoder, RgbImage};
//!
//! let config = CodecConfig::new()
//!     .quality(85)
//!     .chroma_mode(ChromaMode::S420);
//!
//! let image = RgbImage::from_interleaved(&pixels, width, height)?;
//! let encoded = Encoder::new(config)?.encode(&image)?;
//! let decoded = Decoder::new(config)?.decode(&encoded)?;
//! ```
//!
//! ## Pipeline
//!
//! | stage | encode | decode |
//! |-------|--------|--------|
//! | padding | edge replication to the MCU grid | crop to original shape |
//! | color | RGB to YCbCr | YCbCr to RGB, clamp to 8 bits |
//! | chroma | downsample Cb, Cr | upsample Cb, Cr |
//! | transform | orthonormal DCT-II per block | DCT-III per block |
//! | quantization | `round(c / q)` | `v * q` |
//! | DC prediction | differences | prefix sum |

// Core modules
pub mod analysis;
mod config;
pub mod consts;
mod error;
mod image;
mod plane;
mod types;

// Pipeline stages
pub mod color;
pub mod dct;
pub mod dpcm;
pub mod padding;
pub mod quant;
pub mod resample;

// Orchestration
mod decode;
mod encode;
pub mod entropy;

// Public API
pub use analysis::{ChannelMetrics, ErrorMetrics};
pub use config::CodecConfig;
pub use decode::{DecodeTrace, Decoder};
pub use encode::{EncodeTrace, EncodedData, Encoder, Metadata};
pub use entropy::{CoefficientEncoder, NoopCoefficientEncoder, ZigzagCollector};
pub use error::{Error, Result};
pub use image::RgbImage;
pub use plane::{Plane, Shape};
pub use types::{ChromaMode, Component, Interpolation};

/// Encode `image` with `config`.
pub fn encode(image: &RgbImage, config: &CodecConfig) -> Result<EncodedData> {
    Encoder::new(*config)?.encode(image)
}

/// Decode `encoded` with `config`. The configuration must match the one used
/// to encode.
pub fn decode(encoded: &EncodedData, config: &CodecConfig) -> Result<RgbImage> {
    Decoder::new(*config)?.decode(encoded)
}

/// Encode then decode with one configuration.
pub fn roundtrip(image: &RgbImage, config: &CodecConfig) -> Result<RgbImage> {
    decode(&encode(image, config)?, config)
}
