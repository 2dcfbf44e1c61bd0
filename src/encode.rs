//! Encoder
//!
//! Runs the forward transform chain: pad to the MCU grid, convert to YCbCr,
//! downsample chroma, block DCT, quantize, DC prediction. The result is an
//! [`EncodedData`] carrying the coefficient planes plus everything the
//! decoder needs to invert them.

use log::{debug, trace};

use crate::color::rgb_planes_to_ycbcr;
use crate::config::CodecConfig;
use crate::dct::BlockDct;
use crate::dpcm::predict_dc;
use crate::entropy::{CoefficientEncoder, NoopCoefficientEncoder};
use crate::error::{Error, Result};
use crate::image::RgbImage;
use crate::padding::pad_to_multiple;
use crate::plane::{try_map_components, Plane, Shape};
use crate::quant::{quantize_with, QuantMatrix};
use crate::resample::downsample;
use crate::types::{ChromaMode, Component};

/// Parameters recorded at encode time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Image shape before padding; the crop target for reconstruction
    pub original_shape: Shape,
    pub chroma_mode: ChromaMode,
    /// Quality factor after clamping to [1, 100]
    pub quality_factor: u8,
    pub block_size: usize,
}

/// Quantized, DC-predicted coefficient planes for Y, Cb, Cr plus metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedData {
    planes: [Plane<i32>; 3],
    metadata: Metadata,
}

impl EncodedData {
    /// Reassemble encoded data, e.g. after a downstream entropy decoder.
    ///
    /// Shapes are checked by the decoder, not here.
    pub fn from_parts(planes: [Plane<i32>; 3], metadata: Metadata) -> Self {
        Self { planes, metadata }
    }

    pub fn component(&self, component: Component) -> &Plane<i32> {
        &self.planes[component.index()]
    }

    pub fn y(&self) -> &Plane<i32> {
        &self.planes[0]
    }

    pub fn cb(&self) -> &Plane<i32> {
        &self.planes[1]
    }

    pub fn cr(&self) -> &Plane<i32> {
        &self.planes[2]
    }

    pub fn planes(&self) -> &[Plane<i32>; 3] {
        &self.planes
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_parts(self) -> ([Plane<i32>; 3], Metadata) {
        (self.planes, self.metadata)
    }
}

/// Intermediate planes of one encode, in pipeline order
#[derive(Debug, Clone)]
pub struct EncodeTrace {
    /// RGB after edge padding to the MCU grid
    pub padded: [Plane<u8>; 3],
    /// Full-resolution Y, Cb, Cr
    pub ycbcr: [Plane<f64>; 3],
    /// Y unchanged, Cb and Cr after downsampling
    pub subsampled: [Plane<f64>; 3],
    /// Block DCT coefficients
    pub dct: [Plane<f64>; 3],
    /// Quantized coefficients before DC prediction
    pub quantized: [Plane<i32>; 3],
}

/// Image encoder
#[derive(Debug, Clone)]
pub struct Encoder {
    config: CodecConfig,
    dct: BlockDct,
    matrix: QuantMatrix,
}

impl Encoder {
    /// Create an encoder, validating the configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let block_size = config.get_block_size();
        Ok(Self {
            dct: BlockDct::new(block_size)?,
            matrix: QuantMatrix::for_quality(config.requested_quality(), block_size)?,
            config,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Quantization matrix used for every channel
    pub fn quant_matrix(&self) -> &QuantMatrix {
        &self.matrix
    }

    /// Encode an image.
    pub fn encode(&self, image: &RgbImage) -> Result<EncodedData> {
        self.encode_with(image, &mut NoopCoefficientEncoder)
    }

    /// Encode an image and hand each channel's coefficients to `sink`.
    pub fn encode_with<C: CoefficientEncoder + ?Sized>(
        &self,
        image: &RgbImage,
        sink: &mut C,
    ) -> Result<EncodedData> {
        let (encoded, _) = self.run(image, sink)?;
        Ok(encoded)
    }

    /// Encode an image and return the intermediate planes as well.
    pub fn encode_traced(&self, image: &RgbImage) -> Result<(EncodedData, EncodeTrace)> {
        self.run(image, &mut NoopCoefficientEncoder)
    }

    fn run<C: CoefficientEncoder + ?Sized>(
        &self,
        image: &RgbImage,
        sink: &mut C,
    ) -> Result<(EncodedData, EncodeTrace)> {
        let original_shape = image.shape();
        if original_shape.is_empty() {
            return Err(Error::InvalidDimensions {
                width: original_shape.width,
                height: original_shape.height,
                reason: "image has no pixels",
            });
        }

        let mode = self.config.get_chroma_mode();
        let block_size = self.dct.size();
        let mcu = mode.mcu_shape(block_size);
        debug!(
            "encoding {} image: {}, {}x{} blocks, quality {}",
            original_shape,
            mode,
            block_size,
            block_size,
            self.matrix.quality()
        );

        let [r, g, b] = image.planes();
        let padded = [
            pad_to_multiple(r, mcu.height, mcu.width)?,
            pad_to_multiple(g, mcu.height, mcu.width)?,
            pad_to_multiple(b, mcu.height, mcu.width)?,
        ];
        trace!("padded to {} (mcu {})", padded[0].shape(), mcu);

        let ycbcr = rgb_planes_to_ycbcr(&padded[0], &padded[1], &padded[2])?;
        let subsampled = try_map_components(&ycbcr, |component, plane| {
            Ok(if component.is_chroma() {
                downsample(plane, mode, self.config.get_interpolation())
            } else {
                plane.clone()
            })
        })?;

        let dct = try_map_components(&subsampled, |component, plane| {
            let coeffs = self.dct.forward(plane)?;
            trace!(
                "{}: {} -> {} blocks",
                component,
                plane.shape(),
                plane.block_rows(block_size) * plane.block_cols(block_size)
            );
            Ok(coeffs)
        })?;
        let quantized = try_map_components(&dct, |_, coeffs| quantize_with(coeffs, &self.matrix))?;
        let predicted = try_map_components(&quantized, |_, plane| predict_dc(plane, block_size))?;

        for component in Component::ALL {
            sink.encode_component(component, &predicted[component.index()], block_size)?;
        }
        sink.finish()?;

        let encoded = EncodedData {
            planes: predicted,
            metadata: Metadata {
                original_shape,
                chroma_mode: mode,
                quality_factor: self.matrix.quality(),
                block_size,
            },
        };
        debug!(
            "encoded: Y {}, Cb {}, Cr {}",
            encoded.y().shape(),
            encoded.cb().shape(),
            encoded.cr().shape()
        );

        let trace = EncodeTrace {
            padded,
            ycbcr,
            subsampled,
            dct,
            quantized,
        };
        Ok((encoded, trace))
    }
}
