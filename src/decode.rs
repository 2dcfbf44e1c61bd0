//! Decoder
//!
//! Inverts the encoder: undo DC prediction, dequantize, inverse DCT, upsample
//! chroma, convert back to RGB, crop to the recorded shape.

use log::{debug, trace, warn};

use crate::color::ycbcr_planes_to_rgb;
use crate::config::CodecConfig;
use crate::dct::BlockDct;
use crate::dpcm::unpredict_dc;
use crate::encode::{EncodedData, Metadata};
use crate::error::{Error, Result};
use crate::image::RgbImage;
use crate::padding::{padding_amount, unpad};
use crate::plane::{try_map_components, Plane, Shape};
use crate::quant::{dequantize_with, QuantMatrix};
use crate::resample::upsample;

/// Intermediate planes of one decode, in pipeline order
#[derive(Debug, Clone)]
pub struct DecodeTrace {
    /// Quantized coefficients with absolute DC values restored
    pub unpredicted: [Plane<i32>; 3],
    /// Dequantized coefficients
    pub dequantized: [Plane<f64>; 3],
    /// Inverse DCT output at coded resolution
    pub spatial: [Plane<f64>; 3],
    /// Y unchanged, Cb and Cr at luma resolution
    pub upsampled: [Plane<f64>; 3],
    /// RGB at padded resolution, before cropping
    pub rgb_padded: [Plane<u8>; 3],
}

/// Image decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    config: CodecConfig,
    dct: BlockDct,
}

impl Decoder {
    /// Create a decoder, validating the configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dct: BlockDct::new(config.get_block_size())?,
            config,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Reconstruct an image of the recorded original shape.
    pub fn decode(&self, encoded: &EncodedData) -> Result<RgbImage> {
        let (image, _) = self.run(encoded)?;
        Ok(image)
    }

    /// Decode and return the intermediate planes as well.
    pub fn decode_traced(&self, encoded: &EncodedData) -> Result<(RgbImage, DecodeTrace)> {
        self.run(encoded)
    }

    /// Compare the metadata with this decoder's configuration and the plane
    /// shapes with the metadata.
    fn check(&self, encoded: &EncodedData) -> Result<()> {
        let meta = encoded.metadata();

        if meta.chroma_mode != self.config.get_chroma_mode() {
            return Err(Error::MetadataMismatch {
                field: "chroma_mode",
                encoded: meta.chroma_mode.to_string(),
                requested: self.config.get_chroma_mode().to_string(),
            });
        }
        if meta.block_size != self.dct.size() {
            return Err(Error::MetadataMismatch {
                field: "block_size",
                encoded: meta.block_size.to_string(),
                requested: self.dct.size().to_string(),
            });
        }
        if meta.quality_factor != self.config.effective_quality() {
            warn!(
                "decoding with quality {} but data was encoded with quality {}",
                self.config.effective_quality(),
                meta.quality_factor
            );
        }
        if meta.original_shape.is_empty() {
            return Err(Error::InvalidDimensions {
                width: meta.original_shape.width,
                height: meta.original_shape.height,
                reason: "recorded shape has no pixels",
            });
        }

        let luma = expected_luma_shape(meta);
        if encoded.y().shape() != luma {
            return Err(Error::ShapeMismatch {
                stage: "luma coefficients",
                expected: luma,
                actual: encoded.y().shape(),
            });
        }
        let chroma = meta.chroma_mode.subsampled_shape(luma);
        for plane in [encoded.cb(), encoded.cr()] {
            if plane.shape() != chroma {
                return Err(Error::ShapeMismatch {
                    stage: "chroma coefficients",
                    expected: chroma,
                    actual: plane.shape(),
                });
            }
        }
        Ok(())
    }

    fn run(&self, encoded: &EncodedData) -> Result<(RgbImage, DecodeTrace)> {
        self.check(encoded)?;
        let meta = *encoded.metadata();
        let block_size = meta.block_size;
        debug!(
            "decoding {} image: {}, {}x{} blocks, quality {}",
            meta.original_shape, meta.chroma_mode, block_size, block_size, meta.quality_factor
        );

        // The decoder's quality is authoritative; a mismatch was warned about above.
        let matrix = QuantMatrix::for_quality(self.config.requested_quality(), block_size)?;

        let unpredicted =
            try_map_components(encoded.planes(), |_, plane| unpredict_dc(plane, block_size))?;
        let dequantized =
            try_map_components(&unpredicted, |_, plane| dequantize_with(plane, &matrix))?;
        let spatial = try_map_components(&dequantized, |component, coeffs| {
            trace!("{}: inverse dct over {}", component, coeffs.shape());
            self.dct.inverse(coeffs)
        })?;

        let luma_shape = spatial[0].shape();
        let upsampled = try_map_components(&spatial, |component, plane| {
            if component.is_chroma() {
                upsample(
                    plane,
                    meta.chroma_mode,
                    luma_shape,
                    self.config.get_interpolation(),
                )
            } else {
                Ok(plane.clone())
            }
        })?;

        let rgb_padded = ycbcr_planes_to_rgb(&upsampled[0], &upsampled[1], &upsampled[2])?;
        let [r, g, b] = &rgb_padded;
        let image = RgbImage::from_planes(
            unpad(r, meta.original_shape)?,
            unpad(g, meta.original_shape)?,
            unpad(b, meta.original_shape)?,
        )?;
        debug!("decoded {} image", image.shape());

        let trace = DecodeTrace {
            unpredicted,
            dequantized,
            spatial,
            upsampled,
            rgb_padded,
        };
        Ok((image, trace))
    }
}

/// Luma plane shape the encoder produces for `meta`.
fn expected_luma_shape(meta: &Metadata) -> Shape {
    let mcu = meta.chroma_mode.mcu_shape(meta.block_size);
    let Shape { height, width } = meta.original_shape;
    Shape::new(
        height + padding_amount(height, mcu.height),
        width + padding_amount(width, mcu.width),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Encoder;
    use crate::types::ChromaMode;

    fn checker(height: usize, width: usize) -> RgbImage {
        let r = Plane::from_fn(height, width, |y, x| if (y / 4 + x / 4) % 2 == 0 { 40 } else { 210 });
        let g = Plane::from_fn(height, width, |y, x| ((y * 7 + x * 3) % 256) as u8);
        let b = Plane::filled(height, width, 128u8);
        RgbImage::from_planes(r, g, b).unwrap()
    }

    #[test]
    fn test_decode_restores_shape() {
        let image = checker(21, 13);
        for mode in ChromaMode::ALL {
            let config = CodecConfig::new().chroma_mode(mode).quality(90);
            let encoded = Encoder::new(config).unwrap().encode(&image).unwrap();
            let decoded = Decoder::new(config).unwrap().decode(&encoded).unwrap();
            assert_eq!(decoded.shape(), image.shape(), "{}", mode);
        }
    }

    #[test]
    fn test_chroma_mode_mismatch() {
        let image = checker(16, 16);
        let encoded = Encoder::new(CodecConfig::new().chroma_mode(ChromaMode::S420))
            .unwrap()
            .encode(&image)
            .unwrap();
        let err = Decoder::new(CodecConfig::new().chroma_mode(ChromaMode::S444))
            .unwrap()
            .decode(&encoded)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MetadataMismatch {
                field: "chroma_mode",
                ..
            }
        ));
    }

    #[test]
    fn test_block_size_mismatch() {
        let image = checker(16, 16);
        let encoded = Encoder::new(CodecConfig::new().block_size(8))
            .unwrap()
            .encode(&image)
            .unwrap();
        let err = Decoder::new(CodecConfig::new().block_size(4))
            .unwrap()
            .decode(&encoded)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MetadataMismatch {
                field: "block_size",
                ..
            }
        ));
    }

    #[test]
    fn test_tampered_planes_detected() {
        let config = CodecConfig::new().chroma_mode(ChromaMode::S422);
        let encoded = Encoder::new(config).unwrap().encode(&checker(16, 16)).unwrap();
        let (mut planes, meta) = encoded.into_parts();
        planes[1] = Plane::new(8, 8);
        let tampered = EncodedData::from_parts(planes, meta);

        let err = Decoder::new(config).unwrap().decode(&tampered).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                stage: "chroma coefficients",
                expected: Shape::new(16, 8),
                actual: Shape::new(8, 8),
            }
        );
    }

    #[test]
    fn test_quality_mismatch_is_not_an_error() {
        let image = checker(8, 8);
        let encoded = Encoder::new(CodecConfig::new().quality(50))
            .unwrap()
            .encode(&image)
            .unwrap();
        let decoded = Decoder::new(CodecConfig::new().quality(90))
            .unwrap()
            .decode(&encoded)
            .unwrap();
        assert_eq!(decoded.shape(), image.shape());
    }

    #[test]
    fn test_trace_shapes() {
        let config = CodecConfig::new().chroma_mode(ChromaMode::S420);
        let encoded = Encoder::new(config).unwrap().encode(&checker(20, 20)).unwrap();
        let (image, trace) = Decoder::new(config).unwrap().decode_traced(&encoded).unwrap();
        assert_eq!(image.shape(), Shape::new(20, 20));
        assert_eq!(trace.spatial[1].shape(), Shape::new(16, 16));
        assert_eq!(trace.upsampled[1].shape(), Shape::new(32, 32));
        assert_eq!(trace.rgb_padded[0].shape(), Shape::new(32, 32));
    }
}
