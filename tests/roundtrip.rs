//! End-to-end encode/decode tests on synthetic images.

mod common;

use dctcodec::analysis::{channel_metrics, image_metrics};
use dctcodec::{
    decode, encode, roundtrip, ChromaMode, CodecConfig, Component, Decoder, Encoder, Error,
    Interpolation, RgbImage, Shape, ZigzagCollector,
};
use imgref::ImgVec;
use rgb::RGB8;

#[test]
fn test_flat_gray_lossless_within_rounding() {
    common::init_logging();
    let image = common::uniform(32, 32, 128);
    let config = CodecConfig::new().quality(100).chroma_mode(ChromaMode::S444);

    let decoded = roundtrip(&image, &config).unwrap();
    assert_eq!(decoded.shape(), image.shape());
    for plane in decoded.planes() {
        for &v in plane.as_slice() {
            assert!((i32::from(v) - 128).abs() <= 1, "sample {} out of tolerance", v);
        }
    }
}

#[test]
fn test_odd_dimensions_all_modes() {
    common::init_logging();
    let image = common::gradient(37, 29);
    for mode in ChromaMode::ALL {
        for kernel in [Interpolation::Linear, Interpolation::Cubic] {
            let config = CodecConfig::new()
                .quality(90)
                .chroma_mode(mode)
                .interpolation(kernel);
            let decoded = roundtrip(&image, &config).unwrap();
            assert_eq!(decoded.width(), 37);
            assert_eq!(decoded.height(), 29);

            let metrics = image_metrics(&image, &decoded).unwrap();
            println!("{} {}: PSNR {:.2} dB", mode, kernel, metrics.psnr);
            assert!(metrics.psnr > 30.0, "{} {}: {}", mode, kernel, metrics);
        }
    }
}

#[test]
fn test_quality_100_444_is_high_fidelity() {
    let image = common::textured(64, 48);
    let config = CodecConfig::new().quality(100).chroma_mode(ChromaMode::S444);
    let decoded = roundtrip(&image, &config).unwrap();

    let metrics = image_metrics(&image, &decoded).unwrap();
    assert!(metrics.psnr > 40.0, "{}", metrics);
    assert!(metrics.max_diff <= 8.0, "{}", metrics);
    assert!(metrics.min_diff >= 0.0 && metrics.min_diff <= metrics.avg_diff);
}

#[test]
fn test_higher_quality_lower_error() {
    let image = common::textured(64, 64);
    let psnr = |q: i32| {
        let config = CodecConfig::new().quality(q);
        let decoded = roundtrip(&image, &config).unwrap();
        image_metrics(&image, &decoded).unwrap().psnr
    };
    let (low, mid, high) = (psnr(10), psnr(50), psnr(95));
    println!("Q10 {:.2} dB, Q50 {:.2} dB, Q95 {:.2} dB", low, mid, high);
    assert!(low < mid && mid < high);
}

#[test]
fn test_subsampling_loses_chroma_detail() {
    let image = common::noise(32, 32, 7);
    let psnr = |mode: ChromaMode| {
        let config = CodecConfig::new().quality(100).chroma_mode(mode);
        image_metrics(&image, &roundtrip(&image, &config).unwrap())
            .unwrap()
            .psnr
    };
    assert!(psnr(ChromaMode::S444) > psnr(ChromaMode::S422));
    assert!(psnr(ChromaMode::S422) > psnr(ChromaMode::S420));
}

#[test]
fn test_other_block_sizes() {
    let image = common::gradient(40, 24);
    for block_size in [4usize, 16] {
        let config = CodecConfig::new().quality(90).block_size(block_size);
        let encoded = encode(&image, &config).unwrap();
        assert_eq!(encoded.metadata().block_size, block_size);
        assert_eq!(encoded.y().height() % (2 * block_size), 0);

        let decoded = decode(&encoded, &config).unwrap();
        let metrics = image_metrics(&image, &decoded).unwrap();
        assert!(metrics.psnr > 30.0, "block {}: {}", block_size, metrics);
    }
}

#[test]
fn test_decode_with_wrong_mode_fails() {
    let image = common::gradient(16, 16);
    let encoded = encode(&image, &CodecConfig::new().chroma_mode(ChromaMode::S420)).unwrap();
    let err = decode(&encoded, &CodecConfig::new().chroma_mode(ChromaMode::S422)).unwrap_err();
    assert!(matches!(err, Error::MetadataMismatch { .. }));
    assert!(!err.is_configuration());
}

#[test]
fn test_invalid_chroma_mode_string() {
    let err = "4:1:1".parse::<ChromaMode>().unwrap_err();
    assert_eq!(
        err,
        Error::InvalidChromaMode {
            value: "4:1:1".to_string()
        }
    );
    assert!(err.is_configuration());
}

#[test]
fn test_self_metrics() {
    let image = common::textured(20, 20);
    let metrics = image_metrics(&image, &image).unwrap();
    assert_eq!(metrics.mse, 0.0);
    assert_eq!(metrics.max_diff, 0.0);
    assert_eq!(metrics.psnr, f64::INFINITY);
}

#[test]
fn test_imgref_roundtrip() {
    let pixels: Vec<RGB8> = (0..24 * 16)
        .map(|i| RGB8::new((i % 24 * 10) as u8, (i / 24 * 15) as u8, 90))
        .collect();
    let src = ImgVec::new(pixels, 24, 16);
    let image = RgbImage::from(src.as_ref());

    let config = CodecConfig::new().quality(95).chroma_mode(ChromaMode::S444);
    let out = roundtrip(&image, &config).unwrap().to_imgvec();
    assert_eq!(out.width(), 24);
    assert_eq!(out.height(), 16);
}

#[test]
fn test_zigzag_collector_receives_every_block() {
    // 24 wide, 16 tall
    let image = common::gradient(24, 16);
    let encoder = Encoder::new(CodecConfig::new().chroma_mode(ChromaMode::S420)).unwrap();
    let mut collector = ZigzagCollector::new();
    let encoded = encoder.encode_with(&image, &mut collector).unwrap();

    // Luma padded to 16 rows x 32 cols -> 8 blocks, chroma 8x16 -> 2 blocks
    assert_eq!(encoded.y().shape(), Shape::new(16, 32));
    assert_eq!(encoded.cb().shape(), Shape::new(8, 16));
    assert_eq!(collector.blocks(Component::Y).len(), 8);
    assert_eq!(collector.blocks(Component::Cb).len(), 2);
    assert_eq!(collector.blocks(Component::Cr).len(), 2);
    for block in collector.blocks(Component::Y) {
        assert_eq!(block.len(), 64);
    }
}

#[test]
fn test_traced_channel_metrics() {
    let image = common::textured(32, 32);
    let config = CodecConfig::new().quality(100).chroma_mode(ChromaMode::S444);
    let (encoded, enc_trace) = Encoder::new(config).unwrap().encode_traced(&image).unwrap();
    let (_, dec_trace) = Decoder::new(config)
        .unwrap()
        .decode_traced(&encoded)
        .unwrap();

    let metrics = channel_metrics(&enc_trace.ycbcr, &dec_trace.upsampled).unwrap();
    println!("Y:\n{}\nCb:\n{}\nCr:\n{}", metrics.y, metrics.cb, metrics.cr);
    assert!(metrics.y.psnr > 40.0);
    assert!(metrics.cb.psnr > 40.0);
    assert!(metrics.cr.psnr > 40.0);
    assert_eq!(dec_trace.unpredicted[0], enc_trace.quantized[0]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_json_roundtrip() {
    let image = common::gradient(20, 12);
    let config = CodecConfig::new()
        .quality(70)
        .chroma_mode(ChromaMode::S422)
        .interpolation(Interpolation::Cubic);
    let encoded = encode(&image, &config).unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let config_back: CodecConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config_back, config);

    let json = serde_json::to_string(&encoded).unwrap();
    let encoded_back: dctcodec::EncodedData = serde_json::from_str(&json).unwrap();
    assert_eq!(encoded_back, encoded);
    assert_eq!(
        decode(&encoded_back, &config_back).unwrap(),
        decode(&encoded, &config).unwrap()
    );
}
