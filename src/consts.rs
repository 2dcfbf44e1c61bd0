//! Constants and tables for the codec

/// Native dimension of the base quantization table
pub const QUANT_TABLE_SIZE: usize = 8;

/// Default block dimension; the only size with a native quantization table
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Default quality factor
pub const DEFAULT_QUALITY: i32 = 100;

/// Valid quality factor range; values outside are clamped
pub const MIN_QUALITY: i32 = 1;
pub const MAX_QUALITY: i32 = 100;

/// Bias added to the chroma difference signals
pub const CHROMA_OFFSET: f64 = 128.0;

/// Standard JPEG Annex K luminance quantization table (natural order)
#[rustfmt::skip]
pub const STD_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99,
];

// BT.601 / JFIF forward coefficients
pub const RGB_TO_Y: [f64; 3] = [0.299, 0.587, 0.114];
pub const RGB_TO_CB: [f64; 3] = [-0.168736, -0.331264, 0.5];
pub const RGB_TO_CR: [f64; 3] = [0.5, -0.418688, -0.081312];

// Inverse coefficients applied to the de-biased chroma
pub const CR_TO_R: f64 = 1.402;
pub const CB_TO_G: f64 = -0.344136;
pub const CR_TO_G: f64 = -0.714136;
pub const CB_TO_B: f64 = 1.772;
