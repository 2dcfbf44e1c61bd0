//! Color space conversion
//!
//! RGB to YCbCr with JFIF/BT.601 coefficients. The forward transform keeps
//! real-valued output so no rounding happens ahead of the DCT; the inverse
//! rounds and clamps to 8-bit samples.

#[cfg(feature = "simd")]
use wide::f64x4;

use crate::consts::{
    CB_TO_B, CB_TO_G, CHROMA_OFFSET, CR_TO_G, CR_TO_R, RGB_TO_CB, RGB_TO_CR, RGB_TO_Y,
};
use crate::error::{Error, Result};
use crate::plane::Plane;

/// Convert one RGB sample to YCbCr
///
/// The conversion formula is:
/// - Y  =  0.299 * R + 0.587 * G + 0.114 * B
/// - Cb = -0.168736 * R - 0.331264 * G + 0.5 * B + 128
/// - Cr =  0.5 * R - 0.418688 * G - 0.081312 * B + 128
#[inline]
pub fn rgb_to_ycbcr(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let y = RGB_TO_Y[0] * r + RGB_TO_Y[1] * g + RGB_TO_Y[2] * b;
    let cb = RGB_TO_CB[0] * r + RGB_TO_CB[1] * g + RGB_TO_CB[2] * b + CHROMA_OFFSET;
    let cr = RGB_TO_CR[0] * r + RGB_TO_CR[1] * g + RGB_TO_CR[2] * b + CHROMA_OFFSET;
    (y, cb, cr)
}

/// Convert one YCbCr sample to 8-bit RGB, clamping to [0, 255]
#[inline]
pub fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> (u8, u8, u8) {
    let cb = cb - CHROMA_OFFSET;
    let cr = cr - CHROMA_OFFSET;

    let r = y + CR_TO_R * cr;
    let g = y + CB_TO_G * cb + CR_TO_G * cr;
    let b = y + CB_TO_B * cb;

    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

#[inline]
fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert R, G, B planes to Y, Cb, Cr planes.
pub fn rgb_planes_to_ycbcr(
    r: &Plane<u8>,
    g: &Plane<u8>,
    b: &Plane<u8>,
) -> Result<[Plane<f64>; 3]> {
    ensure_same_shape(r, [("G", g.shape()), ("B", b.shape())])?;

    let len = r.shape().len();
    let mut y = vec![0.0f64; len];
    let mut cb = vec![0.0f64; len];
    let mut cr = vec![0.0f64; len];

    convert_forward(
        r.as_slice(),
        g.as_slice(),
        b.as_slice(),
        &mut y,
        &mut cb,
        &mut cr,
    );

    let (height, width) = (r.height(), r.width());
    Ok([
        Plane::from_vec(height, width, y)?,
        Plane::from_vec(height, width, cb)?,
        Plane::from_vec(height, width, cr)?,
    ])
}

/// Convert Y, Cb, Cr planes back to 8-bit R, G, B planes.
pub fn ycbcr_planes_to_rgb(
    y: &Plane<f64>,
    cb: &Plane<f64>,
    cr: &Plane<f64>,
) -> Result<[Plane<u8>; 3]> {
    ensure_same_shape(y, [("Cb", cb.shape()), ("Cr", cr.shape())])?;

    let len = y.shape().len();
    let mut r = Vec::with_capacity(len);
    let mut g = Vec::with_capacity(len);
    let mut b = Vec::with_capacity(len);

    for ((&yv, &cbv), &crv) in y.as_slice().iter().zip(cb.as_slice()).zip(cr.as_slice()) {
        let (rv, gv, bv) = ycbcr_to_rgb(yv, cbv, crv);
        r.push(rv);
        g.push(gv);
        b.push(bv);
    }

    let (height, width) = (y.height(), y.width());
    Ok([
        Plane::from_vec(height, width, r)?,
        Plane::from_vec(height, width, g)?,
        Plane::from_vec(height, width, b)?,
    ])
}

fn ensure_same_shape<T: Copy>(
    reference: &Plane<T>,
    others: [(&'static str, crate::plane::Shape); 2],
) -> Result<()> {
    for (channel, shape) in others {
        if shape != reference.shape() {
            return Err(Error::ChannelShapeMismatch {
                channel,
                expected: reference.shape(),
                actual: shape,
            });
        }
    }
    Ok(())
}

#[cfg(not(feature = "simd"))]
fn convert_forward(r: &[u8], g: &[u8], b: &[u8], y: &mut [f64], cb: &mut [f64], cr: &mut [f64]) {
    for i in 0..r.len() {
        (y[i], cb[i], cr[i]) = rgb_to_ycbcr(f64::from(r[i]), f64::from(g[i]), f64::from(b[i]));
    }
}

// Four samples per step; the tail falls back to the scalar path.
#[cfg(feature = "simd")]
fn convert_forward(r: &[u8], g: &[u8], b: &[u8], y: &mut [f64], cb: &mut [f64], cr: &mut [f64]) {
    let load = |s: &[u8], i: usize| {
        f64x4::from([
            f64::from(s[i]),
            f64::from(s[i + 1]),
            f64::from(s[i + 2]),
            f64::from(s[i + 3]),
        ])
    };

    let r_to_y = f64x4::splat(RGB_TO_Y[0]);
    let g_to_y = f64x4::splat(RGB_TO_Y[1]);
    let b_to_y = f64x4::splat(RGB_TO_Y[2]);
    let r_to_cb = f64x4::splat(RGB_TO_CB[0]);
    let g_to_cb = f64x4::splat(RGB_TO_CB[1]);
    let b_to_cb = f64x4::splat(RGB_TO_CB[2]);
    let r_to_cr = f64x4::splat(RGB_TO_CR[0]);
    let g_to_cr = f64x4::splat(RGB_TO_CR[1]);
    let b_to_cr = f64x4::splat(RGB_TO_CR[2]);
    let offset = f64x4::splat(CHROMA_OFFSET);

    let len = r.len();
    let simd_len = len - len % 4;
    let mut i = 0;
    while i < simd_len {
        let rf = load(r, i);
        let gf = load(g, i);
        let bf = load(b, i);

        let yv = r_to_y * rf + g_to_y * gf + b_to_y * bf;
        let cbv = r_to_cb * rf + g_to_cb * gf + b_to_cb * bf + offset;
        let crv = r_to_cr * rf + g_to_cr * gf + b_to_cr * bf + offset;

        y[i..i + 4].copy_from_slice(&yv.to_array());
        cb[i..i + 4].copy_from_slice(&cbv.to_array());
        cr[i..i + 4].copy_from_slice(&crv.to_array());
        i += 4;
    }

    for j in simd_len..len {
        (y[j], cb[j], cr[j]) = rgb_to_ycbcr(f64::from(r[j]), f64::from(g[j]), f64::from(b[j]));
    }
}
