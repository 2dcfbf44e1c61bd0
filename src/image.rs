//! RGB raster input/output

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::error::{Error, Result};
use crate::plane::{Plane, Shape};

/// An 8-bit RGB image stored as three same-shaped planes.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    planes: [Plane<u8>; 3],
}

impl RgbImage {
    /// Assemble an image from R, G, B planes of equal shape.
    pub fn from_planes(r: Plane<u8>, g: Plane<u8>, b: Plane<u8>) -> Result<Self> {
        for (channel, plane) in [("G", &g), ("B", &b)] {
            if plane.shape() != r.shape() {
                return Err(Error::ChannelShapeMismatch {
                    channel,
                    expected: r.shape(),
                    actual: plane.shape(),
                });
            }
        }
        Ok(Self { planes: [r, g, b] })
    }

    /// Deinterleave packed RGB bytes (3 bytes per pixel, row-major).
    pub fn from_interleaved(pixels: &[u8], width: usize, height: usize) -> Result<Self> {
        let expected = width * height * 3;
        if pixels.len() != expected {
            return Err(Error::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        let pixel_count = width * height;
        let mut r = Vec::with_capacity(pixel_count);
        let mut g = Vec::with_capacity(pixel_count);
        let mut b = Vec::with_capacity(pixel_count);
        for chunk in pixels.chunks_exact(3) {
            r.push(chunk[0]);
            g.push(chunk[1]);
            b.push(chunk[2]);
        }

        Self::from_planes(
            Plane::from_vec(height, width, r)?,
            Plane::from_vec(height, width, g)?,
            Plane::from_vec(height, width, b)?,
        )
    }

    /// Copy pixels out of an `imgref` view, honoring its stride.
    pub fn from_imgref(img: ImgRef<'_, RGB8>) -> Self {
        let (width, height) = (img.width(), img.height());
        let rows: Vec<&[RGB8]> = img.rows().collect();
        Self {
            planes: [
                Plane::from_fn(height, width, |row, col| rows[row][col].r),
                Plane::from_fn(height, width, |row, col| rows[row][col].g),
                Plane::from_fn(height, width, |row, col| rows[row][col].b),
            ],
        }
    }

    /// Interleave into packed RGB bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let [r, g, b] = &self.planes;
        let mut out = Vec::with_capacity(self.shape().len() * 3);
        for ((&rv, &gv), &bv) in r.as_slice().iter().zip(g.as_slice()).zip(b.as_slice()) {
            out.extend_from_slice(&[rv, gv, bv]);
        }
        out
    }

    /// Convert to an owned `imgref` buffer of `RGB8` pixels.
    pub fn to_imgvec(&self) -> ImgVec<RGB8> {
        let [r, g, b] = &self.planes;
        let pixels = r
            .as_slice()
            .iter()
            .zip(g.as_slice())
            .zip(b.as_slice())
            .map(|((&rv, &gv), &bv)| RGB8::new(rv, gv, bv))
            .collect();
        ImgVec::new(pixels, self.width(), self.height())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.planes[0].width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.planes[0].height()
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.planes[0].shape()
    }

    pub fn red(&self) -> &Plane<u8> {
        &self.planes[0]
    }

    pub fn green(&self) -> &Plane<u8> {
        &self.planes[1]
    }

    pub fn blue(&self) -> &Plane<u8> {
        &self.planes[2]
    }

    pub fn planes(&self) -> &[Plane<u8>; 3] {
        &self.planes
    }

    pub fn into_planes(self) -> [Plane<u8>; 3] {
        self.planes
    }
}

impl From<ImgRef<'_, RGB8>> for RgbImage {
    fn from(img: ImgRef<'_, RGB8>) -> Self {
        Self::from_imgref(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_roundtrip() {
        let pixels: Vec<u8> = (0..2 * 3 * 3).map(|i| i as u8).collect();
        let img = RgbImage::from_interleaved(&pixels, 3, 2).unwrap();
        assert_eq!(img.shape(), Shape::new(2, 3));
        assert_eq!(img.red().get(1, 0), 9);
        assert_eq!(img.green().get(0, 2), 7);
        assert_eq!(img.to_interleaved(), pixels);
    }

    #[test]
    fn test_interleaved_length_checked() {
        let err = RgbImage::from_interleaved(&[0u8; 10], 2, 2).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPixelData {
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn test_mismatched_planes_rejected() {
        let err = RgbImage::from_planes(
            Plane::new(4, 4),
            Plane::new(4, 4),
            Plane::new(5, 4),
        )
        .unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, Error::ChannelShapeMismatch { channel: "B", .. }));
    }

    #[test]
    fn test_imgref_interop() {
        let pixels: Vec<RGB8> = (0..6).map(|i| RGB8::new(i, i * 2, i * 3)).collect();
        let src = ImgVec::new(pixels, 3, 2);
        let img = RgbImage::from(src.as_ref());
        assert_eq!(img.blue().get(1, 2), 15);

        let back = img.to_imgvec();
        assert_eq!(back.width(), 3);
        assert_eq!(back.height(), 2);
        assert_eq!(back.buf(), src.buf());
    }
}
