//! Core types for dctcodec

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::plane::Shape;

/// Chroma subsampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromaMode {
    /// Both horizontal and vertical (4:2:0) - smallest output
    #[default]
    S420,
    /// Horizontal subsampling only (4:2:2)
    S422,
    /// No subsampling (4:4:4)
    S444,
}

impl ChromaMode {
    /// All supported modes
    pub const ALL: [ChromaMode; 3] = [ChromaMode::S420, ChromaMode::S422, ChromaMode::S444];

    /// Horizontal sampling factor for chroma components
    #[must_use]
    pub const fn h_factor(self) -> usize {
        match self {
            ChromaMode::S444 => 1,
            ChromaMode::S422 | ChromaMode::S420 => 2,
        }
    }

    /// Vertical sampling factor for chroma components
    #[must_use]
    pub const fn v_factor(self) -> usize {
        match self {
            ChromaMode::S444 | ChromaMode::S422 => 1,
            ChromaMode::S420 => 2,
        }
    }

    /// Shape of a chroma plane derived from a full-resolution plane of `shape`.
    #[must_use]
    pub const fn subsampled_shape(self, shape: Shape) -> Shape {
        Shape::new(shape.height / self.v_factor(), shape.width / self.h_factor())
    }

    /// Minimum coded unit for `block_size`: the alignment a full-resolution
    /// plane needs so that its subsampled chroma is still block aligned.
    #[must_use]
    pub const fn mcu_shape(self, block_size: usize) -> Shape {
        Shape::new(block_size * self.v_factor(), block_size * self.h_factor())
    }

    /// Canonical `J:a:b` notation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChromaMode::S420 => "4:2:0",
            ChromaMode::S422 => "4:2:2",
            ChromaMode::S444 => "4:4:4",
        }
    }
}

impl fmt::Display for ChromaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChromaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4:2:0" => Ok(ChromaMode::S420),
            "4:2:2" => Ok(ChromaMode::S422),
            "4:4:4" => Ok(ChromaMode::S444),
            other => Err(Error::InvalidChromaMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Interpolation kernel used by the chroma resampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    /// Two-tap triangle filter
    #[default]
    Linear,
    /// Four-tap Keys cubic convolution (a = -0.75)
    Cubic,
}

impl Interpolation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::Cubic => "cubic",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "bilinear" => Ok(Interpolation::Linear),
            "cubic" | "bicubic" => Ok(Interpolation::Cubic),
            _ => Err(Error::InvalidInterpolation {
                value: s.to_string(),
            }),
        }
    }
}

/// Color component after the YCbCr transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    /// Luma
    Y,
    /// Blue-difference chroma
    Cb,
    /// Red-difference chroma
    Cr,
}

impl Component {
    /// Components in storage order
    pub const ALL: [Component; 3] = [Component::Y, Component::Cb, Component::Cr];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Component::Y => 0,
            Component::Cb => 1,
            Component::Cr => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Component::Y => "Y",
            Component::Cb => "Cb",
            Component::Cr => "Cr",
        }
    }

    /// Whether this component is affected by chroma subsampling
    #[must_use]
    pub const fn is_chroma(self) -> bool {
        !matches!(self, Component::Y)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
