//! Integer convolution kernels and the fixed filter catalog.
//!
//! A [`Kernel`] is a square weight matrix (3×3 or 5×5 in the catalog) with a
//! non-zero divisor and a signed offset applied after division. The catalog
//! maps every [`KernelIdentity`] × [`KernelSize`] pair to a `'static` kernel,
//! so the typed lookup cannot fail; the raw lookup used for untyped codes
//! reports [`FilterError::InvalidSelection`].
//!
//! Modules
//! - [`catalog`] – the eight catalog kernels and [`KernelCatalog`].
use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub mod catalog;

pub use catalog::KernelCatalog;

/// Filter family selected by switch bits `[1:0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelIdentity {
    Edge = 0,
    BoxBlur = 1,
    Gaussian = 2,
    Sharpen = 3,
}

impl KernelIdentity {
    pub const ALL: [KernelIdentity; 4] = [
        KernelIdentity::Edge,
        KernelIdentity::BoxBlur,
        KernelIdentity::Gaussian,
        KernelIdentity::Sharpen,
    ];

    /// Decode the two low bits; higher bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => KernelIdentity::Edge,
            1 => KernelIdentity::BoxBlur,
            2 => KernelIdentity::Gaussian,
            _ => KernelIdentity::Sharpen,
        }
    }

    /// Two-bit code as wired on the switches.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            KernelIdentity::Edge => "edge",
            KernelIdentity::BoxBlur => "box_blur",
            KernelIdentity::Gaussian => "gaussian",
            KernelIdentity::Sharpen => "sharpen",
        }
    }
}

impl fmt::Display for KernelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kernel side length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelSize {
    Small,
    Large,
}

impl KernelSize {
    pub const ALL: [KernelSize; 2] = [KernelSize::Small, KernelSize::Large];

    /// Side length in pixels (3 or 5).
    pub const fn side(self) -> usize {
        match self {
            KernelSize::Small => 3,
            KernelSize::Large => 5,
        }
    }

    pub fn from_side(side: usize) -> Option<Self> {
        match side {
            3 => Some(KernelSize::Small),
            5 => Some(KernelSize::Large),
            _ => None,
        }
    }
}

impl fmt::Display for KernelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.side();
        write!(f, "{s}x{s}")
    }
}

/// Square integer kernel with normalization.
///
/// Output sample = `clamp(Σ(sample·weight) / divisor + offset, 0, 255)`,
/// using truncating integer division.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Cow<'static, [i32]>,
    divisor: i32,
    offset: i32,
}

impl Kernel {
    /// Build a catalog constant. Shape and divisor are checked by the catalog tests.
    pub(crate) const fn from_static(size: usize, weights: &'static [i32], divisor: i32) -> Self {
        Self {
            size,
            weights: Cow::Borrowed(weights),
            divisor,
            offset: 0,
        }
    }

    /// Build a custom kernel, validating shape, divisor and accumulator range.
    pub fn new(size: usize, weights: Vec<i32>, divisor: i32, offset: i32) -> Result<Self> {
        let expected = size * size;
        if size == 0 || size % 2 == 0 || weights.len() != expected {
            return Err(FilterError::KernelShape {
                expected,
                actual: weights.len(),
            });
        }
        if divisor == 0 {
            return Err(FilterError::ZeroDivisor);
        }
        let kernel = Self {
            size,
            weights: Cow::Owned(weights),
            divisor,
            offset,
        };
        let bound = kernel.accumulator_bound();
        if bound > i32::MAX as i64 {
            return Err(FilterError::OutOfRangeSample { bound });
        }
        Ok(kernel)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major weights, `size * size` entries.
    #[inline]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    #[inline]
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Copy of this kernel with a different post-division offset.
    pub fn with_offset(&self, offset: i32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub fn weight_sum(&self) -> i64 {
        self.weights.iter().map(|&w| w as i64).sum()
    }

    /// Largest accumulator magnitude reachable with 8-bit samples: `255 · Σ|w|`.
    pub fn accumulator_bound(&self) -> i64 {
        255 * self.weights.iter().map(|&w| (w as i64).abs()).sum::<i64>()
    }

    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> i32 {
        self.weights[ky * self.size + kx]
    }
}
