use super::{Kernel, KernelIdentity, KernelSize};
use crate::error::{FilterError, Result};
use log::debug;

/// Zero-sum Laplacian-style edge detector.
pub static EDGE_3X3: Kernel = Kernel::from_static(
    3,
    &[
        -1, -1, -1, //
        -1, 8, -1, //
        -1, -1, -1,
    ],
    1,
);

/// Uniform 3×3 mean, divisor = cell count.
pub static BOX_BLUR_3X3: Kernel = Kernel::from_static(3, &[1; 9], 9);

/// Binomial 3×3 blur, divisor = weight sum.
pub static GAUSSIAN_3X3: Kernel = Kernel::from_static(
    3,
    &[
        1, 2, 1, //
        2, 4, 2, //
        1, 2, 1,
    ],
    16,
);

/// Cross-shaped sharpen; weights sum to 1.
pub static SHARPEN_3X3: Kernel = Kernel::from_static(
    3,
    &[
        0, -1, 0, //
        -1, 5, -1, //
        0, -1, 0,
    ],
    1,
);

pub static EDGE_5X5: Kernel = Kernel::from_static(
    5,
    &[
        -1, -1, -1, -1, -1, //
        -1, 1, 2, 1, -1, //
        -1, 2, 4, 2, -1, //
        -1, 1, 2, 1, -1, //
        -1, -1, -1, -1, -1,
    ],
    1,
);

pub static BOX_BLUR_5X5: Kernel = Kernel::from_static(5, &[1; 25], 25);

pub static GAUSSIAN_5X5: Kernel = Kernel::from_static(
    5,
    &[
        1, 4, 6, 4, 1, //
        4, 16, 24, 16, 4, //
        6, 24, 36, 24, 6, //
        4, 16, 24, 16, 4, //
        1, 4, 6, 4, 1,
    ],
    256,
);

pub static SHARPEN_5X5: Kernel = Kernel::from_static(
    5,
    &[
        0, 0, -1, 0, 0, //
        0, -1, -2, -1, 0, //
        -1, -2, 13, -2, -1, //
        0, -1, -2, -1, 0, //
        0, 0, -1, 0, 0,
    ],
    1,
);

/// Process-wide registry of the eight built-in kernels.
#[derive(Clone, Copy, Debug, Default)]
pub struct KernelCatalog;

impl KernelCatalog {
    /// Total lookup over identity × size.
    pub fn lookup(identity: KernelIdentity, size: KernelSize) -> &'static Kernel {
        let kernel = match (identity, size) {
            (KernelIdentity::Edge, KernelSize::Small) => &EDGE_3X3,
            (KernelIdentity::BoxBlur, KernelSize::Small) => &BOX_BLUR_3X3,
            (KernelIdentity::Gaussian, KernelSize::Small) => &GAUSSIAN_3X3,
            (KernelIdentity::Sharpen, KernelSize::Small) => &SHARPEN_3X3,
            (KernelIdentity::Edge, KernelSize::Large) => &EDGE_5X5,
            (KernelIdentity::BoxBlur, KernelSize::Large) => &BOX_BLUR_5X5,
            (KernelIdentity::Gaussian, KernelSize::Large) => &GAUSSIAN_5X5,
            (KernelIdentity::Sharpen, KernelSize::Large) => &SHARPEN_5X5,
        };
        debug!(
            "KernelCatalog::lookup identity={} size={} divisor={}",
            identity,
            size,
            kernel.divisor()
        );
        kernel
    }

    /// Lookup from untyped codes (`identity` in 0..=3, `side` in {3, 5}).
    pub fn lookup_raw(identity: u32, side: usize) -> Result<&'static Kernel> {
        let size = KernelSize::from_side(side);
        match (identity, size) {
            (0..=3, Some(size)) => Ok(Self::lookup(KernelIdentity::from_bits(identity), size)),
            _ => Err(FilterError::InvalidSelection {
                identity,
                size: side,
            }),
        }
    }

    /// All eight `(identity, size, kernel)` entries.
    pub fn entries() -> impl Iterator<Item = (KernelIdentity, KernelSize, &'static Kernel)> {
        KernelSize::ALL.into_iter().flat_map(|size| {
            KernelIdentity::ALL
                .into_iter()
                .map(move |identity| (identity, size, Self::lookup(identity, size)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_square_shape() {
        let mut count = 0;
        for (identity, size, kernel) in KernelCatalog::entries() {
            assert_eq!(kernel.size(), size.side(), "{identity} {size}");
            assert_eq!(
                kernel.weights().len(),
                size.side() * size.side(),
                "{identity} {size}"
            );
            assert_eq!(kernel.offset(), 0);
            count += 1;
        }
        assert_eq!(count, 8);
    }

    #[test]
    fn divisors_match_table() {
        let expected = [
            (KernelIdentity::Edge, 1, 1),
            (KernelIdentity::BoxBlur, 9, 25),
            (KernelIdentity::Gaussian, 16, 256),
            (KernelIdentity::Sharpen, 1, 1),
        ];
        for (identity, small, large) in expected {
            assert_eq!(
                KernelCatalog::lookup(identity, KernelSize::Small).divisor(),
                small
            );
            assert_eq!(
                KernelCatalog::lookup(identity, KernelSize::Large).divisor(),
                large
            );
        }
    }

    #[test]
    fn weight_sums_match_table() {
        for (identity, size, kernel) in KernelCatalog::entries() {
            let expected = match (identity, size) {
                (KernelIdentity::Edge, _) => 0,
                // Row sums -1, -4, 7, -4, -1: the 5×5 sharpen darkens flat areas.
                (KernelIdentity::Sharpen, KernelSize::Large) => -3,
                _ => kernel.divisor() as i64,
            };
            assert_eq!(kernel.weight_sum(), expected, "{identity} {size}");
        }
    }

    #[test]
    fn large_sharpen_darkens_uniform_frame() {
        let kernel = KernelCatalog::lookup(KernelIdentity::Sharpen, KernelSize::Large);
        assert_eq!(kernel.weight_sum(), -3);
        assert_eq!(kernel.divisor(), 1);
        assert_eq!(kernel.weight(2, 2), 13);

        let frame = crate::image::GrayImageU8::filled(7, 7, 10);
        let out = crate::convolve::convolve(&frame.as_view(), kernel).unwrap();
        // 10 · -3 clamps to black wherever the full window fits.
        assert_eq!(out.get(3, 3), 0);
    }

    #[test]
    fn accumulators_fit_i32() {
        for (_, _, kernel) in KernelCatalog::entries() {
            assert!(kernel.accumulator_bound() <= i32::MAX as i64);
        }
        // 5×5 Gaussian is the worst case: 255 · 256.
        assert_eq!(GAUSSIAN_5X5.accumulator_bound(), 255 * 256);
    }

    #[test]
    fn raw_lookup_reports_invalid_selection() {
        assert_eq!(KernelCatalog::lookup_raw(2, 5).unwrap(), &GAUSSIAN_5X5);
        assert!(matches!(
            KernelCatalog::lookup_raw(4, 3),
            Err(FilterError::InvalidSelection {
                identity: 4,
                size: 3
            })
        ));
        assert!(matches!(
            KernelCatalog::lookup_raw(1, 7),
            Err(FilterError::InvalidSelection {
                identity: 1,
                size: 7
            })
        ));
    }
}
