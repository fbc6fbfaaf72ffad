//! Integer 2D convolution over 8-bit grayscale frames.
//!
//! - Accumulates `sample · weight` over the `k × k` neighbourhood centred on
//!   each output pixel (centre index `k / 2`) in an `i32`.
//! - Taps that fall outside the frame are skipped (contribute zero); they are
//!   not reflected or clamped, so responses near the border are under-weighted.
//! - Normalises with truncating division by the kernel divisor, adds the
//!   offset, then clamps to `[0, 255]`.
//!
//! With the `parallel` feature, rows of a single pass are computed with
//! rayon. Output is byte-identical to the sequential path.
//!
//! Complexity: O(W·H·k²) per pass; no allocation beyond the output frame.
use crate::error::{FilterError, Result};
use crate::image::{GrayImageU8, ImageU8, ImageView, ImageViewMut};
use crate::kernels::Kernel;
use log::debug;

/// Convolve `input` with `kernel` into a freshly allocated frame of the same size.
pub fn convolve(input: &ImageU8<'_>, kernel: &Kernel) -> Result<GrayImageU8> {
    let mut output = GrayImageU8::new(input.w, input.h);
    convolve_into(input, &mut output, kernel)?;
    Ok(output)
}

/// Convolve `input` with `kernel`, overwriting every sample of `output`.
///
/// `output` must have the same dimensions as `input`. The borrow rules keep
/// the two disjoint for the duration of the call.
pub fn convolve_into(input: &ImageU8<'_>, output: &mut GrayImageU8, kernel: &Kernel) -> Result<()> {
    if output.width() != input.w || output.height() != input.h {
        return Err(FilterError::DimensionMismatch {
            expected: input.w * input.h,
            actual: output.len(),
        });
    }
    if kernel.divisor() == 0 {
        return Err(FilterError::ZeroDivisor);
    }
    let bound = kernel.accumulator_bound();
    if bound > i32::MAX as i64 {
        return Err(FilterError::OutOfRangeSample { bound });
    }
    debug!(
        "convolve start w={} h={} k={} divisor={} offset={}",
        input.w,
        input.h,
        kernel.size(),
        kernel.divisor(),
        kernel.offset()
    );

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let width = input.w;
        if let Some(samples) = output.as_mut_slice() {
            samples
                .par_chunks_mut(width.max(1))
                .enumerate()
                .for_each(|(y, row)| convolve_row(input, kernel, y, row));
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        for y in 0..input.h {
            convolve_row(input, kernel, y, output.row_mut(y));
        }
    }

    debug!("convolve done");
    Ok(())
}

fn convolve_row(input: &ImageU8<'_>, kernel: &Kernel, y: usize, out: &mut [u8]) {
    let (w, h) = (input.w as isize, input.h as isize);
    let k = kernel.size();
    let center = (k / 2) as isize;
    let divisor = kernel.divisor();
    let offset = kernel.offset();

    for (x, px) in out.iter_mut().enumerate() {
        let mut acc: i32 = 0;
        for ky in 0..k {
            let iy = y as isize + ky as isize - center;
            if iy < 0 || iy >= h {
                continue;
            }
            let src_row = input.row(iy as usize);
            let weights = &kernel.weights()[ky * k..(ky + 1) * k];
            for (kx, &weight) in weights.iter().enumerate() {
                let ix = x as isize + kx as isize - center;
                if ix < 0 || ix >= w {
                    continue;
                }
                acc += src_row[ix as usize] as i32 * weight;
            }
        }
        *px = normalize(acc, divisor, offset);
    }
}

/// Truncating division, offset, clamp to the 8-bit range.
#[inline]
fn normalize(acc: i32, divisor: i32, offset: i32) -> u8 {
    (acc / divisor).saturating_add(offset).clamp(0, 255) as u8
}
