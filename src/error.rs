//! Crate-wide error type.
//!
//! Kernel and convolution failures are contract violations reported to the
//! caller; the controller aborts the current run without touching its
//! buffers. The I/O variants only surface from the tool-side helpers.
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Kernel lookup outside the `{Edge, BoxBlur, Gaussian, Sharpen} × {3, 5}` catalog.
    #[error("invalid selection: no kernel for identity {identity} at size {size}")]
    InvalidSelection { identity: u32, size: usize },

    /// Input and output of one convolution resolve to the same buffer.
    #[error("buffer alias: {slot} used as both convolution input and output")]
    BufferAlias { slot: &'static str },

    /// Worst-case accumulator magnitude does not fit the i32 accumulator.
    #[error("kernel accumulator bound {bound} exceeds i32 range")]
    OutOfRangeSample { bound: i64 },

    #[error("kernel divisor must be non-zero")]
    ZeroDivisor,

    #[error("kernel shape: expected {expected} weights, got {actual}")]
    KernelShape { expected: usize, actual: usize },

    #[error("dimension mismatch: expected {expected} bytes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image codec on {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("JSON on {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FilterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
