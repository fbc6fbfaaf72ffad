#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod controller;
pub mod convolve;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod kernels;
pub mod selection;
pub mod session;

// --- High-level re-exports -------------------------------------------------

pub use crate::controller::{
    BufferSlot, ControllerParams, Phase, ProcessingController, StatusSnapshot, StepOutcome,
};
pub use crate::convolve::{convolve, convolve_into};
pub use crate::error::{FilterError, Result};
pub use crate::kernels::{Kernel, KernelCatalog, KernelIdentity, KernelSize};
pub use crate::selection::{decode, InputSample, SelectionState};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use kernel_board::prelude::*;
///
/// # fn main() -> kernel_board::Result<()> {
/// let baseline = GrayImageU8::filled(64, 64, 128);
/// let mut ctl = ProcessingController::new(ControllerParams::default(), baseline)?;
///
/// // Sharpen 3×3, run mode, single pass: press and release the button.
/// ctl.step(InputSample::pressed(0b1011))?;
/// ctl.step(InputSample::released(0b1011))?;
/// println!("first output sample = {}", ctl.output().get(0, 0));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{
        ControllerParams, InputSample, KernelCatalog, KernelIdentity, KernelSize,
        ProcessingController, StepOutcome,
    };
}
