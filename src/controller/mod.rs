//! Processing controller: selection → kernel lookup → convolution.
//!
//! Overview
//! - Samples are decoded into a [`SelectionState`](crate::selection::SelectionState)
//!   with rising-edge detection on the confirm button.
//! - A confirmed run convolves the input frame with the selected catalog
//!   kernel, either straight into the output (single mode) or into an
//!   intermediate frame that a second confirmation convolves into the output
//!   (chain mode). The operator may change kernel and size between the two.
//! - A confirmed reset restores the input to its baseline, zeroes the output
//!   and requires a fresh image before the next run.
//!
//! Modules
//! - [`params`] – frame geometry.
//! - `buffers` – the owned input/intermediate/output frames and the baseline.
//! - `pipeline` – the [`ProcessingController`] state machine.
//! - [`status`] – read-only snapshots and display sinks.

mod buffers;
pub mod params;
mod pipeline;
pub mod status;

pub use buffers::{BufferSlot, ImageBuffers};
pub use params::ControllerParams;
pub use pipeline::{Phase, ProcessingController, StepOutcome};
pub use status::{LogStatusSink, RecordingStatusSink, StatusSink, StatusSnapshot};
