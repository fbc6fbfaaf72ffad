//! Tick-driven run protocol over the owned frame buffers.
//!
//! The host samples the inputs and calls [`ProcessingController::step`] once
//! per sample. Each confirm edge advances the protocol by at most one
//! transition:
//!
//! ```text
//! AwaitingImage --edge--> (image requested; host calls load_image) --> Idle
//! Idle --edge, run, !chain--> input ⊛ k → output                      --> Idle
//! Idle --edge, run,  chain--> input ⊛ k1 → temp     --> AwaitingSecondConfirm
//! AwaitingSecondConfirm --edge--> temp ⊛ k2 → output (k2 from fresh bits) --> Idle
//! Idle --edge, !run, reset--> input := baseline, output := 0  --> AwaitingImage
//! ```
//!
//! Waiting for the second confirmation is just a phase: the call returns and
//! the host keeps ticking, so nothing spins. A failed pass, whether from a
//! tick or from [`ProcessingController::apply`], leaves the buffers untouched,
//! drops any pending chain and returns the controller to `Idle`.
use super::buffers::{BufferSlot, ImageBuffers};
use super::params::ControllerParams;
use super::status::StatusSnapshot;
use crate::convolve::convolve_into;
use crate::diagnostics::{PassReport, PassStage};
use crate::error::{FilterError, Result};
use crate::image::GrayImageU8;
use crate::kernels::{KernelCatalog, KernelIdentity, KernelSize};
use crate::selection::{ConfirmTracker, InputSample, SelectionState};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Protocol state between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No image loaded; a confirm edge requests one from the library.
    AwaitingImage,
    Idle,
    /// First chain stage sits in the intermediate buffer.
    AwaitingSecondConfirm,
}

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// No confirm edge, or an edge with nothing armed.
    NoAction,
    /// The host should load library image `slot` via [`ProcessingController::load_image`].
    ImageRequested { slot: usize },
    SingleApplied(PassReport),
    FirstStageApplied(PassReport),
    ChainApplied {
        first: PassReport,
        second: PassReport,
    },
    Reset,
}

/// Owns the frame buffers and drives the single/chain run protocol.
pub struct ProcessingController {
    params: ControllerParams,
    buffers: ImageBuffers,
    tracker: ConfirmTracker,
    selection: SelectionState,
    phase: Phase,
    pending_first: Option<PassReport>,
}

impl ProcessingController {
    /// Create a controller whose input is preloaded from `baseline`.
    pub fn new(params: ControllerParams, baseline: GrayImageU8) -> Result<Self> {
        let buffers = ImageBuffers::new(params, baseline)?;
        debug!(
            "ProcessingController::new w={} h={}",
            params.width, params.height
        );
        Ok(Self {
            params,
            buffers,
            tracker: ConfirmTracker::new(),
            selection: SelectionState::default(),
            phase: Phase::Idle,
            pending_first: None,
        })
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Selection decoded from the most recent sample.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn image_loaded(&self) -> bool {
        self.phase != Phase::AwaitingImage
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            selection: self.selection,
            phase: self.phase,
            image_loaded: self.image_loaded(),
            led_mask: self.selection.led_mask(),
        }
    }

    pub fn buffer(&self, slot: BufferSlot) -> &GrayImageU8 {
        self.buffers.get(slot)
    }

    pub fn input(&self) -> &GrayImageU8 {
        self.buffers.get(BufferSlot::Input)
    }

    pub fn output(&self) -> &GrayImageU8 {
        self.buffers.get(BufferSlot::Output)
    }

    pub fn baseline(&self) -> &GrayImageU8 {
        self.buffers.baseline()
    }

    /// Bytes for bulk transport out (`width * height`, row-major).
    pub fn output_bytes(&self) -> &[u8] {
        self.output().as_bytes()
    }

    /// Seed the input frame with `width * height` bytes and mark the image loaded.
    ///
    /// A chain waiting for its second stage is not disturbed.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffers.load_input(bytes)?;
        if self.phase == Phase::AwaitingImage {
            self.phase = Phase::Idle;
        }
        info!("image loaded ({} bytes)", bytes.len());
        Ok(())
    }

    /// Advance the protocol by one sampled tick.
    ///
    /// On error the run is abandoned: no buffer is modified by the failed
    /// pass and a pending chain is dropped.
    pub fn step(&mut self, sample: InputSample) -> Result<StepOutcome> {
        let selection = self.tracker.observe(sample);
        self.selection = selection;
        if !selection.confirmed {
            return Ok(StepOutcome::NoAction);
        }
        debug!(
            "confirm edge phase={:?} switches={:#09b}",
            self.phase, sample.switches
        );

        let outcome = match self.phase {
            Phase::AwaitingImage => {
                if selection.run_mode || selection.reset {
                    info!(
                        "no image loaded; ignoring run={} reset={}",
                        selection.run_mode, selection.reset
                    );
                }
                Ok(StepOutcome::ImageRequested {
                    slot: selection.image_slot(),
                })
            }
            Phase::Idle => self.confirm_idle(&selection),
            Phase::AwaitingSecondConfirm => self.confirm_second(&selection),
        };
        if let Err(err) = &outcome {
            self.abandon_run(err);
        }
        outcome
    }

    /// Convolve `source` into `target` with a catalog kernel.
    ///
    /// A failure abandons a chain waiting for its second stage.
    pub fn apply(
        &mut self,
        source: BufferSlot,
        target: BufferSlot,
        kernel: KernelIdentity,
        size: KernelSize,
    ) -> Result<PassReport> {
        let pass = self.run_pass(PassStage::Single, source, target, kernel, size);
        if let Err(err) = &pass {
            self.abandon_run(err);
        }
        pass
    }

    fn abandon_run(&mut self, err: &FilterError) {
        warn!("run aborted in {:?}: {err}", self.phase);
        if self.phase == Phase::AwaitingSecondConfirm {
            self.phase = Phase::Idle;
        }
        self.pending_first = None;
    }

    fn confirm_idle(&mut self, selection: &SelectionState) -> Result<StepOutcome> {
        if selection.run_mode {
            if selection.chain_mode {
                info!("chain run: applying first kernel");
                let first = self.run_pass(
                    PassStage::ChainFirst,
                    BufferSlot::Input,
                    BufferSlot::Temp,
                    selection.kernel,
                    selection.size,
                )?;
                self.pending_first = Some(first.clone());
                self.phase = Phase::AwaitingSecondConfirm;
                info!("first stage done; select second kernel and confirm");
                Ok(StepOutcome::FirstStageApplied(first))
            } else {
                info!("single run");
                let pass = self.run_pass(
                    PassStage::Single,
                    BufferSlot::Input,
                    BufferSlot::Output,
                    selection.kernel,
                    selection.size,
                )?;
                Ok(StepOutcome::SingleApplied(pass))
            }
        } else if selection.reset {
            self.buffers.reset();
            self.pending_first = None;
            self.phase = Phase::AwaitingImage;
            info!("buffers reset; awaiting image selection");
            Ok(StepOutcome::Reset)
        } else {
            Ok(StepOutcome::NoAction)
        }
    }

    fn confirm_second(&mut self, selection: &SelectionState) -> Result<StepOutcome> {
        info!("chain run: applying second kernel");
        let second = self.run_pass(
            PassStage::ChainSecond,
            BufferSlot::Temp,
            BufferSlot::Output,
            selection.kernel,
            selection.size,
        )?;
        self.phase = Phase::Idle;
        match self.pending_first.take() {
            Some(first) => Ok(StepOutcome::ChainApplied { first, second }),
            None => Ok(StepOutcome::SingleApplied(second)),
        }
    }

    fn run_pass(
        &mut self,
        stage: PassStage,
        source: BufferSlot,
        target: BufferSlot,
        kernel_id: KernelIdentity,
        size: KernelSize,
    ) -> Result<PassReport> {
        let kernel = KernelCatalog::lookup(kernel_id, size);
        let start = Instant::now();
        let (input, output) = self.buffers.split(source, target)?;
        convolve_into(&input, output, kernel)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "pass {:?} {} {} {}→{} in {:.3} ms",
            stage,
            kernel_id,
            size,
            source.name(),
            target.name(),
            elapsed_ms
        );
        Ok(PassReport {
            stage,
            kernel: kernel_id,
            size,
            divisor: kernel.divisor(),
            source,
            target,
            elapsed_ms,
        })
    }
}
