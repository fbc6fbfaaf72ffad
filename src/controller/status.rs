//! Read-only status snapshots for display collaborators.
use super::pipeline::Phase;
use crate::selection::SelectionState;
use log::info;
use serde::{Deserialize, Serialize};

/// What a status display needs at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub selection: SelectionState,
    pub phase: Phase,
    pub image_loaded: bool,
    /// LED register image of `selection`.
    pub led_mask: u32,
}

/// Receives a snapshot on every controller tick.
pub trait StatusSink {
    fn show(&mut self, status: &StatusSnapshot);
}

/// Logs the snapshot whenever the LED image or phase changes.
#[derive(Debug, Default)]
pub struct LogStatusSink {
    last: Option<(u32, Phase)>,
}

impl StatusSink for LogStatusSink {
    fn show(&mut self, status: &StatusSnapshot) {
        let key = (status.led_mask, status.phase);
        if self.last == Some(key) {
            return;
        }
        self.last = Some(key);
        info!(
            "status leds={:#012b} kernel={} size={} run={} chain={} reset={} phase={:?}",
            status.led_mask,
            status.selection.kernel,
            status.selection.size,
            status.selection.run_mode,
            status.selection.chain_mode,
            status.selection.reset,
            status.phase
        );
    }
}

/// Keeps every snapshot; handy for scripted runs and tests.
#[derive(Debug, Default)]
pub struct RecordingStatusSink {
    pub history: Vec<StatusSnapshot>,
}

impl StatusSink for RecordingStatusSink {
    fn show(&mut self, status: &StatusSnapshot) {
        self.history.push(*status);
    }
}
