//! Host loop connecting an input source, an image library and a status
//! display to a [`ProcessingController`].
//!
//! One controller step runs per sample. Image requests are answered from
//! the library (or from the controller's baseline when the library is
//! empty). Failed runs are recorded and the loop continues; the operator
//! retries with another confirm edge.
use crate::controller::{ProcessingController, StatusSink, StatusSnapshot, StepOutcome};
use crate::diagnostics::{PassReport, TimingBreakdown};
use crate::error::Result;
use crate::image::io::load_image_any;
use crate::image::GrayImageU8;
use crate::selection::InputSample;
use log::{info, warn};
use serde::Serialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

/// Source of sampled switch/button inputs. `None` ends the session.
pub trait InputSource {
    fn sample(&mut self) -> Option<InputSample>;
}

/// Replays a fixed list of samples.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    samples: VecDeque<InputSample>,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Append a single raw sample.
    pub fn then(mut self, sample: InputSample) -> Self {
        self.samples.push_back(sample);
        self
    }

    /// Append a full button press (release, press, release) with `switches` held.
    pub fn click(mut self, switches: u32) -> Self {
        self.samples.push_back(InputSample::released(switches));
        self.samples.push_back(InputSample::pressed(switches));
        self.samples.push_back(InputSample::released(switches));
        self
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> Option<InputSample> {
        self.samples.pop_front()
    }
}

/// Images selectable by switch bits `[1:0]` after a reset.
#[derive(Clone, Debug, Default)]
pub struct ImageLibrary {
    images: Vec<GrayImageU8>,
}

impl ImageLibrary {
    pub fn new(images: Vec<GrayImageU8>) -> Self {
        Self { images }
    }

    /// Load every path as a `width × height` frame.
    pub fn from_paths(paths: &[PathBuf], width: usize, height: usize) -> Result<Self> {
        let images = paths
            .iter()
            .map(|path| load_image_any(path, width, height))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { images })
    }

    pub fn get(&self, slot: usize) -> Option<&GrayImageU8> {
        self.images.get(slot)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Notable things that happened during a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    ImageLoaded { tick: usize, slot: Option<usize> },
    ImageMissing { tick: usize, slot: usize },
    Pass { tick: usize, pass: PassReport },
    Reset { tick: usize },
    Error { tick: usize, message: String },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub ticks: usize,
    pub events: Vec<SessionEvent>,
    pub timing: TimingBreakdown,
    pub final_status: StatusSnapshot,
}

impl SessionReport {
    pub fn passes(&self) -> impl Iterator<Item = &PassReport> {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::Pass { pass, .. } => Some(pass),
            _ => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SessionEvent::Error { .. }))
            .count()
    }
}

/// Drive `controller` until `input` is exhausted.
pub fn run_session(
    controller: &mut ProcessingController,
    input: &mut dyn InputSource,
    library: &ImageLibrary,
    sink: &mut dyn StatusSink,
) -> SessionReport {
    let start = Instant::now();
    let mut events = Vec::new();
    let mut timing = TimingBreakdown::default();
    let mut tick = 0usize;

    while let Some(sample) = input.sample() {
        match controller.step(sample) {
            Ok(StepOutcome::NoAction) => {}
            Ok(StepOutcome::ImageRequested { slot }) => {
                events.push(answer_image_request(controller, library, tick, slot));
            }
            Ok(StepOutcome::SingleApplied(pass)) | Ok(StepOutcome::FirstStageApplied(pass)) => {
                timing.push(pass.label(), pass.elapsed_ms);
                events.push(SessionEvent::Pass { tick, pass });
            }
            Ok(StepOutcome::ChainApplied { second, .. }) => {
                timing.push(second.label(), second.elapsed_ms);
                events.push(SessionEvent::Pass { tick, pass: second });
            }
            Ok(StepOutcome::Reset) => events.push(SessionEvent::Reset { tick }),
            Err(err) => {
                warn!("tick {tick}: {err}");
                events.push(SessionEvent::Error {
                    tick,
                    message: err.to_string(),
                });
            }
        }
        sink.show(&controller.status());
        tick += 1;
    }

    timing.total_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "session finished: {} ticks, {} events in {:.3} ms ({:.3} ms convolving)",
        tick,
        events.len(),
        timing.total_ms,
        timing.stage_total_ms()
    );
    SessionReport {
        ticks: tick,
        events,
        timing,
        final_status: controller.status(),
    }
}

fn answer_image_request(
    controller: &mut ProcessingController,
    library: &ImageLibrary,
    tick: usize,
    slot: usize,
) -> SessionEvent {
    let (bytes, loaded_slot) = if library.is_empty() {
        (controller.baseline().as_bytes().to_vec(), None)
    } else {
        match library.get(slot) {
            Some(image) => (image.as_bytes().to_vec(), Some(slot)),
            None => {
                warn!("tick {tick}: no image in library slot {slot}");
                return SessionEvent::ImageMissing { tick, slot };
            }
        }
    };
    match controller.load_image(&bytes) {
        Ok(()) => SessionEvent::ImageLoaded {
            tick,
            slot: loaded_slot,
        },
        Err(err) => SessionEvent::Error {
            tick,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerParams, Phase, RecordingStatusSink};
    use crate::selection::{CHAIN_BIT, RESET_BIT, RUN_BIT};

    fn controller() -> ProcessingController {
        ProcessingController::new(ControllerParams::new(4, 4), GrayImageU8::filled(4, 4, 50))
            .unwrap()
    }

    #[test]
    fn click_expands_to_one_edge() {
        let mut input = ScriptedInput::default().click(RUN_BIT);
        assert_eq!(input.remaining(), 3);
        let presses: Vec<bool> = std::iter::from_fn(|| input.sample())
            .map(|s| s.button)
            .collect();
        assert_eq!(presses, vec![false, true, false]);
    }

    #[test]
    fn chain_timing_records_both_stages() {
        let mut ctl = controller();
        let mut input = ScriptedInput::default()
            .click(RUN_BIT | CHAIN_BIT | 0b01)
            .click(0b10);
        let mut sink = RecordingStatusSink::default();
        let report = run_session(&mut ctl, &mut input, &ImageLibrary::default(), &mut sink);
        let labels: Vec<&str> = report
            .timing
            .stages
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["chain_first:box_blur:3x3", "chain_second:gaussian:3x3"]
        );
        assert_eq!(report.passes().count(), 2);
        let sum: f64 = report.passes().map(|p| p.elapsed_ms).sum();
        assert!((report.timing.stage_total_ms() - sum).abs() < 1e-9);
        assert!(report.timing.stage_total_ms() <= report.timing.total_ms);
    }

    #[test]
    fn empty_library_reloads_baseline() {
        let mut ctl = controller();
        let mut input = ScriptedInput::default().click(RESET_BIT).click(0);
        let mut sink = RecordingStatusSink::default();
        let report = run_session(&mut ctl, &mut input, &ImageLibrary::default(), &mut sink);
        assert_eq!(
            report.events,
            vec![
                SessionEvent::Reset { tick: 1 },
                SessionEvent::ImageLoaded { tick: 4, slot: None },
            ]
        );
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(sink.history.len(), report.ticks);
    }

    #[test]
    fn library_slot_is_selected_by_switches() {
        let mut ctl = controller();
        let library = ImageLibrary::new(vec![
            GrayImageU8::filled(4, 4, 1),
            GrayImageU8::filled(4, 4, 2),
        ]);
        let mut input = ScriptedInput::default().click(RESET_BIT).click(0b01);
        let mut sink = RecordingStatusSink::default();
        run_session(&mut ctl, &mut input, &library, &mut sink);
        assert!(ctl.input().as_bytes().iter().all(|&v| v == 2));
    }

    #[test]
    fn missing_slot_keeps_waiting() {
        let mut ctl = controller();
        let library = ImageLibrary::new(vec![GrayImageU8::filled(4, 4, 1)]);
        let mut input = ScriptedInput::default().click(RESET_BIT).click(0b10);
        let mut sink = RecordingStatusSink::default();
        let report = run_session(&mut ctl, &mut input, &library, &mut sink);
        assert!(report
            .events
            .contains(&SessionEvent::ImageMissing { tick: 4, slot: 2 }));
        assert_eq!(ctl.phase(), Phase::AwaitingImage);
        assert_eq!(report.final_status.phase, Phase::AwaitingImage);
    }
}
