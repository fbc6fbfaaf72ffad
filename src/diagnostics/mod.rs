//! Serializable run diagnostics: per-pass reports and timing traces.

pub mod pass;
pub mod timing;

pub use pass::{PassReport, PassStage};
pub use timing::{StageTiming, TimingBreakdown};
