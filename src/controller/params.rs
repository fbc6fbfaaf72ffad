//! Parameters fixing the frame geometry of a controller.
use crate::image::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};

/// Frame size shared by the input, intermediate and output buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParams {
    pub width: usize,
    pub height: usize,
}

impl ControllerParams {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Bytes per frame.
    pub fn frame_len(&self) -> usize {
        self.width * self.height
    }
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
