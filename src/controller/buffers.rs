//! The controller's owned frame buffers.
//!
//! Three working frames (input, intermediate, output) plus the baseline the
//! input is restored from on reset. Convolution borrows one slot for reading
//! and another for writing; asking for the same slot twice is rejected.
use super::params::ControllerParams;
use crate::error::{FilterError, Result};
use crate::image::{GrayImageU8, ImageU8};
use serde::{Deserialize, Serialize};

/// Addressable working buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferSlot {
    Input,
    Temp,
    Output,
}

impl BufferSlot {
    pub fn name(self) -> &'static str {
        match self {
            BufferSlot::Input => "input",
            BufferSlot::Temp => "temp",
            BufferSlot::Output => "output",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageBuffers {
    baseline: GrayImageU8,
    input: GrayImageU8,
    temp: GrayImageU8,
    output: GrayImageU8,
}

impl ImageBuffers {
    /// Seed the input from `baseline`; intermediate and output start zeroed.
    pub fn new(params: ControllerParams, baseline: GrayImageU8) -> Result<Self> {
        if baseline.width() != params.width || baseline.height() != params.height {
            return Err(FilterError::DimensionMismatch {
                expected: params.frame_len(),
                actual: baseline.len(),
            });
        }
        Ok(Self {
            input: baseline.clone(),
            temp: GrayImageU8::new(params.width, params.height),
            output: GrayImageU8::new(params.width, params.height),
            baseline,
        })
    }

    pub fn get(&self, slot: BufferSlot) -> &GrayImageU8 {
        match slot {
            BufferSlot::Input => &self.input,
            BufferSlot::Temp => &self.temp,
            BufferSlot::Output => &self.output,
        }
    }

    pub fn baseline(&self) -> &GrayImageU8 {
        &self.baseline
    }

    /// Borrow `source` for reading and `target` for writing.
    pub fn split(
        &mut self,
        source: BufferSlot,
        target: BufferSlot,
    ) -> Result<(ImageU8<'_>, &mut GrayImageU8)> {
        use BufferSlot::{Input, Output, Temp};
        let pair = match (source, target) {
            (Input, Temp) => (&self.input, &mut self.temp),
            (Input, Output) => (&self.input, &mut self.output),
            (Temp, Input) => (&self.temp, &mut self.input),
            (Temp, Output) => (&self.temp, &mut self.output),
            (Output, Input) => (&self.output, &mut self.input),
            (Output, Temp) => (&self.output, &mut self.temp),
            (slot, _) => {
                return Err(FilterError::BufferAlias { slot: slot.name() });
            }
        };
        Ok((pair.0.as_view(), pair.1))
    }

    /// Replace the input frame with externally supplied bytes.
    pub fn load_input(&mut self, bytes: &[u8]) -> Result<()> {
        self.input.copy_from_bytes(bytes)
    }

    /// Restore the input to the baseline and zero the output.
    pub fn reset(&mut self) {
        self.input.clone_from(&self.baseline);
        self.output.fill(0);
    }
}
