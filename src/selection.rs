//! Decoding of sampled switch/button inputs into a typed selection.
//!
//! Switch layout:
//!
//! | bits  | meaning                                             |
//! |-------|-----------------------------------------------------|
//! | `1:0` | kernel identity (00 Edge, 01 BoxBlur, 10 Gaussian, 11 Sharpen) |
//! | `2`   | kernel size (0 → 3×3, 1 → 5×5)                      |
//! | `3`   | run mode                                            |
//! | `4`   | chain mode                                          |
//! | `6`   | reset                                               |
//!
//! Bit 5 and everything above bit 6 are ignored. The confirm button is
//! edge-triggered: `confirmed` is set only on a false → true transition.
use crate::kernels::{KernelIdentity, KernelSize};
use serde::{Deserialize, Serialize};

pub const KERNEL_MASK: u32 = 0b11;
pub const SIZE_BIT: u32 = 1 << 2;
pub const RUN_BIT: u32 = 1 << 3;
pub const CHAIN_BIT: u32 = 1 << 4;
pub const RESET_BIT: u32 = 1 << 6;

/// Status LEDs are a 10-bit register.
const LED_MASK: u32 = 0x3FF;

/// Number of images selectable from the library by bits `[1:0]`.
pub const IMAGE_SLOTS: usize = 3;

/// One sample of the external inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSample {
    pub switches: u32,
    #[serde(default)]
    pub button: bool,
}

impl InputSample {
    pub fn new(switches: u32, button: bool) -> Self {
        Self { switches, button }
    }

    /// Switches held with the button released.
    pub fn released(switches: u32) -> Self {
        Self::new(switches, false)
    }

    /// Switches held with the button pressed.
    pub fn pressed(switches: u32) -> Self {
        Self::new(switches, true)
    }
}

/// Typed view of the switch bank plus the confirm edge of this sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub kernel: KernelIdentity,
    pub size: KernelSize,
    pub run_mode: bool,
    pub chain_mode: bool,
    pub reset: bool,
    pub confirmed: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            kernel: KernelIdentity::Edge,
            size: KernelSize::Small,
            run_mode: false,
            chain_mode: false,
            reset: false,
            confirmed: false,
        }
    }
}

/// Decode raw switch bits and the confirm signal history.
pub fn decode(
    raw_bits: u32,
    confirm_signal: bool,
    previous_confirm_signal: bool,
) -> SelectionState {
    SelectionState {
        kernel: KernelIdentity::from_bits(raw_bits & KERNEL_MASK),
        size: if raw_bits & SIZE_BIT != 0 {
            KernelSize::Large
        } else {
            KernelSize::Small
        },
        run_mode: raw_bits & RUN_BIT != 0,
        chain_mode: raw_bits & CHAIN_BIT != 0,
        reset: raw_bits & RESET_BIT != 0,
        confirmed: confirm_signal && !previous_confirm_signal,
    }
}

impl SelectionState {
    /// Switch bits that decode back to this selection (confirm edge excluded).
    pub fn to_bits(&self) -> u32 {
        let mut bits = self.kernel.code();
        if self.size == KernelSize::Large {
            bits |= SIZE_BIT;
        }
        if self.run_mode {
            bits |= RUN_BIT;
        }
        if self.chain_mode {
            bits |= CHAIN_BIT;
        }
        if self.reset {
            bits |= RESET_BIT;
        }
        bits
    }

    /// LED register image: identity on 0-1, size on 2, run on 3, chain on 4, reset on 6.
    pub fn led_mask(&self) -> u32 {
        let mut mask = self.kernel.code();
        mask |= ((self.size == KernelSize::Large) as u32) << 2;
        mask |= (self.run_mode as u32) << 3;
        mask |= (self.chain_mode as u32) << 4;
        mask |= (self.reset as u32) << 6;
        mask & LED_MASK
    }

    /// Library slot chosen by bits `[1:0]` while an image is being selected.
    pub fn image_slot(&self) -> usize {
        (self.kernel.code() as usize).min(IMAGE_SLOTS - 1)
    }
}

/// Threads the previous button level between samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfirmTracker {
    last_button: bool,
}

impl ConfirmTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `sample` against the previous button level, then remember it.
    pub fn observe(&mut self, sample: InputSample) -> SelectionState {
        let state = decode(sample.switches, sample.button, self.last_button);
        self.last_button = sample.button;
        state
    }

    pub fn last_button(&self) -> bool {
        self.last_button
    }
}
