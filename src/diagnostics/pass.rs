use crate::controller::BufferSlot;
use crate::kernels::{KernelIdentity, KernelSize};
use serde::{Deserialize, Serialize};

/// Which step of a run produced a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStage {
    Single,
    ChainFirst,
    ChainSecond,
}

/// One convolution pass executed by the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub stage: PassStage,
    pub kernel: KernelIdentity,
    pub size: KernelSize,
    pub divisor: i32,
    pub source: BufferSlot,
    pub target: BufferSlot,
    pub elapsed_ms: f64,
}

impl PassReport {
    /// Label used in timing breakdowns, e.g. `chain_first:gaussian:5x5`.
    pub fn label(&self) -> String {
        let stage = match self.stage {
            PassStage::Single => "single",
            PassStage::ChainFirst => "chain_first",
            PassStage::ChainSecond => "chain_second",
        };
        format!("{stage}:{}:{}", self.kernel, self.size)
    }
}
