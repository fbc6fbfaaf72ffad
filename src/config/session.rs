use crate::controller::ControllerParams;
use crate::error::{FilterError, Result};
use crate::selection::InputSample;
use crate::session::ScriptedInput;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Scripted session run by the `filter_session` tool.
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Image preloaded into the input and restored on reset (`.raw` or any decodable format).
    pub baseline: PathBuf,
    /// Up to three images selectable after a reset.
    #[serde(default)]
    pub library: Vec<PathBuf>,
    #[serde(default)]
    pub frame: ControllerParams,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
    pub output: SessionOutputConfig,
}

/// One entry of the input script.
///
/// `{"click": 11}` expands to release/press/release with the switches held;
/// `{"switches": 11, "button": true}` is a single raw sample.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScriptStep {
    Click { click: u32 },
    Sample(InputSample),
}

#[derive(Debug, Deserialize)]
pub struct SessionOutputConfig {
    /// Headerless output frame.
    pub raw: PathBuf,
    #[serde(default)]
    pub png: Option<PathBuf>,
    #[serde(default)]
    pub status_json: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl SessionConfig {
    pub fn scripted_input(&self) -> ScriptedInput {
        self.script
            .iter()
            .fold(ScriptedInput::default(), |input, step| match *step {
                ScriptStep::Click { click } => input.click(click),
                ScriptStep::Sample(sample) => input.then(sample),
            })
    }
}

pub fn load_config(path: &Path) -> Result<SessionConfig> {
    let data = fs::read_to_string(path).map_err(|e| FilterError::io(path, e))?;
    parse_config(&data).map_err(|source| FilterError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(data: &str) -> std::result::Result<SessionConfig, serde_json::Error> {
    serde_json::from_str(data)
}
