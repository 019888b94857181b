pub mod cart;
pub mod matrix;
pub mod view;

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(error: &anyhow::Error, exit_code: u8) -> Self {
        Self { exit_code, output: format!("error: {error:#}") }
    }

    pub fn from_outcome(outcome: anyhow::Result<String>) -> Self {
        match outcome {
            Ok(output) => Self::success(output),
            Err(error) => Self::failure(&error, 1),
        }
    }
}

/// Read and deserialize a JSON document from disk.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
