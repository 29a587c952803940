//! JSON / YAML interchange for snapshots and results.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DiagnoserError, Result};
use crate::snapshot::Snapshot;

/// Structured text formats understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Infer the format from a file extension (`.json`, `.yml`, `.yaml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yml" | "yaml" => Ok(Format::Yaml),
            _ => Err(DiagnoserError::UnsupportedFormat(format!(
                "cannot infer format from '{}'",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for Format {
    type Err = DiagnoserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yml" | "yaml" => Ok(Format::Yaml),
            other => Err(DiagnoserError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub fn decode<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Encode `value`; JSON output is pretty-printed.
pub fn encode<T: Serialize>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

impl Snapshot {
    /// Read a collector dump from disk, picking the format from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = decode(&text, format)?;
        debug!(
            path = %path.display(),
            %format,
            pods = snapshot.graph.pods.len(),
            events = snapshot.events.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}
