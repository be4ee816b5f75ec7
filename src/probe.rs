use log::debug;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ProbeError;

/// Kind tag of one stream, as reported in ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamInfo {
    #[serde(rename = "codec_type", default)]
    pub kind: StreamKind,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    /// Seconds, as ffprobe prints it (a decimal string).
    pub duration: Option<String>,
    pub format_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterInfo {
    pub id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Structured description of one file from a single probe call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeResult {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
    #[serde(default)]
    pub format: FormatInfo,
    #[serde(default)]
    pub chapters: Vec<ChapterInfo>,
}

impl ProbeResult {
    /// Parse ffprobe's `-print_format json` output.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProbeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Extracts a `ProbeResult` for one file. Implementations are shared by
/// all workers and must report failure through the return value.
pub trait Probe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError>;
}

/// Runs `ffprobe` once per file and parses its JSON report.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    binary: PathBuf,
}

impl FfprobeProbe {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        FfprobeProbe {
            binary: binary.into(),
        }
    }

    /// Check if the binary can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl Probe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError> {
        debug!("Running ffprobe on {}", path.display());

        // output() waits for the child and closes its pipes on every path
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-show_chapters",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    ProbeError::Unavailable(self.binary.display().to_string())
                }
                _ => ProbeError::Spawn(e),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        ProbeResult::from_json(&output.stdout)
    }
}
