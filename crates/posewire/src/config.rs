//! Bridge configuration: file loading, command-line overrides, validation.

use std::path::{Path, PathBuf};

use posewire_protocol::{FrameEncoder, FrameLayout, ReportMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::transport::SUPPORTED_BAUD_RATES;

pub const DEFAULT_DEVICE: &str = "/dev/ttyAMA0";
pub const DEFAULT_BAUD: u32 = 115_200;

/// Top-level bridge configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    pub serial: SerialConfig,
    pub frame: FrameConfig,
    pub report: ReportConfig,
    pub source: SourceConfig,
    /// Stop after this many frames. Unbounded when absent.
    pub max_frames: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    pub device: PathBuf,
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            baud: DEFAULT_BAUD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub layout: FrameLayout,
    /// Reject non-finite and out-of-range fields instead of sending them.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub mode: Option<ReportMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// JSON-lines pose file; standard input when absent or `-`.
    pub input: Option<PathBuf>,
}

/// Values given on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub device: Option<PathBuf>,
    pub baud: Option<u32>,
    pub input: Option<PathBuf>,
    pub layout: Option<FrameLayout>,
    pub strict: bool,
    pub report: Option<ReportMode>,
    pub max_frames: Option<u64>,
}

impl BridgeConfig {
    /// Load from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> BridgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> BridgeResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> BridgeResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_yaml(&self) -> BridgeResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(device) = &overrides.device {
            self.serial.device = device.clone();
        }
        if let Some(baud) = overrides.baud {
            self.serial.baud = baud;
        }
        if let Some(input) = &overrides.input {
            self.source.input = Some(input.clone());
        }
        if let Some(layout) = overrides.layout {
            self.frame.layout = layout;
        }
        if overrides.strict {
            self.frame.strict = true;
        }
        if let Some(mode) = overrides.report {
            self.report.mode = Some(mode);
        }
        if let Some(max) = overrides.max_frames {
            self.max_frames = Some(max);
        }
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if !SUPPORTED_BAUD_RATES.contains(&self.serial.baud) {
            return Err(BridgeError::UnsupportedBaud(self.serial.baud));
        }
        if self.serial.device.as_os_str().is_empty() {
            return Err(BridgeError::InvalidConfiguration(
                "serial device path is empty".to_string(),
            ));
        }
        if self.max_frames == Some(0) {
            return Err(BridgeError::InvalidConfiguration(
                "max_frames must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Pose input path, `None` meaning standard input.
    pub fn input_path(&self) -> Option<&Path> {
        self.source
            .input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    pub fn encoder(&self) -> FrameEncoder {
        FrameEncoder::new()
            .with_layout(self.frame.layout)
            .with_strict(self.frame.strict)
    }
}
