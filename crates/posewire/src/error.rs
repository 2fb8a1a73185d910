//! Error types for the pose bridge.

use std::path::PathBuf;

use posewire_protocol::FrameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported baud rate: {0}")]
    UnsupportedBaud(u32),

    #[error("Failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Pose source error: {0}")]
    Source(#[source] std::io::Error),

    #[error("Malformed pose sample on line {line}")]
    SourceParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid pose sample: {0}")]
    InvalidSample(String),

    #[error("Transport error: {0}")]
    Transport(#[source] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(String),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidConfiguration(_)
            | Self::UnsupportedBaud(_)
            | Self::ConfigRead { .. }
            | Self::YamlError(_)
            | Self::JsonError(_) => 2,
            Self::Source(_) | Self::SourceParse { .. } | Self::InvalidSample(_) => 3,
            Self::Transport(_) | Self::Serial(_) => 4,
            Self::Frame(_) => 5,
            Self::IoError(_) => 1,
        }
    }
}
