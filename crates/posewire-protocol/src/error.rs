//! Pose frame error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("Buffer too short for marker insertion: need at least {minimum} slots, got {actual}")]
    BufferTooShort { minimum: usize, actual: usize },

    #[error("Non-finite value at field {index}: {value}")]
    NonFinite { index: usize, value: f32 },

    #[error("Value at field {index} out of range: {value} scales to {fixed}, limit is ±32767")]
    OutOfRange { index: usize, value: f32, fixed: i32 },

    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },
}

pub type FrameResult<T> = Result<T, FrameError>;
