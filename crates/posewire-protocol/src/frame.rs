//! Frame assembly: header and trailer markers around the fixed-point payload.
//!
//! Frame layout (18 values for a 12-field pose):
//! - Index 0-4: header `0xAA 0x29 0x05 0xFF 0x06`
//! - Index 5-16: sign-tagged payload, wire order
//! - Index 17: trailer `0x00`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::sample::POSE_FIELD_COUNT;

pub const HEADER: [i32; HEADER_LEN] = [0xAA, 0x29, 0x05, 0xFF, 0x06];
pub const TRAILER: i32 = 0x00;
pub const HEADER_LEN: usize = 5;

/// Header values followed by the trailer, in insertion order.
pub const MARKER_VALUES: [i32; MARKER_COUNT] = [0xAA, 0x29, 0x05, 0xFF, 0x06, 0x00];
pub const MARKER_COUNT: usize = 6;

/// Frame length for a full pose sample.
pub const FRAME_LEN: usize = POSE_FIELD_COUNT + MARKER_COUNT;

/// Slots the markers are written to in a buffer of `len` values.
pub fn marker_positions(len: usize) -> [usize; MARKER_COUNT] {
    [0, 1, 2, 3, 4, len.saturating_sub(1)]
}

/// Insert the six markers into `buf` without growing it.
///
/// Each marker shifts the values after its slot one place right and the last
/// value falls off the end. Over a buffer holding only payload this drops
/// the last six payload values; callers that need the whole payload must
/// leave six spare slots at the end (see [`FrameLayout::Legacy`]).
pub fn insert_markers_in_place(buf: &mut [i32]) -> FrameResult<()> {
    if buf.len() < MARKER_COUNT {
        return Err(FrameError::BufferTooShort {
            minimum: MARKER_COUNT,
            actual: buf.len(),
        });
    }
    shift_in_markers(buf);
    Ok(())
}

fn shift_in_markers(buf: &mut [i32]) {
    let positions = marker_positions(buf.len());
    for i in 0..buf.len() {
        for (&position, &marker) in positions.iter().zip(MARKER_VALUES.iter()) {
            if position != i {
                continue;
            }
            if let Some(tail) = buf.get_mut(i..) {
                tail.rotate_right(1);
            }
            if let Some(slot) = buf.get_mut(i) {
                *slot = marker;
            }
        }
    }
}

/// How the markers are combined with the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameLayout {
    /// Zero-pad the payload by six slots and shift the markers in place.
    #[default]
    Legacy,
    /// Build a fresh buffer: header, payload, trailer.
    Append,
}

impl FrameLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for FrameLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameLayout {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "append" => Ok(Self::Append),
            _ => Err(FrameError::UnknownName {
                kind: "frame layout",
                value: s.to_string(),
            }),
        }
    }
}

/// An assembled frame, `payload.len() + 6` values long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    values: Vec<i32>,
}

impl Frame {
    pub fn assemble(payload: &[i32], layout: FrameLayout) -> Self {
        let values = match layout {
            FrameLayout::Legacy => assemble_legacy(payload),
            FrameLayout::Append => assemble_append(payload),
        };
        Self { values }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn header(&self) -> &[i32] {
        self.values.get(..HEADER_LEN).unwrap_or_default()
    }

    pub fn payload(&self) -> &[i32] {
        let end = self.values.len().saturating_sub(1);
        self.values.get(HEADER_LEN..end).unwrap_or_default()
    }

    pub fn trailer(&self) -> Option<i32> {
        self.values.last().copied()
    }
}

fn assemble_legacy(payload: &[i32]) -> Vec<i32> {
    let mut buf = Vec::with_capacity(payload.len() + MARKER_COUNT);
    buf.extend_from_slice(payload);
    buf.resize(payload.len() + MARKER_COUNT, 0);
    shift_in_markers(&mut buf);
    buf
}

fn assemble_append(payload: &[i32]) -> Vec<i32> {
    let mut buf = Vec::with_capacity(payload.len() + MARKER_COUNT);
    buf.extend_from_slice(&HEADER);
    buf.extend_from_slice(payload);
    buf.push(TRAILER);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn ramp_payload() -> Vec<i32> {
        (1..=12).map(|v| v * 10).collect()
    }

    #[test]
    fn test_marker_positions() {
        assert_eq!(marker_positions(18), [0, 1, 2, 3, 4, 17]);
        assert_eq!(marker_positions(6), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_legacy_frame_layout() {
        let frame = Frame::assemble(&ramp_payload(), FrameLayout::Legacy);
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame.header(), &HEADER);
        assert_eq!(frame.payload(), ramp_payload().as_slice());
        assert_eq!(frame.trailer(), Some(TRAILER));
    }

    #[test]
    fn test_append_frame_layout() {
        let frame = Frame::assemble(&ramp_payload(), FrameLayout::Append);
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame.header(), &HEADER);
        assert_eq!(frame.payload(), ramp_payload().as_slice());
        assert_eq!(frame.trailer(), Some(TRAILER));
    }

    #[test]
    fn test_layouts_agree() {
        let payload = ramp_payload();
        assert_eq!(
            Frame::assemble(&payload, FrameLayout::Legacy),
            Frame::assemble(&payload, FrameLayout::Append)
        );
    }

    #[test]
    fn test_in_place_over_unpadded_buffer_drops_tail() -> TestResult {
        let mut buf = ramp_payload();
        insert_markers_in_place(&mut buf)?;
        assert_eq!(
            buf,
            vec![0xAA, 0x29, 0x05, 0xFF, 0x06, 10, 20, 30, 40, 50, 60, 0x00]
        );
        Ok(())
    }

    #[test]
    fn test_in_place_minimum_buffer() -> TestResult {
        let mut buf = vec![7; MARKER_COUNT];
        insert_markers_in_place(&mut buf)?;
        assert_eq!(buf, MARKER_VALUES.to_vec());
        Ok(())
    }

    #[test]
    fn test_in_place_rejects_short_buffer() {
        let mut buf = vec![1, 2, 3, 4, 5];
        assert_eq!(
            insert_markers_in_place(&mut buf),
            Err(FrameError::BufferTooShort {
                minimum: 6,
                actual: 5,
            })
        );
        assert_eq!(buf, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_payload_is_markers_only() {
        let frame = Frame::assemble(&[], FrameLayout::Legacy);
        assert_eq!(frame.values(), &MARKER_VALUES);
        assert!(frame.payload().is_empty());
        assert!(!frame.is_empty());
        assert_eq!(frame.len(), MARKER_VALUES.len());
    }

    #[test]
    fn test_layout_from_str() -> TestResult {
        assert_eq!("legacy".parse::<FrameLayout>()?, FrameLayout::Legacy);
        assert_eq!(" Append ".parse::<FrameLayout>()?, FrameLayout::Append);
        assert!("compact".parse::<FrameLayout>().is_err());
        assert_eq!(FrameLayout::default(), FrameLayout::Legacy);
        assert_eq!(FrameLayout::Append.to_string(), "append");
        Ok(())
    }
}
