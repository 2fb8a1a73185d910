//! Pose sample to wire frame, in one call.

use tracing::warn;

use crate::error::FrameResult;
use crate::fixed::{convert, convert_checked};
use crate::frame::{Frame, FrameLayout};
use crate::sample::PoseSample;
use crate::tokens::{HexTokens, split_values};

/// Stateless encoder configuration.
///
/// Lenient (the default) never fails: out-of-range or non-finite fields
/// produce whatever the conversion yields. Strict rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameEncoder {
    layout: FrameLayout,
    strict: bool,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn encode(&self, sample: &PoseSample) -> FrameResult<EncodedFrame> {
        let values = sample.to_array();
        let payload = if self.strict {
            convert_checked(&values).inspect_err(|e| warn!(error = %e, "rejected pose sample"))?
        } else {
            convert(&values)
        };
        Ok(EncodedFrame::new(Frame::assemble(&payload, self.layout)))
    }
}

/// Encode with the default (legacy, lenient) configuration.
pub fn encode_sample(sample: &PoseSample) -> EncodedFrame {
    let payload = convert(&sample.to_array());
    EncodedFrame::new(Frame::assemble(&payload, FrameLayout::default()))
}

/// A frame together with its wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    frame: Frame,
    bytes: Vec<u8>,
}

impl EncodedFrame {
    pub fn new(frame: Frame) -> Self {
        let bytes = split_values(frame.values());
        Self { frame, bytes }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn tokens(&self) -> HexTokens<'_> {
        HexTokens(&self.bytes)
    }

    pub fn to_hex_string(&self) -> String {
        self.tokens().to_string()
    }
}
