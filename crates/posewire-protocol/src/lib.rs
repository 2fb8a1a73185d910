//! Fixed-point pose frame encoder for byte-oriented serial links.
//!
//! This crate is intentionally I/O-free. It turns one six-degree-of-freedom
//! pose sample into the frame an external controller expects:
//!
//! ```text
//! aa 29 05 ff 06 <hi lo> x 11 <lo> 00
//! ```
//!
//! # Key Features
//! - Metre to centimetre fixed-point conversion with the `+0xFFFF` negative marker
//! - Header/trailer assembly, both the legacy in-place shift and an append layout
//! - Byte splitting and hex token rendering
//! - Console debug report rendering (raw, scaled integer, scaled hex)

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod encoder;
pub mod error;
pub mod fixed;
pub mod frame;
pub mod report;
pub mod sample;
pub mod tokens;

pub use encoder::{EncodedFrame, FrameEncoder, encode_sample};
pub use error::{FrameError, FrameResult};
pub use fixed::{
    FIXED_POINT_SCALE, FixedPointSample, MAX_FIXED_MAGNITUDE, NEGATIVE_BIAS, convert,
    convert_checked, convert_value, convert_value_checked, scale_to_fixed, sign_tag,
};
pub use frame::{
    FRAME_LEN, Frame, FrameLayout, HEADER, HEADER_LEN, MARKER_COUNT, MARKER_VALUES, TRAILER,
    insert_markers_in_place, marker_positions,
};
pub use report::{PoseReport, ReportMode, format_significant, render_report};
pub use sample::{FIELD_NAMES, POSE_FIELD_COUNT, PoseSample};
pub use tokens::{
    FRAME_BYTE_LEN, HexTokens, TokenWidth, byte_len, split_values, to_hex_tokens, token_width,
};
