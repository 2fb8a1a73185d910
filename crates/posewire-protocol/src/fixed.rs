//! Fixed-point conversion: metres to centimetres, truncated toward zero, with
//! the `+0xFFFF` negative marker.
//!
//! The receiver decodes a 16-bit field `w` as `w` when `w <= 0x7FFF` and as
//! `w - 0xFFFF` otherwise. That is only unambiguous while the centimetre value
//! stays within `±0x7FFF`; [`convert_checked`] enforces the bound, [`convert`]
//! does not.

use crate::error::{FrameError, FrameResult};
use crate::sample::{POSE_FIELD_COUNT, PoseSample};

/// Metres to centimetres.
pub const FIXED_POINT_SCALE: f32 = 100.0;

/// Offset added to negative fixed-point values.
pub const NEGATIVE_BIAS: i32 = 0xFFFF;

/// Largest centimetre magnitude the receiver can tell apart from a tagged
/// negative.
pub const MAX_FIXED_MAGNITUDE: i32 = 0x7FFF;

/// Scale to centimetres and truncate toward zero.
///
/// The multiply happens in `f32`, matching the sensor's precision. `NaN`
/// becomes 0 and infinities saturate (Rust float-to-int cast semantics).
#[inline]
pub fn scale_to_fixed(value: f32) -> i32 {
    (value * FIXED_POINT_SCALE) as i32
}

/// Apply the negative marker: `t + 0xFFFF` for `t < 0`, `t` otherwise.
///
/// This is not two's complement; `-1` becomes `0xFFFE`, not `0xFFFF`.
#[inline]
pub fn sign_tag(fixed: i32) -> i32 {
    if fixed < 0 {
        fixed.wrapping_add(NEGATIVE_BIAS)
    } else {
        fixed
    }
}

/// Convert one value: [`scale_to_fixed`] followed by [`sign_tag`].
#[inline]
pub fn convert_value(value: f32) -> i32 {
    sign_tag(scale_to_fixed(value))
}

/// Convert every value. Never fails; out-of-range input produces silently
/// wrong integers.
pub fn convert(values: &[f32]) -> Vec<i32> {
    values.iter().copied().map(convert_value).collect()
}

/// Convert one value, rejecting non-finite input and magnitudes the receiver
/// cannot decode. `index` is only used for error reporting.
pub fn convert_value_checked(index: usize, value: f32) -> FrameResult<i32> {
    if !value.is_finite() {
        return Err(FrameError::NonFinite { index, value });
    }
    let fixed = scale_to_fixed(value);
    if fixed.unsigned_abs() > MAX_FIXED_MAGNITUDE.unsigned_abs() {
        return Err(FrameError::OutOfRange {
            index,
            value,
            fixed,
        });
    }
    Ok(sign_tag(fixed))
}

/// Checked variant of [`convert`]; stops at the first offending field.
pub fn convert_checked(values: &[f32]) -> FrameResult<Vec<i32>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| convert_value_checked(index, value))
        .collect()
}

/// Centimetre values of one pose sample, before sign tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPointSample {
    values: [i32; POSE_FIELD_COUNT],
}

impl FixedPointSample {
    pub fn from_sample(sample: &PoseSample) -> Self {
        Self {
            values: sample.to_array().map(scale_to_fixed),
        }
    }

    /// Signed centimetre values in wire order.
    pub fn values(&self) -> &[i32; POSE_FIELD_COUNT] {
        &self.values
    }

    /// Values with the negative marker applied, ready for framing.
    pub fn tagged(&self) -> [i32; POSE_FIELD_COUNT] {
        self.values.map(sign_tag)
    }
}

impl From<&PoseSample> for FixedPointSample {
    fn from(sample: &PoseSample) -> Self {
        Self::from_sample(sample)
    }
}
