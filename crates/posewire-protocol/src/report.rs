//! Console debug report for a pose sample.
//!
//! Layout follows the bridge's console dump: position and velocity on one
//! line, acceleration and angular velocity on the next, tab-separated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::fixed::FixedPointSample;
use crate::sample::{POSE_FIELD_COUNT, PoseSample};

/// Significant digits used for raw values.
pub const RAW_PRECISION: usize = 4;

const LABELS: [&str; POSE_FIELD_COUNT] = [
    "\npx: ", "\tpy: ", "\tpz: ", "\tvx: ", "\tvy: ", "\tvz: ", "\nax: ", "\tay: ", "\taz: ",
    "\tgx: ", "\tgy: ", "\tgz: ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// Sensor values, four significant digits.
    Raw,
    /// Centimetre integers.
    ScaledInt,
    /// Centimetre integers in hex.
    ScaledHex,
}

impl ReportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::ScaledInt => "scaled-int",
            Self::ScaledHex => "scaled-hex",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportMode {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "scaled-int" | "int" => Ok(Self::ScaledInt),
            "scaled-hex" | "hex" => Ok(Self::ScaledHex),
            _ => Err(FrameError::UnknownName {
                kind: "report mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Display adapter for one sample in one mode.
#[derive(Debug, Clone, Copy)]
pub struct PoseReport<'a> {
    sample: &'a PoseSample,
    mode: ReportMode,
}

impl<'a> PoseReport<'a> {
    pub fn new(sample: &'a PoseSample, mode: ReportMode) -> Self {
        Self { sample, mode }
    }
}

impl fmt::Display for PoseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = FixedPointSample::from_sample(self.sample);
        let fields = self.sample.to_array().into_iter().zip(*fixed.values());
        for (label, (value, cm)) in LABELS.iter().zip(fields) {
            f.write_str(label)?;
            match self.mode {
                ReportMode::Raw => f.write_str(&format_significant(value, RAW_PRECISION))?,
                ReportMode::ScaledInt => write!(f, "{cm}")?,
                // i32 LowerHex prints the two's complement bit pattern
                ReportMode::ScaledHex => write!(f, "{cm:x}")?,
            }
        }
        Ok(())
    }
}

pub fn render_report(sample: &PoseSample, mode: ReportMode) -> String {
    PoseReport::new(sample, mode).to_string()
}

/// Format with `digits` significant digits in "general" notation: fixed
/// unless the exponent is below -4 or at least `digits`, trailing zeros
/// dropped.
pub fn format_significant(value: f32, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let max_exponent = i32::try_from(digits).unwrap_or(i32::MAX);

    if exponent < -4 || exponent >= max_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
