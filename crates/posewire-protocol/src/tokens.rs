//! Byte splitting and hex token rendering.
//!
//! The first five values and the last two are sent as a single byte (low 8
//! bits). Everything in between is sent as two bytes, high then low. Each
//! byte becomes a two-character lowercase hex token followed by a space.

use std::fmt;

/// Values at the start of a frame sent as one byte.
pub const SINGLE_BYTE_HEAD: usize = 5;
/// Values at the end of a frame sent as one byte.
pub const SINGLE_BYTE_TAIL: usize = 2;

/// Bytes produced by a standard 18-value frame: 5 + 11 * 2 + 2.
pub const FRAME_BYTE_LEN: usize = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenWidth {
    /// Low byte only.
    Single,
    /// High byte, then low byte.
    Split,
}

/// Emission width of the value at `index` in a frame of `len` values.
#[inline]
pub fn token_width(index: usize, len: usize) -> TokenWidth {
    if index < SINGLE_BYTE_HEAD || index >= len.saturating_sub(SINGLE_BYTE_TAIL) {
        TokenWidth::Single
    } else {
        TokenWidth::Split
    }
}

/// Number of bytes [`split_values`] yields for a frame of `len` values.
pub fn byte_len(len: usize) -> usize {
    (0..len)
        .map(|i| match token_width(i, len) {
            TokenWidth::Single => 1,
            TokenWidth::Split => 2,
        })
        .sum()
}

/// Split frame values into wire bytes.
pub fn split_values(values: &[i32]) -> Vec<u8> {
    let len = values.len();
    let mut out = Vec::with_capacity(byte_len(len));
    for (index, value) in values.iter().enumerate() {
        let [low, high, ..] = value.to_le_bytes();
        match token_width(index, len) {
            TokenWidth::Single => out.push(low),
            TokenWidth::Split => {
                out.push(high);
                out.push(low);
            }
        }
    }
    out
}

/// Renders bytes as `"aa 29 05 "` without allocating.
#[derive(Debug, Clone, Copy)]
pub struct HexTokens<'a>(pub &'a [u8]);

impl fmt::Display for HexTokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x} ")?;
        }
        Ok(())
    }
}

pub fn to_hex_tokens(bytes: &[u8]) -> String {
    HexTokens(bytes).to_string()
}
