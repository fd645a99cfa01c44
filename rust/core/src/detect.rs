// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary/ASCII format detection
//!
//! The exact binary size equation is checked before the `solid` keyword:
//! binary headers are free-form 80-byte comments and plenty of exporters
//! start them with "solid".

use crate::error::{Error, Result};

/// Length of the free-form binary header
pub const HEADER_LEN: usize = 80;

/// Header plus the u32 triangle count
pub const PREAMBLE_LEN: usize = HEADER_LEN + 4;

/// Normal + three vertices (12 f32) + u16 attribute
pub const RECORD_LEN: usize = 50;

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    Binary,
    Ascii,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Binary => "binary",
            Format::Ascii => "ascii",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact byte length of a binary STL declaring `triangle_count` triangles
///
/// Returns `None` if the length does not fit in `usize`.
#[inline]
pub fn expected_binary_len(triangle_count: u32) -> Option<usize> {
    (triangle_count as usize)
        .checked_mul(RECORD_LEN)?
        .checked_add(PREAMBLE_LEN)
}

/// Triangle count declared at offset 80, if the buffer is long enough to hold it
#[inline]
pub fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(HEADER_LEN..PREAMBLE_LEN)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

/// Check the binary size signature: `len == 84 + 50 * N`
pub fn is_size_consistent_binary(bytes: &[u8]) -> bool {
    declared_triangle_count(bytes)
        .and_then(expected_binary_len)
        .is_some_and(|expected| expected == bytes.len())
}

/// Check whether the first non-whitespace token is `solid` (any case)
pub fn starts_with_solid_keyword(bytes: &[u8]) -> bool {
    let start = match bytes.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => start,
        None => return false,
    };
    let rest = &bytes[start..];
    match rest.get(..5) {
        Some(keyword) if keyword.eq_ignore_ascii_case(b"solid") => {
            rest.get(5).map_or(true, |b| b.is_ascii_whitespace())
        }
        _ => false,
    }
}

/// Format detector
pub struct StlFormatDetector;

impl StlFormatDetector {
    /// Classify a buffer as binary or ASCII STL
    pub fn detect(bytes: &[u8]) -> Result<Format> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }
        if is_size_consistent_binary(bytes) {
            return Ok(Format::Binary);
        }
        if starts_with_solid_keyword(bytes) {
            return Ok(Format::Ascii);
        }
        Err(Error::UnrecognizedFormat)
    }
}

/// Shorthand for [`StlFormatDetector::detect`]
#[inline]
pub fn detect_format(bytes: &[u8]) -> Result<Format> {
    StlFormatDetector::detect(bytes)
}
