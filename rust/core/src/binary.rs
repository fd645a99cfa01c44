// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary STL decoding and encoding
//!
//! Layout (all values little-endian):
//!
//! | bytes      | content                                        |
//! |------------|------------------------------------------------|
//! | 0..80      | free-form header, ignored by the decoder       |
//! | 80..84     | u32 triangle count `N`                         |
//! | 84..       | `N` records of 50 bytes                        |
//!
//! Each record holds the normal and three vertices as 12 f32 values followed
//! by a u16 attribute field, which is read and discarded.

use crate::cursor::ByteCursor;
use crate::detect::{expected_binary_len, HEADER_LEN, PREAMBLE_LEN, RECORD_LEN};
use crate::error::{Error, Result};
use crate::triangle::{RawTriangle, Vec3f};

/// Binary STL decoder
pub struct BinaryStlDecoder;

impl BinaryStlDecoder {
    /// Decode every triangle in file order
    ///
    /// Fails with [`Error::TruncatedOrCorrupt`] unless the buffer length is
    /// exactly `84 + 50 * N`. No partial result is ever returned.
    pub fn decode(bytes: &[u8]) -> Result<Vec<RawTriangle>> {
        Self::triangles(bytes)?.collect()
    }

    /// Validate the size equation and iterate triangles lazily
    ///
    /// The iterator copies every value out of the buffer; it yields
    /// `Result` only because each read still goes through the cursor.
    pub fn triangles(bytes: &[u8]) -> Result<BinaryTriangles<'_>> {
        let mut cursor = ByteCursor::new(bytes);
        if bytes.len() < PREAMBLE_LEN {
            return Err(Error::truncated(format!(
                "buffer is {} bytes, shorter than the {}-byte header and count",
                bytes.len(),
                PREAMBLE_LEN
            )));
        }

        cursor.skip(HEADER_LEN)?;
        let count = cursor.read_u32_le()?;

        let expected = expected_binary_len(count).ok_or_else(|| {
            Error::truncated(format!("declared triangle count {} overflows buffer size", count))
        })?;
        if expected != bytes.len() {
            return Err(Error::truncated(format!(
                "declared {} triangles need {} bytes, buffer has {}",
                count,
                expected,
                bytes.len()
            )));
        }

        Ok(BinaryTriangles {
            cursor,
            remaining: count as usize,
        })
    }

    /// Header text, if it is non-empty UTF-8 once NUL padding and whitespace are trimmed
    pub fn header_name(bytes: &[u8]) -> Option<String> {
        let header = bytes.get(..HEADER_LEN)?;
        let text = std::str::from_utf8(header).ok()?;
        let name = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// Lazy triangle iterator over a size-validated binary buffer
#[derive(Debug, Clone)]
pub struct BinaryTriangles<'a> {
    cursor: ByteCursor<'a>,
    remaining: usize,
}

impl BinaryTriangles<'_> {
    fn read_record(&mut self) -> Result<RawTriangle> {
        let normal = self.cursor.read_vec3_le()?;
        let v0 = self.cursor.read_vec3_le()?;
        let v1 = self.cursor.read_vec3_le()?;
        let v2 = self.cursor.read_vec3_le()?;
        // Attribute byte count; color extensions are not supported
        self.cursor.read_u16_le()?;
        Ok(RawTriangle::new(normal, v0, v1, v2))
    }
}

impl Iterator for BinaryTriangles<'_> {
    type Item = Result<RawTriangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let record = self.read_record();
        if record.is_err() {
            self.remaining = 0;
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BinaryTriangles<'_> {}

#[inline]
fn push_vec3(out: &mut Vec<u8>, v: &Vec3f) {
    for component in v {
        out.extend_from_slice(&component.to_le_bytes());
    }
}

/// Encode triangles as binary STL
///
/// `header` is truncated or NUL-padded to 80 bytes. Attribute fields are
/// written as zero.
pub fn encode_binary(triangles: &[RawTriangle], header: &[u8]) -> Result<Vec<u8>> {
    let count = u32::try_from(triangles.len()).map_err(|_| Error::TooManyTriangles {
        count: triangles.len(),
    })?;
    let len = expected_binary_len(count).ok_or(Error::TooManyTriangles {
        count: triangles.len(),
    })?;

    let mut out = Vec::with_capacity(len);
    let header_len = header.len().min(HEADER_LEN);
    out.extend_from_slice(&header[..header_len]);
    out.resize(HEADER_LEN, 0);
    out.extend_from_slice(&count.to_le_bytes());

    for tri in triangles {
        push_vec3(&mut out, &tri.normal);
        push_vec3(&mut out, &tri.v0);
        push_vec3(&mut out, &tri.v1);
        push_vec3(&mut out, &tri.v2);
        out.extend_from_slice(&0u16.to_le_bytes());
    }

    debug_assert_eq!(out.len(), len);
    Ok(out)
}
