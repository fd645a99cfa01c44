// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounds-checked little-endian reader
//!
//! Every read validates `position + len` against the buffer before touching
//! it, so offsets derived from file-supplied counts can never index past the
//! end. Failures surface as [`Error::TruncatedOrCorrupt`].

use crate::error::{Error, Result};
use crate::triangle::Vec3f;

/// Read cursor over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at offset 0
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current offset into the buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total buffer length
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the underlying buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Check if the cursor has consumed the whole buffer
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position == self.bytes.len()
    }

    /// Move to an absolute offset (the end of the buffer is a valid target)
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.bytes.len() {
            return Err(Error::truncated(format!(
                "seek to offset {} past end of {}-byte buffer",
                offset,
                self.bytes.len()
            )));
        }
        self.position = offset;
        Ok(())
    }

    /// Advance without reading
    #[inline]
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                Error::truncated(format!(
                    "read of {} bytes at offset {} exceeds {}-byte buffer",
                    len,
                    self.position,
                    self.bytes.len()
                ))
            })?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read a fixed-size array
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_f32_le(&mut self) -> Result<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Read three consecutive little-endian f32 values
    #[inline]
    pub fn read_vec3_le(&mut self) -> Result<Vec3f> {
        Ok([self.read_f32_le()?, self.read_f32_le()?, self.read_f32_le()?])
    }
}
