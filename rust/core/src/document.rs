// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detector-driven decoding entry points

use crate::ascii::AsciiStlDecoder;
use crate::binary::BinaryStlDecoder;
use crate::detect::{Format, StlFormatDetector};
use crate::error::Result;
use crate::triangle::RawTriangle;

/// A decoded STL file
#[derive(Debug, Clone, PartialEq)]
pub struct StlDocument {
    /// Encoding picked by the detector
    pub format: Format,
    /// Binary header text or the ASCII `solid` name, when present
    pub name: Option<String>,
    /// Triangles in file order
    pub triangles: Vec<RawTriangle>,
}

impl StlDocument {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Detect the format once and dispatch to the matching decoder
pub fn decode_document(bytes: &[u8]) -> Result<StlDocument> {
    let format = StlFormatDetector::detect(bytes)?;
    let (name, triangles) = match format {
        Format::Binary => (
            BinaryStlDecoder::header_name(bytes),
            BinaryStlDecoder::decode(bytes)?,
        ),
        Format::Ascii => AsciiStlDecoder::decode_named(bytes)?,
    };
    Ok(StlDocument {
        format,
        name,
        triangles,
    })
}

/// Decode STL bytes of either encoding into raw triangles
pub fn decode_stl(bytes: &[u8]) -> Result<Vec<RawTriangle>> {
    decode_document(bytes).map(|doc| doc.triangles)
}
