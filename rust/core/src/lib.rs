// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # STL-Lite Core Decoder
//!
//! Bounds-checked decoding of binary and ASCII STL files into raw triangles.
//!
//! ## Overview
//!
//! - **Format detection**: the exact binary size equation (`84 + 50 * N`) is
//!   checked first, then the ASCII `solid` keyword
//! - **Binary decoding**: a [`ByteCursor`] walks the 50-byte records and never
//!   reads past the buffer
//! - **ASCII decoding**: [nom](https://docs.rs/nom) tokenization with
//!   [fast-float](https://docs.rs/fast-float) number parsing
//! - **Binary encoding**: the inverse layout, for fixtures and export
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stl_lite_core::{decode_document, Format};
//!
//! let doc = decode_document(&bytes)?;
//! match doc.format {
//!     Format::Binary => println!("binary, {} triangles", doc.triangle_count()),
//!     Format::Ascii => println!("ascii solid {:?}", doc.name),
//! }
//! ```
//!
//! Decoding holds no state between calls and copies every value out of the
//! input, so independent buffers can be decoded concurrently.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for [`RawTriangle`] and [`Format`]

pub mod ascii;
pub mod binary;
pub mod cursor;
pub mod detect;
pub mod document;
pub mod error;
pub mod triangle;

pub use ascii::AsciiStlDecoder;
pub use binary::{encode_binary, BinaryStlDecoder, BinaryTriangles};
pub use cursor::ByteCursor;
pub use detect::{
    declared_triangle_count, detect_format, expected_binary_len, Format, StlFormatDetector,
    HEADER_LEN, PREAMBLE_LEN, RECORD_LEN,
};
pub use document::{decode_document, decode_stl, StlDocument};
pub use error::{Error, Result};
pub use triangle::{RawTriangle, Vec3f};
