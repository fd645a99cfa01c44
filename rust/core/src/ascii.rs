// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII STL decoding
//!
//! The grammar is read as a stream of whitespace-delimited tokens rather than
//! lines, so any mix of spaces, tabs and newlines between tokens is accepted:
//!
//! ```text
//! solid <name>
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```
//!
//! Keywords match case-insensitively. Numbers are parsed with fast-float.

use nom::{
    bytes::complete::{take_till1, take_while},
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::triangle::{RawTriangle, Vec3f};

/// Skip whitespace
fn ws(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(|b: u8| b.is_ascii_whitespace())(input)
}

/// Next whitespace-delimited token
fn word(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(ws, take_till1(|b: u8| b.is_ascii_whitespace()))(input)
}

/// Keywords that end the name on a `solid` line
const SOLID_NAME_STOPS: &[&[u8]] = &[b"facet", b"endsolid"];

/// Keywords that end the optional name on an `endsolid` line
const ENDSOLID_NAME_STOPS: &[&[u8]] = &[b"solid", b"facet", b"endsolid"];

#[inline]
fn is_keyword(token: &[u8], keyword: &[u8]) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

/// Token stream with position tracking for error reporting
struct Tokens<'a> {
    input: &'a [u8],
    rest: &'a [u8],
}

impl<'a> Tokens<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, rest: input }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        match word(self.rest) {
            Ok((rest, token)) => {
                self.rest = rest;
                Some(token)
            }
            Err(_) => None,
        }
    }

    /// Free text after `solid` or `endsolid`
    ///
    /// Consumes tokens up to the end of the current line or the first token
    /// matching one of `stops`, whichever comes first. Text containing
    /// control bytes other than whitespace is rejected, which keeps binary
    /// payloads behind a "solid" header from passing as a name.
    fn label(&mut self, stops: &[&[u8]]) -> Result<&'a [u8]> {
        let start = self.rest;
        let mut end = 0;
        let mut cursor = start;

        while let Ok((after, token)) = word(cursor) {
            let token_start = start.len() - after.len() - token.len();
            if memchr::memchr2(b'\n', b'\r', &start[end..token_start]).is_some()
                || stops.iter().any(|stop| is_keyword(token, stop))
            {
                break;
            }
            end = start.len() - after.len();
            cursor = after;
        }

        let label = &start[..end];
        if label
            .iter()
            .any(|b| b.is_ascii_control() && !b.is_ascii_whitespace())
        {
            return Err(Error::malformed_triangle(
                self.line(),
                "solid line contains binary data",
            ));
        }
        self.rest = &start[end..];
        Ok(label)
    }

    /// 1-based line number of the current position
    fn line(&self) -> usize {
        let offset = self.input.len() - self.rest.len();
        memchr::memchr_iter(b'\n', &self.input[..offset]).count() + 1
    }

    fn unexpected(&self, found: Option<&[u8]>, expected: &str) -> Error {
        let message = match found {
            Some(token) => format!(
                "expected {}, found '{}'",
                expected,
                String::from_utf8_lossy(token)
            ),
            None => format!("expected {}, found end of input", expected),
        };
        Error::malformed_triangle(self.line(), message)
    }

    fn expect(&mut self, keyword: &str) -> Result<()> {
        match self.next_token() {
            Some(token) if is_keyword(token, keyword.as_bytes()) => Ok(()),
            found => Err(self.unexpected(found, &format!("'{}'", keyword))),
        }
    }

    fn number(&mut self) -> Result<f32> {
        let token = self
            .next_token()
            .ok_or_else(|| self.unexpected(None, "a number"))?;
        fast_float::parse::<f32, _>(token)
            .map_err(|_| Error::malformed_number(token, self.line()))
    }

    fn vec3(&mut self) -> Result<Vec3f> {
        Ok([self.number()?, self.number()?, self.number()?])
    }
}

/// ASCII STL decoder
pub struct AsciiStlDecoder;

impl AsciiStlDecoder {
    /// Decode every facet in document order
    pub fn decode(text: &[u8]) -> Result<Vec<RawTriangle>> {
        Self::decode_named(text).map(|(_, triangles)| triangles)
    }

    /// Decode a `&str` document
    pub fn decode_str(text: &str) -> Result<Vec<RawTriangle>> {
        Self::decode(text.as_bytes())
    }

    /// Decode facets and return the name on the first `solid` line
    ///
    /// A missing final `endsolid` is tolerated when input ends between
    /// facets. Consecutive `solid ... endsolid` blocks are concatenated.
    pub fn decode_named(text: &[u8]) -> Result<(Option<String>, Vec<RawTriangle>)> {
        let mut tokens = Tokens::new(text);

        match tokens.next_token() {
            Some(token) if is_keyword(token, b"solid") => {}
            _ => return Err(Error::UnrecognizedFormat),
        }
        let name = solid_name(tokens.label(SOLID_NAME_STOPS)?);

        // Roughly 250 bytes per facet in typical exporter output
        let mut triangles = Vec::with_capacity(text.len() / 250);

        loop {
            let token = match tokens.next_token() {
                Some(token) => token,
                None => return Ok((name, triangles)),
            };

            if is_keyword(token, b"facet") {
                triangles.push(parse_facet(&mut tokens)?);
            } else if is_keyword(token, b"endsolid") {
                tokens.label(ENDSOLID_NAME_STOPS)?;
                match tokens.next_token() {
                    None => return Ok((name, triangles)),
                    Some(next) if is_keyword(next, b"solid") => {
                        tokens.label(SOLID_NAME_STOPS)?;
                    }
                    found => {
                        return Err(tokens.unexpected(found, "'solid' or end of input"));
                    }
                }
            } else {
                return Err(tokens.unexpected(Some(token), "'facet' or 'endsolid'"));
            }
        }
    }
}

fn solid_name(line: &[u8]) -> Option<String> {
    let name = String::from_utf8_lossy(line);
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Parse one facet after its `facet` keyword
fn parse_facet(tokens: &mut Tokens<'_>) -> Result<RawTriangle> {
    tokens.expect("normal")?;
    let normal = tokens.vec3()?;
    tokens.expect("outer")?;
    tokens.expect("loop")?;

    let mut vertices: SmallVec<[Vec3f; 3]> = SmallVec::new();
    loop {
        match tokens.next_token() {
            Some(token) if is_keyword(token, b"vertex") => {
                if vertices.len() == 3 {
                    return Err(Error::malformed_triangle(
                        tokens.line(),
                        "outer loop has more than 3 vertices",
                    ));
                }
                vertices.push(tokens.vec3()?);
            }
            Some(token) if is_keyword(token, b"endloop") => break,
            found => return Err(tokens.unexpected(found, "'vertex' or 'endloop'")),
        }
    }

    if vertices.len() != 3 {
        return Err(Error::malformed_triangle(
            tokens.line(),
            format!("outer loop has {} vertices, expected 3", vertices.len()),
        ));
    }
    tokens.expect("endfacet")?;

    Ok(RawTriangle::new(normal, vertices[0], vertices[1], vertices[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TRIANGLE: &str = "solid t
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
endsolid";

    #[test]
    fn test_word() {
        assert_eq!(word(b"  facet normal"), Ok((&b" normal"[..], &b"facet"[..])));
        assert!(word(b" \n\t ").is_err());
    }

    #[test]
    fn test_minimal_document() {
        let tris = AsciiStlDecoder::decode_str(ONE_TRIANGLE).unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(tris[0].v0, [0.0, 0.0, 0.0]);
        assert_eq!(tris[0].v1, [1.0, 0.0, 0.0]);
        assert_eq!(tris[0].v2, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_name_is_rest_of_solid_line() {
        let (name, _) = AsciiStlDecoder::decode_named(ONE_TRIANGLE.as_bytes()).unwrap();
        assert_eq!(name.as_deref(), Some("t"));

        let (name, tris) = AsciiStlDecoder::decode_named(b"solid\nendsolid\n").unwrap();
        assert_eq!(name, None);
        assert!(tris.is_empty());

        let (name, _) =
            AsciiStlDecoder::decode_named(b"solid  Part 7 (rev b)  \r\nendsolid").unwrap();
        assert_eq!(name.as_deref(), Some("Part 7 (rev b)"));
    }

    #[test]
    fn test_free_form_whitespace_and_case() {
        let text = "SOLID x\nFACET\tNORMAL 0 -1 0 OUTER   LOOP\n\n\
                    Vertex 1e1 2.5 -3\r\n vertex 4 5 6 VERTEX 7 8 9\n\
                    ENDLOOP ENDFACET endSolid x";
        let tris = AsciiStlDecoder::decode_str(text).unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].normal, [0.0, -1.0, 0.0]);
        assert_eq!(tris[0].v0, [10.0, 2.5, -3.0]);
        assert_eq!(tris[0].v2, [7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_malformed_number() {
        let text = ONE_TRIANGLE.replace("vertex 1 0 0", "vertex 1 0x 0");
        match AsciiStlDecoder::decode_str(&text) {
            Err(Error::MalformedNumber { token, line }) => {
                assert_eq!(token, "0x");
                assert_eq!(line, 5);
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_two_vertices_is_malformed_triangle() {
        let text = ONE_TRIANGLE.replace("vertex 0 1 0\n", "");
        assert!(matches!(
            AsciiStlDecoder::decode_str(&text),
            Err(Error::MalformedTriangle { .. })
        ));
    }

    #[test]
    fn test_four_vertices_is_malformed_triangle() {
        let text = ONE_TRIANGLE.replace("vertex 0 1 0", "vertex 0 1 0\nvertex 1 1 0");
        assert!(matches!(
            AsciiStlDecoder::decode_str(&text),
            Err(Error::MalformedTriangle { .. })
        ));
    }

    #[test]
    fn test_unterminated_loop_is_malformed_triangle() {
        let text = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\n";
        assert!(matches!(
            AsciiStlDecoder::decode_str(text),
            Err(Error::MalformedTriangle { .. })
        ));
    }

    #[test]
    fn test_missing_endsolid_is_tolerated() {
        let text = ONE_TRIANGLE.trim_end_matches("endsolid");
        assert_eq!(AsciiStlDecoder::decode_str(text).unwrap().len(), 1);
    }

    #[test]
    fn test_multiple_solids_are_concatenated() {
        let second = ONE_TRIANGLE.replace("normal 0 0 1", "normal 1 0 0");
        let text = format!("{}\n{}", ONE_TRIANGLE, second);
        let tris = AsciiStlDecoder::decode_str(&text).unwrap();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_line_document() {
        let text = b"solid t facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 \
                     vertex 0 1 0 endloop endfacet endsolid t";
        let (name, tris) = AsciiStlDecoder::decode_named(text).unwrap();
        assert_eq!(name.as_deref(), Some("t"));
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].v2, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_document_without_newlines() {
        let text = ONE_TRIANGLE.replace('\n', "\t");
        let (name, tris) = AsciiStlDecoder::decode_named(text.as_bytes()).unwrap();
        assert_eq!(name.as_deref(), Some("t"));
        assert_eq!(tris.len(), 1);

        let nameless = "solid facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 \
                        vertex 0 1 0 endloop endfacet endsolid";
        let (name, tris) = AsciiStlDecoder::decode_named(nameless.as_bytes()).unwrap();
        assert_eq!(name, None);
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn test_next_solid_on_endsolid_line() {
        let text = "solid a facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 \
                    vertex 0 1 0 endloop endfacet endsolid a solid b facet normal 1 0 0 \
                    outer loop vertex 0 0 0 vertex 0 1 0 vertex 0 0 1 endloop endfacet \
                    endsolid b";
        let tris = AsciiStlDecoder::decode_str(text).unwrap();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_binary_payload_after_solid_is_rejected() {
        let mut bytes = b"solid exported".to_vec();
        bytes.resize(80, 0);
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[0x3F; 99]);
        assert!(matches!(
            AsciiStlDecoder::decode(&bytes),
            Err(Error::MalformedTriangle { line: 1, .. })
        ));
    }

    #[test]
    fn test_garbage_after_endsolid() {
        let text = format!("{}\nfacet", ONE_TRIANGLE);
        assert!(matches!(
            AsciiStlDecoder::decode_str(&text),
            Err(Error::MalformedTriangle { .. })
        ));
    }

    #[test]
    fn test_not_a_solid() {
        assert_eq!(
            AsciiStlDecoder::decode_str("facet normal 0 0 1"),
            Err(Error::UnrecognizedFormat)
        );
    }
}
