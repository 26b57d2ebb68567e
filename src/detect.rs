//! Input format detection.
//!
//! Write documents are stored either as plain SVG (`.svg`) or as
//! gzip-compressed SVG (`.svgz`). Files are classified by suffix; raw byte
//! buffers are classified by the gzip magic number.

use crate::error::{Error, Result};
use std::path::Path;

/// Storage encoding of a Write document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    /// Plain SVG markup
    Svg,
    /// Gzip-compressed SVG markup
    Svgz,
}

impl InputEncoding {
    /// File extension for this encoding, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            InputEncoding::Svg => "svg",
            InputEncoding::Svgz => "svgz",
        }
    }

    /// Whether the content must be decompressed before parsing.
    pub fn is_compressed(&self) -> bool {
        matches!(self, InputEncoding::Svgz)
    }
}

impl std::fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Gzip magic bytes.
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Detect the input encoding from a file path suffix.
///
/// # Returns
/// * `Ok(InputEncoding)` for `.svg` and `.svgz` (case-insensitive)
/// * `Err(Error::UnsupportedInput)` for any other suffix
///
/// # Example
/// ```
/// use unwrite::detect::{detect_encoding_from_path, InputEncoding};
///
/// let encoding = detect_encoding_from_path("notes.svgz").unwrap();
/// assert_eq!(encoding, InputEncoding::Svgz);
/// ```
pub fn detect_encoding_from_path<P: AsRef<Path>>(path: P) -> Result<InputEncoding> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("svgz") => Ok(InputEncoding::Svgz),
        Some("svg") => Ok(InputEncoding::Svg),
        _ => Err(Error::UnsupportedInput(format!(
            "unknown input file extension for {} (expected .svg or .svgz)",
            path.display()
        ))),
    }
}

/// Detect the input encoding from the leading bytes of the content.
///
/// Anything that does not start with the gzip magic number is treated as
/// plain markup; the parser reports it if it is not.
pub fn detect_encoding_from_bytes(data: &[u8]) -> InputEncoding {
    if is_gzip_bytes(data) {
        InputEncoding::Svgz
    } else {
        InputEncoding::Svg
    }
}

/// Check if bytes start with the gzip magic number.
pub fn is_gzip_bytes(data: &[u8]) -> bool {
    data.starts_with(GZIP_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_svgz() {
        assert_eq!(
            detect_encoding_from_path("notes.svgz").unwrap(),
            InputEncoding::Svgz
        );
    }

    #[test]
    fn test_detect_svg() {
        assert_eq!(
            detect_encoding_from_path("dir/notes.svg").unwrap(),
            InputEncoding::Svg
        );
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(
            detect_encoding_from_path("NOTES.SVGZ").unwrap(),
            InputEncoding::Svgz
        );
    }

    #[test]
    fn test_detect_unsupported_suffix() {
        let result = detect_encoding_from_path("notes.pdf");
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));

        let result = detect_encoding_from_path("notes");
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn test_detect_from_bytes() {
        assert_eq!(
            detect_encoding_from_bytes(&[0x1f, 0x8b, 0x08, 0x00]),
            InputEncoding::Svgz
        );
        assert_eq!(
            detect_encoding_from_bytes(b"<svg id='write-document'/>"),
            InputEncoding::Svg
        );
        assert_eq!(detect_encoding_from_bytes(b""), InputEncoding::Svg);
    }
}
