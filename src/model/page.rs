//! Page-level types.

use super::{Bookmark, Element, Link};

/// A single page of a Write document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in pixels
    pub width: u32,

    /// Page height in pixels
    pub height: u32,

    /// The page's `<svg>` element; its children are the visual content
    pub content: Element,

    /// Bookmarks on the page, in document order
    pub bookmarks: Vec<Bookmark>,

    /// Links on the page, in document order
    pub links: Vec<Link>,
}

impl Page {
    /// Create a new page with the given dimensions and content.
    pub fn new(number: u32, width: u32, height: u32, content: Element) -> Self {
        Self {
            number,
            width,
            height,
            content,
            bookmarks: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Find a bookmark on this page by key.
    pub fn bookmark(&self, key: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.key == key)
    }
}

/// Parse a dimension string such as `"816px"` or `"1056.5"`.
///
/// A trailing unit suffix is stripped and the numeric part is truncated to
/// an integer. Returns `None` for empty, negative or non-numeric values.
pub fn parse_dimension(value: &str) -> Option<u32> {
    let numeric = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .trim_end();
    let parsed: f64 = numeric.parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 || parsed > u32::MAX as f64 {
        return None;
    }
    Some(parsed.trunc() as u32)
}
