//! Coordinate remapping from page-local SVG space to output space.
//!
//! Source geometry has its origin at the top-left corner with Y increasing
//! downward. HTML shares that convention, so it is an identity mapping. PDF
//! page space has its origin at the bottom-left with Y increasing upward, so
//! every Y is flipped about the page height.
//!
//! These are pure functions with no side effects.

use crate::convert::OutputFormat;
use crate::model::{Bookmark, Rect};

/// A rectangle in output space, by edges.
///
/// For PDF output `top > bottom`; for HTML output `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

/// A position in output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    /// Horizontal position
    pub left: f64,
    /// Vertical position
    pub top: f64,
}

/// Flip a point about the page height: `(x, y) -> (x, H - y)`.
pub fn flip_point(page_height: f64, x: f64, y: f64) -> (f64, f64) {
    (x, page_height - y)
}

/// Remap a page-local rectangle for the target format.
///
/// PDF: `(x, y, w, h) -> (left = x, top = H - y, right = x + w, bottom = H - (y + h))`.
pub fn remap_rect(format: OutputFormat, page_height: f64, rect: &Rect) -> MappedRect {
    match format {
        OutputFormat::Html => MappedRect {
            left: rect.x,
            top: rect.y,
            right: rect.right(),
            bottom: rect.bottom(),
        },
        OutputFormat::Pdf => {
            let (left, top) = flip_point(page_height, rect.x, rect.y);
            let (right, bottom) = flip_point(page_height, rect.right(), rect.bottom());
            MappedRect {
                left,
                top,
                right,
                bottom,
            }
        }
    }
}

/// Remap a bookmark position for the target format.
///
/// For PDF the vertical position is `H - raw_x` and the horizontal position
/// is `raw_y`: the first translate component drives `top` and the second
/// drives `left`, the reverse of the usual `translate(x,y)` reading.
pub fn remap_bookmark(format: OutputFormat, page_height: f64, bookmark: &Bookmark) -> MappedPoint {
    match format {
        OutputFormat::Html => MappedPoint {
            left: bookmark.raw_x,
            top: bookmark.raw_y,
        },
        OutputFormat::Pdf => MappedPoint {
            left: bookmark.raw_y,
            top: page_height - bookmark.raw_x,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_point() {
        assert_eq!(flip_point(800.0, 10.0, 20.0), (10.0, 780.0));
        assert_eq!(flip_point(800.0, 0.0, 800.0), (0.0, 0.0));
    }

    #[test]
    fn test_pdf_rect_flip() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let mapped = remap_rect(OutputFormat::Pdf, 800.0, &rect);
        assert_eq!(
            mapped,
            MappedRect {
                left: 10.0,
                top: 780.0,
                right: 110.0,
                bottom: 730.0
            }
        );
    }

    #[test]
    fn test_html_rect_identity() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let mapped = remap_rect(OutputFormat::Html, 800.0, &rect);
        assert_eq!(
            mapped,
            MappedRect {
                left: 10.0,
                top: 20.0,
                right: 110.0,
                bottom: 70.0
            }
        );
    }

    #[test]
    fn test_pdf_bookmark_uses_first_component_for_top() {
        // translate(15.5,42.0) on a 600px page: the first component is
        // flipped into `top`, the second becomes `left`.
        let bookmark = Bookmark::new("intro", 15.5, 42.0);
        let mapped = remap_bookmark(OutputFormat::Pdf, 600.0, &bookmark);
        assert_eq!(mapped.top, 584.5);
        assert_eq!(mapped.left, 42.0);
    }

    #[test]
    fn test_html_bookmark_identity() {
        let bookmark = Bookmark::new("intro", 15.5, 42.0);
        let mapped = remap_bookmark(OutputFormat::Html, 600.0, &bookmark);
        assert_eq!(mapped, MappedPoint { left: 15.5, top: 42.0 });
    }

    #[test]
    fn test_remap_is_deterministic() {
        let rect = Rect::new(1.25, 2.5, 3.0, 4.0);
        let a = remap_rect(OutputFormat::Pdf, 100.0, &rect);
        let b = remap_rect(OutputFormat::Pdf, 100.0, &rect);
        assert_eq!(a, b);
    }
}
