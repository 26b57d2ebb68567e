//! Bookmark and link annotations found on a page.
//!
//! All geometry here is in page-local SVG pixel space: origin at the top-left
//! corner, Y increasing downward.

/// Fragment marker that introduces an internal bookmark reference.
pub const FRAGMENT_MARKER: char = '#';

/// An axis-aligned rectangle given by origin and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A named navigation target on a page.
///
/// The two offsets are kept in the order they appear in the node's
/// `translate(A,B)` transform: `raw_x` is `A`, `raw_y` is `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    /// Stable identifier used as the link target
    pub key: String,

    /// First translate component
    pub raw_x: f64,

    /// Second translate component
    pub raw_y: f64,
}

impl Bookmark {
    /// Create a new bookmark.
    pub fn new(key: impl Into<String>, raw_x: f64, raw_y: f64) -> Self {
        Self {
            key: key.into(),
            raw_x,
            raw_y,
        }
    }
}

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// A bookmark key (fragment marker stripped)
    Internal(&'a str),
    /// Any other reference, passed through verbatim
    External(&'a str),
}

/// A clickable region on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Hyperlink reference as written in the source
    pub href: String,

    /// Whether the link opens in a new browsing context
    pub new_window: bool,

    /// Clickable bounds from the anchor's `<rect>`, if it has one
    pub bounds: Option<Rect>,
}

impl Link {
    /// Create a new link without bounds.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            new_window: false,
            bounds: None,
        }
    }

    /// Builder: set the clickable bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Classify the href. Only a leading fragment marker makes a link internal.
    pub fn target(&self) -> LinkTarget<'_> {
        match self.href.strip_prefix(FRAGMENT_MARKER) {
            Some(key) => LinkTarget::Internal(key),
            None => LinkTarget::External(&self.href),
        }
    }

    /// Check if this link references a bookmark.
    pub fn is_internal(&self) -> bool {
        matches!(self.target(), LinkTarget::Internal(_))
    }
}
