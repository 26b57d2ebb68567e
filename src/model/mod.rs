//! Document model types for Write document representation.
//!
//! This module defines the intermediate representation that bridges
//! loading/extraction and rendering. Geometry is stored in the source's
//! top-left-origin pixel space; renderers remap it as needed.

mod annotation;
mod document;
mod node;
mod page;

pub use annotation::{Bookmark, Link, LinkTarget, Rect, FRAGMENT_MARKER};
pub use document::{Document, Metadata};
pub use node::{
    well_known_prefix, Attribute, Descendants, Element, Node, QName, SVG_NS, XLINK_NS, XML_NS,
};
pub use page::{parse_dimension, Page};
