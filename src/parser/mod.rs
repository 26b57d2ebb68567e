//! Write document loading and annotation extraction.

mod annotations;
mod options;
mod write_parser;

pub use annotations::AnnotationExtractor;
pub use options::{ParseOptions, DEFAULT_BOOKMARK_CLASS, DEFAULT_PAGE_CLASS, DEFAULT_ROOT_ID};
pub use write_parser::WriteParser;
