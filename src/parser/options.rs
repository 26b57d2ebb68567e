//! Parsing options and configuration.

/// Identifier carried by the Write document root element.
pub const DEFAULT_ROOT_ID: &str = "write-document";

/// Class marker carried by each page `<svg>` element.
pub const DEFAULT_PAGE_CLASS: &str = "write-page";

/// Class marker carried by bookmark nodes.
pub const DEFAULT_BOOKMARK_CLASS: &str = "bookmark";

/// Options for loading Write documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// `id` of the document root element
    pub root_id: String,

    /// Class token identifying page elements
    pub page_class: String,

    /// Class token identifying bookmark nodes
    pub bookmark_class: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document root identifier.
    pub fn with_root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = id.into();
        self
    }

    /// Set the page class marker.
    pub fn with_page_class(mut self, class: impl Into<String>) -> Self {
        self.page_class = class.into();
        self
    }

    /// Set the bookmark class marker.
    pub fn with_bookmark_class(mut self, class: impl Into<String>) -> Self {
        self.bookmark_class = class.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID.to_string(),
            page_class: DEFAULT_PAGE_CLASS.to_string(),
            bookmark_class: DEFAULT_BOOKMARK_CLASS.to_string(),
        }
    }
}
