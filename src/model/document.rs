//! Document-level types.

use super::{Bookmark, Page};

/// A parsed Write document.
///
/// Pages are kept in source order and are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of bookmarks across all pages.
    pub fn bookmark_count(&self) -> usize {
        self.pages.iter().map(|p| p.bookmarks.len()).sum()
    }

    /// Total number of links across all pages.
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Find the first bookmark with the given key and the page it lives on.
    pub fn find_bookmark(&self, key: &str) -> Option<(&Page, &Bookmark)> {
        self.pages
            .iter()
            .find_map(|page| page.bookmark(key).map(|b| (page, b)))
    }
}

/// Output document metadata.
///
/// Each field is optional; absent fields produce no output at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Description (HTML `description` meta tag, PDF `Subject`)
    pub description: Option<String>,

    /// Comma-separated keywords (HTML only)
    pub keywords: Option<String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.keywords.is_none()
    }
}
