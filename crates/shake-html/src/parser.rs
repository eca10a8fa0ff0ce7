//! HTML5 parser
//!
//! Uses scraper's html5ever tree builder and keeps the original source next
//! to the tree, so untouched bytes can be written back as they were.

use scraper::Html;

use crate::{Document, HtmlError};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser {
    /// Reject documents html5ever had to recover from
    strict: bool,
}

impl HtmlParser {
    /// Create a lenient parser
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a parser that rejects documents with parse errors
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Whether parse errors are fatal
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse an HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document ({} bytes)", html.len());

        let tree = Html::parse_document(html);

        if !tree.errors.is_empty() {
            tracing::debug!("html5ever reported {} parse errors", tree.errors.len());
            if self.strict {
                return Err(HtmlError::InvalidInput {
                    count: tree.errors.len(),
                    first: tree.errors[0].to_string(),
                });
            }
        }

        Ok(Document::new(html.to_owned(), tree))
    }
}
