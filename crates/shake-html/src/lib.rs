//! Shake HTML
//!
//! Document model for CSS tree shaking, built on scraper (html5ever).
//! Finds the `<style>` payloads of a page, answers "does anything match
//! this selector?" and puts the page back together afterwards.

mod document;
mod matcher;
mod parser;
pub mod serializer;
pub mod source;

pub use document::{Document, OutputMode, StyleSlot, BOILERPLATE_ATTR, DOCTYPE};
pub use matcher::{SelectorMatcher, Verdict};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

/// Parse an HTML document leniently
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// HTML document error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("invalid HTML input ({count} parse errors, first: {first})")]
    InvalidInput { count: usize, first: String },
}
