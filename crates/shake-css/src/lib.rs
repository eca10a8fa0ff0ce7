//! Shake CSS
//!
//! Rule tree and dead selector elimination on top of lightningcss.

mod cache;
mod normalize;
mod parser;
mod prune;
mod stylesheet;

pub use cache::{CacheStats, SelectorCache};
pub use normalize::normalize_selector;
pub use parser::CssParser;
pub use prune::{prune, PruneStats};
pub use stylesheet::{RuleNode, Stylesheet};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet<'_>, CssError> {
    CssParser::new().parse(css)
}

/// CSS error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("malformed style: {message}")]
    MalformedStyle { message: String },

    #[error("failed to render stylesheet: {message}")]
    Render { message: String },
}
