//! CSS Parser using lightningcss

use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::{CssError, Stylesheet};

/// CSS Parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    ///
    /// Error recovery is off: a rule lightningcss cannot read fails the
    /// whole sheet instead of being dropped from the output.
    pub fn parse<'i>(&self, css: &'i str) -> Result<Stylesheet<'i>, CssError> {
        let options = ParserOptions {
            error_recovery: false,
            ..ParserOptions::default()
        };

        let sheet = StyleSheet::parse(css, options).map_err(|e| CssError::MalformedStyle {
            message: e.to_string(),
        })?;

        tracing::trace!("parsed {} top-level rules", sheet.rules.0.len());
        Ok(Stylesheet::new(sheet))
    }
}
