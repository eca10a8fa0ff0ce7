//! Rule tree
//!
//! A parsed stylesheet and the view the prune pass takes of its rules.

use lightningcss::rules::style::StyleRule;
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::stylesheet::{PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::CssError;

/// Parsed stylesheet of one `<style>` element
pub struct Stylesheet<'i> {
    sheet: StyleSheet<'i>,
}

impl<'i> Stylesheet<'i> {
    pub(crate) fn new(sheet: StyleSheet<'i>) -> Self {
        Self { sheet }
    }

    /// Top-level rules (the root block-list)
    pub fn rules(&self) -> &CssRuleList<'i> {
        &self.sheet.rules
    }

    pub fn rules_mut(&mut self) -> &mut CssRuleList<'i> {
        &mut self.sheet.rules
    }

    /// Number of top-level rules
    pub fn len(&self) -> usize {
        self.sheet.rules.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.rules.0.is_empty()
    }

    /// Render to compact CSS
    pub fn render(&self) -> Result<String, CssError> {
        let options = PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        };

        self.sheet
            .to_css(options)
            .map(|result| result.code)
            .map_err(|e| CssError::Render { message: e.to_string() })
    }
}

impl std::fmt::Debug for Stylesheet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stylesheet").field("rules", &self.len()).finish()
    }
}

/// What a single rule is, as far as shaking is concerned
pub enum RuleNode<'a, 'i> {
    /// Contains further rules (`@media`, `@supports`, ...)
    BlockList(&'a mut CssRuleList<'i>),
    /// Selectors paired with declarations
    Declarations(&'a mut StyleRule<'i>),
    /// Kept as is (`@font-face`, `@keyframes`, `@import`, ...)
    Opaque,
}

impl<'a, 'i> RuleNode<'a, 'i> {
    pub fn classify(rule: &'a mut CssRule<'i>) -> Self {
        match rule {
            CssRule::Style(style) => Self::Declarations(style),
            CssRule::Media(media) => Self::BlockList(&mut media.rules),
            CssRule::Supports(supports) => Self::BlockList(&mut supports.rules),
            CssRule::LayerBlock(layer) => Self::BlockList(&mut layer.rules),
            CssRule::Container(container) => Self::BlockList(&mut container.rules),
            CssRule::Scope(scope) => Self::BlockList(&mut scope.rules),
            CssRule::StartingStyle(starting) => Self::BlockList(&mut starting.rules),
            CssRule::MozDocument(document) => Self::BlockList(&mut document.rules),
            _ => Self::Opaque,
        }
    }
}

/// Number of property declarations in a style rule
pub(crate) fn declaration_count(rule: &StyleRule<'_>) -> usize {
    rule.declarations.declarations.len() + rule.declarations.important_declarations.len()
}

/// Serialized text of each selector, in source order
///
/// A selector that cannot be printed yields `None`.
pub(crate) fn selector_texts(rule: &StyleRule<'_>) -> Vec<Option<String>> {
    rule.selectors
        .0
        .iter()
        .map(|selector| selector.to_css_string(PrinterOptions::default()).ok())
        .collect()
}
