//! Document - High-level document API

use std::collections::HashMap;
use std::ops::Range;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::matcher::{SelectorMatcher, Verdict};
use crate::serializer::{is_html_element, write_style_text, HtmlSerializer};
use crate::source::{locate_style_bodies, normalize_newlines};

/// Attribute marking the AMP boilerplate style, which is never shaken
pub const BOILERPLATE_ATTR: &str = "amp-boilerplate";

/// Prefix reattached to serialized output
pub const DOCTYPE: &str = "<!doctype html>";

/// How a document is turned back into text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Original source with only rewritten style bodies replaced
    #[default]
    Splice,
    /// `<!doctype html>` followed by the re-serialized `<html>` element
    Serialize,
}

/// One `<style>` element whose content may be shaken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSlot {
    /// Position among all `<style>` elements in tree order
    ordinal: usize,
    /// Current CSS text
    text: String,
    /// Content range in the original source, when known
    span: Option<Range<usize>>,
    /// Set once the text has been rewritten
    dirty: bool,
    /// HTML namespace body (raw text) rather than SVG/MathML text
    raw_text: bool,
}

impl StyleSlot {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    /// Size of the current text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the body is raw text, i.e. the element is in the HTML namespace
    pub fn is_raw_text(&self) -> bool {
        self.raw_text
    }

    /// Whether the text was rewritten since extraction
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the CSS text of this slot
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.dirty = true;
    }
}

/// HTML Document
pub struct Document {
    /// Original input
    source: String,
    /// Parsed tree
    tree: Html,
    /// Body range of every `<style>` element in tree order, if the source
    /// scan agrees with the tree
    spans: Option<Vec<Range<usize>>>,
}

impl Document {
    pub(crate) fn new(source: String, tree: Html) -> Self {
        let spans = align_spans(&source, &tree);
        if spans.is_none() {
            tracing::warn!("style elements could not be located in the source; output will be re-serialized");
        }
        Self { source, tree, spans }
    }

    /// Original HTML text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed tree
    pub fn tree(&self) -> &Html {
        &self.tree
    }

    /// Whether every `<style>` body was located in the source
    pub fn can_splice(&self) -> bool {
        self.spans.is_some()
    }

    /// Every `<style>` element in tree order
    pub fn style_elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        style_elements(&self.tree)
    }

    /// Collect the styles that may be shaken
    ///
    /// Boilerplate styles and empty styles are left out.
    pub fn style_slots(&self) -> Vec<StyleSlot> {
        self.style_elements()
            .enumerate()
            .filter(|(_, element)| element.value().attr(BOILERPLATE_ATTR).is_none())
            .filter_map(|(ordinal, element)| {
                let text: String = element.text().collect();
                if text.is_empty() {
                    return None;
                }
                Some(StyleSlot {
                    ordinal,
                    text,
                    span: self.spans.as_ref().and_then(|spans| spans.get(ordinal).cloned()),
                    dirty: false,
                    raw_text: is_html_element(element),
                })
            })
            .collect()
    }

    /// Turn the document back into text with the slots' current content
    ///
    /// Without rewritten slots the source comes back as it was, whatever
    /// the mode.
    pub fn export(&self, slots: &[StyleSlot], mode: OutputMode) -> String {
        if !slots.iter().any(StyleSlot::is_dirty) {
            return self.source.clone();
        }

        match (mode, &self.spans) {
            (OutputMode::Splice, Some(_)) => self.splice(slots),
            _ => self.serialize(slots),
        }
    }

    fn splice(&self, slots: &[StyleSlot]) -> String {
        let mut edits: Vec<(Range<usize>, &StyleSlot)> = slots
            .iter()
            .filter(|slot| slot.dirty)
            .filter_map(|slot| Some((slot.span.clone()?, slot)))
            .collect();
        edits.sort_by_key(|(range, _)| range.start);

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (range, slot) in edits {
            output.push_str(&self.source[cursor..range.start]);
            write_style_text(slot.text(), slot.raw_text, &mut output);
            cursor = range.end;
        }
        output.push_str(&self.source[cursor..]);
        output
    }

    fn serialize(&self, slots: &[StyleSlot]) -> String {
        let replacements: HashMap<usize, &str> = slots
            .iter()
            .filter(|slot| slot.dirty)
            .map(|slot| (slot.ordinal, slot.text()))
            .collect();

        let serializer = HtmlSerializer::new().with_style_replacements(replacements);
        let mut output = String::from(DOCTYPE);
        output.push_str(&serializer.serialize_outer(self.tree.root_element()));
        output
    }
}

impl SelectorMatcher for Document {
    fn verdict(&self, selector: &str) -> Verdict {
        match Selector::parse(selector) {
            Ok(parsed) => Verdict::from_match(self.tree.select(&parsed).next().is_some()),
            Err(err) => {
                tracing::debug!(selector, error = ?err, "selector cannot be evaluated, keeping it");
                Verdict::Unknown
            }
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("source_len", &self.source.len())
            .field("spans", &self.spans)
            .finish_non_exhaustive()
    }
}

fn style_elements(tree: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    tree.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "style")
}

/// Pair each `<style>` element with its body in the source
fn align_spans(source: &str, tree: &Html) -> Option<Vec<Range<usize>>> {
    let spans = locate_style_bodies(source);
    let styles: Vec<ElementRef<'_>> = style_elements(tree).collect();

    if spans.len() != styles.len() {
        tracing::debug!("found {} style bodies in source, {} in tree", spans.len(), styles.len());
        return None;
    }

    for (span, element) in spans.iter().zip(&styles) {
        let text: String = element.text().collect();
        if normalize_newlines(&source[span.clone()]) != text.as_str() {
            tracing::debug!(?span, "style body in source differs from tree text");
            return None;
        }
    }

    Some(spans)
}
