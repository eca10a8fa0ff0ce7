//! HTML Serialization (outerHTML)
//!
//! Writes a parsed tree back out as HTML, optionally swapping in new
//! `<style>` bodies.
//!
//! Key features:
//! - Proper HTML escaping
//! - Void element handling
//! - Raw text elements written verbatim

use std::collections::HashMap;

use scraper::{ElementRef, Node};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript",
];

/// HTML serializer
#[derive(Debug, Default)]
pub struct HtmlSerializer<'r> {
    /// Replacement bodies keyed by `<style>` ordinal in tree order
    style_replacements: HashMap<usize, &'r str>,
}

impl<'r> HtmlSerializer<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the content of the n-th `<style>` element
    pub fn with_style_replacements(mut self, replacements: HashMap<usize, &'r str>) -> Self {
        self.style_replacements = replacements;
        self
    }

    /// Serialize outerHTML of an element (including the element itself)
    ///
    /// Style ordinals count from `root`, so pass the document element to
    /// line them up with [`crate::Document::style_elements`].
    pub fn serialize_outer(&self, root: ElementRef<'_>) -> String {
        let mut output = String::new();
        let mut style_ordinal = 0;
        self.serialize_element(root, &mut output, &mut style_ordinal);
        output
    }

    fn serialize_element(&self, element: ElementRef<'_>, output: &mut String, style_ordinal: &mut usize) {
        let data = element.value();
        let tag = data.name();
        let html = is_html_element(element);

        // Start tag
        output.push('<');
        output.push_str(tag);
        for (name, value) in data.attrs.iter() {
            output.push(' ');
            if let Some(prefix) = &name.prefix {
                output.push_str(prefix);
                output.push(':');
            }
            output.push_str(&name.local);
            if !value.is_empty() {
                output.push_str("=\"");
                escape_attribute(value, output);
                output.push('"');
            }
        }
        output.push('>');

        if html && VOID_ELEMENTS.contains(&tag) {
            return;
        }

        if tag == "style" {
            let ordinal = *style_ordinal;
            *style_ordinal += 1;
            match self.style_replacements.get(&ordinal) {
                Some(css) => write_style_text(css, html, output),
                None if html => serialize_children_raw(element, output),
                None => self.serialize_children(element, output, style_ordinal),
            }
        } else if html && RAW_TEXT_ELEMENTS.contains(&tag) {
            serialize_children_raw(element, output);
        } else {
            self.serialize_children(element, output, style_ordinal);
        }

        // End tag
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    fn serialize_children(&self, element: ElementRef<'_>, output: &mut String, style_ordinal: &mut usize) {
        for child in element.children() {
            match child.value() {
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.serialize_element(child, output, style_ordinal);
                    }
                }
                Node::Text(text) => escape_text(text, output),
                Node::Comment(comment) => {
                    output.push_str("<!--");
                    output.push_str(comment);
                    output.push_str("-->");
                }
                _ => {}
            }
        }
    }
}

/// Whether an element lives in the HTML namespace
///
/// Only there are `style` and `script` bodies raw text; inside `<svg>` or
/// `<math>` they are ordinary text and need escaping.
pub(crate) fn is_html_element(element: ElementRef<'_>) -> bool {
    &*element.value().name.ns == HTML_NAMESPACE
}

/// Write CSS as the body of a `<style>` element
///
/// Raw text bodies end at the first `</style`, so that sequence is broken
/// up with a CSS escape. Other bodies are escaped as text.
pub(crate) fn write_style_text(css: &str, raw_text: bool, output: &mut String) {
    if !raw_text {
        escape_text(css, output);
        return;
    }

    let bytes = css.as_bytes();
    let mut copied = 0;
    let mut pos = 0;
    while let Some(offset) = css[pos..].find("</") {
        let slash = pos + offset + 1;
        let name_end = slash + 1 + "style".len();
        if bytes.get(slash + 1..name_end).is_some_and(|name| name.eq_ignore_ascii_case(b"style")) {
            output.push_str(&css[copied..slash]);
            output.push('\\');
            copied = slash;
        }
        pos = slash;
    }
    output.push_str(&css[copied..]);
}

fn serialize_children_raw(element: ElementRef<'_>, output: &mut String) {
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            output.push_str(text);
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}
