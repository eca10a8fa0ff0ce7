//! Source scanning
//!
//! Byte-level scan of raw HTML that finds where each `<style>` body lives in
//! the original text. The tree builder throws offsets away, so this is what
//! lets untouched bytes go back out unchanged.

use std::borrow::Cow;
use std::ops::Range;

/// Elements whose body is raw text up to the matching end tag
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

/// Find the content range of every `<style>` element, in source order
pub fn locate_style_bodies(html: &str) -> Vec<Range<usize>> {
    let bytes = html.as_bytes();
    let mut bodies = Vec::new();
    let mut pos = 0;

    while let Some(offset) = find_byte(bytes, pos, b'<') {
        let start = offset;
        let rest = &bytes[start..];

        if rest.starts_with(b"<!--") {
            pos = find_seq(bytes, start + 4, b"-->").map_or(bytes.len(), |end| end + 3);
            continue;
        }
        if rest.starts_with(b"<!") || rest.starts_with(b"<?") || rest.starts_with(b"</") {
            // Declarations, processing instructions and stray end tags
            pos = start + 2;
            continue;
        }

        let name_start = start + 1;
        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            pos = name_start;
            continue;
        }

        let name_end = scan_tag_name(bytes, name_start);
        let body_start = find_tag_end(bytes, name_end);
        let name = &bytes[name_start..name_end];

        pos = match RAW_TEXT_ELEMENTS.iter().find(|raw| name.eq_ignore_ascii_case(raw.as_bytes())) {
            Some(raw) => {
                let body_end = find_end_tag(bytes, body_start, raw.as_bytes()).unwrap_or(bytes.len());
                if *raw == "style" {
                    bodies.push(body_start..body_end);
                }
                body_end
            }
            None => body_start,
        };
    }

    bodies
}

/// Apply the HTML input stream newline normalization (CRLF and lone CR to LF)
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

fn find_byte(haystack: &[u8], start: usize, needle: u8) -> Option<usize> {
    haystack.get(start..)?.iter().position(|&b| b == needle).map(|i| start + i)
}

fn find_seq(haystack: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(start..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| start + i)
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

fn skip_whitespace(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && is_space(input[pos]) {
        pos += 1;
    }
    pos
}

/// Tag names run until whitespace, `/` or `>`
fn scan_tag_name(html: &[u8], mut pos: usize) -> usize {
    while pos < html.len() && !is_space(html[pos]) && !matches!(html[pos], b'/' | b'>') {
        pos += 1;
    }
    pos
}

/// Position just past the `>` closing a start tag
fn find_tag_end(html: &[u8], mut pos: usize) -> usize {
    while pos < html.len() {
        match html[pos] {
            b'>' => return pos + 1,
            b'=' => {
                pos = skip_whitespace(html, pos + 1);
                if let Some(&quote @ (b'"' | b'\'')) = html.get(pos) {
                    pos = find_byte(html, pos + 1, quote).map_or(html.len(), |end| end + 1);
                }
            }
            _ => pos += 1,
        }
    }
    html.len()
}

/// Start of the `</name` end tag closing a raw text body
fn find_end_tag(html: &[u8], mut pos: usize, name: &[u8]) -> Option<usize> {
    while let Some(start) = find_seq(html, pos, b"</") {
        let name_start = start + 2;
        let name_end = name_start + name.len();
        let closes = html
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            && html.get(name_end).is_some_and(|&b| is_space(b) || b == b'/' || b == b'>');
        if closes {
            return Some(start);
        }
        pos = name_start;
    }
    None
}
