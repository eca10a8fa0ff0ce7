//! Selector normalization
//!
//! Reduces a selector to the part that can be checked against a static
//! document: pseudo-classes and pseudo-elements are cut off at the first
//! `:`, and back-to-back repeats of a class (`.card.card`) collapse to one.
//! `a:hover` and `a` therefore share a verdict.

/// Normalize a selector for matching and caching
pub fn normalize_selector(selector: &str) -> String {
    let structural = match selector.find(':') {
        Some(colon) => &selector[..colon],
        None => selector,
    };
    collapse_repeated_classes(structural).trim().to_string()
}

/// Characters that may follow the `.` of a class fragment
#[inline]
fn is_fragment_char(c: char) -> bool {
    !matches!(c, '.' | ' ' | '{' | ',' | ':' | ';')
}

fn collapse_repeated_classes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dot) = rest.find('.') {
        output.push_str(&rest[..dot]);
        rest = &rest[dot..];

        match repeated_fragment(rest) {
            Some((fragment_len, run_len)) => {
                output.push_str(&rest[..fragment_len]);
                rest = &rest[run_len..];
            }
            None => {
                output.push('.');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Find a class fragment at the start of `s` that is immediately repeated
///
/// Longer fragments are preferred. Returns the fragment length and the
/// length of the whole run of copies.
fn repeated_fragment(s: &str) -> Option<(usize, usize)> {
    let tail = &s[1..];
    let body_len = tail.find(|c| !is_fragment_char(c)).unwrap_or(tail.len());

    let ends: Vec<usize> = tail[..body_len]
        .char_indices()
        .map(|(i, c)| 1 + i + c.len_utf8())
        .collect();

    ends.into_iter().rev().find_map(|end| {
        let fragment = &s[..end];
        let mut run = end;
        while s[run..].starts_with(fragment) {
            run += end;
        }
        (run > end).then_some((end, run))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_pseudo_classes() {
        assert_eq!(normalize_selector("a:hover"), "a");
        assert_eq!(normalize_selector(".btn:focus-visible"), ".btn");
        assert_eq!(normalize_selector("p::first-line"), "p");
        assert_eq!(normalize_selector("ul li:nth-child(2n+1)"), "ul li");
    }

    #[test]
    fn test_pseudo_only_selector_is_empty() {
        assert_eq!(normalize_selector(":root"), "");
        assert_eq!(normalize_selector("::selection"), "");
    }

    #[test]
    fn test_collapses_repeated_class() {
        assert_eq!(normalize_selector(".card.card"), ".card");
        assert_eq!(normalize_selector(".card.card.card"), ".card");
        assert_eq!(normalize_selector(".card.card:hover"), ".card");
        assert_eq!(normalize_selector("div .a.a > .b.b"), "div .a > .b");
    }

    #[test]
    fn test_distinct_classes_untouched() {
        assert_eq!(normalize_selector(".a.b"), ".a.b");
        assert_eq!(normalize_selector(".card .card"), ".card .card");
        assert_eq!(normalize_selector("div.x#main"), "div.x#main");
    }

    #[test]
    fn test_shorter_fragment_repeat() {
        // `.a` is followed by a copy of itself even though the second class is `.ab`
        assert_eq!(normalize_selector(".a.ab"), ".ab");
        assert_eq!(normalize_selector(".ab.a"), ".ab.a");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_selector(".nav > :first-child"), ".nav >");
        assert_eq!(normalize_selector("  .x  "), ".x");
    }

    #[test]
    fn test_non_ascii_class() {
        assert_eq!(normalize_selector(".é.é"), ".é");
        assert_eq!(normalize_selector(".日本.日本:hover"), ".日本");
    }

    #[test]
    fn test_lone_dot() {
        assert_eq!(normalize_selector("."), ".");
        assert_eq!(normalize_selector(".."), "..");
    }
}
