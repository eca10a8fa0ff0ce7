//! Comprehensive tests for shake-html
//!
//! Slot extraction, selector verdicts and reassembly on full documents.

use shake_html::{HtmlParser, OutputMode, SelectorMatcher, Verdict, BOILERPLATE_ATTR};

const AMP_PAGE: &str = r#"<!doctype html>
<html ⚡ lang="en">
<head>
  <meta charset="utf-8">
  <title>Shake &amp; bake</title>
  <style amp-boilerplate>body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both}</style>
  <style amp-custom>
    .hero { color: red }
    .missing { color: blue }
  </style>
</head>
<body>
  <header class="hero"><h1 id="title">Hello</h1></header>
  <ul><li><a href="/a">a</a></li><li><a href="/b" data-kind="b">b</a></li></ul>
</body>
</html>
"#;

// ============================================================================
// EXTRACTION
// ============================================================================

#[test]
fn test_amp_page_slots() {
    let doc = HtmlParser::new().parse(AMP_PAGE).unwrap();
    let slots = doc.style_slots();

    assert_eq!(doc.style_elements().count(), 2);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].ordinal(), 1);
    assert!(slots[0].text().contains(".missing"));
    assert!(doc.can_splice());
}

#[test]
fn test_boilerplate_attr_name() {
    assert_eq!(BOILERPLATE_ATTR, "amp-boilerplate");
}

#[test]
fn test_styles_in_body_are_slots() {
    let html = "<html><head><style>.a{color:red}</style></head><body><p>x</p><style>.b{color:red}</style></body></html>";
    let doc = HtmlParser::new().parse(html).unwrap();
    let texts: Vec<String> = doc.style_slots().iter().map(|slot| slot.text().to_string()).collect();

    assert_eq!(texts, vec![".a{color:red}", ".b{color:red}"]);
}

// ============================================================================
// SELECTOR VERDICTS
// ============================================================================

#[test]
fn test_verdicts_on_amp_page() {
    let doc = HtmlParser::new().parse(AMP_PAGE).unwrap();

    assert_eq!(doc.verdict(".hero"), Verdict::Live);
    assert_eq!(doc.verdict("header > h1#title"), Verdict::Live);
    assert_eq!(doc.verdict("ul li + li a[data-kind]"), Verdict::Live);
    assert_eq!(doc.verdict("a[href^=\"/\"]"), Verdict::Live);
    assert_eq!(doc.verdict(".missing"), Verdict::Dead);
    assert_eq!(doc.verdict("header > p"), Verdict::Dead);
}

#[test]
fn test_head_elements_match() {
    let doc = HtmlParser::new().parse(AMP_PAGE).unwrap();
    assert_eq!(doc.verdict("html"), Verdict::Live);
    assert_eq!(doc.verdict("head > title"), Verdict::Live);
    assert_eq!(doc.verdict("style[amp-custom]"), Verdict::Live);
}

// ============================================================================
// REASSEMBLY
// ============================================================================

#[test]
fn test_splice_identity() {
    let doc = HtmlParser::new().parse(AMP_PAGE).unwrap();
    let slots = doc.style_slots();
    assert_eq!(doc.export(&slots, OutputMode::Splice), AMP_PAGE);
}

#[test]
fn test_splice_rewritten_slot() {
    let doc = HtmlParser::new().parse(AMP_PAGE).unwrap();
    let mut slots = doc.style_slots();
    slots[0].set_text(".hero{color:red}".to_string());

    let output = doc.export(&slots, OutputMode::Splice);
    assert!(output.contains("<style amp-custom>.hero{color:red}</style>"));
    assert!(output.contains("<style amp-boilerplate>body{-webkit-animation"));
    assert_eq!(output.len(), AMP_PAGE.len() - slots[0].span().unwrap().len() + 16);
}

#[test]
fn test_serialize_rewritten_slot() {
    let html = r#"<html><head><style>.a { color: red }</style></head><body><p class="a">x</p></body></html>"#;
    let doc = HtmlParser::new().parse(html).unwrap();
    let mut slots = doc.style_slots();
    slots[0].set_text(".a{color:red}".to_string());

    assert_eq!(
        doc.export(&slots, OutputMode::Serialize),
        r#"<!doctype html><html><head><style>.a{color:red}</style></head><body><p class="a">x</p></body></html>"#
    );
}
