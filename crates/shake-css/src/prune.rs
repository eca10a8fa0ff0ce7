//! Prune pass
//!
//! Depth-first walk over a rule list that drops selectors no element
//! matches, then drops whatever is left empty: style rules without
//! selectors or declarations, and block-lists without children. Removal
//! propagates upward through the recursion.

use lightningcss::rules::CssRuleList;
use lightningcss::rules::style::StyleRule;
use shake_html::SelectorMatcher;

use crate::SelectorCache;
use crate::stylesheet::{declaration_count, selector_texts, RuleNode};

/// What a prune pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Individual selectors dropped from style rules
    pub selectors_removed: usize,
    /// Whole rules and block-lists dropped
    pub rules_removed: usize,
}

impl PruneStats {
    pub fn merge(&mut self, other: PruneStats) {
        self.selectors_removed += other.selectors_removed;
        self.rules_removed += other.rules_removed;
    }
}

/// Remove dead rules from a block-list in place
pub fn prune<M: SelectorMatcher + ?Sized>(
    rules: &mut CssRuleList<'_>,
    matcher: &M,
    cache: &mut SelectorCache,
    stats: &mut PruneStats,
) {
    rules.0.retain_mut(|rule| {
        let keep = match RuleNode::classify(rule) {
            RuleNode::BlockList(children) => {
                prune(children, matcher, cache, stats);
                !children.0.is_empty()
            }
            RuleNode::Declarations(style) => prune_style_rule(style, matcher, cache, stats),
            RuleNode::Opaque => true,
        };

        if !keep {
            stats.rules_removed += 1;
        }
        keep
    });
}

/// Drop dead selectors; returns whether the rule survives
fn prune_style_rule<M: SelectorMatcher + ?Sized>(
    rule: &mut StyleRule<'_>,
    matcher: &M,
    cache: &mut SelectorCache,
    stats: &mut PruneStats,
) -> bool {
    // Nested rules ride along with their parent
    if declaration_count(rule) == 0 && rule.rules.0.is_empty() {
        return false;
    }

    let dead: Vec<usize> = selector_texts(rule)
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let text = text.as_deref()?;
            cache.resolve(matcher, text).is_dead().then_some(index)
        })
        .collect();

    for &index in dead.iter().rev() {
        rule.selectors.0.remove(index);
    }
    stats.selectors_removed += dead.len();

    !rule.selectors.0.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CssParser;
    use shake_html::Verdict;

    /// Matcher over a fixed set of live normalized selectors
    struct Live(&'static [&'static str]);

    impl SelectorMatcher for Live {
        fn verdict(&self, selector: &str) -> Verdict {
            if selector.is_empty() {
                return Verdict::Unknown;
            }
            Verdict::from_match(self.0.contains(&selector))
        }
    }

    fn shake(css: &str, live: &'static [&'static str]) -> (String, PruneStats) {
        let mut stylesheet = CssParser::new().parse(css).unwrap();
        let mut cache = SelectorCache::new();
        let mut stats = PruneStats::default();
        prune(stylesheet.rules_mut(), &Live(live), &mut cache, &mut stats);
        (stylesheet.render().unwrap(), stats)
    }

    #[test]
    fn test_removes_dead_rule() {
        let (css, stats) = shake(".used{color:red}.unused{color:blue}", &[".used"]);
        assert_eq!(css, ".used{color:red}");
        assert_eq!(stats.rules_removed, 1);
    }

    #[test]
    fn test_removes_only_dead_selectors() {
        let (css, stats) = shake("h1,.gone,h2{margin:0}", &["h1", "h2"]);
        assert_eq!(css, "h1,h2{margin:0}");
        assert_eq!(stats, PruneStats { selectors_removed: 1, rules_removed: 0 });
    }

    #[test]
    fn test_keeps_original_selector_text() {
        let (css, _) = shake(".card.card:hover{color:red}", &[".card"]);
        assert_eq!(css, ".card.card:hover{color:red}");
    }

    #[test]
    fn test_empty_rule_removed_even_if_live() {
        let (css, stats) = shake(".used{}.used{color:red}", &[".used"]);
        assert_eq!(css, ".used{color:red}");
        assert_eq!(stats.rules_removed, 1);
    }

    #[test]
    fn test_empty_media_collapses() {
        let (css, stats) = shake("@media print{.gone{color:red}}.used{color:red}", &[".used"]);
        assert_eq!(css, ".used{color:red}");
        assert_eq!(stats.rules_removed, 2);
    }

    #[test]
    fn test_media_keeps_live_children() {
        let (css, _) = shake("@media print{.gone{color:red}.used{color:red}}", &[".used"]);
        assert_eq!(css, "@media print{.used{color:red}}");
    }

    #[test]
    fn test_nested_block_lists_cascade() {
        let css = "@supports (display:grid){@media print{.gone{color:red}}}.used{color:red}";
        let (css, stats) = shake(css, &[".used"]);
        assert_eq!(css, ".used{color:red}");
        assert_eq!(stats.rules_removed, 3);
    }

    #[test]
    fn test_opaque_rules_kept() {
        let (css, _) = shake("@keyframes spin{from{opacity:0}to{opacity:1}}.gone{color:red}", &[]);
        assert!(css.starts_with("@keyframes spin"), "got {css}");
        assert!(!css.contains(".gone"));
    }

    #[test]
    fn test_unknown_verdict_keeps_selector() {
        let (css, stats) = shake(":root{color:red}", &[]);
        assert_eq!(css, ":root{color:red}");
        assert_eq!(stats, PruneStats::default());
    }

    #[test]
    fn test_cache_shared_between_rules() {
        let mut stylesheet = CssParser::new().parse(".gone{color:red}.gone:hover{color:blue}").unwrap();
        let mut cache = SelectorCache::new();
        let mut stats = PruneStats::default();
        prune(stylesheet.rules_mut(), &Live(&[]), &mut cache, &mut stats);

        assert!(stylesheet.is_empty());
        assert_eq!(cache.stats().queries, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_merge_stats() {
        let mut total = PruneStats { selectors_removed: 1, rules_removed: 2 };
        total.merge(PruneStats { selectors_removed: 3, rules_removed: 4 });
        assert_eq!(total, PruneStats { selectors_removed: 4, rules_removed: 6 });
    }
}
