//! Selector verdict cache
//!
//! Memoizes "does anything match?" per normalized selector, so each distinct
//! selector costs at most one document query per shaking run.

use std::collections::HashMap;

use shake_html::{SelectorMatcher, Verdict};

use crate::normalize_selector;

/// Selector verdict cache, keyed by normalized selector
#[derive(Debug, Default)]
pub struct SelectorCache {
    verdicts: HashMap<String, Verdict>,
    queries: usize,
    hits: usize,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdict for a selector as written in the stylesheet
    ///
    /// Normalizes the selector, then answers from the cache or asks the
    /// matcher once and remembers the answer.
    pub fn resolve<M: SelectorMatcher + ?Sized>(&mut self, matcher: &M, selector: &str) -> Verdict {
        let key = normalize_selector(selector);

        if let Some(&verdict) = self.verdicts.get(&key) {
            self.hits += 1;
            return verdict;
        }

        self.queries += 1;
        let verdict = matcher.verdict(&key);
        tracing::trace!(selector, normalized = %key, ?verdict, "selector checked");
        self.verdicts.insert(key, verdict);
        verdict
    }

    /// Cached verdict for an already normalized selector
    pub fn get(&self, normalized: &str) -> Option<Verdict> {
        self.verdicts.get(normalized).copied()
    }

    /// Number of distinct selectors seen
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Forget all verdicts and counters
    pub fn clear(&mut self) {
        self.verdicts.clear();
        self.queries = 0;
        self.hits = 0;
    }

    /// Stats
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.verdicts.len(),
            queries: self.queries,
            hits: self.hits,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    /// Document queries issued
    pub queries: usize,
    /// Lookups answered from the cache
    pub hits: usize,
}
