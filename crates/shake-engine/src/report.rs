//! Shaking run report

use std::fmt;

use serde::Serialize;

/// What the last `shake_it` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShakeReport {
    /// Whether the prune pass ran at all
    pub shaken: bool,
    /// Style slots found
    pub slots: usize,
    /// Slots passed through because their CSS could not be processed
    pub slots_skipped: usize,
    /// Total style bytes before shaking
    pub bytes_before: usize,
    /// Total style bytes after shaking
    pub bytes_after: usize,
    pub selectors_removed: usize,
    pub rules_removed: usize,
    /// Document queries issued
    pub queries: usize,
    /// Selector lookups answered from the cache
    pub cache_hits: usize,
}

impl ShakeReport {
    pub fn bytes_saved(&self) -> usize {
        self.bytes_before.saturating_sub(self.bytes_after)
    }
}

impl fmt::Display for ShakeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.shaken {
            return write!(f, "{} style slots, {} bytes, not shaken", self.slots, self.bytes_before);
        }
        write!(
            f,
            "{} style slots ({} skipped), {} -> {} bytes, {} selectors and {} rules removed, {} queries, {} cache hits",
            self.slots,
            self.slots_skipped,
            self.bytes_before,
            self.bytes_after,
            self.selectors_removed,
            self.rules_removed,
            self.queries,
            self.cache_hits,
        )
    }
}
