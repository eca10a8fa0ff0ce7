//! Selector matching against a document

/// Outcome of asking a document whether a selector matches anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// At least one element matches
    Live,
    /// No element matches
    Dead,
    /// The selector could not be evaluated; treat as live
    Unknown,
}

impl Verdict {
    /// Only a proven miss is dead
    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    pub fn from_match(matched: bool) -> Self {
        if matched { Self::Live } else { Self::Dead }
    }
}

/// Something selectors can be evaluated against
pub trait SelectorMatcher {
    /// Check whether any element matches `selector`
    fn verdict(&self, selector: &str) -> Verdict;
}

impl<M: SelectorMatcher + ?Sized> SelectorMatcher for &M {
    fn verdict(&self, selector: &str) -> Verdict {
        (**self).verdict(selector)
    }
}
