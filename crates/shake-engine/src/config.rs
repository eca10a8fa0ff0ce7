//! Shaker configuration

use serde::{Deserialize, Serialize};
use shake_html::OutputMode;

/// Default limit for inline styles (AMP allows 50kb)
pub const DEFAULT_STYLES_LIMIT: usize = 50_000;

/// Shaker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakerConfig {
    /// Shake once extracted styles reach this many bytes
    pub limit_bytes: usize,
    /// Fail on HTML parse errors and malformed styles instead of passing
    /// the affected input through
    pub strict: bool,
    /// How the result is written out
    pub output: OutputMode,
}

impl Default for ShakerConfig {
    fn default() -> Self {
        Self {
            limit_bytes: DEFAULT_STYLES_LIMIT,
            strict: false,
            output: OutputMode::Splice,
        }
    }
}

impl ShakerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit_bytes: usize) -> Self {
        self.limit_bytes = limit_bytes;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}
