//! Shake Engine
//!
//! Tree shakes the inline `<style>` blocks of a page so they fit a byte
//! budget, such as the 50kb AMP allows.
//!
//! # Example
//! ```rust,ignore
//! use shake_engine::{CssTreeShaker, ShakerConfig, Shaking};
//!
//! let mut shaker = CssTreeShaker::from_html(&html, ShakerConfig::default())?;
//! let output = shaker.shake_it(false)?;
//! println!("{}", shaker.report());
//! ```

mod config;
mod report;
mod shaker;

pub use config::{ShakerConfig, DEFAULT_STYLES_LIMIT};
pub use report::ShakeReport;
pub use shaker::{CssTreeShaker, Shaking};
pub use shake_html::OutputMode;

// Re-export sub-crates for advanced usage
pub use shake_html as html;
pub use shake_css as css;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shake the styles of `html` with `config`
///
/// Styles are only shaken once they reach `config.limit_bytes`.
pub fn shake(html: &str, config: ShakerConfig) -> Result<String, ShakeError> {
    CssTreeShaker::from_html(html, config)?.shake_it(false)
}

/// Shaking error
#[derive(Debug, thiserror::Error)]
pub enum ShakeError {
    #[error(transparent)]
    Html(#[from] shake_html::HtmlError),

    #[error("style {slot} could not be shaken")]
    MalformedStyle {
        slot: usize,
        #[source]
        source: shake_css::CssError,
    },
}
