//! Shaker - drives extraction, gating and pruning for one document

use shake_css::{prune, CssError, CssParser, PruneStats, SelectorCache};
use shake_html::{Document, HtmlParser, StyleSlot};

use crate::{ShakeError, ShakeReport, ShakerConfig};

/// Something that can tree-shake the styles of a page
pub trait Shaking {
    /// Whether the extracted styles reach the configured limit
    fn should_shake(&mut self) -> bool;

    /// Shake the styles and return the resulting HTML
    ///
    /// Without `force` the styles are only shaken when `should_shake` says
    /// so; otherwise the page comes back unchanged.
    fn shake_it(&mut self, force: bool) -> Result<String, ShakeError>;

    /// Styles eligible for shaking, extracted once
    fn extract_styles(&mut self) -> &[StyleSlot];
}

/// CSS tree shaker over a parsed document
#[derive(Debug)]
pub struct CssTreeShaker {
    document: Document,
    config: ShakerConfig,
    styles: Option<Vec<StyleSlot>>,
    cache: SelectorCache,
    report: ShakeReport,
}

impl CssTreeShaker {
    /// Create a shaker with the default configuration
    pub fn new(document: Document) -> Self {
        Self::with_config(document, ShakerConfig::default())
    }

    pub fn with_config(document: Document, config: ShakerConfig) -> Self {
        Self {
            document,
            config,
            styles: None,
            cache: SelectorCache::new(),
            report: ShakeReport::default(),
        }
    }

    /// Parse `html` and create a shaker for it
    ///
    /// Strict configurations reject documents with HTML parse errors.
    pub fn from_html(html: &str, config: ShakerConfig) -> Result<Self, ShakeError> {
        let parser = if config.strict { HtmlParser::strict() } else { HtmlParser::new() };
        let document = parser.parse(html)?;
        Ok(Self::with_config(document, config))
    }

    /// Override the byte limit
    pub fn with_limit(mut self, limit_bytes: usize) -> Self {
        self.config.limit_bytes = limit_bytes;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &ShakerConfig {
        &self.config
    }

    /// Report of the last `shake_it` call
    pub fn report(&self) -> &ShakeReport {
        &self.report
    }

    /// Total size of the extracted styles in bytes
    pub fn styles_size(&mut self) -> usize {
        self.extract_styles().iter().map(StyleSlot::len).sum()
    }

    /// Whether the extracted styles reach the limit
    pub fn exceeds_limit(&mut self) -> bool {
        let size = self.styles_size();
        let exceeds = size >= self.config.limit_bytes;
        tracing::debug!(size, limit = self.config.limit_bytes, exceeds, "style size checked");
        exceeds
    }

    /// The page with the styles' current content
    pub fn export_html(&self) -> String {
        let styles = self.styles.as_deref().unwrap_or_default();
        self.document.export(styles, self.config.output)
    }

    fn shake_styles(&mut self) -> Result<(), ShakeError> {
        let Self { document, config, styles, cache, report } = self;
        let styles = styles.get_or_insert_with(|| document.style_slots());

        cache.clear();
        let mut totals = PruneStats::default();

        for slot in styles.iter_mut() {
            match shake_slot(slot, document, cache) {
                Ok(stats) => {
                    tracing::debug!(
                        slot = slot.ordinal(),
                        selectors_removed = stats.selectors_removed,
                        rules_removed = stats.rules_removed,
                        "style shaken"
                    );
                    totals.merge(stats);
                }
                Err(source) if config.strict => {
                    return Err(ShakeError::MalformedStyle { slot: slot.ordinal(), source });
                }
                Err(err) => {
                    tracing::warn!(slot = slot.ordinal(), error = %err, "leaving style unshaken");
                    report.slots_skipped += 1;
                }
            }
        }

        let cache_stats = cache.stats();
        report.shaken = true;
        report.bytes_after = styles.iter().map(StyleSlot::len).sum();
        report.selectors_removed = totals.selectors_removed;
        report.rules_removed = totals.rules_removed;
        report.queries = cache_stats.queries;
        report.cache_hits = cache_stats.hits;
        Ok(())
    }
}

impl Shaking for CssTreeShaker {
    fn should_shake(&mut self) -> bool {
        self.exceeds_limit()
    }

    fn shake_it(&mut self, force: bool) -> Result<String, ShakeError> {
        let size = self.styles_size();
        self.report = ShakeReport {
            slots: self.extract_styles().len(),
            bytes_before: size,
            bytes_after: size,
            ..ShakeReport::default()
        };

        if self.report.slots == 0 {
            tracing::debug!("no styles to shake");
            return Ok(self.export_html());
        }
        if !force && !self.should_shake() {
            tracing::debug!("styles under the limit, leaving them alone");
            return Ok(self.export_html());
        }

        self.shake_styles()?;
        tracing::info!("{}", self.report);
        Ok(self.export_html())
    }

    fn extract_styles(&mut self) -> &[StyleSlot] {
        let Self { document, styles, .. } = self;
        styles.get_or_insert_with(|| {
            let slots = document.style_slots();
            tracing::debug!("extracted {} style slots", slots.len());
            slots
        })
    }
}

/// Parse, prune and re-render one style slot
fn shake_slot(
    slot: &mut StyleSlot,
    document: &Document,
    cache: &mut SelectorCache,
) -> Result<PruneStats, CssError> {
    let mut stats = PruneStats::default();
    let css = {
        let mut stylesheet = CssParser::new().parse(slot.text())?;
        prune(stylesheet.rules_mut(), document, cache, &mut stats);
        stylesheet.render()?
    };
    slot.set_text(css);
    Ok(stats)
}
