use scraper::{Html, Selector};

use crate::error::{OrpetsError, Result};
use crate::ports::extractor::FragmentExtractor;

/// Selects the element carrying a given microdata `itemprop` (or any CSS
/// selector) and returns its inner markup verbatim.
pub struct ItempropExtractor {
    selector: Selector,
    source: String,
}

impl ItempropExtractor {
    pub fn new(selector: &str) -> Result<Self> {
        let parsed = Selector::parse(selector).map_err(|e| OrpetsError::Parse {
            reason: format!("invalid fragment selector '{selector}': {e}"),
        })?;
        Ok(Self {
            selector: parsed,
            source: selector.to_string(),
        })
    }

    pub fn pets_allowed() -> Self {
        Self::new(PETS_ALLOWED).expect("static petsAllowed selector is valid")
    }
}

const PETS_ALLOWED: &str = "[itemprop=petsAllowed]";

impl FragmentExtractor for ItempropExtractor {
    fn extract(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .next()
            .map(|el| el.inner_html())
            .ok_or_else(|| OrpetsError::Parse {
                reason: format!("no element matching {} in detail page", self.source),
            })
    }
}

/// Convenience wrapper over the default extractor.
pub fn parse_pet_text(html: &str) -> Result<String> {
    ItempropExtractor::pets_allowed().extract(html)
}
