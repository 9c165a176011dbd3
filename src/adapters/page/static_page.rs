use std::sync::RwLock;

use scraper::{Html, Selector};
use url::Url;

use crate::config::types::PageLayout;
use crate::domain::listing::{BoundingRect, ListingCard};
use crate::error::{OrpetsError, Result};
use crate::ports::page::Page;

struct PageState {
    cards: Vec<ListingCard>,
    scroll_y: f64,
}

/// Headless results page: listing cards stacked vertically at a fixed
/// height, with a scroll position and a viewport.
pub struct StaticPage {
    state: RwLock<PageState>,
    viewport_height: f64,
}

impl StaticPage {
    pub fn new(cards: Vec<ListingCard>, viewport_height: f64) -> Self {
        Self {
            state: RwLock::new(PageState {
                cards,
                scroll_y: 0.0,
            }),
            viewport_height,
        }
    }

    /// Build the page from results HTML. Listing links are resolved
    /// against `base_url` when one is given.
    pub fn parse(html: &str, base_url: Option<&Url>, layout: &PageLayout) -> Result<Self> {
        let document = Html::parse_document(html);
        let card_selector = parse_selector(&layout.listing_selector)?;
        let link_selector = parse_selector(&layout.link_selector)?;

        let cards: Vec<ListingCard> = document
            .select(&card_selector)
            .enumerate()
            .map(|(i, card)| {
                let href = card
                    .select(&link_selector)
                    .next()
                    .and_then(|link| link.value().attr("href"))
                    .and_then(|raw| resolve_href(base_url, raw));
                #[allow(clippy::cast_precision_loss)]
                let top = layout.header_offset + i as f64 * layout.card_height;
                ListingCard {
                    outer_html: card.html(),
                    href,
                    top,
                    height: layout.card_height,
                    appended: Vec::new(),
                }
            })
            .collect();

        if cards.is_empty() {
            tracing::warn!(
                selector = %layout.listing_selector,
                "No listing cards found in page"
            );
        }

        Ok(Self::new(cards, layout.viewport_height))
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.read().map_or(0.0, |s| s.scroll_y)
    }

    pub fn scroll_to(&self, y: f64) {
        if let Ok(mut state) = self.state.write() {
            state.scroll_y = y.max(0.0);
        }
    }

    pub fn scroll_by(&self, dy: f64) {
        let y = self.scroll_y() + dy;
        self.scroll_to(y);
    }

    pub fn document_height(&self) -> f64 {
        self.state.read().map_or(0.0, |s| {
            s.cards
                .iter()
                .map(|c| c.top + c.height)
                .fold(0.0, f64::max)
        })
    }

    /// Whether the viewport already shows the bottom of the document.
    pub fn at_bottom(&self) -> bool {
        self.scroll_y() + self.viewport_height >= self.document_height()
    }

    pub fn cards(&self) -> Vec<ListingCard> {
        self.state
            .read()
            .map(|s| s.cards.clone())
            .unwrap_or_default()
    }

    /// Cards whose link is not an absolute URL, so cannot be fetched as is.
    pub fn relative_link_count(&self) -> usize {
        self.state.read().map_or(0, |s| {
            s.cards
                .iter()
                .filter_map(|c| c.href.as_deref())
                .filter(|href| Url::parse(href).is_err())
                .count()
        })
    }

    /// Every card's markup with its appended pet lists, one card per line.
    pub fn render(&self) -> String {
        self.cards()
            .iter()
            .map(ListingCard::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| OrpetsError::Parse {
        reason: format!("invalid CSS selector '{selector}': {e}"),
    })
}

fn resolve_href(base_url: Option<&Url>, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match base_url {
        Some(base) => base.join(raw).ok().map(String::from),
        None => Some(raw.to_string()),
    }
}

impl Page for StaticPage {
    fn listing_count(&self) -> usize {
        self.state.read().map_or(0, |s| s.cards.len())
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_rect(&self, index: usize) -> Option<BoundingRect> {
        let state = self.state.read().ok()?;
        state.cards.get(index).map(|c| c.rect_at(state.scroll_y))
    }

    fn listing_href(&self, index: usize) -> Option<String> {
        self.state.read().ok()?.cards.get(index)?.href.clone()
    }

    fn append_pet_list(&self, index: usize, fragment: &str) {
        match self.state.write() {
            Ok(mut state) => {
                if let Some(card) = state.cards.get_mut(index) {
                    card.appended.push(fragment.to_string());
                }
            }
            Err(_) => tracing::error!(index, "Page lock poisoned, dropping pet list"),
        }
    }
}
