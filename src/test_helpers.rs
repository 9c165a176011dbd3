use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::listing::BoundingRect;
use crate::error::{OrpetsError, Result};
use crate::ports::page::Page;
use crate::ports::pet_source::PetTextSource;

type ScrapeFn = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Scripted [`PetTextSource`] that records every URL it is asked for.
pub struct MockPetSource {
    scrape_fn: ScrapeFn,
    urls: Mutex<Vec<String>>,
}

impl MockPetSource {
    pub fn new(f: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            scrape_fn: Box::new(f),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing_with(f: impl Fn(&str) -> OrpetsError + Send + Sync + 'static) -> Self {
        Self::new(move |url| Err(f(url)))
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PetTextSource for MockPetSource {
    async fn scrape_pet_text(&self, url: &str) -> Result<String> {
        self.urls.lock().unwrap().push(url.to_string());
        (self.scrape_fn)(url)
    }
}

struct MockCard {
    rect: BoundingRect,
    href: Option<String>,
    appended: Vec<String>,
}

/// In-memory [`Page`] with fixed rects; no scrolling.
pub struct MockPage {
    cards: Mutex<Vec<MockCard>>,
    viewport_height: f64,
}

impl MockPage {
    /// `count` cards of `height` stacked from the top of the viewport, each
    /// linking to `https://example.com/hotel/{index}`.
    pub fn stacked(count: usize, height: f64, viewport_height: f64) -> Self {
        let cards = (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let top = i as f64 * height;
                MockCard {
                    rect: BoundingRect::new(top, top + height),
                    href: Some(format!("https://example.com/hotel/{i}")),
                    appended: Vec::new(),
                }
            })
            .collect();
        Self {
            cards: Mutex::new(cards),
            viewport_height,
        }
    }

    pub fn set_href(&self, index: usize, href: &str) {
        self.cards.lock().unwrap()[index].href = Some(href.to_string());
    }

    pub fn clear_href(&self, index: usize) {
        self.cards.lock().unwrap()[index].href = None;
    }

    pub fn appended(&self, index: usize) -> Vec<String> {
        self.cards.lock().unwrap()[index].appended.clone()
    }
}

impl Page for MockPage {
    fn listing_count(&self) -> usize {
        self.cards.lock().unwrap().len()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_rect(&self, index: usize) -> Option<BoundingRect> {
        self.cards.lock().unwrap().get(index).map(|c| c.rect)
    }

    fn listing_href(&self, index: usize) -> Option<String> {
        self.cards.lock().unwrap().get(index)?.href.clone()
    }

    fn append_pet_list(&self, index: usize, fragment: &str) {
        if let Some(card) = self.cards.lock().unwrap().get_mut(index) {
            card.appended.push(fragment.to_string());
        }
    }
}
