use crate::domain::listing::BoundingRect;

/// Host page holding a fixed collection of listing cards.
///
/// Listings are addressed by index; the collection never changes length.
pub trait Page: Send + Sync {
    fn listing_count(&self) -> usize;
    fn viewport_height(&self) -> f64;
    /// Current rect of listing `index`, or `None` if out of range.
    fn bounding_rect(&self, index: usize) -> Option<BoundingRect>;
    /// Absolute detail link of listing `index`.
    fn listing_href(&self, index: usize) -> Option<String>;
    /// Append `fragment` inside a new list container at the end of the card.
    fn append_pet_list(&self, index: usize, fragment: &str);
}
