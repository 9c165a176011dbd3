/// Vertical extent of a listing card relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub top: f64,
    pub bottom: f64,
}

impl BoundingRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// One property card of the host results page.
///
/// Cards are read once when the page is loaded and only ever grow by
/// appended pet fragments afterwards.
#[derive(Debug, Clone)]
pub struct ListingCard {
    pub outer_html: String,
    /// Absolute detail link, if the card has one.
    pub href: Option<String>,
    /// Offset of the card's top edge from the top of the document.
    pub top: f64,
    pub height: f64,
    pub appended: Vec<String>,
}

impl ListingCard {
    pub fn rect_at(&self, scroll_y: f64) -> BoundingRect {
        let top = self.top - scroll_y;
        BoundingRect::new(top, top + self.height)
    }

    /// The card's markup with every appended fragment wrapped in a `<ul>`
    /// and placed before the card's closing tag.
    pub fn render(&self) -> String {
        let lists: String = self
            .appended
            .iter()
            .map(|fragment| pet_list_markup(fragment))
            .collect();
        match self.outer_html.rfind("</") {
            Some(pos) => {
                let (head, tail) = self.outer_html.split_at(pos);
                format!("{head}{lists}{tail}")
            }
            None => format!("{}{lists}", self.outer_html),
        }
    }
}

/// The list container a pet fragment is appended as.
pub fn pet_list_markup(fragment: &str) -> String {
    format!("<ul>{fragment}</ul>")
}

/// Detail URL used both for fetching and as the cache key: the link with
/// its query string dropped.
pub fn canonical_detail_url(href: &str) -> &str {
    href.split_once('?').map_or(href, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(html: &str) -> ListingCard {
        ListingCard {
            outer_html: html.into(),
            href: None,
            top: 100.0,
            height: 50.0,
            appended: Vec::new(),
        }
    }

    #[test]
    fn canonical_url_strips_query() {
        assert_eq!(
            canonical_detail_url("https://example.com/hotel/42?ref=abc"),
            "https://example.com/hotel/42"
        );
    }

    #[test]
    fn canonical_url_truncates_at_first_question_mark() {
        assert_eq!(
            canonical_detail_url("https://example.com/h?a=1?b=2"),
            "https://example.com/h"
        );
    }

    #[test]
    fn canonical_url_without_query_is_unchanged() {
        assert_eq!(
            canonical_detail_url("https://example.com/hotel/7"),
            "https://example.com/hotel/7"
        );
    }

    #[test]
    fn rect_follows_scroll_position() {
        let c = card("<div></div>");
        assert_eq!(c.rect_at(0.0), BoundingRect::new(100.0, 150.0));
        assert_eq!(c.rect_at(120.0), BoundingRect::new(-20.0, 30.0));
    }

    #[test]
    fn render_without_fragments_is_original_markup() {
        let c = card(r#"<div class="listing"><a href="/h/1">One</a></div>"#);
        assert_eq!(c.render(), c.outer_html);
    }

    #[test]
    fn render_places_lists_before_closing_tag() {
        let mut c = card(r#"<div class="listing">Hotel</div>"#);
        c.appended.push("<li>Dogs OK</li>".into());
        assert_eq!(
            c.render(),
            r#"<div class="listing">Hotel<ul><li>Dogs OK</li></ul></div>"#
        );
    }
}
