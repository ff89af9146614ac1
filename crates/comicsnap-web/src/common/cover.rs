use std::cell::Cell;
use std::rc::Rc;

use comicsnap_schema::collection::PLACEHOLDER_COVER;
use comicsnap_schema::comic::DEFAULT_COVER;
use comicsnap_schema::{CollectionEntry, ComicCard, ComicId, Recommendation};
use dominator::{clone, html, with_node, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use web_sys::HtmlImageElement;

use crate::common::events;

#[derive(Debug, Clone)]
pub struct Cover {
    pub id: ComicId,
    pub title: String,
    pub alt: String,
    pub cover_url: String,
    pub fallback_url: &'static str,
    pub year: String,
    pub publisher: String,
    pub detail: Option<String>,
    pub is_favorite: Mutable<bool>,
    fallback_shown: Rc<Cell<bool>>,
}

impl Cover {
    pub fn from_card(card: &ComicCard) -> Self {
        Self {
            id: card.id.clone(),
            title: card.title.clone(),
            alt: card.alt.clone(),
            cover_url: card.cover_url.clone(),
            fallback_url: DEFAULT_COVER,
            year: card.year.clone(),
            publisher: card.publisher.clone(),
            detail: None,
            is_favorite: Mutable::new(false),
            fallback_shown: Rc::new(Cell::new(false)),
        }
    }

    pub fn from_entry(entry: &CollectionEntry, is_favorite: bool) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title().to_string(),
            alt: entry.title().to_string(),
            cover_url: entry.cover_url().to_string(),
            fallback_url: PLACEHOLDER_COVER,
            year: entry.year().to_string(),
            publisher: entry.publisher().to_string(),
            detail: None,
            is_favorite: Mutable::new(is_favorite),
            fallback_shown: Rc::new(Cell::new(false)),
        }
    }

    pub fn from_recommendation(recommendation: &Recommendation) -> Self {
        Self {
            id: recommendation.id.clone(),
            title: recommendation.title().to_string(),
            alt: recommendation.title().to_string(),
            cover_url: recommendation.cover_url().to_string(),
            fallback_url: PLACEHOLDER_COVER,
            year: recommendation.year().to_string(),
            publisher: recommendation.publisher().to_string(),
            detail: Some(format!("Punteggio: {}", recommendation.score)),
            is_favorite: Mutable::new(false),
            fallback_shown: Rc::new(Cell::new(false)),
        }
    }

    /// Idempotent: the badge is driven by this flag, so marking twice still
    /// shows a single star.
    pub fn mark_favorite(&self) {
        self.is_favorite.set_neq(true);
    }

    /// The image the card currently shows.
    pub fn displayed_url(&self) -> &str {
        if self.fallback_shown.get() {
            self.fallback_url
        } else {
            &self.cover_url
        }
    }

    /// Switches to the fallback image. Returns false if it was already shown.
    fn show_fallback(fallback_shown: &Cell<bool>) -> bool {
        !fallback_shown.replace(true)
    }

    pub fn render(&self) -> Dom {
        self.render_with(None)
    }

    pub fn render_clickable<F>(&self, on_click: F) -> Dom
    where
        F: Fn() + 'static,
    {
        self.render_with(Some(Box::new(on_click)))
    }

    fn render_with(&self, on_click: Option<Box<dyn Fn()>>) -> Dom {
        let fallback_shown = self.fallback_shown.clone();
        let fallback_url = self.fallback_url;
        let clickable = on_click.is_some();

        html!("div", {
            .class("raccolta__card")
            .children(&mut [
                html!("div", {
                    .class("card-container")
                    .children(&mut [
                        html!("img" => HtmlImageElement, {
                            .class("comic-image")
                            .class_signal("clickable", self.is_favorite.signal().map(move |favorite| clickable && !favorite))
                            .attr("src", self.displayed_url())
                            .attr("alt", &self.alt)
                            .attr("data-comic-id", self.id.as_str())
                            .attr("loading", "lazy")
                            .with_node!(img => {
                                .event(clone!(fallback_shown => move |_: events::Error| {
                                    if Self::show_fallback(&fallback_shown) {
                                        img.set_src(fallback_url);
                                    }
                                }))
                            })
                            .event(move |_: events::Click| {
                                if let Some(on_click) = on_click.as_ref() {
                                    on_click();
                                }
                            })
                        }),
                    ])
                    .child_signal(self.is_favorite.signal().map(|favorite| {
                        favorite.then(|| html!("span", {
                            .class("star-indicator")
                            .text("★")
                        }))
                    }))
                }),
                html!("h4", {
                    .text(&self.title)
                }),
                html!("p", {
                    .text(&format!("Anno: {}", self.year))
                }),
                html!("p", {
                    .text(&format!("Editore: {}", self.publisher))
                }),
            ])
            .apply_if(self.detail.is_some(), |dom| {
                dom.child(html!("p", {
                    .class("detail")
                    .text(self.detail.as_deref().unwrap_or_default())
                }))
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn entry() -> CollectionEntry {
        serde_json::from_value(json!({
            "id": 3,
            "titolo": "Corto Maltese",
            "url_copertina": "/static/corto.jpg",
            "anno": "1967",
            "editore": "Rizzoli"
        }))
        .unwrap()
    }

    #[test]
    fn test_mark_favorite_is_idempotent() {
        let cover = Cover::from_entry(&entry(), false);

        cover.mark_favorite();
        cover.mark_favorite();

        assert!(cover.is_favorite.get());
    }

    #[test]
    fn test_collection_cover_fields() {
        let cover = Cover::from_entry(&entry(), true);

        assert_eq!(cover.id, ComicId::new("3"));
        assert_eq!(cover.alt, "Corto Maltese");
        assert_eq!(cover.fallback_url, PLACEHOLDER_COVER);
        assert_eq!(cover.detail, None);
        assert!(cover.is_favorite.get());
    }

    #[test]
    fn test_displayed_url_follows_fallback() {
        let card = ComicCard {
            id: ComicId::new("4050-7"),
            title: "Zagor".to_string(),
            alt: "Zagor".to_string(),
            cover_url: "https://example.org/broken.jpg".to_string(),
            year: "1961".to_string(),
            publisher: "Bonelli".to_string(),
        };
        let cover = Cover::from_card(&card);
        assert_eq!(cover.displayed_url(), "https://example.org/broken.jpg");

        assert!(Cover::show_fallback(&cover.fallback_shown));
        assert!(!Cover::show_fallback(&cover.fallback_shown));
        assert_eq!(cover.displayed_url(), DEFAULT_COVER);
    }
}
