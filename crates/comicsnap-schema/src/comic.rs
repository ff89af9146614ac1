use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{ComicId, value_text};

pub const DEFAULT_COVER: &str = "static/default_cover.jpg";
pub const NOT_AVAILABLE: &str = "N/D";
pub const UNTITLED: &str = "Titolo non disponibile";
pub const DEFAULT_ALT: &str = "Fumetto";
pub const UNSPECIFIED: &str = "Non specificato";

const TITLE: &[&[&str]] = &[&["Nome del volume"], &["name"]];
const COVER: &[&[&str]] = &[&["Immagine di copertina"], &["image", "original_url"]];
const YEAR: &[&[&str]] = &[&["Anno di pubblicazione"], &["start_year"]];
const PUBLISHER: &[&[&str]] = &[&["Editore"], &["publisher", "name"]];
const AUTHOR: &[&[&str]] = &[&["autore"], &["Autore"]];
const GENRE: &[&[&str]] = &[&["genere"]];

/// One item of a `/search` response.
///
/// The backend forwards either its own normalized volume
/// (`"Nome del volume"`, `"Editore"`, ...) or the raw catalog object
/// (`name`, `publisher.name`, ...), so fields are looked up through a chain
/// instead of being mapped onto a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComicSummary(Map<String, Value>);

impl ComicSummary {
    fn field(&self, path: &[&str]) -> Option<String> {
        let (first, rest) = path.split_first()?;
        let mut value = self.0.get(*first)?;
        for key in rest {
            value = value.get(key)?;
        }

        value_text(value)
    }

    fn resolve(&self, chain: &[&[&str]]) -> Option<String> {
        chain.iter().find_map(|path| self.field(path))
    }

    pub fn id(&self, index: usize) -> ComicId {
        self.field(&["id"])
            .map(ComicId::new)
            .unwrap_or_else(|| ComicId::generated(index))
    }

    pub fn title(&self) -> String {
        self.resolve(TITLE).unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn alt_text(&self) -> String {
        self.resolve(TITLE).unwrap_or_else(|| DEFAULT_ALT.to_string())
    }

    pub fn cover_url(&self) -> String {
        // the backend writes "N/A" when the catalog has no image
        self.resolve(COVER)
            .filter(|url| url != "N/A")
            .unwrap_or_else(|| DEFAULT_COVER.to_string())
    }

    pub fn year(&self) -> String {
        self.resolve(YEAR).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn publisher(&self) -> String {
        self.resolve(PUBLISHER)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn author(&self) -> String {
        self.resolve(AUTHOR).unwrap_or_else(|| UNSPECIFIED.to_string())
    }

    pub fn genre(&self) -> String {
        self.resolve(GENRE).unwrap_or_else(|| UNSPECIFIED.to_string())
    }

    pub fn card(&self, index: usize) -> ComicCard {
        ComicCard {
            id: self.id(index),
            title: self.title(),
            alt: self.alt_text(),
            cover_url: self.cover_url(),
            year: self.year(),
            publisher: self.publisher(),
        }
    }

    /// Body for `POST /aggiungi_fumetto_letto`. Author and genre only exist on
    /// the normalized schema and default to "Non specificato". `cover_url` is
    /// the image the card shows, which is the default cover once loading the
    /// resolved one failed.
    pub fn read_request(&self, card: &ComicCard, cover_url: &str, rating: u8) -> ReadComicRequest {
        ReadComicRequest {
            comic_id: card.id.clone(),
            titolo: card.alt.clone(),
            url_copertina: cover_url.to_string(),
            autore: self.author(),
            genere: self.genre(),
            editore: card.publisher.clone(),
            rating,
            anno: card.year.clone(),
        }
    }
}

/// Display fields of a search result, already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicCard {
    pub id: ComicId,
    pub title: String,
    pub alt: String,
    pub cover_url: String,
    pub year: String,
    pub publisher: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadComicRequest {
    pub comic_id: ComicId,
    pub titolo: String,
    pub url_copertina: String,
    pub autore: String,
    pub genere: String,
    pub editore: String,
    pub rating: u8,
    pub anno: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn summary(value: Value) -> ComicSummary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_local_schema_card() {
        let comic = summary(json!({
            "Nome del volume": "Batman",
            "Anno di pubblicazione": 1939,
            "Editore": "DC"
        }));

        let card = comic.card(0);

        assert_eq!(card.title, "Batman");
        assert_eq!(card.alt, "Batman");
        assert_eq!(card.year, "1939");
        assert_eq!(card.publisher, "DC");
        assert_eq!(card.cover_url, DEFAULT_COVER);
        assert_eq!(card.id, ComicId::generated(0));
    }

    #[test]
    fn test_external_schema_card() {
        let comic = summary(json!({
            "id": 796,
            "name": "Watchmen",
            "start_year": "1986",
            "image": { "original_url": "https://example.org/watchmen.jpg" },
            "publisher": { "name": "DC Comics" }
        }));

        let card = comic.card(3);

        assert_eq!(card.id, ComicId::new("796"));
        assert_eq!(card.title, "Watchmen");
        assert_eq!(card.cover_url, "https://example.org/watchmen.jpg");
        assert_eq!(card.year, "1986");
        assert_eq!(card.publisher, "DC Comics");
    }

    #[test]
    fn test_local_schema_wins_over_external() {
        let comic = summary(json!({
            "Nome del volume": "Dylan Dog",
            "name": "Dylan Dog (1986)",
            "Editore": "Bonelli",
            "publisher": { "name": "Sergio Bonelli Editore" }
        }));

        assert_eq!(comic.title(), "Dylan Dog");
        assert_eq!(comic.publisher(), "Bonelli");
    }

    #[test]
    fn test_empty_comic_uses_placeholders() {
        let comic = summary(json!({
            "Nome del volume": "",
            "image": {},
            "publisher": null
        }));

        let card = comic.card(7);

        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.alt, DEFAULT_ALT);
        assert_eq!(card.cover_url, DEFAULT_COVER);
        assert_eq!(card.year, NOT_AVAILABLE);
        assert_eq!(card.publisher, NOT_AVAILABLE);
        assert_eq!(card.id.as_str(), "generated_id_7");
        for text in [&card.title, &card.year, &card.publisher, &card.cover_url] {
            assert!(!text.is_empty());
            assert_ne!(text, "undefined");
        }
    }

    #[test]
    fn test_missing_catalog_image_falls_back() {
        let comic = summary(json!({ "Immagine di copertina": "N/A" }));

        assert_eq!(comic.cover_url(), DEFAULT_COVER);
    }

    #[test]
    fn test_read_request_body() {
        let comic = summary(json!({
            "id": "4050-2127",
            "Nome del volume": "Tex",
            "Immagine di copertina": "https://example.org/tex.jpg",
            "Anno di pubblicazione": "1948",
            "Editore": "Bonelli",
            "Autore": "Gian Luigi Bonelli"
        }));
        let card = comic.card(0);

        let body = serde_json::to_value(comic.read_request(&card, &card.cover_url, 4)).unwrap();

        assert_eq!(
            body,
            json!({
                "comic_id": "4050-2127",
                "titolo": "Tex",
                "url_copertina": "https://example.org/tex.jpg",
                "autore": "Gian Luigi Bonelli",
                "genere": UNSPECIFIED,
                "editore": "Bonelli",
                "rating": 4,
                "anno": "1948"
            })
        );
    }

    #[test]
    fn test_read_request_sends_displayed_cover() {
        let comic = summary(json!({
            "Nome del volume": "Zagor",
            "Immagine di copertina": "https://example.org/broken.jpg"
        }));
        let card = comic.card(3);

        let body = comic.read_request(&card, DEFAULT_COVER, 5);

        assert_eq!(body.url_copertina, DEFAULT_COVER);
        assert_eq!(body.comic_id.as_str(), "generated_id_3");
    }
}
