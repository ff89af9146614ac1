use serde::{Deserialize, Serialize};

use crate::comic::{NOT_AVAILABLE, UNTITLED};
use crate::model::{ComicId, lenient_text};

pub const PLACEHOLDER_COVER: &str = "/static/comic-placeholder.png";

/// A comic the user marked as read, as returned by `GET /fumetti_letti`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: ComicId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub titolo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub autore: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url_copertina: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub anno: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub editore: Option<String>,
}

impl CollectionEntry {
    pub fn title(&self) -> &str {
        self.titolo.as_deref().unwrap_or(UNTITLED)
    }

    pub fn cover_url(&self) -> &str {
        self.url_copertina.as_deref().unwrap_or(PLACEHOLDER_COVER)
    }

    pub fn year(&self) -> &str {
        self.anno.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn publisher(&self) -> &str {
        self.editore.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn is_favorite(&self, favorites: &[ComicId]) -> bool {
        favorites.contains(&self.id)
    }
}

/// Body for `POST /aggiungi_preferito`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteRequest {
    pub comic_id: ComicId,
    pub peso: f64,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_fallbacks() {
        let entry: CollectionEntry = serde_json::from_value(json!({
            "id": 12,
            "titolo": "Zagor",
            "url_copertina": null,
            "anno": ""
        }))
        .unwrap();

        assert_eq!(entry.id, ComicId::new("12"));
        assert_eq!(entry.title(), "Zagor");
        assert_eq!(entry.cover_url(), PLACEHOLDER_COVER);
        assert_eq!(entry.year(), NOT_AVAILABLE);
        assert_eq!(entry.publisher(), NOT_AVAILABLE);
    }

    #[test]
    fn test_favorite_membership_ignores_id_type() {
        let entry: CollectionEntry = serde_json::from_value(json!({
            "id": "4050-18166",
            "titolo": "Saga",
            "anno": 2012
        }))
        .unwrap();
        let favorites: Vec<ComicId> = serde_json::from_value(json!([7, "4050-18166"])).unwrap();

        assert!(entry.is_favorite(&favorites));
        assert!(!entry.is_favorite(&favorites[..1]));
        assert_eq!(entry.year(), "2012");
    }

    #[test]
    fn test_favorite_request_body() {
        let body = serde_json::to_value(FavoriteRequest {
            comic_id: ComicId::new("12"),
            peso: 3.5,
        })
        .unwrap();

        assert_eq!(body, json!({ "comic_id": "12", "peso": 3.5 }));
    }
}
