use serde::{Deserialize, Serialize};

use crate::collection::PLACEHOLDER_COVER;
use crate::comic::{NOT_AVAILABLE, UNTITLED};
use crate::model::{ComicId, lenient_text};

/// One entry of `GET /raccomandazioni`, already sorted by score server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: ComicId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub titolo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub copertina: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub editore: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub anno: Option<String>,
    #[serde(default)]
    pub score: f64,
}

impl Recommendation {
    pub fn title(&self) -> &str {
        self.titolo.as_deref().unwrap_or(UNTITLED)
    }

    pub fn cover_url(&self) -> &str {
        self.copertina.as_deref().unwrap_or(PLACEHOLDER_COVER)
    }

    pub fn year(&self) -> &str {
        self.anno.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn publisher(&self) -> &str {
        self.editore.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}
