use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend ids are strings for catalog volumes and integers for rows created
/// locally, so both forms are accepted and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ComicId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for ComicId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<ComicId> for String {
    fn from(id: ComicId) -> Self {
        id.0
    }
}

impl ComicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Placeholder for search results without an id. Only meaningful while the
    /// result page is on screen.
    pub fn generated(index: usize) -> Self {
        Self(format!("generated_id_{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text of a scalar JSON value, `None` for null, empty strings and non-scalars.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_text))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comic_id_accepts_numbers_and_strings() {
        let ids: Vec<ComicId> = serde_json::from_value(json!(["4050-796", 42])).unwrap();

        assert_eq!(ids, vec![ComicId::new("4050-796"), ComicId::new("42")]);
    }

    #[test]
    fn test_comic_id_serializes_as_string() {
        let value = serde_json::to_value(ComicId::new("42")).unwrap();

        assert_eq!(value, json!("42"));
    }

    #[test]
    fn test_value_text_skips_empty_values() {
        assert_eq!(value_text(&json!("")), None);
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!({"name": "DC"})), None);
        assert_eq!(value_text(&json!(1939)), Some("1939".to_string()));
    }
}
