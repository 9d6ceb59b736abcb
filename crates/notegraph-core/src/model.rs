use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::utils::truncate_with_ellipsis;

/// A summarized document as handed over by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub abstractive_summary: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub extractive_summary: Vec<String>,
    #[serde(default, deserialize_with = "lenient_entities")]
    pub entities: Vec<Entity>,
}

impl Note {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            abstractive_summary: String::new(),
            extractive_summary: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.abstractive_summary = summary.into();
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.entities.iter().any(|e| e.label == label)
    }

    /// Short preview of the abstractive summary for list panels.
    pub fn summary_snippet(&self, max_chars: usize) -> String {
        truncate_with_ellipsis(&self.abstractive_summary, max_chars).into_owned()
    }
}

/// A named entity extracted from a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Decodes an entity record without ever failing.
    ///
    /// A bare string is taken as the entity text. Missing, empty or wrongly typed fields fall back
    /// to defaults; an empty label falls back to `category` (the key the record was grouped
    /// under, when there is one).
    pub fn from_value(value: &Value, category: Option<&str>) -> Self {
        let category = category.unwrap_or_default();
        match value {
            Value::Object(map) => Self {
                text: map
                    .get("text")
                    .and_then(non_empty_str)
                    .map(str::to_string)
                    .unwrap_or_default(),
                label: map
                    .get("label")
                    .and_then(non_empty_str)
                    .unwrap_or(category)
                    .to_string(),
                start: map.get("start").map(offset_from_value).unwrap_or(0),
                end: map.get("end").map(offset_from_value).unwrap_or(0),
                confidence: map
                    .get("confidence")
                    .and_then(Value::as_f64)
                    .filter(|c| c.is_finite()),
            },
            Value::String(text) => Self::new(text.as_str(), category),
            Value::Number(n) => Self::new(n.to_string(), category),
            Value::Bool(b) => Self::new(b.to_string(), category),
            Value::Null | Value::Array(_) => Self::new("", category),
        }
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn offset_from_value(value: &Value) -> usize {
    if let Some(v) = value.as_u64() {
        return usize::try_from(v).unwrap_or(usize::MAX);
    }
    match value.as_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v as usize,
        _ => 0,
    }
}

fn lenient_entities<'de, D>(deserializer: D) -> std::result::Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| Entity::from_value(item, None))
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(string_list_from_value).unwrap_or_default())
}

/// Accepts either a list of sentences or a single string.
pub(crate) fn string_list_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Parses a JSON array of notes.
pub fn notes_from_json(text: &str) -> Result<Vec<Note>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_from_object_uses_fields() {
        let e = Entity::from_value(
            &json!({"text": "Ada", "label": "PERSON", "start": 3, "end": 6, "confidence": 0.9}),
            Some("people"),
        );
        assert_eq!(e.text, "Ada");
        assert_eq!(e.label, "PERSON");
        assert_eq!((e.start, e.end), (3, 6));
        assert_eq!(e.confidence, Some(0.9));
    }

    #[test]
    fn entity_label_falls_back_to_category() {
        let e = Entity::from_value(&json!({"text": "Paris", "label": ""}), Some("GPE"));
        assert_eq!(e.label, "GPE");
        let e = Entity::from_value(&json!({"text": "Paris"}), Some("GPE"));
        assert_eq!(e.label, "GPE");
        let e = Entity::from_value(&json!("Paris"), Some("GPE"));
        assert_eq!((e.text.as_str(), e.label.as_str()), ("Paris", "GPE"));
    }

    #[test]
    fn malformed_entity_fields_degrade_to_defaults() {
        let e = Entity::from_value(
            &json!({"text": 12, "label": null, "start": -4, "end": "x", "confidence": "high"}),
            None,
        );
        assert_eq!(e, Entity::default());
    }

    #[test]
    fn note_deserialization_tolerates_broken_entities() {
        let notes = notes_from_json(
            r#"[
                {"id": "a", "title": "A", "entities": [{"text": "x", "label": "ORG"}, 5, null]},
                {"id": "b", "title": "B", "entities": "not-a-list"},
                {"id": "c"}
            ]"#,
        )
        .unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].entities.len(), 3);
        assert_eq!(notes[0].entities[0].label, "ORG");
        assert_eq!(notes[0].entities[1].text, "5");
        assert_eq!(notes[0].entities[2], Entity::default());
        assert!(notes[1].entities.is_empty());
        assert_eq!(notes[2].title, "");
    }

    #[test]
    fn extractive_summary_accepts_string_or_list() {
        let notes = notes_from_json(
            r#"[{"id": "a", "extractive_summary": "one"}, {"id": "b", "extractive_summary": ["x", "y"]}]"#,
        )
        .unwrap();
        assert_eq!(notes[0].extractive_summary, vec!["one"]);
        assert_eq!(notes[1].extractive_summary, vec!["x", "y"]);
    }

    #[test]
    fn missing_note_id_is_an_error() {
        assert!(notes_from_json(r#"[{"title": "no id"}]"#).is_err());
    }
}
