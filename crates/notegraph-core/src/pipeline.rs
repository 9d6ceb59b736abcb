//! Ingestion of the summarization/NER service payload.
//!
//! The service groups entities by category (`{"PERSON": [...], "ORG": [...]}`); records inside
//! a group may be full objects or bare strings, and may omit their own label.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Entity, Note, string_list_from_value};
use crate::utils::strip_extension;

pub const UNTITLED_NOTE: &str = "Untitled Note";

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: PipelineData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineData {
    #[serde(default)]
    pub file_info: FileInfo,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub entities: IndexMap<String, Value>,
    #[serde(default)]
    pub abstractive_summary: Option<Value>,
    #[serde(default)]
    pub extractive_summary: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: String,
}

impl PipelineResult {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }

    /// Converts the payload into a note with a freshly generated id.
    pub fn into_note(self) -> Result<Note> {
        let id = uuid::Uuid::new_v4().to_string();
        self.into_note_with_id(id)
    }

    pub fn into_note_with_id(self, id: impl Into<String>) -> Result<Note> {
        if self.is_error() {
            return Err(Error::PipelineFailed {
                status_code: self.status_code,
                message: self.message,
            });
        }

        let data = self.data;
        let mut entities = Vec::new();
        for (category, group) in &data.entities {
            let Value::Array(records) = group else {
                tracing::debug!(category = %category, "skipping non-list entity group");
                continue;
            };
            entities.extend(
                records
                    .iter()
                    .map(|record| Entity::from_value(record, Some(category.as_str()))),
            );
        }

        let title = match strip_extension(&data.file_info.filename) {
            "" => UNTITLED_NOTE.to_string(),
            stem => stem.to_string(),
        };

        Ok(Note {
            id: id.into(),
            title,
            content: data.content,
            abstractive_summary: data
                .abstractive_summary
                .as_ref()
                .and_then(|v| v.get("summary"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            extractive_summary: data
                .extractive_summary
                .as_ref()
                .and_then(|v| v.get("summary"))
                .map(string_list_from_value)
                .unwrap_or_default(),
            entities,
        })
    }
}

/// Parses one pipeline result or a JSON array of them into notes.
pub fn notes_from_pipeline_json(text: &str) -> Result<Vec<Note>> {
    let value: Value = serde_json::from_str(text)?;
    let results: Vec<PipelineResult> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };
    results.into_iter().map(PipelineResult::into_note).collect()
}
