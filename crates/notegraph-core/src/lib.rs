#![forbid(unsafe_code)]

//! Note/entity model and entity-relationship graph construction (headless).
//!
//! Design goals:
//! - full rebuild on every note collection change (no incremental patching)
//! - deterministic output for a given input and [`GraphConfig`]
//! - graph construction never fails; malformed entity records degrade to defaults

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod utils;

pub use builder::{GraphBuilder, related_notes};
pub use config::{Config, GraphConfig, InteractionConfig, LayoutConfig, OccurrenceCount};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, NodeKind};
pub use model::{Entity, Note, notes_from_json};
pub use pipeline::{PipelineResult, notes_from_pipeline_json};

#[cfg(test)]
mod tests;
