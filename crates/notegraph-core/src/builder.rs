use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{GraphConfig, OccurrenceCount};
use crate::graph::{Edge, Graph, Node};
use crate::labels::is_misc_label;
use crate::model::Note;

/// Turns a note collection into the note/entity-type graph.
///
/// Entity-type nodes come first (in first-seen label order), followed by one node per note in
/// input order. Building never fails and is deterministic for a given input and config.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: GraphConfig,
}

#[derive(Debug, Default)]
struct LabelStats<'a> {
    notes: IndexSet<&'a str>,
    occurrences: usize,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn build(&self, notes: &[Note]) -> Graph {
        let notes = unique_notes(notes);

        let mut labels: IndexMap<&str, LabelStats<'_>> = IndexMap::new();
        for note in &notes {
            for entity in &note.entities {
                if is_misc_label(&entity.label) {
                    continue;
                }
                let stats = labels.entry(entity.label.as_str()).or_default();
                stats.notes.insert(note.id.as_str());
                stats.occurrences += 1;
            }
        }

        let mut graph = Graph::with_capacity(labels.len() + notes.len(), labels.len());
        let mut entity_nodes: FxHashMap<&str, usize> = FxHashMap::default();
        for (label, stats) in &labels {
            if stats.notes.len() < self.config.inclusion_threshold {
                continue;
            }
            let count = match self.config.occurrence_count {
                OccurrenceCount::DistinctNotes => stats.notes.len(),
                OccurrenceCount::RawOccurrences => stats.occurrences,
            };
            let idx = graph.add_node(Node::entity_type(label, count));
            entity_nodes.insert(*label, idx);
        }

        for note in &notes {
            let note_idx = graph.add_node(Node::note(note, self.config.truncate_title_length));
            let mut linked: FxHashSet<&str> = FxHashSet::default();
            for entity in &note.entities {
                let label = entity.label.as_str();
                if is_misc_label(label) {
                    continue;
                }
                let Some(&entity_idx) = entity_nodes.get(label) else {
                    continue;
                };
                if linked.insert(label) {
                    graph.add_edge(Edge::new(note_idx, entity_idx));
                }
            }
        }

        tracing::debug!(
            notes = notes.len(),
            labels = labels.len(),
            nodes = graph.len(),
            edges = graph.edges().len(),
            "built entity graph"
        );
        graph
    }
}

/// First occurrence of every note id, in input order.
fn unique_notes(notes: &[Note]) -> Vec<&Note> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::with_capacity(notes.len());
    for note in notes {
        if seen.insert(note.id.as_str()) {
            out.push(note);
        } else {
            tracing::warn!(note_id = %note.id, "skipping note with duplicate id");
        }
    }
    out
}

/// Notes whose entity list contains exactly `label`, deduplicated by note id, in input order.
pub fn related_notes<'a>(notes: &'a [Note], label: &str) -> Vec<&'a Note> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    notes
        .iter()
        .filter(|note| note.has_label(label) && seen.insert(note.id.as_str()))
        .collect()
}
