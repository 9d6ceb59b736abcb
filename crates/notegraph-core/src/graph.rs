use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::labels::readable_entity_label;
use crate::model::Note;
use crate::utils::truncate_with_ellipsis;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    #[serde(rename_all = "camelCase")]
    Note { note_id: String },
    #[serde(rename_all = "camelCase")]
    EntityType {
        #[serde(rename = "entityLabel")]
        label: String,
        occurrence_count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Display string (truncated title or readable label).
    pub label: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn note(note: &Note, truncate_title_length: usize) -> Self {
        Self {
            id: note_node_id(&note.id),
            label: truncate_with_ellipsis(&note.title, truncate_title_length).into_owned(),
            kind: NodeKind::Note {
                note_id: note.id.clone(),
            },
        }
    }

    pub fn entity_type(label: &str, occurrence_count: usize) -> Self {
        Self {
            id: entity_node_id(label),
            label: readable_entity_label(label).into_owned(),
            kind: NodeKind::EntityType {
                label: label.to_string(),
                occurrence_count,
            },
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self.kind, NodeKind::Note { .. })
    }

    pub fn note_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Note { note_id } => Some(note_id),
            NodeKind::EntityType { .. } => None,
        }
    }

    /// Raw entity label for entity-type nodes.
    pub fn entity_label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::EntityType { label, .. } => Some(label),
            NodeKind::Note { .. } => None,
        }
    }

    pub fn occurrence_count(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::EntityType {
                occurrence_count, ..
            } => Some(*occurrence_count),
            NodeKind::Note { .. } => None,
        }
    }
}

pub fn note_node_id(note_id: &str) -> String {
    format!("note-{note_id}")
}

pub fn entity_node_id(label: &str) -> String {
    format!("entity-{label}")
}

/// Undirected link between a note node and an entity-type node, stored as node indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub note: usize,
    pub entity: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(note: usize, entity: usize) -> Self {
        Self {
            note,
            entity,
            weight: 1.0,
        }
    }
}

/// Node/edge arena produced by [`crate::GraphBuilder`].
///
/// Node ids are unique: adding a node whose id is already present returns the existing index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
        }
    }

    pub fn add_node(&mut self, node: Node) -> usize {
        if let Some(&idx) = self.index.get(&node.id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        idx
    }

    /// Appends an edge as-is; endpoint validity is checked by consumers that need it.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(note node id, entity node id)` pairs, in edge order.
    pub fn edge_ids(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges.iter().filter_map(|e| {
            let note = self.nodes.get(e.note)?;
            let entity = self.nodes.get(e.entity)?;
            Some((note.id.as_str(), entity.id.as_str()))
        })
    }
}
