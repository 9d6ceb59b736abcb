use notegraph_core::labels::{NOTE_COLOR, entity_color};
use notegraph_core::{Graph, NodeKind};
use notegraph_layout::LayoutEngine;
use serde::Serialize;

use crate::transform::ViewTransform;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraw {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Drawn radius, hover enlargement included.
    pub radius: f64,
    pub label: String,
    pub is_note: bool,
    pub color: &'static str,
    /// Distinct-note (or raw) count for entity-type nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub hovered: bool,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDraw {
    pub source: usize,
    pub target: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Everything a surface needs to draw one simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub generation: u64,
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub transform: ViewTransform,
    pub nodes: Vec<NodeDraw>,
    pub edges: Vec<EdgeDraw>,
}

impl Frame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Host-side drawing target. Frames of different generations are separated by a `clear()`.
pub trait RenderSurface {
    fn draw(&mut self, frame: &Frame);
    fn clear(&mut self);
}

/// Surface that keeps only the most recent frame. Handy for headless snapshots.
#[derive(Debug, Clone, Default)]
pub struct LatestFrame {
    pub frame: Option<Frame>,
    pub draws: usize,
    pub clears: usize,
}

impl RenderSurface for LatestFrame {
    fn draw(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
        self.draws += 1;
    }

    fn clear(&mut self) {
        self.frame = None;
        self.clears += 1;
    }
}

/// Reads the engine after integration and turns it into draw instructions.
#[derive(Debug, Clone, Copy)]
pub struct RenderSync {
    hover_scale: f64,
}

impl RenderSync {
    pub fn new(hover_scale: f64) -> Self {
        let hover_scale = if hover_scale.is_finite() && hover_scale > 0.0 {
            hover_scale
        } else {
            1.0
        };
        Self { hover_scale }
    }

    pub fn capture(
        &self,
        generation: u64,
        graph: &Graph,
        engine: &LayoutEngine,
        transform: ViewTransform,
        hovered: Option<usize>,
    ) -> Frame {
        let bodies = engine.bodies();
        let nodes = graph
            .nodes()
            .iter()
            .zip(bodies)
            .enumerate()
            .map(|(idx, (node, body))| {
                let hovered = hovered == Some(idx);
                let (color, count) = match &node.kind {
                    NodeKind::Note { .. } => (NOTE_COLOR, None),
                    NodeKind::EntityType {
                        label,
                        occurrence_count,
                    } => (entity_color(label), Some(*occurrence_count)),
                };
                NodeDraw {
                    id: node.id.clone(),
                    x: body.position.x,
                    y: body.position.y,
                    radius: if hovered {
                        body.radius * self.hover_scale
                    } else {
                        body.radius
                    },
                    label: node.label.clone(),
                    is_note: node.is_note(),
                    color,
                    count,
                    hovered,
                    pinned: body.is_pinned(),
                }
            })
            .collect();

        let edges = engine
            .links()
            .iter()
            .map(|link| {
                let a = bodies[link.source].position;
                let b = bodies[link.target].position;
                EdgeDraw {
                    source: link.source,
                    target: link.target,
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                }
            })
            .collect();

        let config = engine.config();
        Frame {
            generation,
            tick: engine.ticks(),
            width: config.width,
            height: config.height,
            transform,
            nodes,
            edges,
        }
    }
}
