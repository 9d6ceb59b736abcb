//! Tunables for graph construction, layout and interaction.
//!
//! Every field is optional in serialized form; missing fields take the documented defaults.
//! Config files are JSON5 so hosts can keep comments next to overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::NodeKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub graph: GraphConfig,
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
}

impl Config {
    pub fn from_json5(text: &str) -> Result<Self> {
        Ok(json5::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json5(&text)
    }
}

/// What an entity-type node's `occurrence_count` measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OccurrenceCount {
    /// Number of distinct notes mentioning the label.
    #[default]
    DistinctNotes,
    /// Number of entity records carrying the label, duplicates within a note included.
    RawOccurrences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Minimum distinct-note count for a label to get its own node.
    pub inclusion_threshold: usize,
    pub truncate_title_length: usize,
    pub occurrence_count: OccurrenceCount,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            inclusion_threshold: 1,
            truncate_title_length: 25,
            occurrence_count: OccurrenceCount::DistinctNotes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Many-body charge; negative values repel.
    pub repulsion_strength: f64,
    pub link_strength: f64,
    pub link_distance: f64,
    pub center_strength: f64,
    pub collision_strength: f64,
    pub note_radius: f64,
    pub entity_radius: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    /// Fraction of velocity removed every tick.
    pub velocity_decay: f64,
    /// Alpha the simulation jumps back to when a drag starts.
    pub reheat_alpha: f64,
    /// Seed for the jiggle applied to coincident nodes.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            width: 1000.0,
            height: 700.0,
            repulsion_strength: -400.0,
            link_strength: 0.2,
            link_distance: 30.0,
            center_strength: 1.0,
            collision_strength: 1.0,
            note_radius: 15.0,
            entity_radius: 12.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            reheat_alpha: 0.3,
            seed: 1,
        }
    }
}

impl LayoutConfig {
    pub fn radius_for(&self, kind: &NodeKind) -> f64 {
        match kind {
            NodeKind::Note { .. } => self.note_radius,
            NodeKind::EntityType { .. } => self.entity_radius,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// Allowed `[min, max]` zoom scale.
    pub zoom_range: [f64; 2],
    /// Screen-space distance a pressed pointer must travel before a press becomes a drag.
    pub drag_move_threshold_px: f64,
    /// Wheel delta to log2-scale factor.
    pub wheel_sensitivity: f64,
    /// Radius multiplier for the hovered node.
    pub hover_scale: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_range: [0.1, 4.0],
            drag_move_threshold_px: 4.0,
            wheel_sensitivity: 0.002,
            hover_scale: 1.2,
        }
    }
}

impl InteractionConfig {
    /// Clamps `scale` into the zoom range, tolerating a reversed range.
    ///
    /// Non-finite input maps to the nearest bound (NaN maps to the lower one).
    pub fn clamp_zoom(&self, scale: f64) -> f64 {
        let [a, b] = self.zoom_range;
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        if scale.is_nan() {
            return min;
        }
        scale.clamp(min, max)
    }
}
