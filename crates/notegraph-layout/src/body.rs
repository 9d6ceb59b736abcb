use crate::Vec2;

/// Simulation state for one graph node. Bodies share the node index of the source graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Set while the node is pinned (e.g. dragged).
    pub fixed: Option<Vec2>,
    /// Collision radius.
    pub radius: f64,
}

impl Body {
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            fixed: None,
            radius,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.fixed.is_some()
    }

    pub fn is_finite(&self) -> bool {
        is_finite(&self.position) && is_finite(&self.velocity)
    }
}

pub(crate) fn is_finite(v: &Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
