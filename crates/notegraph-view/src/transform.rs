use notegraph_core::InteractionConfig;
use notegraph_layout::Vec2;
use serde::Serialize;

/// Zoom/pan transform: `screen = sim * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Simulation space to screen space.
    pub fn apply(&self, sim: Vec2) -> Vec2 {
        sim * self.k + self.translation()
    }

    /// Screen space to simulation space.
    pub fn invert(&self, screen: Vec2) -> Vec2 {
        (screen - self.translation()) / self.k
    }

    pub fn translate_by(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Scales by `factor` keeping the simulation point under `focal` fixed on screen.
    ///
    /// The resulting scale is clamped to the configured zoom range. Returns `false` (and leaves
    /// the transform untouched) when `factor` is NaN, `focal` is not finite, or the zoom range
    /// admits a non-positive scale.
    pub fn zoom_at(&mut self, factor: f64, focal: Vec2, config: &InteractionConfig) -> bool {
        if factor.is_nan() || !focal.x.is_finite() || !focal.y.is_finite() {
            return false;
        }
        let k = config.clamp_zoom(self.k * factor);
        let anchor = self.invert(focal);
        let t = focal - anchor * k;
        if !(k > 0.0 && k.is_finite() && t.x.is_finite() && t.y.is_finite()) {
            return false;
        }
        self.k = k;
        self.x = t.x;
        self.y = t.y;
        true
    }

    /// Wheel deltas map to `2^(-delta * sensitivity)`, so opposite deltas cancel out.
    pub fn wheel_factor(delta: f64, config: &InteractionConfig) -> f64 {
        (-delta * config.wheel_sensitivity).exp2()
    }

    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}
