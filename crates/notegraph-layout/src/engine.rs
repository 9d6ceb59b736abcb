use notegraph_core::{Graph, LayoutConfig};

use crate::Vec2;
use crate::body::{Body, is_finite};
use crate::error::{Error, Result};
use crate::forces::{self, Link};
use crate::rng::XorShift64Star;

/// Golden-angle increment of the initial phyllotaxis spiral.
const INITIAL_ANGLE: f64 = std::f64::consts::PI * 0.763_932_022_500_210_3; // π(3 − √5)
const INITIAL_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Ticks advance the simulation.
    Running,
    /// Alpha fell below `alpha_min`; ticks are no-ops until reheated or restarted.
    Settled,
    /// Halted by the host; ticks are no-ops until restarted.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStats {
    /// Number of ticks applied so far, this one included.
    pub tick: u64,
    pub alpha: f64,
    /// `true` when this tick brought alpha below `alpha_min`.
    pub settled: bool,
}

/// Force-directed simulation over one [`Graph`] generation.
///
/// Body `i` is the simulation state of `graph.nodes()[i]`.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    bodies: Vec<Body>,
    links: Vec<Link>,
    config: LayoutConfig,
    center: Vec2,
    alpha: f64,
    alpha_target: f64,
    state: EngineState,
    ticks: u64,
    rng: XorShift64Star,
}

impl LayoutEngine {
    pub fn new(graph: &Graph, config: &LayoutConfig) -> Result<Self> {
        let n = graph.len();
        for (edge_idx, edge) in graph.edges().iter().enumerate() {
            if edge.note >= n || edge.entity >= n {
                return Err(Error::MissingEndpoint {
                    edge: edge_idx,
                    note: edge.note,
                    entity: edge.entity,
                    nodes: n,
                });
            }
        }

        let config = sanitize(config);
        let (cx, cy) = config.center();
        let center = Vec2::new(cx, cy);

        let bodies: Vec<Body> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| Body::new(spiral_position(center, i), config.radius_for(&node.kind)))
            .collect();

        let pairs = graph.edges().iter().filter_map(|edge| {
            if edge.note == edge.entity {
                tracing::debug!(node = edge.note, "skipping self-loop edge");
                return None;
            }
            Some((edge.note, edge.entity, edge.weight))
        });
        let links = Link::build(pairs, n, config.link_strength, config.link_distance);

        tracing::debug!(
            nodes = bodies.len(),
            links = links.len(),
            "layout engine constructed"
        );

        Ok(Self {
            bodies,
            links,
            rng: XorShift64Star::new(config.seed),
            config,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            state: EngineState::Running,
            ticks: 0,
        })
    }

    /// Advances one step if running. Returns `None` when settled or stopped.
    pub fn tick(&mut self) -> Option<TickStats> {
        if self.state != EngineState::Running {
            return None;
        }
        Some(self.step())
    }

    /// Advances one step regardless of state; does not resume a stopped engine.
    pub fn step(&mut self) -> TickStats {
        self.recover_non_finite();
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        forces::link::apply(&mut self.bodies, &self.links, self.alpha, &mut self.rng);
        forces::many_body::apply(
            &mut self.bodies,
            self.config.repulsion_strength,
            self.alpha,
            &mut self.rng,
        );
        forces::collide::apply(&mut self.bodies, self.config.collision_strength, &mut self.rng);
        forces::center::apply(&mut self.bodies, self.center, self.config.center_strength);

        let keep = 1.0 - self.config.velocity_decay;
        for body in &mut self.bodies {
            match body.fixed {
                Some(fixed) => body.position = fixed,
                None => {
                    body.velocity *= keep;
                    body.position += body.velocity;
                }
            }
        }
        self.recover_non_finite();

        self.ticks += 1;
        let settled = self.alpha < self.config.alpha_min;
        if settled && self.state == EngineState::Running {
            self.state = EngineState::Settled;
            tracing::debug!(ticks = self.ticks, alpha = self.alpha, "layout settled");
        }
        TickStats {
            tick: self.ticks,
            alpha: self.alpha,
            settled,
        }
    }

    fn recover_non_finite(&mut self) {
        for (idx, body) in self.bodies.iter_mut().enumerate() {
            if body.is_finite() {
                continue;
            }
            tracing::warn!(
                node = idx,
                x = body.position.x,
                y = body.position.y,
                "non-finite layout state, resetting node to canvas center"
            );
            body.position = body.fixed.unwrap_or(self.center);
            body.velocity = Vec2::zeros();
        }
    }

    pub fn stop(&mut self) {
        self.state = EngineState::Stopped;
    }

    /// Resumes ticking at the current alpha; a settled engine is brought back to full energy.
    pub fn restart(&mut self) {
        if self.alpha < self.config.alpha_min {
            self.alpha = 1.0;
        }
        self.state = EngineState::Running;
    }

    /// Raises the energy for an interactive gesture and keeps it there until [`Self::cool`].
    pub fn reheat(&mut self) {
        let target = self.config.reheat_alpha;
        self.alpha = self.alpha.max(target);
        self.alpha_target = target;
        if self.state == EngineState::Settled {
            self.state = EngineState::Running;
        }
    }

    /// Lets the energy decay again after a gesture.
    pub fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Fixes node `idx` at `position`. Returns `false` for an unknown index or a non-finite
    /// position.
    pub fn pin(&mut self, idx: usize, position: Vec2) -> bool {
        if !is_finite(&position) {
            return false;
        }
        match self.bodies.get_mut(idx) {
            Some(body) => {
                body.fixed = Some(position);
                body.position = position;
                true
            }
            None => false,
        }
    }

    pub fn unpin(&mut self, idx: usize) -> bool {
        match self.bodies.get_mut(idx) {
            Some(body) => body.fixed.take().is_some(),
            None => false,
        }
    }

    pub fn is_pinned(&self, idx: usize) -> bool {
        self.bodies.get(idx).is_some_and(Body::is_pinned)
    }

    pub fn position(&self, idx: usize) -> Option<Vec2> {
        self.bodies.get(idx).map(|b| b.position)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ticks until settled, stopped, or `max_ticks` steps have run. Returns the steps taken.
    pub fn run_until_settled(&mut self, max_ticks: u64) -> u64 {
        let mut taken = 0;
        while taken < max_ticks && self.tick().is_some() {
            taken += 1;
        }
        taken
    }

    /// Stops the simulation and releases all node and edge state.
    pub fn dispose(mut self) {
        self.stop();
        tracing::debug!(
            nodes = self.bodies.len(),
            ticks = self.ticks,
            "layout engine disposed"
        );
    }
}

fn spiral_position(center: Vec2, i: usize) -> Vec2 {
    let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
    let angle = i as f64 * INITIAL_ANGLE;
    center + Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Replaces out-of-range tunables with defaults so a bad config cannot blow up the integrator.
fn sanitize(config: &LayoutConfig) -> LayoutConfig {
    let defaults = LayoutConfig::default();
    let mut out = config.clone();

    fn fix(name: &str, value: &mut f64, ok: bool, fallback: f64) {
        if !ok {
            tracing::warn!(field = name, value = *value, fallback, "invalid layout setting");
            *value = fallback;
        }
    }

    let v = out.width;
    fix("width", &mut out.width, v.is_finite() && v > 0.0, defaults.width);
    let v = out.height;
    fix("height", &mut out.height, v.is_finite() && v > 0.0, defaults.height);
    let v = out.alpha_decay;
    fix("alphaDecay", &mut out.alpha_decay, v > 0.0 && v <= 1.0, defaults.alpha_decay);
    let v = out.alpha_min;
    fix("alphaMin", &mut out.alpha_min, v > 0.0 && v < 1.0, defaults.alpha_min);
    let v = out.velocity_decay;
    fix(
        "velocityDecay",
        &mut out.velocity_decay,
        (0.0..=1.0).contains(&v),
        defaults.velocity_decay,
    );
    let v = out.reheat_alpha;
    fix("reheatAlpha", &mut out.reheat_alpha, (0.0..=1.0).contains(&v), defaults.reheat_alpha);
    let v = out.note_radius;
    fix("noteRadius", &mut out.note_radius, v.is_finite() && v >= 0.0, defaults.note_radius);
    let v = out.entity_radius;
    fix(
        "entityRadius",
        &mut out.entity_radius,
        v.is_finite() && v >= 0.0,
        defaults.entity_radius,
    );
    for (name, value, fallback) in [
        ("repulsionStrength", &mut out.repulsion_strength, defaults.repulsion_strength),
        ("linkStrength", &mut out.link_strength, defaults.link_strength),
        ("linkDistance", &mut out.link_distance, defaults.link_distance),
        ("centerStrength", &mut out.center_strength, defaults.center_strength),
        ("collisionStrength", &mut out.collision_strength, defaults.collision_strength),
    ] {
        let ok = value.is_finite();
        fix(name, value, ok, fallback);
    }
    out
}
