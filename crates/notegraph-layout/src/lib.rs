#![forbid(unsafe_code)]

//! Headless, tick-driven force simulation for note/entity graphs.
//!
//! The engine owns one contiguous [`Body`] per graph node and advances them with link,
//! many-body, collision and centering forces. It never spawns threads or timers; the host calls
//! [`LayoutEngine::tick`] once per animation frame.

pub mod body;
pub mod engine;
pub mod error;
pub mod forces;
mod rng;

pub use body::Body;
pub use engine::{EngineState, LayoutEngine, TickStats};
pub use error::{Error, Result};
pub use forces::Link;

pub type Vec2 = nalgebra::Vector2<f64>;

/// Builds an engine for `graph` and runs it until it settles or `max_ticks` steps have run.
pub fn settle(
    graph: &notegraph_core::Graph,
    config: &notegraph_core::LayoutConfig,
    max_ticks: u64,
) -> Result<LayoutEngine> {
    let mut engine = LayoutEngine::new(graph, config)?;
    engine.run_until_settled(max_ticks);
    Ok(engine)
}
