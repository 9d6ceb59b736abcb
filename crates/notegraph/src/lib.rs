#![forbid(unsafe_code)]

//! `notegraph` turns a collection of notes with named entities into an interactive
//! entity-relationship graph, headlessly.
//!
//! # Features
//!
//! - `view`: enable the force layout and the interactive view (`notegraph::view`)

pub use notegraph_core::*;

#[cfg(feature = "view")]
pub mod view {
    pub use notegraph_layout::{EngineState, LayoutEngine, TickStats, Vec2};
    pub use notegraph_view::*;

    use notegraph_core::{
        Config, Graph, GraphBuilder, Note, notes_from_json, notes_from_pipeline_json,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Notes(#[from] notegraph_core::Error),
        #[error(transparent)]
        View(#[from] notegraph_view::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Tick budget used by the one-shot helpers; comfortably above the default cooling schedule.
    pub const DEFAULT_MAX_TICKS: u64 = 1_000;

    /// Settles a layout for `notes` and returns its final frame.
    ///
    /// An empty graph yields an empty frame sized to the configured canvas.
    pub fn settle_notes(notes: Vec<Note>, config: &Config, max_ticks: u64) -> Result<Frame> {
        let mut view = GraphView::new(config.clone(), LatestFrame::default());
        view.set_notes(notes)?;
        view.run_until_settled(max_ticks);
        Ok(view
            .frame()
            .unwrap_or_else(|| empty_frame(config, view.generation())))
    }

    pub fn render_notes_svg(notes: Vec<Note>, config: &Config, max_ticks: u64) -> Result<String> {
        Ok(render_svg(&settle_notes(notes, config, max_ticks)?))
    }

    fn empty_frame(config: &Config, generation: u64) -> Frame {
        Frame {
            generation,
            tick: 0,
            width: config.layout.width,
            height: config.layout.height,
            transform: ViewTransform::IDENTITY,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Bundles a [`Config`] and a tick budget for repeated headless snapshots.
    #[derive(Debug, Clone)]
    pub struct HeadlessRenderer {
        pub config: Config,
        pub max_ticks: u64,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                config: Config::default(),
                max_ticks: DEFAULT_MAX_TICKS,
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: Config) -> Self {
            self.config = config;
            self
        }

        pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
            self.max_ticks = max_ticks;
            self
        }

        pub fn graph(&self, notes: &[Note]) -> Graph {
            GraphBuilder::new(self.config.graph.clone()).build(notes)
        }

        pub fn layout(&self, notes: Vec<Note>) -> Result<Frame> {
            settle_notes(notes, &self.config, self.max_ticks)
        }

        pub fn render_svg(&self, notes: Vec<Note>) -> Result<String> {
            render_notes_svg(notes, &self.config, self.max_ticks)
        }

        /// Parses a note collection (or pipeline result) and renders it.
        pub fn render_json_svg(&self, text: &str, pipeline: bool) -> Result<String> {
            let notes = if pipeline {
                notes_from_pipeline_json(text)?
            } else {
                notes_from_json(text)?
            };
            self.render_svg(notes)
        }
    }

}
