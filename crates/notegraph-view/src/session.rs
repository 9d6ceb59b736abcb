use notegraph_core::labels::readable_entity_label;
use notegraph_core::{Config, Graph, GraphBuilder, NodeKind, Note, related_notes};
use notegraph_layout::{LayoutEngine, TickStats};

use crate::Result;
use crate::frame::{Frame, RenderSurface, RenderSync};
use crate::interaction::{Interaction, InteractionController, PointerEvent, pick_node};
use crate::transform::ViewTransform;

/// Characters of abstractive summary shown per note in the entity panel.
pub const PANEL_SNIPPET_CHARS: usize = 80;

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    Note(&'a Note),
    EntityType {
        label: &'a str,
        readable_label: String,
        notes: Vec<&'a Note>,
    },
}

/// One row of the entity-type side panel.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEntry {
    pub note_id: String,
    pub title: String,
    pub snippet: String,
}

impl Selection<'_> {
    /// Panel rows for an entity-type selection; empty for a note selection.
    pub fn panel_entries(&self) -> Vec<PanelEntry> {
        match self {
            Selection::Note(_) => Vec::new(),
            Selection::EntityType { notes, .. } => notes
                .iter()
                .map(|note| PanelEntry {
                    note_id: note.id.clone(),
                    title: note.title.clone(),
                    snippet: note.summary_snippet(PANEL_SNIPPET_CHARS),
                })
                .collect(),
        }
    }
}

/// Pointer outcome as seen by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<'a> {
    Selected(Selection<'a>),
    TransformChanged(ViewTransform),
    HoverChanged(Option<usize>),
}

/// One interactive graph view: notes, their graph, the running engine and the gesture state.
///
/// Every call to [`GraphView::set_notes`] starts a new generation. The previous engine is
/// disposed first and the surface is cleared, so frames of two generations never interleave.
pub struct GraphView<S: RenderSurface> {
    config: Config,
    builder: GraphBuilder,
    notes: Vec<Note>,
    graph: Graph,
    engine: Option<LayoutEngine>,
    controller: InteractionController,
    sync: RenderSync,
    surface: S,
    generation: u64,
    stopped: bool,
}

impl<S: RenderSurface> GraphView<S> {
    pub fn new(config: Config, surface: S) -> Self {
        Self {
            builder: GraphBuilder::new(config.graph.clone()),
            controller: InteractionController::new(config.interaction.clone()),
            sync: RenderSync::new(config.interaction.hover_scale),
            config,
            notes: Vec::new(),
            graph: Graph::new(),
            engine: None,
            surface,
            generation: 0,
            stopped: false,
        }
    }

    /// Replaces the note collection and rebuilds graph and engine from scratch.
    pub fn set_notes(&mut self, notes: Vec<Note>) -> Result<()> {
        if let Some(old) = self.engine.take() {
            old.dispose();
        }
        self.controller.reset();
        self.surface.clear();

        self.notes = notes;
        self.graph = self.builder.build(&self.notes);
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            nodes = self.graph.len(),
            edges = self.graph.edges().len(),
            "graph generation swapped"
        );

        if self.graph.is_empty() {
            return Ok(());
        }
        let mut engine = LayoutEngine::new(&self.graph, &self.config.layout)?;
        if self.stopped {
            engine.stop();
        }
        self.engine = Some(engine);
        Ok(())
    }

    /// Advances the simulation one step and hands exactly one frame to the surface.
    ///
    /// Returns `None` without drawing when there is nothing to simulate or the engine is idle.
    pub fn tick(&mut self) -> Option<TickStats> {
        let engine = self.engine.as_mut()?;
        let stats = engine.tick()?;
        let frame = self.sync.capture(
            self.generation,
            &self.graph,
            engine,
            self.controller.transform(),
            self.controller.hovered(),
        );
        self.surface.draw(&frame);
        Some(stats)
    }

    /// Draws the current state without advancing the simulation, e.g. after a pan or hover.
    pub fn redraw(&mut self) {
        if let Some(frame) = self.frame() {
            self.surface.draw(&frame);
        }
    }

    pub fn frame(&self) -> Option<Frame> {
        let engine = self.engine.as_ref()?;
        Some(self.sync.capture(
            self.generation,
            &self.graph,
            engine,
            self.controller.transform(),
            self.controller.hovered(),
        ))
    }

    /// Halts ticking, e.g. while the view is hidden.
    pub fn stop(&mut self) {
        self.stopped = true;
        if let Some(engine) = self.engine.as_mut() {
            engine.stop();
        }
    }

    pub fn resume(&mut self) {
        self.stopped = false;
        if let Some(engine) = self.engine.as_mut() {
            engine.restart();
        }
    }

    /// Ticks until the engine settles or `max_ticks` steps have run, drawing every step.
    pub fn run_until_settled(&mut self, max_ticks: u64) -> u64 {
        let mut taken = 0;
        while taken < max_ticks && self.tick().is_some() {
            taken += 1;
        }
        taken
    }

    /// Feeds a pointer event through the gesture state machine.
    ///
    /// A `Down` without a target is hit-tested against the current layout first.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<ViewEvent<'_>> {
        let event = match event {
            PointerEvent::Down {
                position,
                target: None,
            } => PointerEvent::Down {
                position,
                target: self.pick(position),
            },
            other => other,
        };
        match self.controller.handle(event, self.engine.as_mut())? {
            Interaction::Clicked(idx) => self.select(idx).map(ViewEvent::Selected),
            Interaction::TransformChanged(t) => Some(ViewEvent::TransformChanged(t)),
            Interaction::HoverChanged(h) => Some(ViewEvent::HoverChanged(h)),
        }
    }

    pub fn pick(&self, screen: notegraph_layout::Vec2) -> Option<usize> {
        let engine = self.engine.as_ref()?;
        pick_node(engine, &self.controller.transform(), screen)
    }

    /// Resolves node `idx` of the current generation to a selection.
    pub fn select(&self, idx: usize) -> Option<Selection<'_>> {
        match &self.graph.node(idx)?.kind {
            NodeKind::Note { note_id } => self
                .notes
                .iter()
                .find(|note| &note.id == note_id)
                .map(Selection::Note),
            NodeKind::EntityType { label, .. } => Some(Selection::EntityType {
                label,
                readable_label: readable_entity_label(label).into_owned(),
                notes: related_notes(&self.notes, label),
            }),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn engine(&self) -> Option<&LayoutEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut LayoutEngine> {
        self.engine.as_mut()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Disposes the engine and hands the surface back.
    pub fn into_surface(mut self) -> S {
        if let Some(engine) = self.engine.take() {
            engine.dispose();
        }
        self.surface
    }
}
