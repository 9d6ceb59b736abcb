//! Pointer gesture state machine: click vs. drag disambiguation, panning, wheel zoom and hover.
//!
//! Positions in [`PointerEvent`] are screen space. Drag pins are converted to simulation space
//! through the current [`ViewTransform`]; panning and zooming only ever touch the transform.

use notegraph_core::InteractionConfig;
use notegraph_layout::{LayoutEngine, Vec2};

use crate::transform::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// `target` is the node under the pointer, or `None` for empty canvas.
    Down { position: Vec2, target: Option<usize> },
    Move { position: Vec2 },
    Up { position: Vec2 },
    Wheel { delta: f64, focal: Vec2 },
    Enter { node: usize },
    Leave { node: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Pressed on a node; not yet moved past the drag threshold.
    PossibleDrag { node: usize, start: Vec2 },
    Dragging { node: usize },
    Panning { last: Vec2 },
}

/// What a pointer event meant, if anything the host has to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Clicked(usize),
    TransformChanged(ViewTransform),
    HoverChanged(Option<usize>),
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    transform: ViewTransform,
    gesture: Gesture,
    hovered: Option<usize>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            transform: ViewTransform::IDENTITY,
            gesture: Gesture::Idle,
            hovered: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        let mut transform = transform;
        transform.k = self.config.clamp_zoom(transform.k);
        self.transform = transform;
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn dragged_node(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging { node } => Some(node),
            _ => None,
        }
    }

    /// Drops any open gesture and hover without touching an engine. Used when the graph the
    /// node indices refer to has been replaced.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.hovered = None;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        mut engine: Option<&mut LayoutEngine>,
    ) -> Option<Interaction> {
        match event {
            PointerEvent::Down { position, target } => {
                if self.gesture != Gesture::Idle {
                    tracing::trace!(gesture = ?self.gesture, "closing stale gesture");
                    self.release(engine.as_deref_mut());
                }
                self.gesture = match target {
                    Some(node) => Gesture::PossibleDrag {
                        node,
                        start: position,
                    },
                    None => Gesture::Panning { last: position },
                };
                tracing::trace!(gesture = ?self.gesture, "pointer down");
                None
            }
            PointerEvent::Move { position } => self.on_move(position, engine),
            PointerEvent::Up { position } => self.on_up(position, engine),
            PointerEvent::Wheel { delta, focal } => {
                let factor = ViewTransform::wheel_factor(delta, &self.config);
                if self.transform.zoom_at(factor, focal, &self.config) {
                    Some(Interaction::TransformChanged(self.transform))
                } else {
                    tracing::trace!(delta, "ignoring unusable wheel event");
                    None
                }
            }
            PointerEvent::Enter { node } => {
                if self.hovered == Some(node) {
                    return None;
                }
                self.hovered = Some(node);
                Some(Interaction::HoverChanged(self.hovered))
            }
            PointerEvent::Leave { node } => {
                if self.hovered != Some(node) {
                    return None;
                }
                self.hovered = None;
                Some(Interaction::HoverChanged(None))
            }
        }
    }

    fn on_move(
        &mut self,
        position: Vec2,
        engine: Option<&mut LayoutEngine>,
    ) -> Option<Interaction> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::PossibleDrag { node, start } => {
                if !self.beyond_threshold(start, position) {
                    return None;
                }
                let Some(engine) = engine else {
                    self.gesture = Gesture::Idle;
                    return None;
                };
                if !engine.pin(node, self.transform.invert(position)) {
                    tracing::trace!(node, "drag target vanished");
                    self.gesture = Gesture::Idle;
                    return None;
                }
                engine.reheat();
                self.gesture = Gesture::Dragging { node };
                tracing::trace!(node, "drag started");
                None
            }
            Gesture::Dragging { node } => {
                if let Some(engine) = engine {
                    engine.pin(node, self.transform.invert(position));
                }
                None
            }
            Gesture::Panning { last } => {
                let delta = position - last;
                if !(delta.x.is_finite() && delta.y.is_finite()) {
                    return None;
                }
                self.gesture = Gesture::Panning { last: position };
                self.transform.translate_by(delta);
                Some(Interaction::TransformChanged(self.transform))
            }
        }
    }

    fn on_up(&mut self, position: Vec2, engine: Option<&mut LayoutEngine>) -> Option<Interaction> {
        let gesture = self.gesture;
        let out = match gesture {
            Gesture::PossibleDrag { node, start } if !self.beyond_threshold(start, position) => {
                self.gesture = Gesture::Idle;
                Some(Interaction::Clicked(node))
            }
            Gesture::Idle => None,
            _ => {
                self.release(engine);
                None
            }
        };
        tracing::trace!(?gesture, clicked = out.is_some(), "pointer up");
        out
    }

    /// Ends the current gesture. A drag unpins its node and lets the engine cool.
    fn release(&mut self, engine: Option<&mut LayoutEngine>) {
        if let (Gesture::Dragging { node }, Some(engine)) = (self.gesture, engine) {
            engine.unpin(node);
            engine.cool();
            tracing::trace!(node, "drag ended");
        }
        self.gesture = Gesture::Idle;
    }

    fn beyond_threshold(&self, start: Vec2, position: Vec2) -> bool {
        // NaN distances never count as movement.
        (position - start).norm() > self.config.drag_move_threshold_px
    }
}

/// Topmost node whose circle contains `screen`. Later nodes are drawn on top.
///
/// Uses the resting radii; the hover enlargement does not widen the hit area.
pub fn pick_node(engine: &LayoutEngine, transform: &ViewTransform, screen: Vec2) -> Option<usize> {
    let sim = transform.invert(screen);
    engine
        .bodies()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, body)| (body.position - sim).norm() <= body.radius)
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use notegraph_core::{Entity, Graph, GraphBuilder, GraphConfig, LayoutConfig, Note};
    use proptest::prelude::*;

    use super::*;

    fn graph() -> Graph {
        let notes = vec![
            Note::new("a", "Alpha").with_entities([Entity::new("Ada", "PERSON")]),
            Note::new("b", "Beta").with_entities([Entity::new("Acme", "ORG")]),
        ];
        GraphBuilder::new(GraphConfig::default()).build(&notes)
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(&graph(), &LayoutConfig::default()).unwrap()
    }

    fn controller() -> InteractionController {
        InteractionController::new(InteractionConfig::default())
    }

    fn down(x: f64, y: f64, target: Option<usize>) -> PointerEvent {
        PointerEvent::Down {
            position: Vec2::new(x, y),
            target,
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Vec2::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut c = controller();
        let mut e = engine();
        assert_eq!(c.handle(down(10.0, 10.0, Some(2)), Some(&mut e)), None);
        assert_eq!(c.handle(mv(12.0, 11.0), Some(&mut e)), None);
        assert_eq!(
            c.handle(up(12.0, 11.0), Some(&mut e)),
            Some(Interaction::Clicked(2))
        );
        assert_eq!(c.gesture(), Gesture::Idle);
        assert!(!e.is_pinned(2));
    }

    #[test]
    fn drag_pins_node_under_pointer_and_suppresses_click() {
        let mut c = controller();
        let mut e = engine();
        e.run_until_settled(1_000);
        c.set_transform(ViewTransform {
            k: 2.0,
            x: 100.0,
            y: 50.0,
        });

        c.handle(down(10.0, 10.0, Some(1)), Some(&mut e));
        c.handle(mv(30.0, 10.0), Some(&mut e));
        assert_eq!(c.gesture(), Gesture::Dragging { node: 1 });
        assert!(e.is_active());
        assert_eq!(e.position(1), Some(Vec2::new(-35.0, -20.0)));

        for step in 0..5 {
            let p = Vec2::new(40.0 + step as f64 * 7.0, 90.0);
            c.handle(PointerEvent::Move { position: p }, Some(&mut e));
            e.tick();
            assert_eq!(e.position(1), Some(c.transform().invert(p)));
        }

        assert_eq!(c.handle(up(70.0, 90.0), Some(&mut e)), None);
        assert!(!e.is_pinned(1));
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn threshold_is_in_screen_pixels_regardless_of_zoom() {
        let mut c = controller();
        let mut e = engine();
        c.set_transform(ViewTransform {
            k: 4.0,
            x: 0.0,
            y: 0.0,
        });
        c.handle(down(0.0, 0.0, Some(0)), Some(&mut e));
        c.handle(mv(3.9, 0.0), Some(&mut e));
        assert!(matches!(c.gesture(), Gesture::PossibleDrag { .. }));
        c.handle(mv(4.1, 0.0), Some(&mut e));
        assert_eq!(c.gesture(), Gesture::Dragging { node: 0 });
    }

    #[test]
    fn release_far_away_without_moves_is_not_a_click() {
        let mut c = controller();
        let mut e = engine();
        c.handle(down(0.0, 0.0, Some(0)), Some(&mut e));
        assert_eq!(c.handle(up(50.0, 0.0), Some(&mut e)), None);
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn panning_changes_only_the_transform() {
        let mut c = controller();
        let mut e = engine();
        let before: Vec<Vec2> = e.bodies().iter().map(|b| b.position).collect();
        c.handle(down(100.0, 100.0, None), Some(&mut e));
        let out = c.handle(mv(130.0, 90.0), Some(&mut e));
        let expected = ViewTransform {
            k: 1.0,
            x: 30.0,
            y: -10.0,
        };
        assert_eq!(out, Some(Interaction::TransformChanged(expected)));
        c.handle(up(130.0, 90.0), Some(&mut e));
        assert_eq!(c.gesture(), Gesture::Idle);
        let after: Vec<Vec2> = e.bodies().iter().map(|b| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        let mut c = controller();
        let mut e = engine();
        assert_eq!(c.handle(up(1.0, 1.0), Some(&mut e)), None);
        assert_eq!(c.handle(mv(5.0, 5.0), Some(&mut e)), None);
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn second_down_closes_the_open_drag() {
        let mut c = controller();
        let mut e = engine();
        c.handle(down(0.0, 0.0, Some(0)), Some(&mut e));
        c.handle(mv(20.0, 0.0), Some(&mut e));
        assert!(e.is_pinned(0));
        c.handle(down(50.0, 50.0, Some(1)), Some(&mut e));
        assert!(!e.is_pinned(0));
        assert_eq!(
            c.gesture(),
            Gesture::PossibleDrag {
                node: 1,
                start: Vec2::new(50.0, 50.0)
            }
        );
    }

    #[test]
    fn drag_of_unknown_node_falls_back_to_idle() {
        let mut c = controller();
        let mut e = engine();
        c.handle(down(0.0, 0.0, Some(99)), Some(&mut e));
        c.handle(mv(20.0, 0.0), Some(&mut e));
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn hover_tracks_enter_and_leave() {
        let mut c = controller();
        assert_eq!(
            c.handle(PointerEvent::Enter { node: 3 }, None),
            Some(Interaction::HoverChanged(Some(3)))
        );
        assert_eq!(c.handle(PointerEvent::Enter { node: 3 }, None), None);
        assert_eq!(c.handle(PointerEvent::Leave { node: 1 }, None), None);
        assert_eq!(c.hovered(), Some(3));
        assert_eq!(
            c.handle(PointerEvent::Leave { node: 3 }, None),
            Some(Interaction::HoverChanged(None))
        );
    }

    #[test]
    fn pick_node_prefers_topmost() {
        let mut e = engine();
        let p = e.center();
        e.pin(0, p);
        e.pin(1, p + Vec2::new(200.0, 0.0));
        e.pin(2, p + Vec2::new(0.0, 200.0));
        e.pin(3, p + Vec2::new(5.0, 0.0));
        let t = ViewTransform::IDENTITY;
        assert_eq!(pick_node(&e, &t, p), Some(3));
        assert_eq!(pick_node(&e, &t, p - Vec2::new(11.0, 0.0)), Some(0));
        assert_eq!(pick_node(&e, &t, p + Vec2::new(500.0, 0.0)), None);
    }

    proptest! {
        #[test]
        fn zoom_stays_in_range(deltas in prop::collection::vec(
            prop_oneof![
                any::<f64>(),
                Just(f64::INFINITY),
                Just(f64::NEG_INFINITY),
                Just(f64::NAN),
                -1e6f64..1e6,
            ],
            1..64,
        )) {
            let mut c = controller();
            for delta in deltas {
                c.handle(PointerEvent::Wheel { delta, focal: Vec2::new(400.0, 300.0) }, None);
                let t = c.transform();
                prop_assert!((0.1..=4.0).contains(&t.k), "k = {}", t.k);
                prop_assert!(t.x.is_finite() && t.y.is_finite());
            }
        }

        #[test]
        fn dragged_node_follows_pointer(moves in prop::collection::vec(
            (-500.0f64..1500.0, -500.0f64..1200.0),
            1..24,
        )) {
            let mut c = controller();
            let mut e = engine();
            c.handle(down(0.0, 0.0, Some(2)), Some(&mut e));
            c.handle(mv(100.0, 100.0), Some(&mut e));
            for (x, y) in moves {
                let p = Vec2::new(x, y);
                c.handle(PointerEvent::Move { position: p }, Some(&mut e));
                e.tick();
                prop_assert_eq!(e.position(2), Some(c.transform().invert(p)));
            }
            c.handle(up(0.0, 0.0), Some(&mut e));
            prop_assert!(!e.is_pinned(2));
        }
    }
}
