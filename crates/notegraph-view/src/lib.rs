#![forbid(unsafe_code)]

//! Interactive view over a note/entity graph, without any windowing or drawing backend.
//!
//! The host owns the animation loop and the pixels: it forwards pointer events to
//! [`GraphView::handle_pointer`], calls [`GraphView::tick`] once per frame and implements
//! [`RenderSurface`] to draw the [`Frame`]s it receives.

pub mod error;
pub mod frame;
pub mod interaction;
pub mod session;
pub mod svg;
pub mod transform;

pub use error::{Error, Result};
pub use frame::{EdgeDraw, Frame, LatestFrame, NodeDraw, RenderSurface, RenderSync};
pub use interaction::{Gesture, Interaction, InteractionController, PointerEvent, pick_node};
pub use session::{GraphView, PanelEntry, Selection, ViewEvent};
pub use svg::render_svg;
pub use transform::ViewTransform;

