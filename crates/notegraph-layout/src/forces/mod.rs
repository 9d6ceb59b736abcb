//! Velocity/position contributions applied once per tick, in this order: link, many-body,
//! collide, center.
//!
//! Every force leaves pinned bodies' velocities untouched; pinned bodies still act as sources.

pub(crate) mod center;
pub(crate) mod collide;
pub(crate) mod link;
pub(crate) mod many_body;

pub use link::Link;
