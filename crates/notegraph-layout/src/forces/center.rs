use crate::Vec2;
use crate::body::Body;

/// Translates free bodies so the centroid of all bodies moves toward `center`.
///
/// Acts on positions, not velocities, so it never changes the relative layout.
pub(crate) fn apply(bodies: &mut [Body], center: Vec2, strength: f64) {
    if bodies.is_empty() || strength == 0.0 {
        return;
    }
    let sum = bodies
        .iter()
        .fold(Vec2::zeros(), |acc, body| acc + body.position);
    let mean = sum / bodies.len() as f64;
    let shift = (center - mean) * strength;
    for body in bodies.iter_mut().filter(|b| !b.is_pinned()) {
        body.position += shift;
    }
}
