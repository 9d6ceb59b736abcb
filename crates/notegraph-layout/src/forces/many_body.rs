use crate::Vec2;
use crate::body::Body;
use crate::rng::XorShift64Star;

/// Squared distance below which the inverse-distance falloff is softened.
const DISTANCE_MIN2: f64 = 1.0;

/// Pairwise charge by direct summation. A negative `strength` repels.
///
/// Graphs here are notes plus distinct labels, so the quadratic pass stays cheap and avoids the
/// approximation error of a Barnes-Hut tree.
pub(crate) fn apply(bodies: &mut [Body], strength: f64, alpha: f64, rng: &mut XorShift64Star) {
    if strength == 0.0 || alpha == 0.0 {
        return;
    }
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (pi, pj) = (bodies[i].is_pinned(), bodies[j].is_pinned());
            if pi && pj {
                continue;
            }
            let mut d: Vec2 = bodies[j].position - bodies[i].position;
            let mut l = d.norm_squared();
            if d.x == 0.0 {
                d.x = rng.jiggle();
                l += d.x * d.x;
            }
            if d.y == 0.0 {
                d.y = rng.jiggle();
                l += d.y * d.y;
            }
            if l < DISTANCE_MIN2 {
                l = (DISTANCE_MIN2 * l).sqrt();
            }
            let push = d * (strength * alpha / l);
            if !pi {
                bodies[i].velocity += push;
            }
            if !pj {
                bodies[j].velocity -= push;
            }
        }
    }
}
