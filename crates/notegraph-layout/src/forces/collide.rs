use crate::Vec2;
use crate::body::Body;
use crate::rng::XorShift64Star;

/// Pushes apart bodies whose predicted circles (position + velocity) overlap.
///
/// The correction is split by squared radius so small circles yield to large ones.
pub(crate) fn apply(bodies: &mut [Body], strength: f64, rng: &mut XorShift64Star) {
    if strength == 0.0 {
        return;
    }
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (pi, pj) = (bodies[i].is_pinned(), bodies[j].is_pinned());
            if pi && pj {
                continue;
            }
            let (ri, rj) = (bodies[i].radius, bodies[j].radius);
            let r = ri + rj;
            let mut d: Vec2 = (bodies[i].position + bodies[i].velocity)
                - (bodies[j].position + bodies[j].velocity);
            let mut l = d.norm_squared();
            if l >= r * r {
                continue;
            }
            if d.x == 0.0 {
                d.x = rng.jiggle();
                l += d.x * d.x;
            }
            if d.y == 0.0 {
                d.y = rng.jiggle();
                l += d.y * d.y;
            }
            let len = l.sqrt();
            let push = d * ((r - len) / len * strength);
            let (ri2, rj2) = (ri * ri, rj * rj);
            let share = if ri2 + rj2 > 0.0 { rj2 / (ri2 + rj2) } else { 0.5 };
            if !pi {
                bodies[i].velocity += push * share;
            }
            if !pj {
                bodies[j].velocity -= push * (1.0 - share);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_circles_are_separated() {
        let mut bodies = vec![
            Body::new(Vec2::new(0.0, 0.0), 15.0),
            Body::new(Vec2::new(10.0, 0.0), 12.0),
        ];
        let mut rng = XorShift64Star::new(1);
        apply(&mut bodies, 1.0, &mut rng);
        let after = (bodies[1].position + bodies[1].velocity)
            - (bodies[0].position + bodies[0].velocity);
        assert!((after.norm() - 27.0).abs() < 1e-9);
        // The smaller circle moves further.
        assert!(bodies[1].velocity.x.abs() > bodies[0].velocity.x.abs());
    }

    #[test]
    fn distant_circles_are_untouched() {
        let mut bodies = vec![
            Body::new(Vec2::new(0.0, 0.0), 15.0),
            Body::new(Vec2::new(40.0, 0.0), 12.0),
        ];
        let mut rng = XorShift64Star::new(1);
        apply(&mut bodies, 1.0, &mut rng);
        assert_eq!(bodies[0].velocity, Vec2::zeros());
        assert_eq!(bodies[1].velocity, Vec2::zeros());
    }
}
