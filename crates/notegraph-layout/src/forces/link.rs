use crate::Vec2;
use crate::body::Body;
use crate::rng::XorShift64Star;

/// Spring between two bodies, resolved to indices at engine construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub strength: f64,
    pub distance: f64,
    /// Share of the correction applied to `target`; the rest goes to `source`.
    ///
    /// Derived from endpoint degrees so hubs move less than leaves.
    pub bias: f64,
}

impl Link {
    pub(crate) fn build(
        pairs: impl IntoIterator<Item = (usize, usize, f64)>,
        node_count: usize,
        strength: f64,
        distance: f64,
    ) -> Vec<Self> {
        let pairs: Vec<(usize, usize, f64)> = pairs.into_iter().collect();
        let mut degree = vec![0usize; node_count];
        for &(s, t, _) in &pairs {
            degree[s] += 1;
            degree[t] += 1;
        }
        pairs
            .into_iter()
            .map(|(source, target, weight)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                Self {
                    source,
                    target,
                    strength: strength * weight,
                    distance,
                    bias: ds / (ds + dt),
                }
            })
            .collect()
    }
}

pub(crate) fn apply(bodies: &mut [Body], links: &[Link], alpha: f64, rng: &mut XorShift64Star) {
    for link in links {
        let (s, t) = (link.source, link.target);
        let source = &bodies[s];
        let target = &bodies[t];
        let mut d: Vec2 = (target.position + target.velocity) - (source.position + source.velocity);
        if d.x == 0.0 {
            d.x = rng.jiggle();
        }
        if d.y == 0.0 {
            d.y = rng.jiggle();
        }
        let l = d.norm();
        let correction = d * ((l - link.distance) / l * alpha * link.strength);
        if !bodies[t].is_pinned() {
            bodies[t].velocity -= correction * link.bias;
        }
        if !bodies[s].is_pinned() {
            bodies[s].velocity += correction * (1.0 - link.bias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64) -> Body {
        Body::new(Vec2::new(x, y), 10.0)
    }

    #[test]
    fn bias_follows_endpoint_degree() {
        // 0 is a hub linked to 1, 2 and 3.
        let links = Link::build([(1, 0, 1.0), (2, 0, 1.0), (3, 0, 1.0)], 4, 0.2, 30.0);
        for link in &links {
            assert!((link.bias - 0.25).abs() < 1e-12);
            assert!((link.strength - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn stretched_links_pull_endpoints_together() {
        let mut bodies = vec![body(0.0, 0.0), body(100.0, 0.0)];
        let links = Link::build([(0, 1, 1.0)], 2, 0.2, 30.0);
        let mut rng = XorShift64Star::new(1);
        apply(&mut bodies, &links, 1.0, &mut rng);
        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
    }

    #[test]
    fn compressed_links_push_endpoints_apart() {
        let mut bodies = vec![body(0.0, 0.0), body(10.0, 0.0)];
        let links = Link::build([(0, 1, 1.0)], 2, 0.2, 30.0);
        let mut rng = XorShift64Star::new(1);
        apply(&mut bodies, &links, 1.0, &mut rng);
        assert!(bodies[0].velocity.x < 0.0);
        assert!(bodies[1].velocity.x > 0.0);
    }

    #[test]
    fn weight_scales_strength() {
        let links = Link::build([(0, 1, 2.5)], 2, 0.2, 30.0);
        assert!((links[0].strength - 0.5).abs() < 1e-12);
    }
}
