//! Randomized per-challenge geometry.

use crate::config::TaskConfig;
use rand::Rng;
use sapimouse_core::{ChallengeKind, Point, Rect, SurfaceSize};
use tracing::warn;

/// Placement of the current challenge, tagged with the kind it was
/// generated for so stale input can be rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChallengeGeometry {
    Click { kind: ChallengeKind, shape: Rect },
    Drag { shape_center: Point, target: Rect },
}

impl ChallengeGeometry {
    pub fn kind(&self) -> ChallengeKind {
        match self {
            ChallengeGeometry::Click { kind, .. } => *kind,
            ChallengeGeometry::Drag { .. } => ChallengeKind::DragShapeToTarget,
        }
    }

    pub fn generate<R: Rng>(
        kind: ChallengeKind,
        rng: &mut R,
        config: &TaskConfig,
        surface: SurfaceSize,
    ) -> Self {
        match kind {
            ChallengeKind::DragShapeToTarget => {
                let shape_center = random_point(rng, config, surface);
                let target_center = place_drag_target(rng, config, surface, shape_center);
                ChallengeGeometry::Drag {
                    shape_center,
                    target: Rect::square(target_center, config.target_half_extent),
                }
            }
            kind => ChallengeGeometry::Click {
                kind,
                shape: Rect::square(random_point(rng, config, surface), config.shape_half_extent),
            },
        }
    }
}

fn padded_span(limit: f32, padding: f32) -> (f32, f32) {
    let lo = padding;
    let hi = limit - padding;
    if hi < lo {
        // Surface smaller than twice the padding; collapse to the midpoint.
        let mid = limit / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Uniform sample inside the padded playing region.
pub fn random_point<R: Rng>(rng: &mut R, config: &TaskConfig, surface: SurfaceSize) -> Point {
    let (x_lo, x_hi) = padded_span(surface.width, config.surface_padding);
    let (y_lo, y_hi) = padded_span(surface.height, config.surface_padding);
    Point::new(rng.random_range(x_lo..=x_hi), rng.random_range(y_lo..=y_hi))
}

/// Rejection-samples a target center separated from `shape_center` by more
/// than the configured minimum distance. The loop is bounded; on exhaustion
/// the farthest padded corner is used, which maximizes separation
/// deterministically even on surfaces too small for the constraint.
fn place_drag_target<R: Rng>(
    rng: &mut R,
    config: &TaskConfig,
    surface: SurfaceSize,
    shape_center: Point,
) -> Point {
    for _ in 0..config.max_placement_attempts {
        let candidate = random_point(rng, config, surface);
        if candidate.distance_to(shape_center) > config.min_drag_distance {
            return candidate;
        }
    }

    let fallback = farthest_padded_corner(config, surface, shape_center);
    warn!(
        distance = fallback.distance_to(shape_center),
        "drag target placement exhausted {} attempts, using farthest corner",
        config.max_placement_attempts
    );
    fallback
}

fn farthest_padded_corner(config: &TaskConfig, surface: SurfaceSize, from: Point) -> Point {
    let (x_lo, x_hi) = padded_span(surface.width, config.surface_padding);
    let (y_lo, y_hi) = padded_span(surface.height, config.surface_padding);
    [
        Point::new(x_lo, y_lo),
        Point::new(x_hi, y_lo),
        Point::new(x_lo, y_hi),
        Point::new(x_hi, y_hi),
    ]
    .into_iter()
    .max_by(|a, b| {
        a.distance_to(from)
            .partial_cmp(&b.distance_to(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
    .expect("corner list is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn surface() -> SurfaceSize {
        SurfaceSize::new(800.0, 600.0)
    }

    fn in_padded_bounds(p: Point, config: &TaskConfig, s: SurfaceSize) -> bool {
        p.x >= config.surface_padding
            && p.x <= s.width - config.surface_padding
            && p.y >= config.surface_padding
            && p.y <= s.height - config.surface_padding
    }

    #[test]
    fn drag_pairs_respect_distance_and_padding() {
        let config = TaskConfig::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let geometry = ChallengeGeometry::generate(
                ChallengeKind::DragShapeToTarget,
                &mut rng,
                &config,
                surface(),
            );
            let ChallengeGeometry::Drag {
                shape_center,
                target,
            } = geometry
            else {
                panic!("expected drag geometry");
            };

            assert!(shape_center.distance_to(target.center) > config.min_drag_distance);
            assert!(in_padded_bounds(shape_center, &config, surface()));
            assert!(in_padded_bounds(target.center, &config, surface()));
        }
    }

    #[test]
    fn click_shapes_stay_inside_padded_bounds() {
        let config = TaskConfig::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let geometry = ChallengeGeometry::generate(
                ChallengeKind::LeftClickShape,
                &mut rng,
                &config,
                surface(),
            );
            let ChallengeGeometry::Click { kind, shape } = geometry else {
                panic!("expected click geometry");
            };
            assert_eq!(kind, ChallengeKind::LeftClickShape);
            assert!(in_padded_bounds(shape.center, &config, surface()));
        }
    }

    #[test]
    fn tiny_surface_falls_back_to_farthest_corner() {
        // Padded region is 70x70; no pair can be 150 apart, so the bounded
        // loop must exhaust and fall back without panicking.
        let config = TaskConfig {
            max_placement_attempts: 16,
            ..TaskConfig::default()
        };
        let tiny = SurfaceSize::new(150.0, 150.0);
        let mut rng = StdRng::seed_from_u64(7);

        let geometry =
            ChallengeGeometry::generate(ChallengeKind::DragShapeToTarget, &mut rng, &config, tiny);
        let ChallengeGeometry::Drag {
            shape_center,
            target,
        } = geometry
        else {
            panic!("expected drag geometry");
        };

        let best = farthest_padded_corner(&config, tiny, shape_center);
        assert_eq!(target.center, best);
        assert!(in_padded_bounds(target.center, &config, tiny));
    }

    #[test]
    fn degenerate_surface_collapses_to_midpoint() {
        let config = TaskConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let p = random_point(&mut rng, &config, SurfaceSize::new(10.0, 10.0));
        assert_eq!(p, Point::new(5.0, 5.0));
    }
}
