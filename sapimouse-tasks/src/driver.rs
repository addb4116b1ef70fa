//! Cyclic challenge state machine.

use crate::config::TaskConfig;
use crate::geometry::ChallengeGeometry;
use rand::Rng;
use sapimouse_core::{CHALLENGE_CYCLE, ChallengeKind, Point, PointerButton, Rect, SurfaceSize};

/// Notices emitted by driver transitions, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskNotice {
    /// A new challenge became current.
    NewTask { name: &'static str },
    /// The cursor wrapped past the last challenge.
    CycleComplete,
}

/// Drives the ordered, infinitely repeating challenge cycle.
///
/// Idle until the first [`advance`](TaskDriver::advance); satisfying the
/// current challenge advances automatically. Input that does not match the
/// current challenge — wrong button, miss, or geometry left over from a
/// cleared challenge — is ignored.
pub struct TaskDriver<R: Rng> {
    cycle: [ChallengeKind; 4],
    cursor: Option<usize>,
    geometry: Option<ChallengeGeometry>,
    drag_anchor: Option<Point>,
    surface: SurfaceSize,
    config: TaskConfig,
    rng: R,
}

impl<R: Rng> TaskDriver<R> {
    pub fn new(config: TaskConfig, surface: SurfaceSize, rng: R) -> Self {
        Self {
            cycle: CHALLENGE_CYCLE,
            cursor: None,
            geometry: None,
            drag_anchor: None,
            surface,
            config,
            rng,
        }
    }

    pub fn current_challenge(&self) -> Option<ChallengeKind> {
        self.cursor.map(|i| self.cycle[i])
    }

    pub fn geometry(&self) -> Option<&ChallengeGeometry> {
        self.geometry.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Regenerates the current geometry inside the new bounds.
    pub fn set_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        self.drag_anchor = None;
        if let Some(kind) = self.current_challenge() {
            self.geometry = Some(ChallengeGeometry::generate(
                kind,
                &mut self.rng,
                &self.config,
                self.surface,
            ));
        }
    }

    /// Back to idle; all challenge state cleared.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.geometry = None;
        self.drag_anchor = None;
    }

    /// Clears the current challenge and makes the next one current with
    /// fresh geometry, wrapping to the start of the cycle.
    pub fn advance(&mut self) -> Vec<TaskNotice> {
        let mut notices = Vec::new();
        self.geometry = None;
        self.drag_anchor = None;

        let next = match self.cursor {
            None => 0,
            Some(i) if i + 1 >= self.cycle.len() => {
                notices.push(TaskNotice::CycleComplete);
                0
            }
            Some(i) => i + 1,
        };
        self.cursor = Some(next);

        let kind = self.cycle[next];
        self.geometry = Some(ChallengeGeometry::generate(
            kind,
            &mut self.rng,
            &self.config,
            self.surface,
        ));
        notices.push(TaskNotice::NewTask {
            name: kind.display_name(),
        });
        notices
    }

    /// Geometry matching the current challenge, or `None` when input races
    /// a transition and the tag no longer lines up.
    fn active_geometry(&self) -> Option<ChallengeGeometry> {
        let kind = self.current_challenge()?;
        let geometry = self.geometry?;
        (geometry.kind() == kind).then_some(geometry)
    }

    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) -> Vec<TaskNotice> {
        let Some(geometry) = self.active_geometry() else {
            return Vec::new();
        };

        match geometry {
            ChallengeGeometry::Click { kind, shape } => {
                let wanted = match kind {
                    ChallengeKind::LeftClickShape => PointerButton::Primary,
                    ChallengeKind::RightClickShape => PointerButton::Secondary,
                    // Double-clicks arrive through `double_click`.
                    _ => return Vec::new(),
                };
                if button == wanted && shape.contains(pos) {
                    return self.advance();
                }
            }
            ChallengeGeometry::Drag { shape_center, .. } => {
                let grip = Rect::square(shape_center, self.config.shape_half_extent);
                if button == PointerButton::Primary && grip.contains(pos) {
                    self.drag_anchor = Some(pos);
                }
            }
        }
        Vec::new()
    }

    /// Translates the dragged shape by the pointer's incremental delta.
    pub fn pointer_move(&mut self, pos: Point) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        if let Some(ChallengeGeometry::Drag { shape_center, .. }) = &mut self.geometry {
            *shape_center = shape_center.translate(pos.x - anchor.x, pos.y - anchor.y);
            self.drag_anchor = Some(pos);
        }
    }

    /// Ends a drag. The challenge is satisfied only when the shape's center
    /// lands strictly inside the target; otherwise the shape stays where it
    /// was dropped and the user must re-drag.
    pub fn pointer_up(&mut self, _pos: Point) -> Vec<TaskNotice> {
        if self.drag_anchor.take().is_none() {
            return Vec::new();
        }
        if let Some(ChallengeGeometry::Drag {
            shape_center,
            target,
        }) = self.active_geometry()
        {
            if target.contains_strict(shape_center) {
                return self.advance();
            }
        }
        Vec::new()
    }

    pub fn double_click(&mut self, pos: Point) -> Vec<TaskNotice> {
        if let Some(ChallengeGeometry::Click {
            kind: ChallengeKind::DoubleClickShape,
            shape,
        }) = self.active_geometry()
        {
            if shape.contains(pos) {
                return self.advance();
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn driver(seed: u64) -> TaskDriver<StdRng> {
        TaskDriver::new(
            TaskConfig::default(),
            SurfaceSize::new(800.0, 600.0),
            StdRng::seed_from_u64(seed),
        )
    }

    fn shape_center(driver: &TaskDriver<StdRng>) -> Point {
        match driver.geometry().expect("geometry present") {
            ChallengeGeometry::Click { shape, .. } => shape.center,
            ChallengeGeometry::Drag { shape_center, .. } => *shape_center,
        }
    }

    fn target_center(driver: &TaskDriver<StdRng>) -> Point {
        match driver.geometry().expect("geometry present") {
            ChallengeGeometry::Drag { target, .. } => target.center,
            _ => panic!("expected drag geometry"),
        }
    }

    /// Performs the correct input for the current challenge.
    fn satisfy(driver: &mut TaskDriver<StdRng>) -> Vec<TaskNotice> {
        let pos = shape_center(driver);
        match driver.current_challenge().expect("a current challenge") {
            ChallengeKind::LeftClickShape => driver.pointer_down(pos, PointerButton::Primary),
            ChallengeKind::RightClickShape => driver.pointer_down(pos, PointerButton::Secondary),
            ChallengeKind::DoubleClickShape => driver.double_click(pos),
            ChallengeKind::DragShapeToTarget => {
                let goal = target_center(driver);
                driver.pointer_down(pos, PointerButton::Primary);
                driver.pointer_move(goal);
                driver.pointer_up(goal)
            }
        }
    }

    #[test]
    fn idle_until_first_advance() {
        let mut d = driver(1);
        assert_eq!(d.current_challenge(), None);
        assert!(d.pointer_down(Point::new(400.0, 300.0), PointerButton::Primary).is_empty());

        let notices = d.advance();
        assert_eq!(
            notices,
            vec![TaskNotice::NewTask {
                name: "Left Click Triangle"
            }]
        );
        assert_eq!(d.current_challenge(), Some(ChallengeKind::LeftClickShape));
    }

    #[test]
    fn completing_the_cycle_wraps_with_one_cycle_complete() {
        let mut d = driver(2);
        d.advance();

        let mut all_notices = Vec::new();
        for _ in 0..4 {
            all_notices.extend(satisfy(&mut d));
        }

        let wraps = all_notices
            .iter()
            .filter(|n| **n == TaskNotice::CycleComplete)
            .count();
        assert_eq!(wraps, 1);
        // Wrapped back to the first challenge with fresh geometry.
        assert_eq!(d.current_challenge(), Some(ChallengeKind::LeftClickShape));
        assert!(d.geometry().is_some());
        // The wrap notice precedes the new-task notice.
        assert_eq!(
            all_notices.last(),
            Some(&TaskNotice::NewTask {
                name: "Left Click Triangle"
            })
        );
    }

    #[test]
    fn wrong_button_and_misses_are_ignored() {
        let mut d = driver(3);
        d.advance();
        let pos = shape_center(&d);

        assert!(d.pointer_down(pos, PointerButton::Secondary).is_empty());
        assert!(d.pointer_down(Point::new(-10.0, -10.0), PointerButton::Primary).is_empty());
        assert_eq!(d.current_challenge(), Some(ChallengeKind::LeftClickShape));
    }

    #[test]
    fn primary_click_cannot_satisfy_right_click_challenge() {
        let mut d = driver(4);
        d.advance();
        let old_center = shape_center(&d);
        satisfy(&mut d);
        assert_eq!(d.current_challenge(), Some(ChallengeKind::RightClickShape));

        // A press where the previous challenge's shape stood does nothing.
        assert!(d.pointer_down(old_center, PointerButton::Primary).is_empty());
        assert_eq!(d.current_challenge(), Some(ChallengeKind::RightClickShape));
    }

    #[test]
    fn drag_outside_target_keeps_challenge_and_drop_position() {
        let mut d = driver(5);
        d.advance();
        satisfy(&mut d);
        satisfy(&mut d);
        satisfy(&mut d);
        assert_eq!(d.current_challenge(), Some(ChallengeKind::DragShapeToTarget));

        let start = shape_center(&d);
        let goal = target_center(&d);
        // Drop well short of the target.
        let drop = Point::new((start.x + goal.x) / 2.0, (start.y + goal.y) / 2.0);

        d.pointer_down(start, PointerButton::Primary);
        d.pointer_move(drop);
        let notices = d.pointer_up(drop);

        assert!(notices.is_empty());
        assert_eq!(d.current_challenge(), Some(ChallengeKind::DragShapeToTarget));
        assert!(shape_center(&d).distance_to(drop) < 1e-3);
        assert!(!d.is_dragging());

        // Re-dragging from the drop point still completes the challenge.
        d.pointer_down(drop, PointerButton::Primary);
        d.pointer_move(goal);
        let notices = d.pointer_up(goal);
        assert_eq!(
            notices,
            vec![TaskNotice::NewTask {
                name: "Left Click Triangle"
            }]
        );
    }

    #[test]
    fn drag_press_outside_shape_does_not_grab() {
        let mut d = driver(6);
        d.advance();
        satisfy(&mut d);
        satisfy(&mut d);
        satisfy(&mut d);

        let start = shape_center(&d);
        let miss = Point::new(start.x + 100.0, start.y + 100.0);
        d.pointer_down(miss, PointerButton::Primary);
        assert!(!d.is_dragging());

        d.pointer_move(Point::new(miss.x + 50.0, miss.y));
        assert_eq!(shape_center(&d), start);
    }

    #[test]
    fn double_click_only_satisfies_double_click_challenge() {
        let mut d = driver(7);
        d.advance();
        let pos = shape_center(&d);
        assert!(d.double_click(pos).is_empty());
        assert_eq!(d.current_challenge(), Some(ChallengeKind::LeftClickShape));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut d = driver(8);
        d.advance();
        d.reset();

        assert_eq!(d.current_challenge(), None);
        assert!(d.geometry().is_none());
        assert!(d.pointer_down(Point::new(400.0, 300.0), PointerButton::Primary).is_empty());
    }

    #[test]
    fn set_surface_regenerates_geometry_in_bounds() {
        let mut d = driver(9);
        d.advance();
        let small = SurfaceSize::new(300.0, 300.0);
        d.set_surface(small);

        let center = shape_center(&d);
        let padding = d.config().surface_padding;
        assert!(center.x >= padding && center.x <= small.width - padding);
        assert!(center.y >= padding && center.y <= small.height - padding);
    }
}
