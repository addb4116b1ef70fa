/// The closed set of interaction challenges, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    LeftClickShape,
    RightClickShape,
    DoubleClickShape,
    DragShapeToTarget,
}

/// Fixed presentation order; the driver wraps back to the start after the
/// last entry.
pub const CHALLENGE_CYCLE: [ChallengeKind; 4] = [
    ChallengeKind::LeftClickShape,
    ChallengeKind::RightClickShape,
    ChallengeKind::DoubleClickShape,
    ChallengeKind::DragShapeToTarget,
];

impl ChallengeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChallengeKind::LeftClickShape => "Left Click Triangle",
            ChallengeKind::RightClickShape => "Right Click Rev Triangle",
            ChallengeKind::DoubleClickShape => "Double Click Square",
            ChallengeKind::DragShapeToTarget => "Drag Circle",
        }
    }

    pub fn is_drag(&self) -> bool {
        matches!(self, ChallengeKind::DragShapeToTarget)
    }
}
