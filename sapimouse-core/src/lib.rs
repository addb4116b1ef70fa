pub mod challenge;
pub mod event;
pub mod geometry;
pub mod label;

pub use challenge::{CHALLENGE_CYCLE, ChallengeKind};
pub use event::PointerButton;
pub use geometry::{Point, Rect, SurfaceSize};
pub use label::SessionLabel;
