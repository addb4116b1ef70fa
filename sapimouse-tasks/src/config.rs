use serde::{Deserialize, Serialize};

/// Challenge placement and hit-testing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Minimum distance between generated geometry and the surface edges.
    pub surface_padding: f32,
    /// Minimum separation between the drag shape and its target.
    pub min_drag_distance: f32,
    /// Half extent of the clickable/draggable shapes.
    pub shape_half_extent: f32,
    /// Half extent of the drag target box.
    pub target_half_extent: f32,
    /// Bound on the drag-target rejection loop; on exhaustion the target
    /// falls back to the farthest padded corner.
    pub max_placement_attempts: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            surface_padding: 40.0,
            min_drag_distance: 150.0,
            shape_half_extent: 20.0,
            target_half_extent: 25.0,
            max_placement_attempts: 4096,
        }
    }
}
