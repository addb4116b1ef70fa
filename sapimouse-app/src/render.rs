//! Challenge shape drawing.

use sapimouse_core::ChallengeKind;
use sapimouse_tasks::ChallengeGeometry;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

fn solid(r: u8, g: u8, b: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(r, g, b, 255));
    paint.anti_alias = true;
    paint
}

/// Clears the canvas and draws the current challenge geometry.
pub fn draw_scene(canvas: &mut Pixmap, geometry: Option<&ChallengeGeometry>, half_extent: f32) {
    canvas.fill(Color::from_rgba8(211, 211, 211, 255));

    let Some(geometry) = geometry else {
        return;
    };

    match geometry {
        ChallengeGeometry::Click { kind, shape } => {
            let (cx, cy) = (shape.center.x, shape.center.y);
            match kind {
                ChallengeKind::LeftClickShape => {
                    // Upward-pointing orange triangle.
                    let mut pb = PathBuilder::new();
                    pb.move_to(cx, cy - half_extent);
                    pb.line_to(cx - half_extent, cy + half_extent);
                    pb.line_to(cx + half_extent, cy + half_extent);
                    pb.close();
                    canvas.fill_path(
                        &pb.finish().unwrap(),
                        &solid(255, 165, 0),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
                ChallengeKind::RightClickShape => {
                    // Downward-pointing blue triangle.
                    let mut pb = PathBuilder::new();
                    pb.move_to(cx, cy + half_extent);
                    pb.line_to(cx - half_extent, cy - half_extent);
                    pb.line_to(cx + half_extent, cy - half_extent);
                    pb.close();
                    canvas.fill_path(
                        &pb.finish().unwrap(),
                        &solid(0, 0, 255),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
                ChallengeKind::DoubleClickShape => {
                    if let Some(rect) = Rect::from_xywh(
                        cx - half_extent,
                        cy - half_extent,
                        half_extent * 2.0,
                        half_extent * 2.0,
                    ) {
                        canvas.fill_rect(rect, &solid(0, 128, 0), Transform::identity(), None);
                    }
                }
                ChallengeKind::DragShapeToTarget => {}
            }
        }
        ChallengeGeometry::Drag {
            shape_center,
            target,
        } => {
            let mut pb = PathBuilder::new();
            pb.push_circle(shape_center.x, shape_center.y, half_extent);
            canvas.fill_path(
                &pb.finish().unwrap(),
                &solid(128, 0, 128),
                FillRule::Winding,
                Transform::identity(),
                None,
            );

            if let Some(rect) = Rect::from_ltrb(
                target.left(),
                target.top(),
                target.right(),
                target.bottom(),
            ) {
                let outline = PathBuilder::from_rect(rect);
                let stroke = Stroke {
                    width: 2.0,
                    ..Stroke::default()
                };
                canvas.stroke_path(
                    &outline,
                    &solid(255, 0, 0),
                    &stroke,
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}
