use crate::geometry::smooth::smooth_continuous;
use crate::model::{Anchor, Color, Curve, Size, Vec2};

// Angular step between anchors of the starter knot (radians).
const KNOT_STEP: f32 = 0.3;

/// The starter knot: anchors every 0.3 rad around a circle, smoothed closed.
pub fn default_knot(center: Vec2, radius: f32, stroke: Color, width: f32) -> Curve {
    let count = (std::f32::consts::TAU / KNOT_STEP) as usize + 1;
    let mut anchors: Vec<Anchor> = (0..count)
        .map(|i| {
            let t = i as f32 * KNOT_STEP;
            Anchor::corner(Vec2::new(center.x + radius * t.cos(), center.y + radius * t.sin()))
        })
        .collect();
    smooth_continuous(&mut anchors, true);
    Curve::new(anchors, true, stroke, width)
}

/// Center and radius of the starter knot for a viewport.
pub fn knot_frame(viewport: Size, radius_fraction: f32) -> (Vec2, f32) {
    let center = Vec2::new(viewport.width * 0.5, viewport.height * 0.5);
    (center, viewport.width.min(viewport.height) * radius_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_knot_shape() {
        let (center, r) = knot_frame(Size { width: 800.0, height: 600.0 }, 0.25);
        assert_eq!(center, Vec2::new(400.0, 300.0));
        assert_eq!(r, 150.0);
        let knot = default_knot(center, r, Color::BLUE, 20.0);
        assert_eq!(knot.anchors.len(), 21);
        assert!(knot.closed);
        for a in &knot.anchors {
            assert!(((a.point - center).length() - r).abs() < 1e-3);
            assert!(!a.handle_out.is_zero());
        }
    }
}
