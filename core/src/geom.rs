use serde::{Deserialize, Serialize};

use crate::scenario::TargetArea;

/// Side of the square a draggable item occupies on the surface.
pub const ITEM_SIZE: f32 = 50.0;
/// Home slot layout for idle items: a row along the top edge.
pub const ITEM_HOME_X: f32 = 20.0;
pub const ITEM_HOME_STEP: f32 = 60.0;
pub const ITEM_HOME_Y: f32 = 20.0;
/// Proximity reaches zero this many radii away from the target center.
pub const PROXIMITY_FALLOFF: f32 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub fn distance(a: Position, b: Position) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Boundary inclusive: a release exactly on the circle counts as a hit.
pub fn within_target(pos: Position, target: &TargetArea) -> bool {
    distance(pos, target.center()) <= target.radius
}

/// 1.0 at the target center, fading linearly to 0.0 at two radii out.
pub fn proximity(pos: Position, target: &TargetArea) -> f32 {
    if target.radius <= 0.0 {
        return 0.0;
    }
    let d = distance(pos, target.center());
    (1.0 - d / (target.radius * PROXIMITY_FALLOFF)).max(0.0)
}

/// Keeps the item square fully inside the surface. A surface smaller than
/// the item clamps to the origin.
pub fn clamp_to_surface(x: f32, y: f32, surface_w: f32, surface_h: f32) -> Position {
    let max_x = (surface_w - ITEM_SIZE).max(0.0);
    let max_y = (surface_h - ITEM_SIZE).max(0.0);
    Position {
        x: x.clamp(0.0, max_x),
        y: y.clamp(0.0, max_y),
    }
}

/// Default slot for the item at `index` when it is not being dragged.
pub fn home_position(index: usize) -> Position {
    Position {
        x: ITEM_HOME_X + ITEM_HOME_STEP * index as f32,
        y: ITEM_HOME_Y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(x: f32, y: f32, radius: f32) -> TargetArea {
        TargetArea { x, y, radius }
    }

    #[test]
    fn within_target_includes_boundary() {
        let t = target(100.0, 100.0, 40.0);
        assert!(within_target(Position::new(140.0, 100.0), &t));
        assert!(!within_target(Position::new(140.1, 100.0), &t));
    }

    #[test]
    fn proximity_scales_over_two_radii() {
        let t = target(100.0, 100.0, 40.0);
        assert_eq!(proximity(Position::new(100.0, 100.0), &t), 1.0);
        let half = proximity(Position::new(140.0, 100.0), &t);
        assert!((half - 0.5).abs() < 1.0e-6);
        assert_eq!(proximity(Position::new(100.0, 200.0), &t), 0.0);
    }

    #[test]
    fn proximity_zero_radius_is_zero() {
        let t = target(10.0, 10.0, 0.0);
        assert_eq!(proximity(Position::new(10.0, 10.0), &t), 0.0);
    }

    #[test]
    fn clamp_keeps_item_inside() {
        let p = clamp_to_surface(900.0, -30.0, 400.0, 300.0);
        assert_eq!(p, Position::new(350.0, 0.0));
    }

    #[test]
    fn clamp_degenerate_surface() {
        let p = clamp_to_surface(25.0, 25.0, 30.0, 30.0);
        assert_eq!(p, Position::new(0.0, 0.0));
    }

    #[test]
    fn home_positions_form_a_row() {
        assert_eq!(home_position(0), Position::new(20.0, 20.0));
        assert_eq!(home_position(2), Position::new(140.0, 20.0));
    }
}
