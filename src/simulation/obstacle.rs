//! Pipe-like obstacles with a vertical opening.

use super::bird::Bird;

/// A vertical wall of width `width` starting at `x`, open between
/// `gap_center_y - gap_half_height` and `gap_center_y + gap_half_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f32,
    /// Vertical centre of the opening.
    pub gap_center_y: f32,
    /// Half the height of the opening.
    pub gap_half_height: f32,
    /// Horizontal thickness.
    pub width: f32,
}

impl Obstacle {
    /// Creates an obstacle.
    pub fn new(x: f32, gap_center_y: f32, gap_half_height: f32, width: f32) -> Self {
        Self {
            x,
            gap_center_y,
            gap_half_height,
            width,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top of the opening.
    pub fn gap_top(&self) -> f32 {
        self.gap_center_y - self.gap_half_height
    }

    /// Bottom of the opening.
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center_y + self.gap_half_height
    }

    /// Moves the obstacle left by `distance`.
    pub fn shift(&mut self, distance: f32) {
        self.x -= distance;
    }

    /// Whether the bird's body overlaps the obstacle horizontally and leaves
    /// the opening vertically.
    pub fn is_colliding(&self, bird: &Bird) -> bool {
        let r = bird.radius();
        if bird.x() + r < self.x || bird.x() - r > self.right() {
            return false;
        }
        bird.y() - r < self.gap_top() || bird.y() + r > self.gap_bottom()
    }
}
