//! # Game Module
//!
//! Core game logic: the tile map, pixel walkability, collision, animation,
//! NPC interaction and the state that ties them together.
//!
//! Nothing in this module draws. Every decision is a plain function of the
//! state passed in, which is what makes the whole frame step testable.

pub mod actor;
pub mod animation;
pub mod collision;
pub mod interaction;
pub mod map;
pub mod state;
pub mod walkability;
pub mod world;

pub use actor::*;
pub use animation::*;
pub use collision::*;
pub use interaction::*;
pub use map::*;
pub use state::*;
pub use walkability::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels.
///
/// Edges follow the half-open convention: a rectangle covers
/// `x..x + w` horizontally and `y..y + h` vertically, so `right()` and
/// `bottom()` are the first pixels *outside* it.
///
/// # Examples
///
/// ```
/// use pitchfork_path::PixelRect;
///
/// let rect = PixelRect::new(10, 20, 30, 40);
/// assert_eq!(rect.right(), 40);
/// assert_eq!(rect.bottom(), 60);
/// assert_eq!(rect.mid_bottom(), (25, 60));
/// assert!(rect.contains_point(10, 20));
/// assert!(!rect.contains_point(40, 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of the given size whose bottom-centre is `(x, y)`.
    pub fn from_mid_bottom(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x - w / 2, y - h, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Bottom-centre point, the anchor shared by sprites and hitboxes.
    pub fn mid_bottom(&self) -> (i32, i32) {
        (self.center_x(), self.bottom())
    }

    /// Moves the rectangle so its bottom-centre is `(x, y)`.
    pub fn set_mid_bottom(&mut self, x: i32, y: i32) {
        self.x = x - self.w / 2;
        self.y = y - self.h;
    }

    /// Returns a copy shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether the two rectangles share at least one pixel.
    ///
    /// Touching edges do not count and empty rectangles never intersect.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Converts to a macroquad rectangle for drawing.
    pub fn to_rect(&self) -> macroquad::math::Rect {
        macroquad::math::Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

/// Facing direction of an actor.
///
/// The discriminants match the row order of the character spritesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    /// Spritesheet row index for this direction.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit displacement for this direction, screen coordinates (y down).
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = PixelRect::new(-5, 3, 10, 7);
        assert_eq!(rect.left(), -5);
        assert_eq!(rect.right(), 5);
        assert_eq!(rect.top(), 3);
        assert_eq!(rect.bottom(), 10);
        assert_eq!(rect.center_x(), 0);
        assert_eq!(rect.center_y(), 6);
    }

    #[test]
    fn test_rect_intersection_is_strict() {
        let a = PixelRect::new(0, 0, 10, 10);
        assert!(a.intersects(&PixelRect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(0, 10, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(2, 2, 0, 5)));
    }

    #[test]
    fn test_rect_mid_bottom_round_trip() {
        let mut sprite = PixelRect::new(0, 0, 192, 192);
        sprite.set_mid_bottom(500, 700);
        assert_eq!(sprite.mid_bottom(), (500, 700));
        assert_eq!(PixelRect::from_mid_bottom(500, 700, 192, 192), sprite);
    }

    #[test]
    fn test_direction_indices() {
        let indices: Vec<usize> = [Direction::Down, Direction::Left, Direction::Right, Direction::Up]
            .iter()
            .map(|d| d.index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(Direction::Left.to_delta(), (-1, 0));
        assert_eq!(Direction::Up.to_delta(), (0, -1));
    }
}
