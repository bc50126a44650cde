//! # Actor
//!
//! The player character: a small physical hitbox at the feet and a larger
//! sprite skin that follows it.

use crate::game::{AnimationController, AnimationSet, Direction, FrameInput, MovementState, PixelRect};
use serde::{Deserialize, Serialize};

/// Hitbox width as a fraction of the rendered sprite width.
const HITBOX_WIDTH_RATIO: f32 = 0.4;

/// Hitbox height as a fraction of the rendered sprite height.
const HITBOX_HEIGHT_RATIO: f32 = 0.2;

/// Displacement requested by the held direction keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
    /// Direction of the last held key in evaluation order
    pub direction: Option<Direction>,
}

impl Displacement {
    /// Evaluates held keys in the order left, right, up, down. Each adds its
    /// step and later keys override the facing set by earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitchfork_path::{Direction, Displacement, FrameInput};
    ///
    /// let input = FrameInput { left: true, up: true, ..FrameInput::default() };
    /// let step = Displacement::from_input(&input, 4);
    /// assert_eq!((step.dx, step.dy), (-4, -4));
    /// assert_eq!(step.direction, Some(Direction::Up));
    /// ```
    pub fn from_input(input: &FrameInput, speed: i32) -> Self {
        let mut step = Self::default();
        let held = [
            (input.left, Direction::Left),
            (input.right, Direction::Right),
            (input.up, Direction::Up),
            (input.down, Direction::Down),
        ];
        for (pressed, direction) in held {
            if pressed {
                let (x, y) = direction.to_delta();
                step.dx += x * speed;
                step.dy += y * speed;
                step.direction = Some(direction);
            }
        }
        step
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Player character state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Physical body used for collision and proximity
    pub hitbox: PixelRect,
    /// Visual bounds, re-anchored to the hitbox every update
    pub sprite_rect: PixelRect,
    pub animation: AnimationController,
}

impl Actor {
    /// Spawns the actor centred on a tile.
    ///
    /// The sprite's top-left is placed half an *unscaled* frame up and left
    /// of `center`; the hitbox sits centred at the bottom of the sprite.
    pub fn spawn(center: (i32, i32), frame_size: i32, sprite_size: i32, frames: AnimationSet) -> Self {
        let (x, y) = (center.0 - frame_size / 2, center.1 - frame_size / 2);
        let hitbox_w = (sprite_size as f32 * HITBOX_WIDTH_RATIO) as i32;
        let hitbox_h = (sprite_size as f32 * HITBOX_HEIGHT_RATIO) as i32;
        let hitbox = PixelRect::new(
            x + (sprite_size - hitbox_w) / 2,
            y + (sprite_size - hitbox_h),
            hitbox_w,
            hitbox_h,
        );
        let mut actor = Self {
            hitbox,
            sprite_rect: PixelRect::new(x, y, sprite_size, sprite_size),
            animation: AnimationController::new(frames),
        };
        actor.anchor_sprite();
        actor
    }

    /// Puts the sprite's bottom-centre on the hitbox's bottom-centre.
    pub fn anchor_sprite(&mut self) {
        let (x, y) = self.hitbox.mid_bottom();
        self.sprite_rect.set_mid_bottom(x, y);
    }

    /// Advances animation and re-anchors the sprite.
    pub fn update_animation(&mut self, dt_ms: f32, moving: bool, direction: Direction) {
        self.animation.update(dt_ms, moving, direction);
        self.anchor_sprite();
    }

    pub fn direction(&self) -> Direction {
        self.animation.direction()
    }

    pub fn movement(&self) -> MovementState {
        self.animation.state()
    }
}
