//! # Touch Controls
//!
//! Virtual D-pad and action button layout, and the mapping from pointer
//! positions to the same logical signals the keyboard produces.

use crate::game::{DialogueState, FrameInput, InteractionController, PixelRect};
use serde::{Deserialize, Serialize};

/// Control size in tiles.
const CONTROL_SIZE_IN_TILES: f32 = 1.2;

/// One on-screen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchButton {
    Up,
    Left,
    Down,
    Right,
    Action,
}

impl TouchButton {
    /// Label drawn on the button.
    pub fn label(self) -> &'static str {
        match self {
            TouchButton::Up => "^",
            TouchButton::Left => "<",
            TouchButton::Down => "v",
            TouchButton::Right => ">",
            TouchButton::Action => "!",
        }
    }

    /// Signals this button produces while held.
    fn held_signal(self) -> FrameInput {
        let mut input = FrameInput::default();
        match self {
            TouchButton::Up => input.up = true,
            TouchButton::Left => input.left = true,
            TouchButton::Down => input.down = true,
            TouchButton::Right => input.right = true,
            TouchButton::Action => {}
        }
        input
    }
}

/// Screen layout of the touch controls.
///
/// # Examples
///
/// ```
/// use pitchfork_path::{TouchButton, TouchControls};
///
/// let controls = TouchControls::layout(1024, 768, 160);
/// let action = controls.rect(TouchButton::Action).unwrap();
/// assert_eq!(controls.button_at(action.center_x(), action.center_y()), Some(TouchButton::Action));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchControls {
    buttons: Vec<(TouchButton, PixelRect)>,
}

impl TouchControls {
    /// D-pad in the bottom-left corner, action button in the bottom-right.
    pub fn layout(screen_width: i32, screen_height: i32, tile_size: i32) -> Self {
        let size = (tile_size as f32 * CONTROL_SIZE_IN_TILES) as i32;
        let padding = tile_size / 2;
        let pad_row = screen_height - size * 2 - padding;
        let buttons = vec![
            (
                TouchButton::Up,
                PixelRect::new(padding, screen_height - size * 3 - padding, size, size),
            ),
            (TouchButton::Left, PixelRect::new(padding - size, pad_row, size, size)),
            (TouchButton::Down, PixelRect::new(padding, pad_row, size, size)),
            (TouchButton::Right, PixelRect::new(padding + size, pad_row, size, size)),
            (
                TouchButton::Action,
                PixelRect::new(
                    screen_width - size - padding,
                    screen_height - size - padding,
                    size,
                    size,
                ),
            ),
        ];
        Self { buttons }
    }

    pub fn buttons(&self) -> &[(TouchButton, PixelRect)] {
        &self.buttons
    }

    pub fn rect(&self, button: TouchButton) -> Option<PixelRect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, rect)| *rect)
    }

    /// First button, in layout order, under the point.
    pub fn button_at(&self, x: i32, y: i32) -> Option<TouchButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains_point(x, y))
            .map(|(button, _)| *button)
    }

    /// Signals for a pointer held down at `(x, y)`: directions only.
    pub fn hold(&self, x: i32, y: i32) -> FrameInput {
        self.button_at(x, y)
            .map(TouchButton::held_signal)
            .unwrap_or_default()
    }

    /// Signals for a new tap at `(x, y)`.
    ///
    /// The action button interacts. Unless a dialogue box is open, tapping
    /// inside an NPC's dialogue zone interacts as well, which also dismisses
    /// the journal.
    pub fn tap(&self, x: i32, y: i32, interaction: &InteractionController) -> FrameInput {
        let mut input = self.hold(x, y);
        if self.button_at(x, y) == Some(TouchButton::Action) {
            input.interact = true;
        }
        let talking = matches!(interaction.state(), DialogueState::Talking { .. });
        if !talking && interaction.target_at_point(x, y).is_some() {
            input.interact = true;
        }
        input
    }
}
