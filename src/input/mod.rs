//! # Input Module
//!
//! Turns keyboard, mouse and touch state into one [`FrameInput`] snapshot
//! per frame.

pub mod touch;

pub use touch::*;

use crate::game::{FrameInput, InteractionController};
use macroquad::prelude::*;

/// Input handler for processing player commands.
///
/// Directions are read as held keys; interact, debug toggle and quit fire
/// once per key press.
pub struct InputHandler {
    /// Touch layout, present only when touch controls are enabled
    pub touch_controls: Option<TouchControls>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a keyboard-only input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitchfork_path::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.touch_controls.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            touch_controls: None,
        }
    }

    /// Creates an input handler that also reads taps on the given layout.
    pub fn with_touch(controls: TouchControls) -> Self {
        Self {
            touch_controls: Some(controls),
        }
    }

    /// Polls all input sources for this frame.
    pub fn poll(&self, interaction: &InteractionController) -> FrameInput {
        let keyboard = self.process_macroquad_input();
        match &self.touch_controls {
            Some(controls) => keyboard.merge(self.process_touch_input(controls, interaction)),
            None => keyboard,
        }
    }

    /// Processes keyboard state.
    fn process_macroquad_input(&self) -> FrameInput {
        FrameInput {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            interact: is_key_pressed(KeyCode::Space),
            toggle_debug: is_key_pressed(KeyCode::C),
            quit: is_key_pressed(KeyCode::Escape) || is_quit_requested(),
        }
    }

    /// Processes touches and the left mouse button against the touch layout.
    fn process_touch_input(
        &self,
        controls: &TouchControls,
        interaction: &InteractionController,
    ) -> FrameInput {
        let mut input = FrameInput::default();

        for touch in touches() {
            let (x, y) = (touch.position.x as i32, touch.position.y as i32);
            let signals = match touch.phase {
                TouchPhase::Started => controls.tap(x, y, interaction),
                TouchPhase::Moved | TouchPhase::Stationary => controls.hold(x, y),
                TouchPhase::Ended | TouchPhase::Cancelled => FrameInput::default(),
            };
            input = input.merge(signals);
        }

        let (mx, my) = mouse_position();
        let (mx, my) = (mx as i32, my as i32);
        if is_mouse_button_pressed(MouseButton::Left) {
            input = input.merge(controls.tap(mx, my, interaction));
        } else if is_mouse_button_down(MouseButton::Left) {
            input = input.merge(controls.hold(mx, my));
        }

        input
    }
}
