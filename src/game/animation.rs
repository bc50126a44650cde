//! # Character Animation
//!
//! Frame selection for `{idle, run} × direction`. The controller never holds
//! textures: it works on frame counts and yields a [`FrameRef`] that the
//! renderer resolves against the loaded spritesheets.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// Milliseconds per frame while running.
pub const RUN_FRAME_MS: f32 = 100.0;

/// Milliseconds per frame while idle.
pub const IDLE_FRAME_MS: f32 = 200.0;

/// Whether the actor moved this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Idle,
    Run,
}

impl MovementState {
    /// Time each frame stays on screen in this state.
    pub fn frame_duration_ms(self) -> f32 {
        match self {
            MovementState::Idle => IDLE_FRAME_MS,
            MovementState::Run => RUN_FRAME_MS,
        }
    }
}

/// Number of usable frames per spritesheet row, for both states.
///
/// Row `n` holds the frames for the direction with index `n`. Rows can be
/// short or empty when a sheet is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSet {
    pub idle: Vec<usize>,
    pub run: Vec<usize>,
}

impl AnimationSet {
    pub fn new(idle: Vec<usize>, run: Vec<usize>) -> Self {
        Self { idle, run }
    }

    /// Same frame count in all four rows of both sheets.
    pub fn uniform(frames_per_row: usize) -> Self {
        Self::new(vec![frames_per_row; 4], vec![frames_per_row; 4])
    }

    pub fn rows(&self, state: MovementState) -> &[usize] {
        match state {
            MovementState::Idle => &self.idle,
            MovementState::Run => &self.run,
        }
    }

    /// Picks the row and its length for a state and direction.
    ///
    /// The direction index is clamped to the available rows; an empty row
    /// falls back to row 0. `None` when nothing is drawable.
    pub fn resolve(&self, state: MovementState, direction: Direction) -> Option<(usize, usize)> {
        let rows = self.rows(state);
        let last = rows.len().checked_sub(1)?;
        let row = direction.index().min(last);
        if rows[row] > 0 {
            return Some((row, rows[row]));
        }
        (rows[0] > 0).then_some((0, rows[0]))
    }
}

/// A specific frame of a spritesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRef {
    pub state: MovementState,
    pub row: usize,
    pub index: usize,
}

/// Per-actor animation state machine.
///
/// # Examples
///
/// ```
/// use pitchfork_path::{AnimationController, AnimationSet, Direction, MovementState};
///
/// let mut animation = AnimationController::new(AnimationSet::uniform(8));
/// animation.update(16.0, true, Direction::Left);
/// assert_eq!(animation.state(), MovementState::Run);
///
/// animation.update(16.0, false, Direction::Down);
/// assert_eq!(animation.state(), MovementState::Idle);
/// assert_eq!(animation.direction(), Direction::Left);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationController {
    set: AnimationSet,
    state: MovementState,
    direction: Direction,
    timer_ms: f32,
    frame_index: usize,
    current: Option<FrameRef>,
}

impl AnimationController {
    /// Creates an idle, down-facing controller showing the first idle frame
    /// when one exists.
    pub fn new(set: AnimationSet) -> Self {
        let current = set
            .resolve(MovementState::Idle, Direction::Down)
            .map(|(row, _)| FrameRef {
                state: MovementState::Idle,
                row,
                index: 0,
            });
        Self {
            set,
            state: MovementState::Idle,
            direction: Direction::Down,
            timer_ms: 0.0,
            frame_index: 0,
            current,
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Frame to draw, `None` when no frame has ever been available.
    pub fn current_frame(&self) -> Option<FrameRef> {
        self.current
    }

    /// Advances the state machine by `dt_ms`.
    ///
    /// `moving` switches to run and adopts `direction`; otherwise the actor
    /// idles facing the last direction it moved in. When the resolved
    /// sequence is empty the previously shown frame stays.
    pub fn update(&mut self, dt_ms: f32, moving: bool, direction: Direction) {
        if moving {
            self.state = MovementState::Run;
            self.direction = direction;
        } else {
            self.state = MovementState::Idle;
        }

        self.timer_ms += dt_ms;
        if self.timer_ms >= self.state.frame_duration_ms() {
            self.timer_ms = 0.0;
            self.frame_index += 1;
        }

        let Some((row, len)) = self.set.resolve(self.state, self.direction) else {
            return;
        };
        if self.frame_index >= len {
            self.frame_index = 0;
        }
        self.current = Some(FrameRef {
            state: self.state,
            row,
            index: self.frame_index,
        });
    }
}
