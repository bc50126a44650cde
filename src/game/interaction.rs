//! # Interaction and Dialogue
//!
//! Tracks which NPC the player can talk to, steps through scripted lines on
//! each interact signal and opens the journal once every NPC has been heard
//! out.

use crate::game::{Npc, PixelRect};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Someone the player can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTarget {
    pub name: String,
    pub zone: PixelRect,
    pub lines: Vec<String>,
}

impl From<&Npc> for DialogueTarget {
    fn from(npc: &Npc) -> Self {
        Self {
            name: npc.name.clone(),
            zone: npc.dialogue_zone,
            lines: npc.dialogue_lines.clone(),
        }
    }
}

/// Dialogue state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DialogueState {
    /// Free roaming
    #[default]
    Idle,
    /// Showing `line` of `target`'s script
    Talking { target: String, line: usize },
    /// Closing summary on screen
    JournalShown,
}

impl DialogueState {
    /// Whether a dialogue box or the journal is on screen.
    pub fn is_engaged(&self) -> bool {
        !matches!(self, DialogueState::Idle)
    }
}

/// What an interact signal changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEvent {
    DialogueStarted { target: String },
    LineAdvanced { target: String, line: usize },
    DialogueCompleted { target: String },
    JournalOpened,
    JournalClosed,
}

/// Owns the dialogue state and the set of targets already talked to.
///
/// # Examples
///
/// ```
/// use pitchfork_path::{DialogueState, DialogueTarget, InteractionController, PixelRect};
///
/// let target = DialogueTarget {
///     name: "mosque".to_string(),
///     zone: PixelRect::new(0, 0, 100, 100),
///     lines: vec!["Salam !".to_string()],
/// };
/// let mut interaction = InteractionController::new(vec![target]);
/// let player = PixelRect::new(10, 10, 20, 20);
///
/// interaction.update(&player, true);
/// assert!(matches!(interaction.state(), DialogueState::Talking { .. }));
/// interaction.update(&player, true);
/// assert_eq!(interaction.state(), &DialogueState::JournalShown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionController {
    targets: Vec<DialogueTarget>,
    state: DialogueState,
    completed: BTreeSet<String>,
}

impl InteractionController {
    /// Creates an idle controller. Target order is the tie-break order when
    /// the player stands in several dialogue zones at once.
    pub fn new(targets: Vec<DialogueTarget>) -> Self {
        Self {
            targets,
            state: DialogueState::Idle,
            completed: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn targets(&self) -> &[DialogueTarget] {
        &self.targets
    }

    /// Names of targets whose dialogue has been read to the end.
    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    pub fn target(&self, name: &str) -> Option<&DialogueTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// First target, in enumeration order, whose zone overlaps `hitbox`.
    fn target_in_range(&self, hitbox: &PixelRect) -> Option<&DialogueTarget> {
        self.targets.iter().find(|t| t.zone.intersects(hitbox))
    }

    /// Target for the "press to interact" hint.
    ///
    /// Only reported while idle; it has no effect on the state machine.
    pub fn proximity(&self, hitbox: &PixelRect) -> Option<&DialogueTarget> {
        match self.state {
            DialogueState::Idle => self.target_in_range(hitbox),
            _ => None,
        }
    }

    /// Target whose dialogue zone contains a screen point.
    pub fn target_at_point(&self, x: i32, y: i32) -> Option<&DialogueTarget> {
        self.targets.iter().find(|t| t.zone.contains_point(x, y))
    }

    /// The line on screen and who says it.
    pub fn current_line(&self) -> Option<(&DialogueTarget, &str)> {
        match &self.state {
            DialogueState::Talking { target, line } => {
                let target = self.target(target)?;
                target.lines.get(*line).map(|text| (target, text.as_str()))
            }
            _ => None,
        }
    }

    /// Applies one frame. Without an interact signal nothing changes.
    pub fn update(&mut self, hitbox: &PixelRect, interact: bool) -> Option<InteractionEvent> {
        if !interact {
            return None;
        }

        match std::mem::take(&mut self.state) {
            DialogueState::Idle => {
                let target = self.target_in_range(hitbox)?.name.clone();
                info!("Started dialogue with {}", target);
                self.state = DialogueState::Talking {
                    target: target.clone(),
                    line: 0,
                };
                Some(InteractionEvent::DialogueStarted { target })
            }
            DialogueState::Talking { target, line } => {
                let len = self.target(&target).map_or(0, |t| t.lines.len());
                let next = line + 1;
                if next < len {
                    self.state = DialogueState::Talking {
                        target: target.clone(),
                        line: next,
                    };
                    return Some(InteractionEvent::LineAdvanced { target, line: next });
                }

                let newly_completed = self.completed.insert(target.clone());
                info!(
                    "Finished dialogue with {} ({}/{} met)",
                    target,
                    self.completed.len(),
                    self.targets.len()
                );
                if newly_completed && self.completed.len() == self.targets.len() {
                    info!("Every NPC met, opening the journal");
                    self.state = DialogueState::JournalShown;
                    return Some(InteractionEvent::JournalOpened);
                }
                Some(InteractionEvent::DialogueCompleted { target })
            }
            DialogueState::JournalShown => Some(InteractionEvent::JournalClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, x: i32, lines: usize) -> DialogueTarget {
        DialogueTarget {
            name: name.to_string(),
            zone: PixelRect::new(x, 0, 100, 100),
            lines: (0..lines).map(|i| format!("{} line {}", name, i)).collect(),
        }
    }

    fn controller() -> InteractionController {
        InteractionController::new(vec![
            target("cathedral", 0, 4),
            target("mosque", 200, 4),
            target("synagogue", 400, 2),
        ])
    }

    fn at(x: i32) -> PixelRect {
        PixelRect::new(x, 50, 20, 20)
    }

    #[test]
    fn test_interact_out_of_range_does_nothing() {
        let mut interaction = controller();
        assert_eq!(interaction.update(&at(150), true), None);
        assert_eq!(interaction.state(), &DialogueState::Idle);
    }

    #[test]
    fn test_no_signal_no_change() {
        let mut interaction = controller();
        assert_eq!(interaction.update(&at(10), false), None);
        assert_eq!(interaction.state(), &DialogueState::Idle);
    }

    #[test]
    fn test_lines_advance_then_complete() {
        let mut interaction = controller();
        let player = at(210);
        assert_eq!(
            interaction.update(&player, true),
            Some(InteractionEvent::DialogueStarted {
                target: "mosque".to_string()
            })
        );
        assert_eq!(interaction.current_line().map(|(_, l)| l), Some("mosque line 0"));

        for line in 1..4 {
            assert_eq!(
                interaction.update(&player, true),
                Some(InteractionEvent::LineAdvanced {
                    target: "mosque".to_string(),
                    line
                })
            );
        }
        assert_eq!(
            interaction.update(&player, true),
            Some(InteractionEvent::DialogueCompleted {
                target: "mosque".to_string()
            })
        );
        assert_eq!(interaction.state(), &DialogueState::Idle);
        assert!(interaction.is_completed("mosque"));
    }

    #[test]
    fn test_tie_break_uses_enumeration_order() {
        let mut interaction = InteractionController::new(vec![
            target("first", 0, 1),
            target("second", 50, 1),
        ]);
        let player = at(60);
        assert_eq!(interaction.proximity(&player).map(|t| t.name.as_str()), Some("first"));
        interaction.update(&player, true);
        assert_eq!(
            interaction.state(),
            &DialogueState::Talking {
                target: "first".to_string(),
                line: 0
            }
        );
    }

    #[test]
    fn test_no_nested_dialogue() {
        let mut interaction = controller();
        interaction.update(&at(10), true);
        // walking into another zone mid-dialogue only advances the current one
        interaction.update(&at(210), true);
        assert_eq!(
            interaction.state(),
            &DialogueState::Talking {
                target: "cathedral".to_string(),
                line: 1
            }
        );
        assert!(interaction.proximity(&at(210)).is_none());
    }

    #[test]
    fn test_repeat_dialogue_does_not_double_count() {
        let mut interaction = controller();
        for _ in 0..2 {
            for _ in 0..=2 {
                interaction.update(&at(410), true);
            }
            assert_eq!(interaction.state(), &DialogueState::Idle);
        }
        assert_eq!(interaction.completed().len(), 1);
    }

    #[test]
    fn test_journal_opens_once_then_closes() {
        let mut interaction = controller();
        let mut events = Vec::new();
        for (x, lines) in [(10, 4), (210, 4), (410, 2)] {
            for _ in 0..=lines {
                events.extend(interaction.update(&at(x), true));
            }
        }
        assert_eq!(events.last(), Some(&InteractionEvent::JournalOpened));
        assert_eq!(interaction.state(), &DialogueState::JournalShown);
        assert!(interaction.proximity(&at(10)).is_none());

        assert_eq!(interaction.update(&at(10), true), Some(InteractionEvent::JournalClosed));
        assert_eq!(interaction.state(), &DialogueState::Idle);

        // talking to everyone again never reopens it
        for _ in 0..=2 {
            assert_ne!(interaction.update(&at(410), true), Some(InteractionEvent::JournalOpened));
        }
        assert_eq!(interaction.state(), &DialogueState::Idle);
    }

    #[test]
    fn test_proximity_is_idempotent() {
        let interaction = controller();
        let player = at(205);
        let first = interaction.proximity(&player).cloned();
        let second = interaction.proximity(&player).cloned();
        assert_eq!(first, second);
        assert_eq!(first.map(|t| t.name), Some("mosque".to_string()));
    }

    #[test]
    fn test_target_at_point() {
        let interaction = controller();
        assert_eq!(interaction.target_at_point(450, 50).map(|t| t.name.as_str()), Some("synagogue"));
        assert!(interaction.target_at_point(150, 50).is_none());
    }
}
