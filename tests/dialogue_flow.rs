//! Walks the player up to every NPC and reads each dialogue to the end.

use macroquad::texture::Image;
use pitchfork_path::{
    AnimationSet, DialogueState, FrameInput, GameConfig, GameEvent, GameState, InteractionEvent,
    LandmarkImages, PitchforkResult, PixelRect, TileCatalog, LANDMARKS, TILE_COUNT,
};

fn dirt() -> Image {
    Image {
        bytes: [150, 120, 70, 255].repeat(4),
        width: 2,
        height: 2,
    }
}

fn game_state() -> PitchforkResult<GameState> {
    let mut tiles = TileCatalog::new();
    for id in 1..=TILE_COUNT {
        tiles.insert(id, dirt());
    }
    let images = LandmarkImages::complete(&LANDMARKS);
    GameState::new(GameConfig::desktop(), tiles, &images, AnimationSet::uniform(4))
}

fn interact() -> FrameInput {
    FrameInput {
        interact: true,
        ..Default::default()
    }
}

/// Puts the player hitbox inside the named NPC's dialogue zone.
fn stand_next_to(state: &mut GameState, name: &str) {
    let zone = state.layout.npc(name).map(|npc| npc.dialogue_zone);
    let zone = zone.unwrap_or_else(|| panic!("no NPC named {}", name));
    let hitbox = state.player.hitbox;
    state.place_player(PixelRect::new(
        zone.center_x() - hitbox.w / 2,
        zone.center_y() - hitbox.h / 2,
        hitbox.w,
        hitbox.h,
    ));
}

fn interaction_events(events: Vec<GameEvent>) -> Vec<InteractionEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::Interaction(e) => Some(e),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_dialogue_to_the_end() -> PitchforkResult<()> {
    let mut state = game_state()?;
    stand_next_to(&mut state, "mosque");
    assert_eq!(state.proximity_target().map(|t| t.name.as_str()), Some("mosque"));

    state.step(&interact(), 16.0);
    assert_eq!(
        state.dialogue_state(),
        &DialogueState::Talking {
            target: "mosque".to_string(),
            line: 0
        }
    );
    assert!(state.interaction.current_line().is_some());
    // no hint while a dialogue box is open
    assert!(state.proximity_target().is_none());

    for line in 1..4 {
        state.step(&interact(), 16.0);
        assert_eq!(
            state.dialogue_state(),
            &DialogueState::Talking {
                target: "mosque".to_string(),
                line
            }
        );
    }

    let events = interaction_events(state.step(&interact(), 16.0));
    assert_eq!(
        events,
        vec![InteractionEvent::DialogueCompleted {
            target: "mosque".to_string()
        }]
    );
    assert_eq!(state.dialogue_state(), &DialogueState::Idle);
    assert!(state.interaction.is_completed("mosque"));
    Ok(())
}

#[test]
fn test_journal_after_meeting_everyone() -> PitchforkResult<()> {
    let mut state = game_state()?;

    for name in ["synagogue", "cathedral", "mosque"] {
        stand_next_to(&mut state, name);
        let lines = state.layout.npc(name).map_or(0, |npc| npc.dialogue_lines.len());
        for _ in 0..=lines {
            state.step(&interact(), 16.0);
        }
    }

    assert_eq!(state.dialogue_state(), &DialogueState::JournalShown);
    assert_eq!(state.interaction.completed().len(), 3);

    // movement stays frozen while the journal is open
    let hitbox = state.player.hitbox;
    let walk = FrameInput {
        left: true,
        ..Default::default()
    };
    state.step(&walk, 16.0);
    assert_eq!(state.player.hitbox, hitbox);

    let events = interaction_events(state.step(&interact(), 16.0));
    assert_eq!(events, vec![InteractionEvent::JournalClosed]);
    assert_eq!(state.dialogue_state(), &DialogueState::Idle);
    Ok(())
}

#[test]
fn test_journal_opens_only_once() -> PitchforkResult<()> {
    let mut state = game_state()?;
    for name in ["cathedral", "mosque", "synagogue"] {
        stand_next_to(&mut state, name);
        for _ in 0..=4 {
            state.step(&interact(), 16.0);
        }
    }
    // dismiss the journal
    state.step(&interact(), 16.0);
    assert_eq!(state.dialogue_state(), &DialogueState::Idle);

    // talking to someone again replays the lines but no journal
    let mut opened = false;
    for _ in 0..=4 {
        let events = interaction_events(state.step(&interact(), 16.0));
        opened |= events.contains(&InteractionEvent::JournalOpened);
    }
    assert!(!opened);
    assert_eq!(state.dialogue_state(), &DialogueState::Idle);
    Ok(())
}

#[test]
fn test_interact_away_from_npcs_is_ignored() -> PitchforkResult<()> {
    let mut state = game_state()?;
    let events = state.step(&interact(), 16.0);
    assert!(events.is_empty());
    assert_eq!(state.dialogue_state(), &DialogueState::Idle);
    Ok(())
}
