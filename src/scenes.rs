//! # Scene Management System
//!
//! Owns the game state, the display and the input handler, and runs the
//! frame loop: sample input, step the game, log what happened, draw.

use crate::{
    AssetCatalog, GameConfig, GameEvent, GameState, InputHandler, InteractionEvent,
    MacroquadDisplay, PitchforkResult, TouchControls,
};
use log::{debug, info};
use macroquad::prelude::*;

/// The main scene manager that coordinates the play session
pub struct SceneManager {
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Loads the assets and builds the scene for `config`.
    pub async fn new(config: GameConfig) -> PitchforkResult<Self> {
        config.validate()?;
        let assets = AssetCatalog::load(&config).await;

        let touch_controls = config.touch_controls.then(|| {
            TouchControls::layout(config.screen_width, config.screen_height, config.tile_size())
        });
        let display = MacroquadDisplay::new(&assets, config.font_scale, touch_controls.clone());
        let input_handler = match touch_controls {
            Some(controls) => InputHandler::with_touch(controls),
            None => InputHandler::new(),
        };

        let frames = assets.animation_set();
        let images = assets.landmark_images();
        let game_state = GameState::new(config, assets.tiles, &images, frames)?;

        Ok(Self {
            game_state,
            display,
            input_handler,
        })
    }

    /// Runs the frame loop until quit is requested
    pub async fn run(&mut self) -> PitchforkResult<()> {
        loop {
            // sampled once, so every system sees the same delta
            let dt_ms = get_frame_time() * 1000.0;
            let input = self.input_handler.poll(&self.game_state.interaction);

            let events = self.game_state.step(&input, dt_ms);
            self.log_events(&events);
            if self.game_state.quit_requested {
                break;
            }

            self.display.render_game(&self.game_state);
            next_frame().await;
        }

        info!(
            "Session ended after {} frames, {} of {} NPCs met",
            self.game_state.frame_number,
            self.game_state.interaction.completed().len(),
            self.game_state.interaction.targets().len()
        );
        Ok(())
    }

    fn log_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Interaction(InteractionEvent::DialogueStarted { target }) => {
                    info!("Started talking to {}", target)
                }
                GameEvent::Interaction(InteractionEvent::DialogueCompleted { target }) => {
                    info!("Finished talking to {}", target)
                }
                GameEvent::Interaction(InteractionEvent::JournalOpened) => {
                    info!("Every NPC has been met, journal opened")
                }
                GameEvent::QuitRequested => info!("Quit requested"),
                GameEvent::PlayerMoved { .. } => {}
                other => debug!("{:?}", other),
            }
        }
    }
}
