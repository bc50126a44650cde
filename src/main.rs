//! # Pitchfork Path Main Entry Point
//!
//! Parses the command line, initializes logging, resolves the configuration
//! and hands over to the scene manager.

use clap::Parser;
use macroquad::prelude::*;
use pitchfork_path::{GameConfig, PitchforkResult, SceneManager};
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Pitchfork Path.
#[derive(Parser, Debug)]
#[command(name = "pitchfork_path")]
#[command(about = "Walk the pitchfork path and meet the three neighbours")]
#[command(version)]
struct Args {
    /// JSON configuration file; overrides the desktop/tablet presets
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Asset directory
    #[arg(long)]
    assets: Option<String>,

    /// Full-screen tablet mode with touch controls
    #[arg(long)]
    tablet: bool,

    /// Draw collision outlines from the start (toggle with C)
    #[arg(long)]
    debug_collision: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Window settings, read before the window opens so its size matches the
/// configuration from the first frame.
fn window_conf() -> Conf {
    window_conf_for(&Args::parse())
}

fn window_conf_for(args: &Args) -> Conf {
    let fullscreen = args.tablet && args.config.is_none();
    // an unreadable file is reported by resolve_config once logging is up
    let config = args
        .config
        .as_ref()
        .and_then(|path| GameConfig::load_from_file(path).ok())
        .unwrap_or_else(GameConfig::desktop);
    Conf {
        window_title: "Pitchfork Path".to_string(),
        window_width: config.screen_width,
        window_height: config.screen_height,
        fullscreen,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> PitchforkResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Pitchfork Path v{}", pitchfork_path::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game stopped with an error: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> PitchforkResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .parse_default_env()
            .init();
    }

    Ok(())
}

/// Resolves the configuration: a file wins over the presets, command line
/// flags win over both.
async fn resolve_config(args: &Args) -> PitchforkResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load_from_file(path)?
        }
        None if args.tablet => {
            // the full-screen size is only reported after a frame
            next_frame().await;
            GameConfig::tablet(screen_width() as i32, screen_height() as i32)
        }
        None => GameConfig::desktop(),
    };

    if let Some(dir) = &args.assets {
        config.asset_dir = dir.clone();
    }
    if args.debug_collision {
        config.debug_collision = true;
    }
    config.validate()?;
    Ok(config)
}

/// Runs the game with macroquad graphics.
async fn run_game(args: &Args) -> PitchforkResult<()> {
    let config = resolve_config(args).await?;
    info!(
        "Screen {}x{}, tile size {}, touch controls {}",
        config.screen_width,
        config.screen_height,
        config.tile_size(),
        config.touch_controls
    );

    // window close goes through the quit signal like Escape
    prevent_quit();

    let mut scene_manager = SceneManager::new(config).await?;
    scene_manager.run().await?;

    info!("Game loop ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_matches_desktop_preset() {
        let conf = window_conf_for(&Args::parse_from(["pitchfork_path"]));
        let desktop = GameConfig::desktop();
        assert_eq!(conf.window_width, desktop.screen_width);
        assert_eq!(conf.window_height, desktop.screen_height);
        assert!(!conf.fullscreen);
    }

    #[test]
    fn test_window_follows_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pitchfork.json");
        let config = GameConfig::tablet(1280, 800);
        std::fs::write(&path, config.save_to_json().unwrap()).unwrap();

        let path = path.to_str().unwrap();
        let args = Args::parse_from(["pitchfork_path", "--tablet", "--config", path]);
        let conf = window_conf_for(&args);
        assert_eq!((conf.window_width, conf.window_height), (1280, 800));
        assert!(!conf.fullscreen);
    }

    #[test]
    fn test_tablet_window_is_fullscreen() {
        let conf = window_conf_for(&Args::parse_from(["pitchfork_path", "--tablet"]));
        assert!(conf.fullscreen);
    }
}
