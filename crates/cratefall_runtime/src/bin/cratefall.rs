//! Cratefall game binary
//!
//! Run with: cargo run -p cratefall_runtime
//!
//! Settings are read from `assets/cratefall.toml` when present.

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use cratefall_core::{ConfigError, GameConfig};
use cratefall_runtime::CratefallPlugin;

const CONFIG_PATH: &str = "assets/cratefall.toml";

fn main() {
    // Loaded before the app so the window can be sized from it
    let loaded = GameConfig::load(CONFIG_PATH);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let window_width = config.viewport.window_width as u32;
    let window_height = config.viewport.window_height as u32;

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Cratefall".to_string(),
                    resolution: WindowResolution::new(window_width, window_height),
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin {
                // Pixel art: nearest sampling everywhere
                default_sampler: ImageSamplerDescriptor {
                    mag_filter: ImageFilterMode::Nearest,
                    min_filter: ImageFilterMode::Nearest,
                    mipmap_filter: ImageFilterMode::Nearest,
                    ..default()
                },
            }),
    );

    match loaded {
        Ok(_) => info!("Loaded config from {}", CONFIG_PATH),
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("No {} found, using default config", CONFIG_PATH)
        }
        Err(err) => warn!("Ignoring {}: {}", CONFIG_PATH, err),
    }

    app.add_plugins(CratefallPlugin::new(config)).run();
}
