//! Asset loader for level project files
//!
//! Projects are loaded through the `AssetServer` like any other asset, so
//! running with Bevy's `file_watcher` feature reloads a project when the file
//! changes on disk.
//!
//! ```rust,ignore
//! let project: Handle<LevelProject> = asset_server.load("maps/world.map.json");
//! ```

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::reflect::TypePath;
use cratefall_core::{level_key, LevelProject};
use thiserror::Error;

/// Error type for project loading failures
#[derive(Debug, Error)]
pub enum ProjectLoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Project has no '{0}'")]
    MissingFirstLevel(String),
}

/// Asset loader for `LevelProject` JSON files (`.map.json`)
#[derive(Default, TypePath)]
pub struct LevelProjectLoader;

impl AssetLoader for LevelProjectLoader {
    type Asset = LevelProject;
    type Settings = ();
    type Error = ProjectLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_project(&bytes)
    }

    fn extensions(&self) -> &[&str] {
        &["map.json"]
    }
}

/// Parse a project and check that there is a level to start on
pub fn parse_project(bytes: &[u8]) -> Result<LevelProject, ProjectLoadError> {
    let project: LevelProject = serde_json::from_slice(bytes)?;
    if project.level(0).is_none() {
        return Err(ProjectLoadError::MissingFirstLevel(level_key(0)));
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project() {
        let json = br#"{"levels": {"level0": {"uid": 1, "px_wid": 32, "px_hei": 32}}}"#;
        let project = parse_project(json).unwrap();
        assert_eq!(project.level_count(), 1);
    }

    #[test]
    fn test_parse_project_errors() {
        assert!(matches!(
            parse_project(b"{\"levels\": {}}"),
            Err(ProjectLoadError::MissingFirstLevel(key)) if key == "level0"
        ));
        assert!(matches!(
            parse_project(b"not json"),
            Err(ProjectLoadError::Json(_))
        ));
    }

    #[test]
    fn test_shipped_project_plays() {
        use cratefall_core::GameConfig;
        use cratefall_sim::{FrameInput, GameState, PlayerCharacter};

        let project = parse_project(include_bytes!("../../../assets/maps/world.map.json")).unwrap();
        assert_eq!(project.level_count(), 2);

        let mut state = GameState::new(project, GameConfig::default(), PlayerCharacter::First);
        state.enter().unwrap();
        for index in 0..2 {
            state.goto_level(index).unwrap();
            assert!(state.crate_count() > 0);
            for _ in 0..120 {
                state.update(&FrameInput::default()).unwrap();
            }
            assert!(state.player().is_grounded());
        }
    }
}

