use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wall_engine::coords::{Position, Size};
use wall_engine::window::{RuntimeConfig, WindowOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub title: String,
    pub fullscreen: bool,
    pub position: [i32; 2],
    /// Logical window size.
    pub size: [u32; 2],
    pub shaders_path: PathBuf,
    pub media_path: PathBuf,
    /// Store key of the background texture.
    pub background_name: String,
    /// Background file, relative to `media_path`.
    pub background: PathBuf,
    /// Load the background on the fetch workers instead of during start.
    pub async_background: bool,
    /// Fail start when the background cannot be loaded, instead of running
    /// without it.
    pub abort_on_missing_background: bool,
    pub fetch_workers: usize,
    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            title: String::from("Map Application"),
            fullscreen: false,
            position: [0, 0],
            size: [1024, 768],
            shaders_path: PathBuf::from("./resources/shaders/"),
            media_path: PathBuf::from("./resources/media/"),
            background_name: String::from("wall"),
            background: PathBuf::from("images/wall.jpg"),
            async_background: false,
            abort_on_missing_background: false,
            fetch_workers: 1,
            log_filter: None,
        }
    }
}

impl WallConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config from the first argument after the program name, or defaults.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        match args.nth(1) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn logical_size(&self) -> Size {
        Size::new(self.size[0], self.size[1])
    }

    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            title: self.title.clone(),
            fullscreen: self.fullscreen,
            position: Position::new(self.position[0], self.position[1]),
            size: self.logical_size(),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            shaders_path: self.shaders_path.clone(),
        }
    }
}

/// Live window geometry tracked by the application.
///
/// `framebuffer_size` is refreshed at the start of every frame and may differ
/// from `logical_size` on high-density displays.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WindowConfig {
    pub fullscreen: bool,
    pub position: Position,
    pub logical_size: Size,
    pub framebuffer_size: Size,
}

impl From<&WallConfig> for WindowConfig {
    fn from(c: &WallConfig) -> Self {
        Self {
            fullscreen: c.fullscreen,
            position: Position::new(c.position[0], c.position[1]),
            logical_size: c.logical_size(),
            framebuffer_size: Size::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_1024x768_window() {
        let c = WallConfig::default();
        assert_eq!(c.title, "Map Application");
        assert_eq!(c.logical_size(), Size::new(1024, 768));
        assert_eq!(c.window_options().position, Position::new(0, 0));
        assert!(!c.fullscreen);
        assert!(!c.abort_on_missing_background);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.json");
        std::fs::write(&path, r#"{ "size": [640, 480], "async_background": true }"#).unwrap();

        let c = WallConfig::load(&path).unwrap();
        assert_eq!(c.logical_size(), Size::new(640, 480));
        assert!(c.async_background);
        assert_eq!(c.background_name, "wall");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.json");
        std::fs::write(&path, "{ size: ").unwrap();
        assert!(matches!(WallConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn no_argument_means_defaults() {
        let args = vec!["wall".to_string()];
        assert_eq!(WallConfig::from_args(args.into_iter()).unwrap(), WallConfig::default());
    }

    #[test]
    fn window_config_starts_without_framebuffer() {
        let w = WindowConfig::from(&WallConfig::default());
        assert_eq!(w.logical_size, Size::new(1024, 768));
        assert!(w.framebuffer_size.is_empty());
    }
}
