//! Video configuration stored as JSON

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::surface::SurfaceFlags;

pub const DEFAULT_WIDTH: i32 = 320;
pub const DEFAULT_HEIGHT: i32 = 240;
pub const DEFAULT_BPP: u8 = 16;
pub const DEFAULT_FRAME_DELAY_MS: u32 = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Screen setup and frame pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub bpp: u8,
    pub fullscreen: bool,
    pub double_buffer: bool,
    pub vsync: bool,
    /// Delay between frames, for hosts without vsync
    pub frame_delay_ms: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            title: "retrosurf".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bpp: DEFAULT_BPP,
            fullscreen: false,
            double_buffer: true,
            vsync: true,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl VideoConfig {
    /// Surface flags for `set_video_mode`
    pub fn surface_flags(&self) -> SurfaceFlags {
        let mut flags = SurfaceFlags::empty();
        flags.set(SurfaceFlags::FULLSCREEN, self.fullscreen);
        flags.set(SurfaceFlags::DOUBLEBUF, self.double_buffer);
        flags
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: VideoConfig = serde_json::from_str(r#"{"width": 640, "bpp": 32}"#).unwrap();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.bpp, 32);
        assert_eq!(cfg.height, DEFAULT_HEIGHT);
        assert_eq!(cfg.frame_delay_ms, DEFAULT_FRAME_DELAY_MS);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("retrosurf-cfg-{}.json", std::process::id()));
        let cfg = VideoConfig {
            width: 256,
            height: 224,
            fullscreen: true,
            ..VideoConfig::default()
        };
        cfg.save(&path).unwrap();
        let loaded = VideoConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            VideoConfig::load("/nonexistent/retrosurf.json"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            serde_json::from_str::<VideoConfig>("{not json").map_err(ConfigError::from),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_surface_flags() {
        let cfg = VideoConfig {
            fullscreen: true,
            double_buffer: false,
            ..VideoConfig::default()
        };
        assert_eq!(cfg.surface_flags(), SurfaceFlags::FULLSCREEN);
        assert_eq!(VideoConfig::default().surface_flags(), SurfaceFlags::DOUBLEBUF);
    }
}
