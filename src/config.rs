//! Application settings persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Window and pacing settings for an embedding application. Missing fields
/// fall back to the defaults, so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    /// Canvas resolution; the window is `scale` times larger.
    pub width: i32,
    pub height: i32,
    pub scale: i32,
    /// 0 leaves the frame rate uncapped.
    pub target_fps: u32,
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "blitkit".to_string(),
            width: 320,
            height: 240,
            scale: 2,
            target_fps: 60,
            vsync: false,
        }
    }
}

impl Config {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}
