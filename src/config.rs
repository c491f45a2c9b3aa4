use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILE: &str = "hexsort.ron";

/// Settings read from `hexsort.ron`. Every field may be left out.
///
/// No font ships with the game: `font_path` must point at a TTF the player
/// supplies, otherwise cards and prompts are drawn without text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub leaderboard_path: PathBuf,
    pub font_path: PathBuf,
    pub scoreboard_size: usize,
    pub fps: u32,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            leaderboard_path: PathBuf::from("table.csv"),
            font_path: PathBuf::from("assets/font.ttf"),
            scoreboard_size: 10,
            fps: 60,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::de::from_str(text)?)
    }

    /// Read `path`, falling back to defaults when it's missing.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Config::from_ron(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_ron(r#"(leaderboard_path: "scores.csv", fps: 30)"#).unwrap();
        assert_eq!(config.leaderboard_path, PathBuf::from("scores.csv"));
        assert_eq!(config.fps, 30);
        assert_eq!(config.scoreboard_size, 10);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load(Path::new("definitely/not/here.ron")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn shipped_file_matches_defaults() {
        let config = Config::from_ron(include_str!("../hexsort.ron")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(Config::from_ron("(fps: \"fast\"").is_err());
    }

    #[test]
    fn frame_interval_from_fps() {
        let config = Config {
            fps: 0,
            ..Config::default()
        };
        assert_eq!(config.frame_interval(), std::time::Duration::from_secs(1));
        assert_eq!(
            Config::default().frame_interval(),
            std::time::Duration::from_secs(1) / 60
        );
    }
}
