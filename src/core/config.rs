//! Game configuration.
//!
//! Everything a host can tune lives here: session length, transition delays,
//! the RNG seed, the default deck, and audio settings. Hosts either build a
//! `GameConfig` in code with the `with_*` builders or load one from JSON;
//! every JSON field is optional.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::ports::Track;

/// Audio settings applied to the sink when the sound player is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Background music volume in `0.0..=1.0`.
    pub music_volume: f32,
    /// Loop the background music.
    pub music_loop: bool,
    /// Asset path for each [`Track`].
    pub tracks: TrackPaths,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.05,
            music_loop: true,
            tracks: TrackPaths::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPaths {
    pub background_music: String,
    pub flip: String,
    #[serde(rename = "match")]
    pub match_cue: String,
    pub victory: String,
    pub game_over: String,
}

impl Default for TrackPaths {
    fn default() -> Self {
        Self {
            background_music: "Assets/Audio/emeraldSeas.mp3".to_string(),
            flip: "Assets/Audio/flip.wav".to_string(),
            match_cue: "Assets/Audio/match.wav".to_string(),
            victory: "Assets/Audio/victory.wav".to_string(),
            game_over: "Assets/Audio/gameOver.wav".to_string(),
        }
    }
}

impl TrackPaths {
    #[must_use]
    pub fn get(&self, track: Track) -> &str {
        match track {
            Track::BackgroundMusic => &self.background_music,
            Track::Flip => &self.flip,
            Track::Match => &self.match_cue,
            Track::Victory => &self.victory,
            Track::GameOver => &self.game_over,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds on the countdown at the start of each session.
    pub total_time_secs: u32,

    /// Delay between hiding the cards and shuffling them.
    ///
    /// Lets the hide transition finish before the grid reorders.
    pub start_delay_ms: u64,

    /// How long a mismatched pair stays face-up before being hidden again.
    pub mismatch_delay_ms: u64,

    /// Countdown period. One second unless a host wants a faster clock.
    pub tick_interval_ms: u64,

    /// RNG seed. `None` draws one from the operating system.
    pub seed: Option<u64>,

    /// Faces used when a host builds the default deck (two cards per face).
    pub faces: Vec<String>,

    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_time_secs: 100,
            start_delay_ms: 500,
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            seed: None,
            faces: [
                "Bat", "Bones", "Cauldron", "Dracula", "Eye", "Ghost", "Pumpkin", "Skull",
            ]
            .iter()
            .map(|f| format!("Assets/Images/{f}.png"))
            .collect(),
            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with the given session length.
    pub fn new(total_time_secs: u32) -> Self {
        Self {
            total_time_secs,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_total_time(mut self, secs: u32) -> Self {
        self.total_time_secs = secs;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_faces<I, S>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faces = faces.into_iter().map(Into::into).collect();
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.total_time_secs == 0 {
            return Err(GameError::InvalidConfig("total_time_secs must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig("tick_interval_ms must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.music_volume) {
            return Err(GameError::InvalidConfig(format!(
                "music_volume {} is outside 0.0..=1.0",
                self.audio.music_volume
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.total_time_secs, 100);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.faces.len(), 8);
        assert_eq!(config.audio.music_volume, 0.05);
        assert!(config.audio.music_loop);
        assert_eq!(config.audio.tracks.get(Track::GameOver), "Assets/Audio/gameOver.wav");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(30)
            .with_seed(7)
            .with_start_delay(Duration::from_millis(0))
            .with_mismatch_delay(Duration::from_millis(250))
            .with_faces(["x", "y"]);

        assert_eq!(config.total_time_secs, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.start_delay(), Duration::ZERO);
        assert_eq!(config.mismatch_delay(), Duration::from_millis(250));
        assert_eq!(config.faces, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "total_time_secs": 45, "audio": { "music_loop": false } }"#).unwrap();
        assert_eq!(config.total_time_secs, 45);
        assert_eq!(config.start_delay_ms, 500);
        assert!(!config.audio.music_loop);
        assert_eq!(config.audio.music_volume, 0.05);
    }

    #[test]
    fn test_json_track_rename() {
        let config = GameConfig::from_json(r#"{ "audio": { "tracks": { "match": "m.ogg" } } }"#).unwrap();
        assert_eq!(config.audio.tracks.get(Track::Match), "m.ogg");
        assert_eq!(config.audio.tracks.get(Track::Flip), "Assets/Audio/flip.wav");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::new(12).with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_validate_rejects_zero_time() {
        let err = GameConfig::from_json(r#"{ "total_time_secs": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_loud_music() {
        let mut config = GameConfig::default();
        config.audio.music_volume = 1.5;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
