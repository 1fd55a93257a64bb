/// Player configuration
use crate::error::{CoreError, Result};
use crate::types::{ColorTag, Playlist, Track};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix (`RETROWAV_VOLUME=40`, ...)
pub const ENV_PREFIX: &str = "RETROWAV";

/// Startup settings for a player: initial volume, first track, track list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 80)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Start muted (default: false)
    #[serde(default)]
    pub muted: bool,

    /// Index of the track selected at startup (default: 0)
    #[serde(default)]
    pub start_index: usize,

    #[serde(default = "default_tracks")]
    pub tracks: Vec<Track>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: false,
            start_index: 0,
            tracks: default_tracks(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                tracing::warn!("Config file {:?} not found, using defaults", path);
            }
        }

        // Override with environment variables (prefixed with RETROWAV_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text (no environment layering)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(CoreError::invalid_config("at least one track is required"));
        }

        if self.volume > 100 {
            return Err(CoreError::invalid_config(format!(
                "volume must be 0-100, got {}",
                self.volume
            )));
        }

        if self.start_index >= self.tracks.len() {
            return Err(CoreError::invalid_config(format!(
                "start_index {} out of range for {} tracks",
                self.start_index,
                self.tracks.len()
            )));
        }

        Ok(())
    }

    /// Build the immutable playlist from the configured tracks
    pub fn playlist(&self) -> Result<Playlist> {
        Playlist::new(self.tracks.clone())
    }
}

// Default values
fn default_volume() -> u8 {
    80
}

fn default_tracks() -> Vec<Track> {
    vec![
        Track::new(
            "HTML Rhythms",
            "The Div Tags",
            "/audio/html-rhythms.mp3",
            ColorTag::Primary,
        ),
        Track::new(
            "CSS Cascades",
            "Style Sheets",
            "/audio/css-cascades.mp3",
            ColorTag::Secondary,
        ),
        Track::new(
            "JavaScript Jams",
            "Script Kitties",
            "/audio/javascript-jams.mp3",
            ColorTag::Accent,
        ),
    ]
}
