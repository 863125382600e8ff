use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::TerrainScale;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Landscape configuration: which raster to load and how to place it in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grayscale elevation raster.
    pub heightmap: PathBuf,
    /// Raster is resampled to `grid_size × grid_size` samples.
    pub grid_size: u32,
    /// Footprint width along X and Z, in world units.
    pub world_size: f32,
    /// Elevation of a full-white sample above `base_y`.
    pub height_scale: f32,
    pub base_y: f32,
    /// Water plane height; `None` disables the plane.
    pub water_y: Option<f32>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: PathBuf::from("heightmap.png"),
            grid_size: 256,
            world_size: 400.0,
            height_scale: 60.0,
            base_y: 0.0,
            water_y: Some(-5.0),
        }
    }
}

impl TerrainConfig {
    pub fn scale(&self) -> TerrainScale {
        TerrainScale::new(self.world_size, self.height_scale, self.base_y)
    }
}

/// Player tuning: eye height, gravity, speeds and frame clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Camera height above the ground contact point.
    pub player_height: f32,
    pub gravity: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_velocity: f32,
    /// Starting position. Above the terrain, so the player drops in on the first frames.
    pub spawn: Vec3,
    /// Upper bound on the integration step of a single frame, in seconds.
    pub max_frame_dt: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            player_height: 2.0,
            gravity: 25.0,
            walk_speed: 10.0,
            run_speed: 18.0,
            jump_velocity: 10.0,
            spawn: Vec3::new(0.0, 20.0, 0.0),
            max_frame_dt: 0.033,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub terrain: TerrainConfig,
    pub player: PlayerConfig,
}

impl WalkConfig {
    /// Load and validate a YAML config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML, e.g. to write out a starter config.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the sampler and controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        let p = &self.player;

        if t.grid_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "terrain.grid_size must be at least 2, got {}",
                t.grid_size
            )));
        }
        positive("terrain.world_size", t.world_size)?;
        finite("terrain.height_scale", t.height_scale)?;
        finite("terrain.base_y", t.base_y)?;
        if let Some(water) = t.water_y {
            finite("terrain.water_y", water)?;
        }

        finite("player.player_height", p.player_height)?;
        positive("player.gravity", p.gravity)?;
        positive("player.walk_speed", p.walk_speed)?;
        positive("player.run_speed", p.run_speed)?;
        finite("player.jump_velocity", p.jump_velocity)?;
        positive("player.max_frame_dt", p.max_frame_dt)?;
        if !p.spawn.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "player.spawn must be finite, got {}",
                p.spawn
            )));
        }
        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = WalkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.terrain.grid_size, 256);
        assert_eq!(config.player.run_speed, 18.0);
        assert_eq!(config.player.spawn, Vec3::new(0.0, 20.0, 0.0));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = WalkConfig::from_yaml_str(
            "terrain:\n  world_size: 100.0\nplayer:\n  gravity: 9.8\n",
        )
        .unwrap();
        assert_eq!(config.terrain.world_size, 100.0);
        assert_eq!(config.terrain.height_scale, 60.0);
        assert_eq!(config.player.gravity, 9.8);
        assert_eq!(config.player.walk_speed, 10.0);
    }

    #[test]
    fn water_can_be_disabled() {
        let config = WalkConfig::from_yaml_str("terrain:\n  water_y: null\n").unwrap();
        assert_eq!(config.terrain.water_y, None);
    }

    #[test]
    fn rejects_tiny_grid() {
        let err = WalkConfig::from_yaml_str("terrain:\n  grid_size: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("grid_size"));
    }

    #[test]
    fn rejects_non_positive_gravity() {
        let err = WalkConfig::from_yaml_str("player:\n  gravity: 0.0\n").unwrap_err();
        assert!(err.to_string().contains("player.gravity"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = WalkConfig::from_yaml_str("terrain: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn yaml_round_trip_preserves_values() {
        let mut config = WalkConfig::default();
        config.player.jump_velocity = 12.5;
        config.terrain.heightmap = PathBuf::from("assets/valley.png");
        let text = config.to_yaml_string().unwrap();
        let parsed = WalkConfig::from_yaml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "terrain:\n  heightmap: hills.png\n  grid_size: 64").unwrap();
        let config = WalkConfig::load(tmp.path()).unwrap();
        assert_eq!(config.terrain.heightmap, PathBuf::from("hills.png"));
        assert_eq!(config.terrain.grid_size, 64);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = WalkConfig::load("/nonexistent/terrawalk.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("terrawalk.yaml"));
    }

    #[test]
    fn terrain_scale_from_config() {
        let config = TerrainConfig {
            world_size: 50.0,
            height_scale: 5.0,
            base_y: 1.0,
            ..TerrainConfig::default()
        };
        assert_eq!(config.scale(), TerrainScale::new(50.0, 5.0, 1.0));
    }
}
