use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{DEFAULT_MAP, Grid};
use crate::pose::{Motion, Pose};

/// Everything needed to build a view. Missing TOML keys fall back to [`Config::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tile_size: f32,
    pub fov_degrees: f32,
    /// Screen pixels per cast ray.
    pub strip_width: u32,
    /// Defaults to the map's world width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<u32>,
    /// Defaults to the map's world height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_height: Option<u32>,
    pub move_speed: f32,
    pub rotation_speed_degrees: f32,
    /// Ticks simulated per second of wall-clock time by the windowed driver.
    pub tick_rate: f32,
    pub minimap_scale: f32,
    /// World position the viewer starts at. Defaults to the centre of the map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn: Option<[f32; 2]>,
    pub map: Vec<Vec<u8>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 64.0,
            fov_degrees: 60.0,
            strip_width: 5,
            screen_width: None,
            screen_height: None,
            move_speed: 2.0,
            rotation_speed_degrees: 5.0,
            tick_rate: 60.0,
            minimap_scale: 0.2,
            spawn: None,
            map: DEFAULT_MAP.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

impl Config {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("failed to serialize config")
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(&self.map, self.tile_size)
    }

    pub fn motion(&self) -> Motion {
        Motion {
            move_speed: self.move_speed,
            rotation_speed: self.rotation_speed_degrees.to_radians(),
        }
    }

    /// Starting pose: the configured spawn point, or the map centre, facing +y.
    pub fn pose(&self, grid: &Grid) -> Pose {
        match self.spawn {
            Some([x, y]) => Pose::new(x, y, FRAC_PI_2),
            None => Pose::spawn(grid),
        }
    }

    /// Screen size in pixels, falling back to the map extents.
    pub fn screen_size(&self, grid: &Grid) -> [u32; 2] {
        [
            self.screen_width.unwrap_or(grid.width().round() as u32),
            self.screen_height.unwrap_or(grid.height().round() as u32),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;

        let pose = self.pose(&grid);
        if grid.wall_at(pose.x, pose.y) {
            return Err(ConfigError::SpawnInWall {
                x: pose.x,
                y: pose.y,
            });
        }

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::InvalidFov(self.fov_degrees));
        }

        let [width, height] = self.screen_size(&grid);
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidScreen { width, height });
        }
        if self.strip_width == 0 || self.strip_width > width {
            return Err(ConfigError::InvalidStripWidth {
                strip_width: self.strip_width,
                screen_width: width,
            });
        }

        for (name, value) in [
            ("move_speed", self.move_speed),
            ("rotation_speed_degrees", self.rotation_speed_degrees),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                name: "tick_rate",
                value: self.tick_rate,
            });
        }

        if !(self.minimap_scale > 0.0 && self.minimap_scale <= 1.0) {
            return Err(ConfigError::InvalidMinimapScale(self.minimap_scale));
        }
        Ok(())
    }
}
