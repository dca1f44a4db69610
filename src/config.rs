use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::consts;
use crate::player::Player;
use crate::vector::Vec2;
use crate::world::Map;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be positive, got {width}x{height}")]
    Resolution { width: usize, height: usize },
    #[error("focal length must be positive, got {0}")]
    Focal(f32),
    #[error("max speed must be in (0, 1) tiles per frame, got {0}")]
    MaxSpeed(f32),
    #[error("acceleration must be in (0, max speed], got {0}")]
    Acceleration(f32),
    #[error("spawn point ({x}, {y}) is not an open tile")]
    Spawn { x: f32, y: f32 },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gridcaster", about = "First-person raycaster over a tile grid", version)]
pub struct Config {
    /// Internal horizontal resolution
    #[arg(long, default_value_t = consts::XRES)]
    pub width: usize,

    /// Internal vertical resolution
    #[arg(long, default_value_t = consts::YRES)]
    pub height: usize,

    /// Camera plane distance, 1.0 is a 90 degree field of view
    #[arg(long, default_value_t = consts::FOCAL)]
    pub focal: f32,

    /// Map file with [ceiling], [walls] and [floor] sections
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[arg(long, default_value_t = consts::SPAWN.0)]
    pub spawn_x: f32,

    #[arg(long, default_value_t = consts::SPAWN.1)]
    pub spawn_y: f32,

    /// Tiles per frame
    #[arg(long, default_value_t = consts::MAX_SPEED)]
    pub max_speed: f32,

    /// Tiles per frame, per frame
    #[arg(long, default_value_t = consts::ACCELERATION)]
    pub acceleration: f32,

    /// Radians per frame
    #[arg(long, default_value_t = consts::TURN_RATE)]
    pub turn_rate: f32,

    /// Frame budget in milliseconds, 0 disables the cap
    #[arg(long, default_value_t = consts::FRAME_BUDGET_MS)]
    pub frame_budget_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: consts::XRES,
            height: consts::YRES,
            focal: consts::FOCAL,
            map: None,
            spawn_x: consts::SPAWN.0,
            spawn_y: consts::SPAWN.1,
            max_speed: consts::MAX_SPEED,
            acceleration: consts::ACCELERATION,
            turn_rate: consts::TURN_RATE,
            frame_budget_ms: consts::FRAME_BUDGET_MS,
        }
    }
}

impl Config {
    /// Checks everything that does not depend on the map
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Resolution {
                width: self.width,
                height: self.height,
            });
        }
        // Also keeps every interpolated ray direction non-zero
        if !(self.focal > 0.0 && self.focal.is_finite()) {
            return Err(ConfigError::Focal(self.focal));
        }
        // Under one tile per frame or the collision check can be skipped over
        if !(self.max_speed > 0.0 && self.max_speed < 1.0) {
            return Err(ConfigError::MaxSpeed(self.max_speed));
        }
        if !(self.acceleration > 0.0 && self.acceleration <= self.max_speed) {
            return Err(ConfigError::Acceleration(self.acceleration));
        }
        Ok(())
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.frame_budget_ms)
    }

    /// Builds the starting player, checking that it spawns in open space
    pub fn spawn(&self, map: &Map) -> Result<Player, ConfigError> {
        let position = Vec2::new(self.spawn_x, self.spawn_y);
        if !map.walls.is_open(position) {
            return Err(ConfigError::Spawn {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }
        Ok(Player {
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            turn_rate: self.turn_rate,
            ..Player::new(self.focal, position)
        })
    }
}
