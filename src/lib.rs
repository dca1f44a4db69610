//! Gridcaster - a first-person software raycaster over a 2-D tile grid
//!
//! Core modules:
//! - `vector`: 2-D point/vector math
//! - `world`: ceiling/wall/floor tile grids and the color palette
//! - `caster`: grid-aligned ray stepping
//! - `camera`: perspective projection and floor/ceiling sampling
//! - `player`: movement, turning and collision
//! - `renderer`: per-column wall/floor/ceiling fill
//! - `frame`, `scaler`, `pacing`, `input`: the display/input boundary

pub mod camera;
pub mod caster;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod pacing;
pub mod player;
pub mod renderer;
pub mod scaler;
pub mod vector;
pub mod world;

pub use config::Config;
pub use error::AppError;
pub use player::{Intents, Player};
pub use vector::{Segment, Vec2};
pub use world::{Grid, Map, MapError, Palette};

/// Tuning constants
pub mod consts {
    /// Default internal resolution
    pub const XRES: usize = 700;
    pub const YRES: usize = 400;

    /// Camera plane distance. 1.0 is a 90 degree field of view.
    pub const FOCAL: f32 = 0.8;

    /// Spawn point of the built-in level
    pub const SPAWN: (f32, f32) = (3.5, 3.5);

    /// Tiles per frame
    pub const MAX_SPEED: f32 = 0.10;
    pub const ACCELERATION: f32 = 0.015;
    /// Radians per frame
    pub const TURN_RATE: f32 = 0.1;

    /// ~60 fps
    pub const FRAME_BUDGET_MS: u64 = 16;

    /// Tiny step past a grid-line crossing before probing the tile behind it
    pub const RAY_NUDGE: f32 = 0.01;
    /// Crossings closer than this are treated as a grid corner
    pub const CORNER_TOLERANCE: f32 = 1e-3;
    /// Smallest forward distance used for projection
    pub const NEAR: f32 = 1e-2;
}
