use crate::consts::NEAR;
use crate::vector::{Segment, Vec2};

/// Screen-space extent of one wall column. Rows count up from the floor side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallProjection {
    pub top: usize,
    pub bottom: usize,
    /// Unclamped projected height in pixels
    pub size: f32,
}

/// Camera plane spanning y in [-1, 1] at distance `focal` in front of the eye.
/// A focal value of 1.0 is a 90 degree field of view.
pub fn viewport(focal: f32) -> Segment {
    Segment::new(Vec2::new(focal, -1.0), Vec2::new(focal, 1.0))
}

/// Projection parameters, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub xres: usize,
    pub yres: usize,
    pub focal: f32,
}

impl Camera {
    pub fn new(xres: usize, yres: usize, focal: f32) -> Self {
        Self { xres, yres, focal }
    }

    /// Projects a unit-tall wall given the hit vector with the player's heading removed
    /// (x is the forward distance, which cancels the fisheye).
    #[inline]
    pub fn project(&self, corrected: Vec2) -> WallProjection {
        let yres = self.yres as f32;
        // Clamped, or the size shoots to infinity when a ray grazes the camera
        let normal = corrected.x.max(NEAR);
        // The camera plane spans 2 units across xres pixels at distance focal,
        // so a 1 unit tall wall at distance d is focal * xres / (2 d) pixels.
        let size = 0.5 * self.focal * self.xres as f32 / normal;
        // Float to int casts saturate, so huge sizes cannot wrap
        let top = (((yres + size) / 2.0) as i64).clamp(0, self.yres as i64) as usize;
        let bottom = (((yres - size) / 2.0) as i64).clamp(0, self.yres as i64) as usize;
        WallProjection { top, bottom, size }
    }

    /// Fraction of the player-to-hit trace sampled by `row` for ceiling casting.
    /// Negate it for floor rows.
    #[inline]
    pub fn sample_fraction(&self, size: f32, row: usize) -> f32 {
        size / (2.0 * (row as f32 + 1.0) - self.yres as f32)
    }
}
