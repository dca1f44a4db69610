use std::f32::consts::PI;

use crate::camera::viewport;
use crate::consts;
use crate::vector::{Segment, Vec2};
use crate::world::Grid;

/// Movement requested for one frame. Several may be held at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl Intents {
    #[inline]
    pub fn translating(&self) -> bool {
        self.forward || self.back || self.strafe_left || self.strafe_right
    }
}

/// The player's camera and body.
///
/// Speeds are in tiles per frame. The integrator is a plain Euler step with an
/// all-or-nothing collision check on the destination tile, so `max_speed` must stay
/// below one tile or a fast player could skip over a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub fov: Segment,
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Radians, 0 faces +x
    pub heading: f32,
    /// Radians added per frame while a turn key is held
    pub turn_rate: f32,
}

impl Player {
    pub fn new(focal: f32, position: Vec2) -> Self {
        Self {
            fov: viewport(focal),
            position,
            velocity: Vec2::ZERO,
            max_speed: consts::MAX_SPEED,
            acceleration: consts::ACCELERATION,
            heading: 0.0,
            turn_rate: consts::TURN_RATE,
        }
    }

    /// Distance from the eye to the camera plane
    #[inline]
    pub fn focal(&self) -> f32 {
        self.fov.a.x
    }

    /// Unit vector the player faces
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::new(1.0, 0.0).rotate(self.heading)
    }

    /// One frame of physics: turn, accelerate, then move with collision.
    pub fn step(&self, intents: &Intents, walls: &Grid) -> Player {
        self.spin(intents).accelerate(intents).advance(walls)
    }

    /// Applies one fixed increment per held turn key, not scaled by frame time.
    pub fn spin(&self, intents: &Intents) -> Player {
        let mut heading = self.heading;
        if intents.turn_left {
            heading -= self.turn_rate;
        }
        if intents.turn_right {
            heading += self.turn_rate;
        }
        // Keep heading in [-pi, pi] to avoid float drift
        if heading > PI {
            heading -= 2.0 * PI;
        }
        if heading < -PI {
            heading += 2.0 * PI;
        }
        Player { heading, ..*self }
    }

    /// Accelerates along held directions, or decays exponentially when none are held.
    /// Velocity is capped at `max_speed`.
    pub fn accelerate(&self, intents: &Intents) -> Player {
        let mut velocity = self.velocity;
        if intents.translating() {
            let push = self.facing() * self.acceleration;
            if intents.forward {
                velocity = velocity + push;
            }
            if intents.back {
                velocity = velocity - push;
            }
            if intents.strafe_right {
                velocity = velocity + push.rotate90();
            }
            if intents.strafe_left {
                velocity = velocity - push.rotate90();
            }
        } else {
            velocity = velocity * (1.0 - self.acceleration / self.max_speed);
        }

        if velocity.magnitude() > self.max_speed {
            if let Some(dir) = velocity.unit() {
                velocity = dir * self.max_speed;
            }
        }
        Player { velocity, ..*self }
    }

    /// Moves by the current velocity. Landing in a solid tile puts the player
    /// back where they were and stops them dead.
    pub fn advance(&self, walls: &Grid) -> Player {
        let position = self.position + self.velocity;
        if walls.tile_at(position) != 0 {
            return Player {
                velocity: Vec2::ZERO,
                ..*self
            };
        }
        Player { position, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Map;

    fn room() -> Map {
        let walls = ["111111", "100001", "100001", "100021", "111111"];
        let tiles = ["111111", "111111", "111111", "111111", "111111"];
        Map::from_rows(&tiles, &walls, &tiles).unwrap()
    }

    fn forward() -> Intents {
        Intents {
            forward: true,
            ..Intents::default()
        }
    }

    #[test]
    fn forward_accelerates_along_heading() {
        let map = room();
        let p = Player::new(0.8, Vec2::new(2.5, 2.5)).step(&forward(), &map.walls);
        assert!((p.velocity.x - consts::ACCELERATION).abs() < 1e-6);
        assert!(p.velocity.y.abs() < 1e-6);
        assert!((p.position.x - (2.5 + consts::ACCELERATION)).abs() < 1e-6);
    }

    #[test]
    fn opposite_intents_cancel() {
        let map = room();
        let intents = Intents {
            forward: true,
            back: true,
            ..Intents::default()
        };
        let p = Player::new(0.8, Vec2::new(2.5, 2.5)).step(&intents, &map.walls);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.position, Vec2::new(2.5, 2.5));
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let map = room();
        let intents = Intents {
            strafe_right: true,
            ..Intents::default()
        };
        let p = Player::new(0.8, Vec2::new(2.5, 2.5)).step(&intents, &map.walls);
        assert!(p.velocity.x.abs() < 1e-6);
        assert!((p.velocity.y - consts::ACCELERATION).abs() < 1e-6);
    }

    #[test]
    fn speed_is_capped() {
        let mut p = Player::new(0.8, Vec2::new(2.5, 2.5));
        let diagonal = Intents {
            forward: true,
            strafe_right: true,
            ..Intents::default()
        };
        for _ in 0..10 {
            p = p.accelerate(&diagonal);
            assert!(p.velocity.magnitude() <= p.max_speed + 1e-6);
        }
        assert!((p.velocity.magnitude() - p.max_speed).abs() < 1e-5);
    }

    #[test]
    fn idle_decays_velocity() {
        let mut p = Player::new(0.8, Vec2::new(2.5, 2.5));
        p.velocity = Vec2::new(0.08, 0.0);
        let q = p.accelerate(&Intents::default());
        assert!((q.velocity.x - 0.08 * 0.85).abs() < 1e-6);
    }

    #[test]
    fn walking_into_a_wall_stops_dead() {
        let map = room();
        let mut p = Player::new(0.8, Vec2::new(3.95, 3.5));
        p.velocity = Vec2::new(0.09, 0.0);
        let q = p.step(&forward(), &map.walls);
        assert_eq!(q.position, p.position);
        assert_eq!(q.velocity, Vec2::ZERO);
    }

    #[test]
    fn full_turn_returns_heading() {
        let map = room();
        let right = Intents {
            turn_right: true,
            ..Intents::default()
        };
        let mut p = Player::new(0.8, Vec2::new(2.5, 2.5));
        let steps = (2.0 * PI / p.turn_rate).round() as usize;
        assert_eq!(steps, 63);
        for _ in 0..steps {
            p = p.step(&right, &map.walls);
            assert!(p.heading.abs() <= PI);
        }
        let drift = p.heading.rem_euclid(2.0 * PI);
        let drift = drift.min(2.0 * PI - drift);
        assert!(drift < p.turn_rate / 2.0, "heading drifted by {drift}");
    }

    #[test]
    fn turning_left_then_right_is_identity() {
        let p = Player::new(0.8, Vec2::new(2.5, 2.5));
        let left = Intents {
            turn_left: true,
            ..Intents::default()
        };
        let right = Intents {
            turn_right: true,
            ..Intents::default()
        };
        let q = p.spin(&left).spin(&right);
        assert!(q.heading.abs() < 1e-6);
    }
}
