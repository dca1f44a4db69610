use crate::consts::{CORNER_TOLERANCE, RAY_NUDGE};
use crate::vector::Vec2;
use crate::world::Grid;

/// First solid tile struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub tile: u8,
    pub point: Vec2,
}

// Fast floor/ceil, only valid for values that fit in an i32
#[inline]
fn fl(x: f32) -> f32 {
    let i = x as i32;
    (i - (x < i as f32) as i32) as f32
}

#[inline]
fn cl(x: f32) -> f32 {
    let i = x as i32;
    (i + (x > i as f32) as i32) as f32
}

/// Next crossing of a vertical grid line (x = integer) along `dir`.
/// `None` when the ray runs parallel to those lines.
#[inline]
pub fn step_horizontal(a: Vec2, dir: Vec2) -> Option<Vec2> {
    if dir.x == 0.0 {
        return None;
    }
    let x = if dir.x > 0.0 { fl(a.x + 1.0) } else { cl(a.x - 1.0) };
    let y = dir.slope() * (x - a.x) + a.y;
    Some(Vec2::new(x, y))
}

/// Next crossing of a horizontal grid line (y = integer) along `dir`.
/// `None` when the ray runs parallel to those lines.
#[inline]
pub fn step_vertical(a: Vec2, dir: Vec2) -> Option<Vec2> {
    if dir.y == 0.0 {
        return None;
    }
    let y = if dir.y > 0.0 { fl(a.y + 1.0) } else { cl(a.y - 1.0) };
    let x = (y - a.y) / dir.slope() + a.x;
    Some(Vec2::new(x, y))
}

/// Marches from `origin` along `direction` one grid-line crossing at a time
/// until a non-zero tile of `walls` is found.
///
/// Terminates because every validated walls grid has a solid border.
/// A zero `direction` never leaves `origin` and reports the tile under it.
pub fn cast(origin: Vec2, direction: Vec2, walls: &Grid) -> Hit {
    let Some(unit) = direction.unit() else {
        return Hit {
            tile: walls.tile_at(origin),
            point: origin,
        };
    };
    let dc = unit * RAY_NUDGE;
    let dx = Vec2::new(dc.x, 0.0);
    let dy = Vec2::new(0.0, dc.y);

    let mut from = origin;
    loop {
        let hor = step_horizontal(from, direction);
        let ver = step_vertical(from, direction);

        // Nearest crossing, plus the nudge that carries the probe into the next cell
        let (ray, nudge) = match (hor, ver) {
            (Some(h), Some(v)) => {
                let ray = if (h - from).magnitude() < (v - from).magnitude() { h } else { v };
                let nudge = if (h - v).magnitude() < CORNER_TOLERANCE {
                    dc
                } else if ray == h {
                    dx
                } else {
                    dy
                };
                (ray, nudge)
            }
            (Some(h), None) => (h, dx),
            (None, Some(v)) => (v, dy),
            (None, None) => unreachable!("non-zero direction crosses at least one grid line"),
        };

        let tile = walls.tile_at(ray + nudge);
        if tile != 0 {
            return Hit { tile, point: ray };
        }
        from = ray;
    }
}
