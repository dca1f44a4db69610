use crate::camera::Camera;
use crate::caster::cast;
use crate::frame::Frame;
use crate::player::Player;
use crate::vector::Segment;
use crate::world::{Map, Palette};

/// Renders the scene from `player` into `frame`, one ray per column.
/// Each column is filled bottom to top: floor, wall, ceiling.
pub fn render_frame(frame: &mut Frame, map: &Map, palette: &Palette, player: &Player) {
    let mut canvas = frame.lock();
    let xres = canvas.columns();
    let yres = canvas.rows();
    let cam = Camera::new(xres, yres, player.focal());
    let plane = player.fov.rotate(player.heading);

    for x in 0..xres {
        let direction = plane.lerp(x as f32 / xres as f32);
        let hit = cast(player.position, direction, &map.walls);
        let trace = Segment::new(player.position, hit.point);
        let corrected = (hit.point - player.position).rotate(-player.heading);
        let wall = cam.project(corrected);

        let column = canvas.column_mut(x);
        for (y, px) in column[..wall.bottom].iter_mut().enumerate() {
            let at = trace.lerp(-cam.sample_fraction(wall.size, y));
            *px = palette.color(map.floor.tile_at(at));
        }
        column[wall.bottom..wall.top].fill(palette.color(hit.tile));
        for (y, px) in column[wall.top..].iter_mut().enumerate() {
            let at = trace.lerp(cam.sample_fraction(wall.size, wall.top + y));
            *px = palette.color(map.ceiling.tile_at(at));
        }
    }
}
