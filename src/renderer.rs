use crate::frame::FrameDriver;
use crate::grid::EMPTY;

const BACKGROUND: u32 = pack_rgb(33, 33, 33);
const MINIMAP_WALL: u32 = pack_rgb(34, 34, 34);
const MINIMAP_FLOOR: u32 = pack_rgb(255, 255, 255);
const RAY_COLOR: u32 = pack_rgb(255, 120, 120);
const PLAYER_COLOR: u32 = pack_rgb(255, 0, 0);
const PLAYER_RADIUS: f32 = 3.0;
const HEADING_LENGTH: f32 = 30.0;

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
fn grey(level: u8) -> u32 {
    pack_rgb(level, level, level)
}

/// A borrowed `width x height` pixel buffer with clipped drawing primitives.
pub struct Canvas<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert!(buf.len() >= width * height);
        Self { buf, width, height }
    }

    pub fn clear(&mut self, color: u32) {
        self.buf[..self.width * self.height].fill(color);
    }

    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fills `[x, x + w) x [y, y + h)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        let x0 = x.floor().max(0.0) as usize;
        let y0 = y.floor().max(0.0) as usize;
        let x1 = ((x + w).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((y + h).ceil().max(0.0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in self.buf[y0 * self.width..y1 * self.width].chunks_exact_mut(self.width) {
            row[x0..x1].fill(color);
        }
    }

    /// Bresenham line between two points, inclusive.
    pub fn draw_line(&mut self, from: [f32; 2], to: [f32; 2], color: u32) {
        let (mut x0, mut y0) = (from[0].round() as i32, from[1].round() as i32);
        let (x1, y1) = (to[0].round() as i32, to[1].round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, centre: [f32; 2], radius: f32, color: u32) {
        let r = radius.ceil() as i32;
        let (cx, cy) = (centre[0].round() as i32, centre[1].round() as i32);
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

/// Draws the wall strips of the last cast, then the minimap on top.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    driver: &FrameDriver,
    minimap_scale: f32,
) {
    let mut canvas = Canvas::new(buf, width, height);
    canvas.clear(BACKGROUND);

    let strip_width = driver.strip_width() as f32;
    for strip in driver.strips() {
        let (top, bottom) = strip.span(height as u32);
        canvas.fill_rect(
            strip.screen_x as f32,
            top as f32,
            strip_width,
            (bottom - top) as f32,
            grey(strip.shade.intensity()),
        );
    }

    draw_minimap(&mut canvas, driver, minimap_scale);
}

fn draw_minimap(canvas: &mut Canvas<'_>, driver: &FrameDriver, scale: f32) {
    let grid = driver.grid();
    let tile = grid.tile_size() * scale;
    for (row, col, content) in grid.cells() {
        let color = if content == EMPTY {
            MINIMAP_FLOOR
        } else {
            MINIMAP_WALL
        };
        canvas.fill_rect(col as f32 * tile, row as f32 * tile, tile, tile, color);
    }

    let pose = driver.pose();
    let eye = [pose.x * scale, pose.y * scale];
    for ray in driver.rays() {
        canvas.draw_line(eye, [ray.hit[0] * scale, ray.hit[1] * scale], RAY_COLOR);
    }

    canvas.fill_circle(eye, PLAYER_RADIUS, PLAYER_COLOR);
    let (sin, cos) = pose.facing().sin_cos();
    canvas.draw_line(
        eye,
        [eye[0] + cos * HEADING_LENGTH, eye[1] + sin * HEADING_LENGTH],
        PLAYER_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut buf = vec![0u32; 8 * 4];
        let mut canvas = Canvas::new(&mut buf, 8, 4);
        canvas.fill_rect(-3.0, 2.0, 5.0, 10.0, 7);
        for y in 0..4 {
            for x in 0..8 {
                let inside = x < 2 && y >= 2;
                assert_eq!(buf[y * 8 + x] == 7, inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut buf = vec![0u32; 10 * 10];
        let mut canvas = Canvas::new(&mut buf, 10, 10);
        canvas.draw_line([1.0, 1.0], [8.0, 5.0], 9);
        assert_eq!(buf[10 + 1], 9);
        assert_eq!(buf[5 * 10 + 8], 9);
        assert_eq!(buf.iter().filter(|&&p| p == 9).count(), 8);
    }

    #[test]
    fn off_canvas_drawing_is_ignored() {
        let mut buf = vec![0u32; 4 * 4];
        let mut canvas = Canvas::new(&mut buf, 4, 4);
        canvas.draw_line([-10.0, -10.0], [-2.0, 20.0], 1);
        canvas.fill_circle([50.0, 50.0], 3.0, 1);
        canvas.fill_rect(10.0, 10.0, 4.0, 4.0, 1);
        assert!(buf.iter().all(|&p| p == 0));
    }

    #[test]
    fn frame_draws_strips_and_minimap() {
        let config = Config::default();
        let mut driver = FrameDriver::new(&config).unwrap();
        driver.cast();
        let [w, h] = driver.screen();
        let (w, h) = (w as usize, h as usize);
        let mut buf = vec![0u32; w * h];
        render_frame(&mut buf, w, h, &driver, config.minimap_scale);

        // Centre column at the vertical midpoint is always covered by a wall strip.
        let mid = buf[(h / 2) * w + w / 2];
        assert!(mid == grey(255) || mid == grey(180));
        // Minimap corner is an outer wall tile.
        assert_eq!(buf[0], MINIMAP_WALL);
    }
}
