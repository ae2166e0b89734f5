use crate::angle::{Facing, normalize_angle};
use crate::grid::Grid;

// Below this |sin| or |cos| a ray is treated as parallel to that family of grid lines.
const PARALLEL_EPS: f32 = 1e-6;

/// The nearest wall hit along one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub angle: f32,
    pub hit: [f32; 2],
    pub distance: f32,
    /// Hit came from the vertical grid-line sweep (an east/west facing wall).
    pub vertical: bool,
    /// Content id of the wall cell, `None` if the ray left the map.
    pub content: Option<u8>,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            angle: 0.0,
            hit: [0.0; 2],
            distance: f32::INFINITY,
            vertical: false,
            content: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Hit {
    point: [f32; 2],
    distance: f32,
    content: Option<u8>,
}

/// Finds wall intersections by stepping along horizontal and vertical grid lines.
#[derive(Clone, Copy, Debug)]
pub struct RayCaster<'a> {
    grid: &'a Grid,
    nudge: f32,
    max_steps: usize,
}

impl<'a> RayCaster<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            // Any offset in (0, tile] selects the cell behind the line; stay well inside it.
            nudge: 1.0f32.min(grid.tile_size() * 0.5),
            // Each step crosses one grid line, so the bounding ring is reached well before this.
            max_steps: grid.rows().max(grid.cols()) + 2,
        }
    }

    /// Casts a ray from `origin` at `angle` (any range; normalized here).
    pub fn cast(&self, origin: [f32; 2], angle: f32) -> Ray {
        let angle = normalize_angle(angle);
        let facing = Facing::of(angle);
        let (sin, cos) = angle.sin_cos();
        let tan = sin / cos;

        let horizontal = if sin.abs() < PARALLEL_EPS {
            None
        } else {
            Some(self.horizontal_sweep(origin, facing, tan))
        };
        let vertical = if cos.abs() < PARALLEL_EPS {
            None
        } else {
            Some(self.vertical_sweep(origin, facing, tan))
        };

        let (hit, is_vertical) = nearest(horizontal, vertical);

        Ray {
            angle,
            hit: hit.point,
            distance: hit.distance,
            vertical: is_vertical,
            content: hit.content,
        }
    }

    /// Marches across `y = k * tile` lines.
    fn horizontal_sweep(&self, origin: [f32; 2], facing: Facing, tan: f32) -> Hit {
        let tile = self.grid.tile_size();
        let [ox, oy] = origin;

        let mut y = (oy / tile).floor() * tile;
        if facing.down() {
            y += tile;
        }
        let mut x = ox + (y - oy) / tan;

        let y_step = if facing.up() { -tile } else { tile };
        let mut x_step = tile / tan;
        if (facing.left() && x_step > 0.0) || (facing.right() && x_step < 0.0) {
            x_step = -x_step;
        }

        let probe_dy = if facing.up() { -self.nudge } else { 0.0 };
        let mut steps = 0;
        while !self.grid.wall_at(x, y + probe_dy) {
            steps += 1;
            assert!(
                steps <= self.max_steps,
                "horizontal sweep escaped the map from {origin:?}"
            );
            x += x_step;
            y += y_step;
        }

        self.hit(origin, [x, y], [x, y + probe_dy])
    }

    /// Marches across `x = k * tile` lines.
    fn vertical_sweep(&self, origin: [f32; 2], facing: Facing, tan: f32) -> Hit {
        let tile = self.grid.tile_size();
        let [ox, oy] = origin;

        let mut x = (ox / tile).floor() * tile;
        if facing.right() {
            x += tile;
        }
        let mut y = oy + (x - ox) * tan;

        let x_step = if facing.left() { -tile } else { tile };
        let mut y_step = tile * tan;
        if (facing.up() && y_step > 0.0) || (facing.down() && y_step < 0.0) {
            y_step = -y_step;
        }

        let probe_dx = if facing.left() { -self.nudge } else { 0.0 };
        let mut steps = 0;
        while !self.grid.wall_at(x + probe_dx, y) {
            steps += 1;
            assert!(
                steps <= self.max_steps,
                "vertical sweep escaped the map from {origin:?}"
            );
            x += x_step;
            y += y_step;
        }

        self.hit(origin, [x, y], [x + probe_dx, y])
    }

    #[inline]
    fn hit(&self, origin: [f32; 2], point: [f32; 2], probe: [f32; 2]) -> Hit {
        Hit {
            point,
            distance: (point[0] - origin[0]).hypot(point[1] - origin[1]),
            content: self.grid.content_at(probe[0], probe[1]),
        }
    }
}

/// Picks the closer of the two sweeps; an exact tie goes to the vertical hit.
fn nearest(horizontal: Option<Hit>, vertical: Option<Hit>) -> (Hit, bool) {
    match (horizontal, vertical) {
        (Some(h), Some(v)) if h.distance < v.distance => (h, false),
        (_, Some(v)) => (v, true),
        (Some(h), None) => (h, false),
        (None, None) => unreachable!("a ray is parallel to at most one grid axis"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn room(tile: f32) -> Grid {
        let rows: [[u8; 7]; 7] = [
            [1, 1, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1, 1],
        ];
        Grid::new(&rows, tile).unwrap()
    }

    #[test]
    fn axis_rays_hit_the_expected_faces() {
        let grid = room(64.0);
        let caster = RayCaster::new(&grid);
        let centre = [3.5 * 64.0, 3.5 * 64.0];

        let right = caster.cast(centre, 0.0);
        assert!(right.vertical);
        assert!((right.distance - 160.0).abs() < 1e-3);
        assert!((right.hit[0] - 384.0).abs() < 1e-3);

        let down = caster.cast(centre, FRAC_PI_2);
        assert!(!down.vertical);
        assert!((down.distance - 160.0).abs() < 1e-3);
        assert!((down.hit[1] - 384.0).abs() < 1e-3);

        let left = caster.cast(centre, PI);
        assert!(left.vertical);
        assert!((left.distance - 160.0).abs() < 1e-3);
        assert!((left.hit[0] - 64.0).abs() < 1e-3);

        let up = caster.cast(centre, 3.0 * FRAC_PI_2);
        assert!(!up.vertical);
        assert!((up.distance - 160.0).abs() < 1e-3);
        assert!((up.hit[1] - 64.0).abs() < 1e-3);
    }

    #[test]
    fn diagonal_reaches_the_far_corner() {
        let grid = room(10.0);
        let caster = RayCaster::new(&grid);
        // From (15, 15) at 45 degrees both sweeps arrive at the corner (60, 60);
        // the tie goes to the vertical hit.
        let ray = caster.cast([15.0, 15.0], FRAC_PI_4);
        assert!((ray.hit[0] - 60.0).abs() < 1e-3);
        assert!((ray.hit[1] - 60.0).abs() < 1e-3);
        assert!((ray.distance - 45.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
        assert!(ray.vertical);
    }

    #[test]
    fn exact_tie_goes_to_vertical() {
        let h = Hit {
            point: [1.0, 0.0],
            distance: 5.0,
            content: Some(1),
        };
        let v = Hit {
            point: [0.0, 1.0],
            distance: 5.0,
            content: Some(2),
        };
        let (hit, vertical) = nearest(Some(h), Some(v));
        assert!(vertical);
        assert_eq!(hit.content, Some(2));

        let closer = Hit { distance: 4.0, ..h };
        assert!(!nearest(Some(closer), Some(v)).1);
        assert!(nearest(None, Some(v)).1);
        assert!(!nearest(Some(h), None).1);
    }

    #[test]
    fn oblique_ray_matches_geometry() {
        let grid = room(10.0);
        let caster = RayCaster::new(&grid);
        // Shallow angle to the right: crosses x = 60 before y reaches 60.
        let angle = 0.2f32;
        let origin = [15.0, 35.0];
        let ray = caster.cast(origin, angle);
        assert!(ray.vertical);
        let expected = (60.0 - 15.0) / angle.cos();
        assert!((ray.distance - expected).abs() < 1e-3, "{}", ray.distance);
        assert_eq!(ray.content, Some(1));
    }

    #[test]
    fn negative_and_wrapped_angles_agree() {
        let grid = room(10.0);
        let caster = RayCaster::new(&grid);
        let a = caster.cast([35.0, 35.0], -0.5);
        let b = caster.cast([35.0, 35.0], 2.0 * PI - 0.5);
        assert!((a.distance - b.distance).abs() < 1e-3);
        assert_eq!(a.vertical, b.vertical);
    }

    #[test]
    fn cast_from_inside_wall_terminates() {
        let grid = room(10.0);
        let caster = RayCaster::new(&grid);
        for k in 0..16 {
            let ray = caster.cast([5.0, 5.0], k as f32 * PI / 8.0);
            assert!(ray.distance.is_finite());
        }
    }

    #[test]
    fn cast_from_outside_map_terminates() {
        let grid = room(10.0);
        let caster = RayCaster::new(&grid);
        let ray = caster.cast([-50.0, 500.0], 1.0);
        assert!(ray.distance.is_finite());
        assert_eq!(ray.content, None);
    }

    #[test]
    fn every_ray_stops_on_a_wall() {
        let grid = room(16.0);
        let caster = RayCaster::new(&grid);
        for k in 0..360 {
            let ray = caster.cast([50.0, 70.0], (k as f32).to_radians());
            assert!(ray.distance > 0.0 && ray.distance.is_finite());
            assert!(ray.content.is_some_and(|c| c != 0), "angle {k}: {ray:?}");
        }
    }

    #[test]
    fn small_tiles_nudge_within_the_cell() {
        let grid = room(0.5);
        let caster = RayCaster::new(&grid);
        let up = caster.cast([1.75, 1.75], 3.0 * FRAC_PI_2);
        assert!((up.hit[1] - 0.5).abs() < 1e-4);
        let left = caster.cast([1.75, 1.75], PI);
        assert!((left.hit[0] - 0.5).abs() < 1e-4);
    }
}
