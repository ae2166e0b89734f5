use std::f32::consts::FRAC_PI_2;

use crate::angle::normalize_angle;
use crate::grid::Grid;

/// Per-tick movement and turn requests, each in {-1, 0, 1}.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub walk: i8, // 1 forward, -1 back
    pub turn: i8, // 1 clockwise (right), -1 counter-clockwise
}

impl Intent {
    pub fn new(walk: i8, turn: i8) -> Self {
        Self {
            walk: walk.signum(),
            turn: turn.signum(),
        }
    }
}

/// Distance and rotation covered in one tick at full intent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub move_speed: f32,     // world units per tick
    pub rotation_speed: f32, // radians per tick
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            rotation_speed: 5f32.to_radians(),
        }
    }
}

/// Viewer position and facing in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    facing: f32, // radians, always in [0, 2π)
}

impl Pose {
    pub fn new(x: f32, y: f32, facing: f32) -> Self {
        Self {
            x,
            y,
            facing: normalize_angle(facing),
        }
    }

    /// Centre of the map, looking down the +y axis.
    pub fn spawn(grid: &Grid) -> Self {
        Self::new(grid.width() / 2.0, grid.height() / 2.0, FRAC_PI_2)
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Advances one tick.
    pub fn tick(&mut self, grid: &Grid, intent: Intent, motion: Motion) -> bool {
        self.advance(grid, intent, motion, 1.0)
    }

    /// Advances by `ticks` (possibly fractional) ticks worth of motion.
    ///
    /// Turning always applies. The step is dropped whole if its destination is
    /// a wall; there is no sliding along the free axis. Returns whether the
    /// position changed.
    pub fn advance(&mut self, grid: &Grid, intent: Intent, motion: Motion, ticks: f32) -> bool {
        self.facing =
            normalize_angle(self.facing + f32::from(intent.turn) * motion.rotation_speed * ticks);

        let step = f32::from(intent.walk) * motion.move_speed * ticks;
        if step == 0.0 {
            return false;
        }

        let (sin, cos) = self.facing.sin_cos();
        let next_x = self.x + cos * step;
        let next_y = self.y + sin * step;
        if grid.wall_at(next_x, next_y) {
            return false;
        }

        self.x = next_x;
        self.y = next_y;
        true
    }
}
