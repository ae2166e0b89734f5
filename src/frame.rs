use crate::caster::{Ray, RayCaster};
use crate::config::Config;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::pose::{Intent, Motion, Pose};
use crate::projection::{Projection, Strip};

/// Owns the map, the viewer and the per-frame ray and strip buffers.
///
/// Buffers are sized once at construction and overwritten every frame, so a
/// frame never allocates.
pub struct FrameDriver {
    grid: Grid,
    pose: Pose,
    motion: Motion,
    projection: Projection,
    fov: f32,
    screen: [u32; 2],
    strip_width: u32,
    rays: Vec<Ray>,
    strips: Vec<Strip>,
}

impl FrameDriver {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let [width, height] = config.screen_size(&grid);
        let fov = config.fov_degrees.to_radians();
        let projection = Projection::new(width, fov, grid.tile_size())?;

        let columns = (width / config.strip_width) as usize;
        Ok(Self {
            pose: config.pose(&grid),
            grid,
            motion: config.motion(),
            projection,
            fov,
            screen: [width, height],
            strip_width: config.strip_width,
            rays: vec![Ray::default(); columns],
            strips: vec![Strip::default(); columns],
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub fn screen(&self) -> [u32; 2] {
        self.screen
    }

    pub fn strip_width(&self) -> u32 {
        self.strip_width
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Number of rays cast per frame.
    pub fn columns(&self) -> usize {
        self.rays.len()
    }

    /// Rays from the most recent [`FrameDriver::cast`].
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Strips from the most recent [`FrameDriver::cast`].
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Applies `ticks` worth of intent to the pose.
    pub fn update(&mut self, intent: Intent, ticks: f32) -> bool {
        self.pose.advance(&self.grid, intent, self.motion, ticks)
    }

    /// Casts one ray per column across the field of view and projects each hit.
    pub fn cast(&mut self) -> &[Strip] {
        let caster = RayCaster::new(&self.grid);
        let origin = [self.pose.x, self.pose.y];
        let facing = self.pose.facing();
        let step = self.fov / self.rays.len() as f32;
        let first = facing - self.fov * 0.5;

        for (i, (ray, strip)) in self.rays.iter_mut().zip(self.strips.iter_mut()).enumerate() {
            *ray = caster.cast(origin, first + i as f32 * step);
            *strip = self
                .projection
                .project(i as u32 * self.strip_width, ray, facing);
        }
        &self.strips
    }

    /// One full tick: move, then cast.
    pub fn frame(&mut self, intent: Intent, ticks: f32) -> &[Strip] {
        self.update(intent, ticks);
        self.cast()
    }
}
