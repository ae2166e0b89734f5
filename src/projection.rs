use crate::caster::Ray;
use crate::error::ConfigError;

/// Brightness tier of a wall strip. Vertical hits face east/west and read brighter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shade {
    #[default]
    Lit,
    Dim,
}

impl Shade {
    pub fn of(ray: &Ray) -> Self {
        if ray.vertical { Shade::Lit } else { Shade::Dim }
    }

    #[inline]
    pub fn intensity(self) -> u8 {
        match self {
            Shade::Lit => 255,
            Shade::Dim => 180,
        }
    }
}

/// One projected screen column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Strip {
    pub screen_x: u32,
    pub height: f32,
    pub shade: Shade,
}

impl Strip {
    /// Rows `[top, bottom)` covered by the strip, centred and clipped to the screen.
    pub fn span(&self, screen_height: u32) -> (u32, u32) {
        let h = screen_height as f32;
        let half = (self.height * 0.5).min(h);
        let top = (h * 0.5 - half).max(0.0);
        let bottom = (h * 0.5 + half).min(h);
        (top as u32, bottom.ceil() as u32)
    }
}

/// Distance from the eye to a projection plane `screen_width` wide spanning `fov`.
pub fn plane_distance(screen_width: u32, fov: f32) -> f32 {
    0.5 * screen_width as f32 / (0.5 * fov).tan()
}

/// Maps hit distances to strip heights for a fixed screen and field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    tile_size: f32,
    plane_distance: f32,
}

impl Projection {
    pub fn new(screen_width: u32, fov: f32, tile_size: f32) -> Result<Self, ConfigError> {
        if !(fov > 0.0 && fov < std::f32::consts::PI) {
            return Err(ConfigError::InvalidFov(fov.to_degrees()));
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(tile_size));
        }
        if screen_width == 0 {
            return Err(ConfigError::InvalidScreen {
                width: screen_width,
                height: 0,
            });
        }
        Ok(Self {
            tile_size,
            plane_distance: plane_distance(screen_width, fov),
        })
    }

    #[inline]
    pub fn plane_distance(&self) -> f32 {
        self.plane_distance
    }

    /// Hit distance measured perpendicular to the view plane.
    #[inline]
    pub fn corrected_distance(ray: &Ray, facing: f32) -> f32 {
        ray.distance * (ray.angle - facing).cos()
    }

    /// Height of a wall slice at `corrected` distance. Zero distance projects to infinity.
    #[inline]
    pub fn strip_height(&self, corrected: f32) -> f32 {
        if corrected <= 0.0 {
            return f32::INFINITY;
        }
        self.tile_size / corrected * self.plane_distance
    }

    pub fn project(&self, screen_x: u32, ray: &Ray, facing: f32) -> Strip {
        Strip {
            screen_x,
            height: self.strip_height(Self::corrected_distance(ray, facing)),
            shade: Shade::of(ray),
        }
    }
}
