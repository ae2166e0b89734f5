//! Grid raycaster: casts one ray per screen column through a tile map and
//! projects each hit into a wall-strip height.

pub mod angle;
pub mod caster;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod input;
pub mod pose;
pub mod present;
pub mod projection;
pub mod renderer;

pub use caster::{Ray, RayCaster};
pub use config::Config;
pub use error::ConfigError;
pub use frame::FrameDriver;
pub use grid::Grid;
pub use pose::{Intent, Motion, Pose};
pub use projection::{Projection, Shade, Strip};
