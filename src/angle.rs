use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Wraps any angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Which way a ray points, with +y growing downwards on screen.
///
/// Computed once per ray so both sweeps see the same classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Facing {
    /// Classifies an angle that is already normalized.
    pub fn of(angle: f32) -> Self {
        let vertical = if angle > 0.0 && angle < PI {
            Vertical::Down
        } else {
            Vertical::Up
        };
        let horizontal = if angle < FRAC_PI_2 || angle > 3.0 * FRAC_PI_2 {
            Horizontal::Right
        } else {
            Horizontal::Left
        };
        Self {
            vertical,
            horizontal,
        }
    }

    #[inline]
    pub fn up(self) -> bool {
        self.vertical == Vertical::Up
    }

    #[inline]
    pub fn down(self) -> bool {
        self.vertical == Vertical::Down
    }

    #[inline]
    pub fn left(self) -> bool {
        self.horizontal == Horizontal::Left
    }

    #[inline]
    pub fn right(self) -> bool {
        self.horizontal == Horizontal::Right
    }
}
