// SPDX: CC0-1.0

pub mod export;
pub mod persist;
pub mod plotter;
pub mod project;
pub mod sample;
pub mod shell;
pub mod validate;
pub mod view;

use core::fmt;

pub type Number = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// Closed interval along one axis.
///
/// Usable intervals have `min < max`; validation is done by
/// [`validate::interval`], not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub min: Number,
    pub max: Number,
}

impl Interval {
    #[inline]
    pub const fn new(min: Number, max: Number) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn span(&self) -> Number {
        self.max - self.min
    }

    /// Whether zero lies strictly inside the interval.
    #[inline]
    pub fn straddles_zero(&self) -> bool {
        self.min < 0.0 && 0.0 < self.max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Size of the drawing surface, in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: Number,
    pub height: Number,
}

impl Surface {
    #[inline]
    pub const fn new(width: Number, height: Number) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800.0, 640.0)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
