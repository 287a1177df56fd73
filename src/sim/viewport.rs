//! Viewport dimensions and the derived scale factor

use crate::consts::{BASE_HEIGHT, BASE_WIDTH, GROUND_HEIGHT};

/// Current window size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::BASE
    }
}

impl Viewport {
    pub const BASE: Viewport = Viewport {
        width: BASE_WIDTH,
        height: BASE_HEIGHT,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Uniform scale from base resolution (height-driven)
    #[inline]
    pub fn scale(&self) -> f32 {
        self.height / BASE_HEIGHT
    }

    /// Screen y of the top of the ground strip
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT * self.scale()
    }
}
