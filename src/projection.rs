//! Bidirectional mapping between grid coordinates and 2D screen coordinates.
//!
//! The projection is a rendering-scale concern only: changing the tile
//! dimensions never changes which tiles are active or how walls merge, just
//! where they land on screen.

use crate::constants::*;

/// A screen-space point produced by the projection. Pure value, no identity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IsoPoint {
    pub x: f32,
    pub y: f32,
}

/// Isometric projection parameterized by the on-screen tile diamond size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IsoProjection {
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for IsoProjection {
    fn default() -> Self {
        IsoProjection {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
        }
    }
}

impl IsoProjection {
    pub fn new(tile_width: f32, tile_height: f32) -> Self {
        IsoProjection {
            tile_width,
            tile_height,
        }
    }

    /// Project a grid coordinate to screen space. Total function.
    pub fn to_iso(&self, x: f32, y: f32) -> IsoPoint {
        IsoPoint {
            x: (x - y) * self.tile_width / 2.0,
            y: (x + y) * self.tile_height / 2.0,
        }
    }

    /// Exact algebraic inverse of [`to_iso`](Self::to_iso).
    ///
    /// Solving the projection for (x, y):
    ///   x = screen_x / tile_width + screen_y / tile_height
    ///   y = screen_y / tile_height - screen_x / tile_width
    pub fn from_iso(&self, point: IsoPoint) -> (f32, f32) {
        let half_w = self.tile_width / 2.0;
        let half_h = self.tile_height / 2.0;
        let a = point.x / half_w;
        let b = point.y / half_h;
        ((a + b) / 2.0, (b - a) / 2.0)
    }
}
