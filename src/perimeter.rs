//! Walks the active tile set and emits every exposed tile edge: the
//! boundary between an active tile and an absent neighbor. Purely derived
//! output, recomputed whenever the tile set changes.

use crate::grid::*;
use crate::location::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which sides of a tile face an absent neighbor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Exposure: u8 {
        const NONE = 0;
        const UP = 1;
        const DOWN = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

/// Compute the exposure mask for one tile. An interior tile (all four
/// neighbors active) has no exposure.
pub fn tile_exposure(tiles: &ActiveTileSet, tile: Tile) -> Exposure {
    let mut exposure = Exposure::NONE;
    if !tiles.contains(&tile.offset(0, -1)) {
        exposure |= Exposure::UP;
    }
    if !tiles.contains(&tile.offset(0, 1)) {
        exposure |= Exposure::DOWN;
    }
    if !tiles.contains(&tile.offset(-1, 0)) {
        exposure |= Exposure::LEFT;
    }
    if !tiles.contains(&tile.offset(1, 0)) {
        exposure |= Exposure::RIGHT;
    }
    exposure
}

/// Direction an exposed edge faces, from the owning tile outward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// One exposed side of one active tile, in grid-corner coordinates.
/// Endpoints run in increasing axis order so collinear edges chain
/// head-to-tail when merged into wall segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerimeterEdge {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
    pub direction: EdgeDirection,
}

impl PerimeterEdge {
    /// The active tile this edge belongs to.
    pub fn tile(&self) -> Tile {
        match self.direction {
            EdgeDirection::Up | EdgeDirection::Left => Tile::new(self.x1, self.y1),
            EdgeDirection::Down => Tile::new(self.x1, self.y1 - 1),
            EdgeDirection::Right => Tile::new(self.x1 - 1, self.y1),
        }
    }
}

/// Emit one directed edge for every exposed tile side. A tile fully
/// surrounded by active neighbors contributes nothing; an empty tile set
/// yields an empty perimeter.
///
/// Output order follows set iteration order and is not sorted; the wall
/// segment builder sorts before merging.
pub fn calculate_perimeter(tiles: &ActiveTileSet) -> Vec<PerimeterEdge> {
    let mut edges = Vec::new();

    for &tile in tiles {
        let exposure = tile_exposure(tiles, tile);
        if exposure.is_empty() {
            continue;
        }

        let (x, y) = (tile.x(), tile.y());

        if exposure.contains(Exposure::UP) {
            edges.push(PerimeterEdge {
                x1: x,
                y1: y,
                x2: x + 1,
                y2: y,
                direction: EdgeDirection::Up,
            });
        }
        if exposure.contains(Exposure::DOWN) {
            edges.push(PerimeterEdge {
                x1: x,
                y1: y + 1,
                x2: x + 1,
                y2: y + 1,
                direction: EdgeDirection::Down,
            });
        }
        if exposure.contains(Exposure::LEFT) {
            edges.push(PerimeterEdge {
                x1: x,
                y1: y,
                x2: x,
                y2: y + 1,
                direction: EdgeDirection::Left,
            });
        }
        if exposure.contains(Exposure::RIGHT) {
            edges.push(PerimeterEdge {
                x1: x + 1,
                y1: y,
                x2: x + 1,
                y2: y + 1,
                direction: EdgeDirection::Right,
            });
        }
    }

    edges
}
