//! Furniture footprint validation. The engine treats furniture as an
//! opaque width x depth rectangle; which furniture may sit where is the
//! game layer's business, not the grid's.

use crate::grid::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quarter-turn rotation of a footprint. Odd quarter turns swap the
/// footprint's width and depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// A persisted furniture placement. Owned by the furniture subsystem; the
/// grid only validates its footprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurniturePlacement {
    #[serde(rename = "f")]
    pub furniture_id: Uuid,
    #[serde(rename = "x")]
    pub x: i16,
    #[serde(rename = "y")]
    pub y: i16,
    #[serde(rename = "w")]
    pub width: u16,
    #[serde(rename = "d")]
    pub depth: u16,
    #[serde(rename = "r")]
    pub rotation: Rotation,
}

impl FurniturePlacement {
    /// Footprint dimensions after rotation.
    pub fn footprint(&self) -> (u16, u16) {
        if self.rotation.swaps_axes() {
            (self.depth, self.width)
        } else {
            (self.width, self.depth)
        }
    }
}

/// True iff every tile of the `width` x `depth` rectangle anchored at
/// `(x, y)` is active. A zero-area footprint is vacuously valid.
pub fn is_placement_valid(tiles: &ActiveTileSet, x: i16, y: i16, width: u16, depth: u16) -> bool {
    for dx in 0..width as i16 {
        for dy in 0..depth as i16 {
            if !is_tile_active(tiles, x + dx, y + dy) {
                return false;
            }
        }
    }
    true
}

/// Rotation-aware footprint check for a persisted placement.
pub fn is_furniture_placement_valid(tiles: &ActiveTileSet, placement: &FurniturePlacement) -> bool {
    let (width, depth) = placement.footprint();
    is_placement_valid(tiles, placement.x, placement.y, width, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::*;

    #[test]
    fn test_unit_footprint_on_every_active_tile() {
        let tiles = chunks_to_tiles(&[Chunk::new(0, 0), Chunk::new(2, 0)]);
        for tile in &tiles {
            assert!(is_placement_valid(&tiles, tile.x(), tile.y(), 1, 1));
        }
    }

    #[test]
    fn test_footprint_overhanging_one_tile_is_invalid() {
        let tiles = chunks_to_tiles(&[Chunk::new(0, 0)]);
        // 2x2 fits exactly.
        assert!(is_placement_valid(&tiles, 0, 0, 2, 2));
        // Any shift pushes one column or row off the room.
        assert!(!is_placement_valid(&tiles, 1, 0, 2, 2));
        assert!(!is_placement_valid(&tiles, 0, 1, 2, 2));
        assert!(!is_placement_valid(&tiles, -1, 0, 2, 2));
    }

    #[test]
    fn test_footprint_outside_room_is_invalid() {
        let tiles = chunks_to_tiles(&[Chunk::new(0, 0)]);
        assert!(!is_placement_valid(&tiles, 5, 5, 1, 1));
    }

    #[test]
    fn test_zero_area_footprint_is_vacuously_valid() {
        let tiles = ActiveTileSet::default();
        assert!(is_placement_valid(&tiles, 0, 0, 0, 0));
        assert!(is_placement_valid(&tiles, 0, 0, 3, 0));
    }

    #[test]
    fn test_rotation_swaps_footprint() {
        // 4x2 room: a 3x1 couch fits horizontally, not vertically.
        let tiles = chunks_to_tiles(&[Chunk::new(0, 0), Chunk::new(2, 0)]);
        let mut couch = FurniturePlacement {
            furniture_id: Uuid::from_u128(7),
            x: 0,
            y: 0,
            width: 3,
            depth: 1,
            rotation: Rotation::R0,
        };
        assert!(is_furniture_placement_valid(&tiles, &couch));

        couch.rotation = Rotation::R90;
        assert!(!is_furniture_placement_valid(&tiles, &couch));

        couch.rotation = Rotation::R180;
        assert!(is_furniture_placement_valid(&tiles, &couch));
    }
}
