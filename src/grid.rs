use crate::constants::*;
use crate::location::*;
use fnv::FnvHashSet;

/// The set of every walkable/buildable cell, regenerated from the chunk
/// list on each structural edit. Derived data: never persisted, never
/// mutated incrementally.
pub type ActiveTileSet = FnvHashSet<Tile>;

/// Expand a chunk list into its active tile set. Tiles shared by
/// overlapping chunks collapse naturally in the set.
pub fn chunks_to_tiles(chunks: &[Chunk]) -> ActiveTileSet {
    let mut tiles = ActiveTileSet::default();
    for chunk in chunks {
        tiles.extend(chunk.tiles());
    }
    tiles
}

pub fn is_tile_active(tiles: &ActiveTileSet, x: i16, y: i16) -> bool {
    tiles.contains(&Tile::new(x, y))
}

/// Bounding box of a chunk list, in tile units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkBounds {
    pub min_x: i16,
    pub min_y: i16,
    pub max_x: i16,
    pub max_y: i16,
}

impl Default for ChunkBounds {
    /// The baseline single-chunk extent. Callers render a default grid from
    /// this when no chunks exist yet.
    fn default() -> Self {
        ChunkBounds {
            min_x: 0,
            min_y: 0,
            max_x: CHUNK_SIZE,
            max_y: CHUNK_SIZE,
        }
    }
}

/// Bounding box over all chunk anchors, extended by `CHUNK_SIZE` on the max
/// side so the box covers the chunks' full tile extent. Empty input yields
/// the default baseline bounds.
pub fn chunks_bounds(chunks: &[Chunk]) -> ChunkBounds {
    let mut iter = chunks.iter();
    let first = match iter.next() {
        Some(chunk) => chunk,
        None => return ChunkBounds::default(),
    };

    let mut bounds = ChunkBounds {
        min_x: first.cx(),
        min_y: first.cy(),
        max_x: first.cx() + CHUNK_SIZE,
        max_y: first.cy() + CHUNK_SIZE,
    };

    for chunk in iter {
        bounds.min_x = bounds.min_x.min(chunk.cx());
        bounds.min_y = bounds.min_y.min(chunk.cy());
        bounds.max_x = bounds.max_x.max(chunk.cx() + CHUNK_SIZE);
        bounds.max_y = bounds.max_y.max(chunk.cy() + CHUNK_SIZE);
    }

    bounds
}
