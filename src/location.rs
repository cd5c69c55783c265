use crate::constants::*;
use serde::*;

/// A single unit grid cell. Tiles are derived data: they are always
/// regenerated from the chunk list and never stored directly.
///
/// Coordinates are signed so rooms can grow in every direction from the
/// origin. The packed form (two i16 halves in a u32) is what gets
/// serialized, which keeps snapshots compact and avoids the string-keyed
/// `"x,y"` maps the engine replaced.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Tile {
    x: i16,
    y: i16,
}

impl Tile {
    pub fn new(x: i16, y: i16) -> Self {
        Tile { x, y }
    }

    #[inline]
    pub fn x(self) -> i16 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i16 {
        self.y
    }

    pub fn offset(self, dx: i16, dy: i16) -> Self {
        Tile {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbors of this tile.
    pub fn neighbors(self) -> [Tile; 4] {
        let mut result = [self; 4];
        for (i, &(dx, dy)) in NEIGHBORS_4.iter().enumerate() {
            result[i] = self.offset(dx, dy);
        }
        result
    }

    #[inline]
    pub fn packed_repr(self) -> u32 {
        ((self.x as u16 as u32) << 16) | (self.y as u16 as u32)
    }

    #[inline]
    pub fn from_packed(packed: u32) -> Self {
        Tile {
            x: (packed >> 16) as u16 as i16,
            y: packed as u16 as i16,
        }
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Tile::from_packed)
    }
}

/// Anchor of a 2x2 block of tiles. Chunks are the unit of room expansion
/// and the only grid data that is persisted; everything else is derived.
///
/// Anchors are expressed in tile units, so a chunk's cardinal neighbors
/// sit `CHUNK_SIZE` away.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Chunk {
    cx: i16,
    cy: i16,
}

impl Chunk {
    pub fn new(cx: i16, cy: i16) -> Self {
        Chunk { cx, cy }
    }

    #[inline]
    pub fn cx(self) -> i16 {
        self.cx
    }

    #[inline]
    pub fn cy(self) -> i16 {
        self.cy
    }

    /// The four constituent tiles of this chunk.
    pub fn tiles(self) -> [Tile; 4] {
        [
            Tile::new(self.cx, self.cy),
            Tile::new(self.cx + 1, self.cy),
            Tile::new(self.cx, self.cy + 1),
            Tile::new(self.cx + 1, self.cy + 1),
        ]
    }

    /// The four chunk positions sharing a full edge with this chunk.
    pub fn neighbors(self) -> [Chunk; 4] {
        let mut result = [self; 4];
        for (i, &(dx, dy)) in CHUNK_NEIGHBORS_4.iter().enumerate() {
            result[i] = Chunk::new(self.cx + dx, self.cy + dy);
        }
        result
    }

    /// True if the two chunks share a full edge: exactly `CHUNK_SIZE` apart
    /// along one axis and aligned on the other. Diagonal or partially
    /// overlapping boundaries do not count.
    pub fn is_adjacent(self, other: Chunk) -> bool {
        let dx = (self.cx - other.cx).abs();
        let dy = (self.cy - other.cy).abs();
        (dx == CHUNK_SIZE && dy == 0) || (dx == 0 && dy == CHUNK_SIZE)
    }

    #[inline]
    pub fn packed_repr(self) -> u32 {
        ((self.cx as u16 as u32) << 16) | (self.cy as u16 as u32)
    }

    #[inline]
    pub fn from_packed(packed: u32) -> Self {
        Chunk {
            cx: (packed >> 16) as u16 as i16,
            cy: packed as u16 as i16,
        }
    }
}

impl Serialize for Chunk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Chunk {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Chunk::from_packed)
    }
}
