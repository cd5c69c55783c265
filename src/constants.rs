/// Width and height of a chunk in tile units. Chunks are the unit of room
/// expansion: the editor adds and removes 2x2 blocks, never single tiles.
pub const CHUNK_SIZE: i16 = 2;

/// Default on-screen width of one tile's isometric diamond, in pixels.
pub const DEFAULT_TILE_WIDTH: f32 = 40.0;

/// Default on-screen height of one tile's isometric diamond, in pixels.
pub const DEFAULT_TILE_HEIGHT: f32 = 20.0;

/// Neighbor offsets for 4-directional (cardinal) movement in tile units.
pub const NEIGHBORS_4: [(i16, i16); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Neighbor offsets between chunk anchors. A chunk's cardinal neighbors sit
/// `CHUNK_SIZE` away because anchors are expressed in tile units.
pub const CHUNK_NEIGHBORS_4: [(i16, i16); 4] = [
    (-CHUNK_SIZE, 0),
    (0, CHUNK_SIZE),
    (CHUNK_SIZE, 0),
    (0, -CHUNK_SIZE),
];
