//! The recompute-and-replace aggregate published after every structural
//! edit.
//!
//! Derived structures (tiles, perimeter, segments, rooms) are never
//! patched incrementally: each edit rebuilds the whole snapshot from the
//! chunk list and the caller swaps the old value for the new one. Room
//! sizes are tens to low hundreds of tiles, so the O(n) rebuild is far
//! cheaper than the staleness bugs it rules out.

use crate::connectivity::*;
use crate::door::*;
use crate::expansion::*;
use crate::grid::*;
use crate::location::*;
use crate::perimeter::*;
use crate::placement::*;
use crate::segment::*;
use log::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The value exchanged with the persistence layer: the chunk list plus the
/// placed doors and furniture. Everything else is derived and rebuilt on
/// load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SavedLayout {
    #[serde(rename = "c")]
    pub chunks: Vec<Chunk>,
    #[serde(rename = "d", default)]
    pub doors: Vec<DoorPlacement>,
    #[serde(rename = "f", default)]
    pub furniture: Vec<FurniturePlacement>,
}

/// An immutable snapshot of the grid and everything derived from it.
#[derive(Clone, Debug)]
pub struct GridSnapshot {
    pub chunks: Vec<Chunk>,
    pub tiles: ActiveTileSet,
    /// Exposed edges of the combined tile set, for floor/outline rendering.
    pub perimeter: Vec<PerimeterEdge>,
    /// Canonical wall segments: the union of every room's own segments.
    /// This includes walls between adjacent rooms, which the combined
    /// perimeter cannot see.
    pub wall_segments: Vec<WallSegment>,
    pub graph: ConnectivityGraph,
    pub furniture: Vec<FurniturePlacement>,
}

impl GridSnapshot {
    /// Rebuild every derived structure from a persisted layout. Doors
    /// whose segment no longer exists (or no longer fits them) are
    /// dropped here rather than carried around stale.
    pub fn compute(layout: &SavedLayout) -> GridSnapshot {
        let tiles = chunks_to_tiles(&layout.chunks);
        let perimeter = calculate_perimeter(&tiles);

        let mut rooms = derive_rooms(&layout.chunks);
        let segments_by_room = wall_segments_by_room(&rooms);

        let mut wall_segments: Vec<WallSegment> = segments_by_room
            .values()
            .flat_map(|segments| segments.iter().copied())
            .collect();
        wall_segments.sort_by_key(|s| s.id);

        let doors = revalidate_doors(&layout.doors, &wall_segments);
        link_rooms(&mut rooms, &segments_by_room, &doors);
        let fully_connected = is_fully_connected(&rooms);

        debug!(
            "Snapshot: {} chunks, {} tiles, {} perimeter edges, {} segments, {} rooms, fully_connected={}",
            layout.chunks.len(),
            tiles.len(),
            perimeter.len(),
            wall_segments.len(),
            rooms.len(),
            fully_connected
        );

        GridSnapshot {
            chunks: layout.chunks.clone(),
            tiles,
            perimeter,
            wall_segments,
            graph: ConnectivityGraph {
                rooms,
                doors: doors.clone(),
                is_fully_connected: fully_connected,
            },
            furniture: layout.furniture.clone(),
        }
    }

    /// The persisted form of this snapshot, handed back to storage on save.
    pub fn to_saved(&self) -> SavedLayout {
        SavedLayout {
            chunks: self.chunks.clone(),
            doors: self.graph.doors.clone(),
            furniture: self.furniture.clone(),
        }
    }

    /// Add a chunk and publish a fresh snapshot. Rejects chunks that do
    /// not share a full edge with the existing layout (the first chunk is
    /// always accepted); adding an already-present chunk is a no-op.
    pub fn with_chunk_added(&self, chunk: Chunk) -> Result<GridSnapshot, PlacementError> {
        if self.chunks.contains(&chunk) {
            return Ok(self.clone());
        }
        if would_create_hole(&self.chunks, chunk) {
            return Err(PlacementError::DisconnectedChunk {
                cx: chunk.cx(),
                cy: chunk.cy(),
            });
        }

        let mut layout = self.to_saved();
        layout.chunks.push(chunk);
        Ok(GridSnapshot::compute(&layout))
    }

    /// Remove a chunk and publish a fresh snapshot. Rejects removals that
    /// would split a room into islands; removing an absent chunk is a
    /// no-op. Doors stranded by the removal are dropped during recompute.
    pub fn with_chunk_removed(&self, chunk: Chunk) -> Result<GridSnapshot, PlacementError> {
        if !self.chunks.contains(&chunk) {
            return Ok(self.clone());
        }
        if !is_chunk_removable(&self.chunks, chunk) {
            return Err(PlacementError::DisconnectedChunk {
                cx: chunk.cx(),
                cy: chunk.cy(),
            });
        }

        let mut layout = self.to_saved();
        layout.chunks.retain(|c| *c != chunk);
        Ok(GridSnapshot::compute(&layout))
    }

    /// Place a door and publish a fresh snapshot. The door must bind to a
    /// live segment with its whole span inside the run.
    pub fn with_door_added(&self, door: DoorPlacement) -> Result<GridSnapshot, PlacementError> {
        validate_door_against(&door, &self.wall_segments)?;

        let mut layout = self.to_saved();
        layout.doors.push(door);
        Ok(GridSnapshot::compute(&layout))
    }

    /// Remove a door by id and publish a fresh snapshot. Unknown ids are a
    /// no-op.
    pub fn with_door_removed(&self, door_id: Uuid) -> Result<GridSnapshot, PlacementError> {
        let mut layout = self.to_saved();
        layout.doors.retain(|d| d.id != door_id);
        Ok(GridSnapshot::compute(&layout))
    }

    /// Chunk positions the expansion UI may offer next.
    pub fn expandable_chunks(&self) -> Vec<Chunk> {
        crate::expansion::expandable_chunks(&self.chunks)
    }

    /// Footprint validity query for the placement UI. Never mutates
    /// placement state.
    pub fn is_furniture_valid(&self, placement: &FurniturePlacement) -> bool {
        is_furniture_placement_valid(&self.tiles, placement)
    }
}
