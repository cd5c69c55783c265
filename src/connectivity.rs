//! Room derivation and the door/connectivity graph.
//!
//! Rooms are maximal clusters of edge-adjacent chunks. Wall segments are
//! computed per room (each interior space owns its own walls), which is
//! what lets a segment sit between two rooms: where two clusters back onto
//! the same tile boundary, a door on that wall bridges them. Without a
//! door, geometrically adjacent rooms stay disconnected in the graph.

use crate::door::*;
use crate::grid::*;
use crate::location::*;
use crate::segment::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use pathfinding::directed::bfs::bfs_reach;
use pathfinding::undirected::connected_components::connected_components;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deterministic room id from the cluster's minimal chunk anchor, so room
/// identity is stable across recomputation as long as the cluster keeps
/// its anchor chunk.
pub fn room_id(anchor: Chunk) -> Uuid {
    const ROOM_TAG: u128 = 5;
    Uuid::from_u128((ROOM_TAG << 64) | anchor.packed_repr() as u128)
}

/// A maximal cluster of edge-adjacent chunks treated as one interior space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub chunks: FnvHashSet<Chunk>,
    /// Rooms reachable from this one through at least one door.
    pub connected_rooms: FnvHashSet<Uuid>,
}

impl Room {
    /// This room's own active tile set.
    pub fn tiles(&self) -> ActiveTileSet {
        let chunks: Vec<Chunk> = self.chunks.iter().copied().collect();
        chunks_to_tiles(&chunks)
    }
}

/// The room graph over the current layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectivityGraph {
    pub rooms: Vec<Room>,
    pub doors: Vec<DoorPlacement>,
    pub is_fully_connected: bool,
}

/// Partition the chunk list into rooms. Two chunks are in the same room
/// iff they are connected through a chain of full-edge adjacencies; door
/// state is ignored at this stage. Rooms come back sorted by anchor so
/// output order is deterministic.
pub fn derive_rooms(chunks: &[Chunk]) -> Vec<Room> {
    let components = connected_components(chunks, |c| {
        let c = *c;
        chunks
            .iter()
            .copied()
            .filter(move |other| c.is_adjacent(*other))
            .collect::<Vec<_>>()
    });

    let mut rooms: Vec<Room> = components
        .into_iter()
        .map(|component| {
            let chunks: FnvHashSet<Chunk> = component.into_iter().collect();
            let anchor = chunks
                .iter()
                .copied()
                .min()
                .expect("connected component is never empty");
            Room {
                id: room_id(anchor),
                chunks,
                connected_rooms: FnvHashSet::default(),
            }
        })
        .collect();

    rooms.sort_by_key(|room| room.id);
    rooms
}

/// Wall segments of every room, keyed by room id. The concatenation of
/// these per-room lists is the canonical segment set: it includes walls
/// between adjacent rooms, which the global perimeter cannot see.
pub fn wall_segments_by_room(rooms: &[Room]) -> FnvHashMap<Uuid, Vec<WallSegment>> {
    rooms
        .iter()
        .map(|room| (room.id, calculate_wall_segments(&room.tiles())))
        .collect()
}

/// Populate `connected_rooms` from the door list. A door connects its
/// segment's room to whichever room owns a tile immediately across the
/// wall anywhere along the door's span; doors facing empty space are
/// exterior doors and connect nothing.
pub fn link_rooms(
    rooms: &mut [Room],
    segments_by_room: &FnvHashMap<Uuid, Vec<WallSegment>>,
    doors: &[DoorPlacement],
) {
    let mut tile_owner: FnvHashMap<Tile, usize> = FnvHashMap::default();
    for (index, room) in rooms.iter().enumerate() {
        for tile in room.tiles() {
            tile_owner.insert(tile, index);
        }
    }

    for door in doors {
        let owner = rooms.iter().position(|room| {
            segments_by_room
                .get(&room.id)
                .map(|segments| segments.iter().any(|s| s.id == door.segment_id))
                .unwrap_or(false)
        });

        let (owner_index, segment) = match owner {
            Some(index) => {
                let segment = segments_by_room[&rooms[index].id]
                    .iter()
                    .find(|s| s.id == door.segment_id)
                    .copied()
                    .expect("owner lookup matched this segment id");
                (index, segment)
            }
            None => {
                trace!("Door {} references no room's segment", door.id);
                continue;
            }
        };

        for position in door.position..door.position + door.width {
            let across = segment.tile_across_at(position);
            if let Some(&other_index) = tile_owner.get(&across) {
                if other_index != owner_index {
                    let owner_id = rooms[owner_index].id;
                    let other_id = rooms[other_index].id;
                    rooms[owner_index].connected_rooms.insert(other_id);
                    rooms[other_index].connected_rooms.insert(owner_id);
                }
            }
        }
    }
}

/// BFS over the room graph from an arbitrary room. Zero or one room is
/// trivially fully connected.
pub fn is_fully_connected(rooms: &[Room]) -> bool {
    let start = match rooms.first() {
        Some(room) => room.id,
        None => return true,
    };

    let edges: FnvHashMap<Uuid, Vec<Uuid>> = rooms
        .iter()
        .map(|room| (room.id, room.connected_rooms.iter().copied().collect()))
        .collect();

    let visited = bfs_reach(start, |id| edges.get(id).cloned().unwrap_or_default()).count();
    visited == rooms.len()
}

/// Build the full connectivity graph for a chunk layout and door list.
/// Doors that no longer bind to a live segment are dropped first.
pub fn build_connectivity(chunks: &[Chunk], doors: &[DoorPlacement]) -> ConnectivityGraph {
    let mut rooms = derive_rooms(chunks);
    let segments_by_room = wall_segments_by_room(&rooms);

    let all_segments: Vec<WallSegment> = segments_by_room
        .values()
        .flat_map(|segments| segments.iter().copied())
        .collect();
    let doors = revalidate_doors(doors, &all_segments);

    link_rooms(&mut rooms, &segments_by_room, &doors);
    let fully_connected = is_fully_connected(&rooms);

    debug!(
        "Connectivity: {} rooms, {} doors, fully_connected={}",
        rooms.len(),
        doors.len(),
        fully_connected
    );

    ConnectivityGraph {
        rooms,
        doors,
        is_fully_connected: fully_connected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::door::DoorKind;

    /// Two rooms backing onto the same tile boundary: chunk (2, 1) is
    /// offset one tile south of chunk (0, 0), so they do not share a full
    /// chunk edge (separate rooms) but tile (1, 1) of room A sits directly
    /// across room B's left wall at (2, 1).
    fn adjacent_two_room_layout() -> Vec<Chunk> {
        vec![Chunk::new(0, 0), Chunk::new(2, 1)]
    }

    fn bridging_door(chunks: &[Chunk]) -> DoorPlacement {
        let rooms = derive_rooms(chunks);
        let segments_by_room = wall_segments_by_room(&rooms);
        let room_b = rooms
            .iter()
            .find(|room| room.chunks.contains(&Chunk::new(2, 1)))
            .unwrap();
        let left_wall = segments_by_room[&room_b.id]
            .iter()
            .find(|s| s.surface == WallSurface::LeftWall)
            .unwrap();
        DoorPlacement {
            id: Uuid::from_u128(1),
            segment_id: left_wall.id,
            position: 0,
            kind: DoorKind::Standard,
            width: 1,
        }
    }

    #[test]
    fn test_single_cluster_is_one_room() {
        let rooms = derive_rooms(&[Chunk::new(0, 0), Chunk::new(2, 0), Chunk::new(2, 2)]);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].chunks.len(), 3);
    }

    #[test]
    fn test_diagonal_chunks_are_separate_rooms() {
        let rooms = derive_rooms(&[Chunk::new(0, 0), Chunk::new(2, 2)]);
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn test_empty_layout_trivially_connected() {
        let graph = build_connectivity(&[], &[]);
        assert!(graph.rooms.is_empty());
        assert!(graph.is_fully_connected);
    }

    #[test]
    fn test_single_room_trivially_connected() {
        let graph = build_connectivity(&[Chunk::new(0, 0)], &[]);
        assert_eq!(graph.rooms.len(), 1);
        assert!(graph.is_fully_connected);
    }

    #[test]
    fn test_rooms_without_door_are_disconnected() {
        let chunks = adjacent_two_room_layout();
        let graph = build_connectivity(&chunks, &[]);
        assert_eq!(graph.rooms.len(), 2);
        assert!(!graph.is_fully_connected);
        assert!(graph.rooms.iter().all(|r| r.connected_rooms.is_empty()));
    }

    #[test]
    fn test_door_bridges_adjacent_rooms() {
        let chunks = adjacent_two_room_layout();
        let door = bridging_door(&chunks);
        let graph = build_connectivity(&chunks, &[door]);
        assert!(graph.is_fully_connected);
        assert!(graph
            .rooms
            .iter()
            .all(|room| room.connected_rooms.len() == 1));
    }

    #[test]
    fn test_exterior_door_connects_nothing() {
        // A door on room B's left wall at position 1 faces tile (1, 2),
        // which no room owns.
        let chunks = adjacent_two_room_layout();
        let mut door = bridging_door(&chunks);
        door.position = 1;
        let graph = build_connectivity(&chunks, &[door]);
        assert!(!graph.is_fully_connected);
        // The door itself is still a valid placement; it just bridges nothing.
        assert_eq!(graph.doors.len(), 1);
    }

    #[test]
    fn test_room_ids_stable_across_recompute() {
        let chunks = adjacent_two_room_layout();
        let a = derive_rooms(&chunks);
        let b = derive_rooms(&chunks);
        let ids_a: Vec<Uuid> = a.iter().map(|r| r.id).collect();
        let ids_b: Vec<Uuid> = b.iter().map(|r| r.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_three_rooms_chain() {
        // A - B - C in a staircase: doors A|B and B|C make the graph
        // fully connected even though A and C never touch.
        let chunks = vec![Chunk::new(0, 0), Chunk::new(2, 1), Chunk::new(4, 2)];
        let rooms = derive_rooms(&chunks);
        assert_eq!(rooms.len(), 3);

        let segments_by_room = wall_segments_by_room(&rooms);
        let mut doors = Vec::new();
        for (anchor, id) in [(Chunk::new(2, 1), 10u128), (Chunk::new(4, 2), 11u128)] {
            let room = rooms
                .iter()
                .find(|room| room.chunks.contains(&anchor))
                .unwrap();
            let left_wall = segments_by_room[&room.id]
                .iter()
                .find(|s| s.surface == WallSurface::LeftWall)
                .unwrap();
            doors.push(DoorPlacement {
                id: Uuid::from_u128(id),
                segment_id: left_wall.id,
                position: 0,
                kind: DoorKind::Standard,
                width: 1,
            });
        }

        let graph = build_connectivity(&chunks, &doors);
        assert!(graph.is_fully_connected);

        // Remove one door and the chain breaks.
        let graph = build_connectivity(&chunks, &doors[..1]);
        assert!(!graph.is_fully_connected);
    }
}
