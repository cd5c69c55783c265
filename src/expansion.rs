//! Proposes legal chunk additions and validates structural edits.

use crate::location::*;
use fnv::FnvHashSet;
use itertools::Itertools;
use pathfinding::undirected::connected_components::connected_components;

/// All chunk positions that could legally be added next: the cardinal
/// neighbors of every existing chunk that are not themselves present,
/// deduplicated. Empty input yields no proposals (the very first chunk can
/// go anywhere, see [`would_create_hole`]).
///
/// Ordering is unspecified; callers must not depend on it.
pub fn expandable_chunks(chunks: &[Chunk]) -> Vec<Chunk> {
    let existing: FnvHashSet<Chunk> = chunks.iter().copied().collect();

    chunks
        .iter()
        .flat_map(|chunk| chunk.neighbors())
        .filter(|candidate| !existing.contains(candidate))
        .unique()
        .collect()
}

/// Reject a chunk addition unless the candidate shares a full edge with at
/// least one existing chunk. The very first chunk is always accepted.
///
/// This is a local adjacency check, not a true enclosure proof: it prevents
/// disconnected islands but does not detect a chunk that closes a ring
/// around empty interior space. Saved layouts depend on exactly this
/// accept/reject behavior, so it must not be tightened to a flood fill.
pub fn would_create_hole(chunks: &[Chunk], new_chunk: Chunk) -> bool {
    if chunks.is_empty() {
        return false;
    }

    !chunks.iter().any(|chunk| chunk.is_adjacent(new_chunk))
}

/// True if removing the chunk does not split any room into islands: the
/// number of edge-connected chunk clusters must not grow. Layouts that are
/// already multiple rooms (joined by doors) stay removable room-by-room.
pub fn is_chunk_removable(chunks: &[Chunk], chunk: Chunk) -> bool {
    let remaining: Vec<Chunk> = chunks.iter().copied().filter(|c| *c != chunk).collect();
    if remaining.is_empty() {
        return true;
    }

    // Removing the last chunk of a cluster drops the cluster count by one,
    // which is fine; anything that raises the count split a room.
    cluster_count(&remaining) <= cluster_count(chunks)
}

fn cluster_count(chunks: &[Chunk]) -> usize {
    connected_components(chunks, |c| {
        let c = *c;
        chunks
            .iter()
            .copied()
            .filter(move |other| c.is_adjacent(*other))
            .collect::<Vec<_>>()
    })
    .len()
}
