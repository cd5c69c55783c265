//! Merges collinear, contiguous perimeter edges into wall runs suitable
//! for a single rendered wall piece.
//!
//! Only `Left` and `Up` perimeter edges produce segments in this isometric
//! convention: `Left` edges become left walls and `Up` edges become right
//! walls, the two faces visible behind the room. The south-facing
//! `FrontLeft`/`FrontRight` surfaces are declared for the renderer's sake
//! but no merge produces them yet.

use crate::grid::*;
use crate::location::*;
use crate::perimeter::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which face of the room a wall segment renders as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallSurface {
    LeftWall,
    RightWall,
    /// Reserved for south-facing walls; never produced by the merge.
    FrontLeft,
    /// Reserved for south-facing walls; never produced by the merge.
    FrontRight,
}

/// Axis a segment runs along: left walls run vertically (down the y axis),
/// right walls horizontally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentDirection {
    Vertical,
    Horizontal,
}

/// Deterministic segment id from the surface and the run's start corner.
/// Segments are derived data; a stable id lets door bindings survive
/// recomputation as long as the underlying wall run still starts at the
/// same corner.
pub fn segment_id(surface: WallSurface, x: i16, y: i16) -> Uuid {
    let surface_tag: u128 = match surface {
        WallSurface::LeftWall => 1,
        WallSurface::RightWall => 2,
        WallSurface::FrontLeft => 3,
        WallSurface::FrontRight => 4,
    };
    let packed = ((x as u16 as u128) << 16) | (y as u16 as u128);
    Uuid::from_u128((surface_tag << 64) | packed)
}

/// A maximal run of contiguous, collinear perimeter edges of one surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: Uuid,
    /// Grid corner where the run starts (first edge's start point).
    pub start: Tile,
    /// Grid corner where the run ends (last edge's end point).
    pub end: Tile,
    pub surface: WallSurface,
    pub length_in_tiles: u32,
    pub direction: SegmentDirection,
}

impl WallSegment {
    /// The active tile behind the `position`-th edge of the run.
    pub fn tile_at(&self, position: u32) -> Tile {
        let offset = position as i16;
        match self.direction {
            SegmentDirection::Vertical => Tile::new(self.start.x(), self.start.y() + offset),
            SegmentDirection::Horizontal => Tile::new(self.start.x() + offset, self.start.y()),
        }
    }

    /// The tile immediately on the far side of the wall at `position`.
    /// Absent from the active set for exterior walls; owned by a
    /// neighboring room where two rooms back onto the same boundary.
    pub fn tile_across_at(&self, position: u32) -> Tile {
        match self.surface {
            WallSurface::LeftWall | WallSurface::FrontLeft => self.tile_at(position).offset(-1, 0),
            WallSurface::RightWall | WallSurface::FrontRight => self.tile_at(position).offset(0, -1),
        }
    }
}

/// Merge the perimeter of the active tile set into wall segments.
///
/// Each orientation is processed independently: edges are filtered,
/// explicitly sorted (so output does not depend on the tile set's hash
/// order), then greedily accumulated into runs that break at the first
/// discontinuity. A single isolated edge yields a length-1 segment; an
/// empty tile set yields no segments. Pure and total.
pub fn calculate_wall_segments(tiles: &ActiveTileSet) -> Vec<WallSegment> {
    let perimeter = calculate_perimeter(tiles);
    segments_from_perimeter(&perimeter)
}

/// Segment merge over an already-computed perimeter. Split out so callers
/// that need both outputs (perimeter for floors, segments for walls) only
/// walk the tile set once.
pub fn segments_from_perimeter(perimeter: &[PerimeterEdge]) -> Vec<WallSegment> {
    let mut segments = Vec::new();

    let mut left_edges: Vec<&PerimeterEdge> = perimeter
        .iter()
        .filter(|e| e.direction == EdgeDirection::Left)
        .collect();
    left_edges.sort_by_key(|e| (e.x1, e.y1));
    merge_runs(
        &left_edges,
        |last, edge| last.x1 == edge.x1 && last.y2 == edge.y1,
        WallSurface::LeftWall,
        SegmentDirection::Vertical,
        &mut segments,
    );

    let mut up_edges: Vec<&PerimeterEdge> = perimeter
        .iter()
        .filter(|e| e.direction == EdgeDirection::Up)
        .collect();
    up_edges.sort_by_key(|e| (e.y1, e.x1));
    merge_runs(
        &up_edges,
        |last, edge| last.y1 == edge.y1 && last.x2 == edge.x1,
        WallSurface::RightWall,
        SegmentDirection::Horizontal,
        &mut segments,
    );

    segments
}

/// Greedy run accumulation: an edge continues the current run iff
/// `continues(last, edge)`; any discontinuity closes the run.
fn merge_runs(
    edges: &[&PerimeterEdge],
    continues: impl Fn(&PerimeterEdge, &PerimeterEdge) -> bool,
    surface: WallSurface,
    direction: SegmentDirection,
    segments: &mut Vec<WallSegment>,
) {
    let mut run: Vec<&PerimeterEdge> = Vec::new();

    for &edge in edges {
        if let Some(&last) = run.last() {
            if !continues(last, edge) {
                segments.push(close_run(&run, surface, direction));
                run.clear();
            }
        }
        run.push(edge);
    }

    if !run.is_empty() {
        segments.push(close_run(&run, surface, direction));
    }
}

fn close_run(
    run: &[&PerimeterEdge],
    surface: WallSurface,
    direction: SegmentDirection,
) -> WallSegment {
    let first = run[0];
    let last = run[run.len() - 1];

    WallSegment {
        id: segment_id(surface, first.x1, first.y1),
        start: Tile::new(first.x1, first.y1),
        end: Tile::new(last.x2, last.y2),
        surface,
        length_in_tiles: run.len() as u32,
        direction,
    }
}
