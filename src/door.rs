//! Door placement on wall segments.
//!
//! Doors are the only persisted entities that reference derived data: a
//! door is bound to a wall segment by id, and segments are recomputed
//! wholesale on every grid change. Bindings are therefore revalidated
//! after each recomputation instead of being patched in place.

use crate::segment::*;
use fnv::FnvHashMap;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorKind {
    Standard,
    Double,
    Archway,
}

/// A door on a wall segment. `position` is the offset of the first covered
/// edge along the segment (0-based); the door covers `width` consecutive
/// edges from there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorPlacement {
    #[serde(rename = "i")]
    pub id: Uuid,
    #[serde(rename = "s")]
    pub segment_id: Uuid,
    #[serde(rename = "p")]
    pub position: u32,
    #[serde(rename = "k")]
    pub kind: DoorKind,
    #[serde(rename = "w")]
    pub width: u32,
}

/// Rejection reasons surfaced to the editing UI. Placement is never
/// silently clamped; the caller decides how to present the failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The door's span does not fit inside the referenced segment.
    DoorOutOfBounds {
        position: u32,
        width: u32,
        segment_length: u32,
    },
    /// The referenced segment does not exist in the current layout.
    UnknownSegment { segment_id: Uuid },
    /// The chunk edit was refused: the chunk does not share a full edge
    /// with the existing layout (or its removal would split a room).
    DisconnectedChunk { cx: i16, cy: i16 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::DoorOutOfBounds {
                position,
                width,
                segment_length,
            } => write!(
                f,
                "door span {}..{} does not fit segment of length {}",
                position,
                position + width,
                segment_length
            ),
            PlacementError::UnknownSegment { segment_id } => {
                write!(f, "no wall segment with id {}", segment_id)
            }
            PlacementError::DisconnectedChunk { cx, cy } => {
                write!(f, "chunk ({}, {}) would disconnect the layout", cx, cy)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Check a door against the segment it references: the covered span must
/// lie entirely within the run. Checked addition so a corrupted span near
/// `u32::MAX` is rejected like any other out-of-bounds door instead of
/// wrapping.
pub fn validate_door(door: &DoorPlacement, segment: &WallSegment) -> Result<(), PlacementError> {
    let out_of_bounds = door
        .position
        .checked_add(door.width)
        .map_or(true, |end| end > segment.length_in_tiles);

    if door.width == 0 || out_of_bounds {
        return Err(PlacementError::DoorOutOfBounds {
            position: door.position,
            width: door.width,
            segment_length: segment.length_in_tiles,
        });
    }
    Ok(())
}

/// Validate a door against a freshly computed segment list, resolving the
/// segment by id.
pub fn validate_door_against(
    door: &DoorPlacement,
    segments: &[WallSegment],
) -> Result<(), PlacementError> {
    let segment = segments
        .iter()
        .find(|s| s.id == door.segment_id)
        .ok_or(PlacementError::UnknownSegment {
            segment_id: door.segment_id,
        })?;
    validate_door(door, segment)
}

/// Re-check every door binding after a segment recomputation, dropping
/// doors whose segment disappeared or shrank out from under them.
pub fn revalidate_doors(doors: &[DoorPlacement], segments: &[WallSegment]) -> Vec<DoorPlacement> {
    let by_id: FnvHashMap<Uuid, &WallSegment> =
        segments.iter().map(|s| (s.id, s)).collect();

    doors
        .iter()
        .filter(|door| match by_id.get(&door.segment_id) {
            Some(segment) => match validate_door(door, segment) {
                Ok(()) => true,
                Err(err) => {
                    debug!("Dropping door {}: {}", door.id, err);
                    false
                }
            },
            None => {
                debug!(
                    "Dropping door {}: segment {} no longer exists",
                    door.id, door.segment_id
                );
                false
            }
        })
        .copied()
        .collect()
}
