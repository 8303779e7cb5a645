//! Tile identifier classification.
//!
//! Tile identifiers are opaque strings chosen by the generator and interpreted
//! by renderers (`floor_2`, `wall_top_middle_0`, ...). The core never looks at
//! their visual meaning, only at the structural class derived here, which
//! governs passability.

use serde::{Deserialize, Serialize};

/// The closed-door tile identifier. Movement flips this to [`DOOR_OPEN`].
pub const DOOR_CLOSED: &str = "door_closed_0";
/// The open-door tile identifier.
pub const DOOR_OPEN: &str = "door_open_0";

/// Structural classification of a tile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Room floor.
    Floor,
    /// Corridor floor carved between rooms.
    Corridor,
    /// A door that has not been opened yet.
    DoorClosed,
    /// A door that a player has walked through.
    DoorOpen,
    /// Solid wall.
    Wall,
    /// Unclaimed space outside rooms and corridors.
    Void,
}

impl TileKind {
    /// Classify a tile identifier by its fixed prefix table.
    ///
    /// Unknown identifiers (including the empty string used for
    /// never-generated cells) classify as [`TileKind::Void`].
    pub fn classify(tile_id: &str) -> Self {
        if tile_id.starts_with("floor") {
            Self::Floor
        } else if tile_id.starts_with("corridor") {
            Self::Corridor
        } else if tile_id.starts_with("door_open") {
            Self::DoorOpen
        } else if tile_id.starts_with("door") {
            Self::DoorClosed
        } else if tile_id.starts_with("wall") {
            Self::Wall
        } else {
            Self::Void
        }
    }

    /// Whether a player may stand on a tile of this kind.
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            Self::Floor | Self::Corridor | Self::DoorClosed | Self::DoorOpen
        )
    }
}
