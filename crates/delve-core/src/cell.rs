use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::tile::TileKind;

/// The gameplay effect attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// No effect.
    #[default]
    Empty,
    /// Grants extra steps on the next roll.
    BonusSteps,
    /// Removes steps from the next roll.
    DebuffSteps,
    /// An enemy guards this cell; entering it triggers combat.
    Enemy,
    /// Masking value for events the observing player has not discovered.
    /// Never persisted by the generator.
    Unknown,
}

/// A single grid cell as persisted in chunk records.
///
/// Field names on the wire match the original chunk format
/// (`cellType`, `eventType`, `eventValue`, `lastUpdated`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Grid column.
    pub x: i32,
    /// Grid row.
    pub y: i32,
    /// Opaque tile identifier. Empty for never-generated cells.
    #[serde(rename = "cellType", default)]
    pub tile_id: String,
    /// The event on this cell.
    #[serde(rename = "eventType", default)]
    pub event: EventKind,
    /// Magnitude of the event. Always non-negative; the sign of the effect
    /// comes from [`EventKind`], never from this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_value: Option<u32>,
    /// When this cell last changed (generation or a door opening).
    pub last_updated: DateTime<Utc>,
}

impl Cell {
    /// Create a cell with a tile and no event.
    pub fn new(coord: Coord, tile_id: impl Into<String>) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            tile_id: tile_id.into(),
            event: EventKind::Empty,
            event_value: None,
            last_updated: Utc::now(),
        }
    }

    /// The default cell returned for out-of-bounds or never-generated
    /// coordinates: no tile (classifies as void), no event.
    pub fn empty(coord: Coord) -> Self {
        Self::new(coord, "")
    }

    /// The cell's position.
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Structural classification of the cell's tile.
    pub fn tile_kind(&self) -> TileKind {
        TileKind::classify(&self.tile_id)
    }

    /// Whether a player may stand on this cell.
    pub fn is_passable(&self) -> bool {
        self.tile_kind().is_passable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_void_and_blocked() {
        let cell = Cell::empty(Coord::new(99, -4));
        assert_eq!(cell.tile_kind(), TileKind::Void);
        assert!(!cell.is_passable());
        assert_eq!(cell.event, EventKind::Empty);
        assert_eq!(cell.coord(), Coord::new(99, -4));
    }

    #[test]
    fn wire_field_names() {
        let mut cell = Cell::new(Coord::new(1, 2), "floor_0");
        cell.event = EventKind::BonusSteps;
        cell.event_value = Some(2);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["cellType"], "floor_0");
        assert_eq!(json["eventType"], "BONUS_STEPS");
        assert_eq!(json["eventValue"], 2);
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn deserializes_original_chunk_cell() {
        let json = r#"{
            "x": 10, "y": 3,
            "cellType": "wall_corner_top_left_0",
            "eventType": "EMPTY",
            "lastUpdated": "2025-06-25T12:00:00.000Z"
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.tile_kind(), TileKind::Wall);
        assert_eq!(cell.event, EventKind::Empty);
        assert_eq!(cell.event_value, None);
    }

    #[test]
    fn event_kind_defaults_to_empty_when_missing() {
        let json = r#"{"x":0,"y":0,"lastUpdated":"2025-06-25T12:00:00.000Z"}"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.event, EventKind::Empty);
        assert_eq!(cell.tile_kind(), TileKind::Void);
    }
}
