use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// Axis-aligned bounds of a room, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBounds {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge (inclusive).
    pub x2: i32,
    /// Bottom edge (inclusive).
    pub y2: i32,
}

impl RoomBounds {
    /// Bounds from a top-left corner and a size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width - 1,
            y2: y + height - 1,
        }
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    /// The center cell, rounded the way the generator rounds it.
    pub fn center(&self) -> Coord {
        Coord::new(self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }

    /// Whether the coordinate lies inside the bounds (border included).
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x1 && c.x <= self.x2 && c.y >= self.y1 && c.y <= self.y2
    }

    /// Whether the coordinate lies on the one-cell border ring.
    pub fn is_border(&self, c: Coord) -> bool {
        self.contains(c) && (c.x == self.x1 || c.x == self.x2 || c.y == self.y1 || c.y == self.y2)
    }

    /// Whether two bounds overlap when both are grown by `padding` cells.
    pub fn overlaps_padded(&self, other: &Self, padding: i32) -> bool {
        self.x1 - padding < other.x2 + padding
            && self.x2 + padding > other.x1 - padding
            && self.y1 - padding < other.y2 + padding
            && self.y2 + padding > other.y1 - padding
    }

    /// Approximate edge-to-edge distance: the larger of the per-axis gaps,
    /// zero when the bounds overlap on both axes.
    pub fn edge_distance(&self, other: &Self) -> i32 {
        let gap_x = (other.x1 - self.x2).max(self.x1 - other.x2).max(0);
        let gap_y = (other.y1 - self.y2).max(self.y1 - other.y2).max(0);
        gap_x.max(gap_y)
    }
}

/// A room placed by the generator. Immutable after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RoomWire", into = "RoomWire")]
pub struct Room {
    /// Sequential room id, 0 for the centered starting room.
    pub id: u32,
    /// Inclusive bounds of the room including its wall ring.
    pub bounds: RoomBounds,
    /// The room's center cell.
    pub center: Coord,
}

impl Room {
    /// Create a room from its id and bounds; the center is derived.
    pub fn new(id: u32, bounds: RoomBounds) -> Self {
        Self {
            id,
            bounds,
            center: bounds.center(),
        }
    }
}

/// Flat wire form matching the original `rooms.json` records.
#[derive(Serialize, Deserialize)]
struct RoomWire {
    id: u32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    cx: i32,
    cy: i32,
}

impl From<RoomWire> for Room {
    fn from(w: RoomWire) -> Self {
        Self {
            id: w.id,
            bounds: RoomBounds {
                x1: w.x1,
                y1: w.y1,
                x2: w.x2,
                y2: w.y2,
            },
            center: Coord::new(w.cx, w.cy),
        }
    }
}

impl From<Room> for RoomWire {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            x1: r.bounds.x1,
            y1: r.bounds.y1,
            x2: r.bounds.x2,
            y2: r.bounds.y2,
            cx: r.center.x,
            cy: r.center.y,
        }
    }
}
