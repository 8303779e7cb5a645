//! Door validation and tile identifier assignment.
//!
//! Tile identifiers come from the fixed art table of the original dungeon
//! set. The core only ever classifies them by prefix; the concrete variant
//! names matter solely to renderers.

use delve_core::tile::DOOR_CLOSED;
use delve_core::{Coord, Direction, Room};
use rand::Rng;
use rand::rngs::StdRng;

use crate::map::{MapGrid, Structure};

/// Floor variants; picked uniformly at random for room floors.
pub const FLOOR_TILES: [&str; 4] = ["floor_0", "floor_1", "floor_2", "floor_damaged_0"];
/// Free-standing wall, also used to fill the void.
pub const WALL_SINGLE: &str = "wall_single_0";
/// Horizontal wall run.
pub const WALL_TOP_MIDDLE: &str = "wall_top_middle_0";
/// Vertical wall run.
pub const WALL_SIDE_MIDDLE: &str = "wall_side_middle_0";
/// Room corner variants, clockwise from top-left.
pub const WALL_CORNERS: [&str; 4] = [
    "wall_corner_top_left_0",
    "wall_corner_top_right_0",
    "wall_corner_bottom_right_0",
    "wall_corner_bottom_left_0",
];

/// Promote door candidates that sit in a true wall gap; demote the rest.
///
/// A candidate becomes a door only when both neighbors along exactly one
/// perpendicular axis are solid: left+right solid (a gap in a horizontal
/// wall) or top+bottom solid (a gap in a vertical wall). A candidate left
/// by a corridor grazing a room corner fails both tests and reverts to
/// plain floor, so no door ends up embedded in open floor.
pub fn validate_doors(map: &mut MapGrid) {
    let candidates: Vec<(Coord, Option<u32>)> = map
        .coords()
        .filter_map(|c| match map.get(c) {
            Structure::DoorCandidate(room) => Some((c, room)),
            _ => None,
        })
        .collect();

    for (c, room) in candidates {
        let solid = |d: Direction| map.get(c.step(d)).is_solid_for_door();
        let horizontal_gap = solid(Direction::Left) && solid(Direction::Right);
        let vertical_gap = solid(Direction::Up) && solid(Direction::Down);
        if horizontal_gap || vertical_gap {
            map.set(c, Structure::Door);
        } else {
            map.set(c, Structure::Floor(room));
        }
    }
}

/// Assign a concrete tile identifier to every cell by structural role.
/// Returns identifiers in row-major order.
pub fn assign_tiles(map: &MapGrid, rooms: &[Room], rng: &mut StdRng) -> Vec<String> {
    map.coords()
        .map(|c| match map.get(c) {
            Structure::Floor(_) => {
                let variant = rng.random_range(0..FLOOR_TILES.len());
                FLOOR_TILES[variant].to_string()
            }
            Structure::Corridor => FLOOR_TILES[0].to_string(),
            Structure::Door => DOOR_CLOSED.to_string(),
            Structure::Wall(Some(room_id)) => rooms
                .get(room_id as usize)
                .map_or(WALL_SINGLE, |room| room_wall_tile(c, room))
                .to_string(),
            // Free-standing walls, unresolved candidates, and the void all
            // render as the single wall block.
            Structure::Wall(None) | Structure::DoorCandidate(_) | Structure::Void => {
                WALL_SINGLE.to_string()
            }
        })
        .collect()
}

/// The wall variant for a cell on a room's border ring.
fn room_wall_tile(c: Coord, room: &Room) -> &'static str {
    let b = &room.bounds;
    if c.x == b.x1 && c.y == b.y1 {
        WALL_CORNERS[0]
    } else if c.x == b.x2 && c.y == b.y1 {
        WALL_CORNERS[1]
    } else if c.x == b.x2 && c.y == b.y2 {
        WALL_CORNERS[2]
    } else if c.x == b.x1 && c.y == b.y2 {
        WALL_CORNERS[3]
    } else if c.y == b.y1 || c.y == b.y2 {
        WALL_TOP_MIDDLE
    } else if c.x == b.x1 || c.x == b.x2 {
        WALL_SIDE_MIDDLE
    } else {
        WALL_SINGLE
    }
}
