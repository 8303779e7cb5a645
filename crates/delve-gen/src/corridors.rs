use delve_core::{Coord, Room};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::map::{MapGrid, Structure};

/// Connect all rooms into one component with Prim's algorithm.
///
/// A connected set is seeded with room 0; each round the closest pair of
/// (connected, unconnected) rooms by squared Euclidean center distance is
/// joined by an L-shaped corridor, and the new room moves into the set.
/// On the complete graph over room centers this is a true MST build, so the
/// number of carved connections is exactly `rooms.len() - 1`.
pub fn connect_rooms(map: &mut MapGrid, rooms: &[Room], rng: &mut StdRng) -> usize {
    if rooms.len() < 2 {
        return 0;
    }

    let mut connected = vec![0usize];
    let mut unconnected: Vec<usize> = (1..rooms.len()).collect();
    let mut connections = 0;

    while !unconnected.is_empty() {
        let mut best: Option<(usize, usize, i64)> = None;
        for &a in &connected {
            for (slot, &b) in unconnected.iter().enumerate() {
                let d = center_dist_sq(rooms[a].center, rooms[b].center);
                if best.is_none_or(|(_, _, best_d)| d < best_d) {
                    best = Some((a, slot, d));
                }
            }
        }

        // Both sets are non-empty, so a closest pair always exists.
        let Some((a, slot, _)) = best else { break };
        let b = unconnected.swap_remove(slot);

        carve_corridor(map, rooms[a].center, rooms[b].center, rng);
        connected.push(b);
        connections += 1;
    }

    debug!(connections, rooms = rooms.len(), "rooms connected");
    connections
}

/// Carve one L-shaped corridor between two centers, axis order chosen
/// uniformly at random. Wall cells crossed become door candidates keeping
/// their room tag; void becomes corridor; everything else is untouched.
fn carve_corridor(map: &mut MapGrid, from: Coord, to: Coord, rng: &mut StdRng) {
    let horizontal_first = rng.random_bool(0.5);
    for c in l_path(from, to, horizontal_first) {
        match map.get(c) {
            Structure::Wall(room) => map.set(c, Structure::DoorCandidate(room)),
            Structure::Void => map.set(c, Structure::Corridor),
            _ => {}
        }
    }
}

/// The cells stepped through by an L-path from `from` to `to`,
/// excluding the starting cell.
fn l_path(from: Coord, to: Coord, horizontal_first: bool) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut x = from.x;
    let mut y = from.y;

    let mut walk_x = |path: &mut Vec<Coord>, x: &mut i32, y: i32| {
        while *x != to.x {
            *x += if *x < to.x { 1 } else { -1 };
            path.push(Coord::new(*x, y));
        }
    };
    let mut walk_y = |path: &mut Vec<Coord>, x: i32, y: &mut i32| {
        while *y != to.y {
            *y += if *y < to.y { 1 } else { -1 };
            path.push(Coord::new(x, *y));
        }
    };

    if horizontal_first {
        walk_x(&mut path, &mut x, y);
        walk_y(&mut path, x, &mut y);
    } else {
        walk_y(&mut path, x, &mut y);
        walk_x(&mut path, &mut x, y);
    }
    path
}

fn center_dist_sq(a: Coord, b: Coord) -> i64 {
    let dx = i64::from(a.x - b.x);
    let dy = i64::from(a.y - b.y);
    dx * dx + dy * dy
}
