use delve_core::{Coord, Room, RoomBounds};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::GenConfig;
use crate::map::{MapGrid, Structure};

/// Place rooms by rejection sampling.
///
/// The first room is centered in the grid. Every further candidate is
/// rejected when its padded bounding box overlaps an existing room or when
/// its edge distance to the nearest room exceeds `max_connect_dist` (the
/// packing rule that keeps the dungeon compact). Exhausting the attempt cap
/// is graceful: whatever was placed is returned.
pub fn place_rooms(config: &GenConfig, rng: &mut StdRng) -> Vec<Room> {
    let mut rooms = Vec::with_capacity(config.max_rooms);

    let w = rng.random_range(config.min_room_size..=config.max_room_size);
    let h = rng.random_range(config.min_room_size..=config.max_room_size);
    let x = (config.size - w) / 2;
    let y = (config.size - h) / 2;
    rooms.push(Room::new(0, RoomBounds::new(x, y, w, h)));

    let mut attempts = 0;
    while rooms.len() < config.max_rooms && attempts < config.max_attempts {
        attempts += 1;

        let w = rng.random_range(config.min_room_size..=config.max_room_size);
        let h = rng.random_range(config.min_room_size..=config.max_room_size);
        if config.size - w - 2 < 1 || config.size - h - 2 < 1 {
            continue;
        }
        let x = rng.random_range(1..=(config.size - w - 2));
        let y = rng.random_range(1..=(config.size - h - 2));
        let bounds = RoomBounds::new(x, y, w, h);

        if rooms
            .iter()
            .any(|r| bounds.overlaps_padded(&r.bounds, config.padding))
        {
            continue;
        }
        let nearest = rooms
            .iter()
            .map(|r| bounds.edge_distance(&r.bounds))
            .min()
            .unwrap_or(0);
        if nearest > config.max_connect_dist {
            continue;
        }

        rooms.push(Room::new(rooms.len() as u32, bounds));
    }

    debug!(
        rooms = rooms.len(),
        attempts, "room placement finished"
    );
    rooms
}

/// Carve every placed room into the map: border cells become walls,
/// interior cells floor, both tagged with the owning room.
pub fn carve_rooms(map: &mut MapGrid, rooms: &[Room]) {
    for room in rooms {
        for y in room.bounds.y1..=room.bounds.y2 {
            for x in room.bounds.x1..=room.bounds.x2 {
                let c = Coord::new(x, y);
                if room.bounds.is_border(c) {
                    map.set(c, Structure::Wall(Some(room.id)));
                } else {
                    map.set(c, Structure::Floor(Some(room.id)));
                }
            }
        }
    }
}
