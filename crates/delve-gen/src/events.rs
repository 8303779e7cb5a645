use std::collections::HashMap;

use delve_core::{Coord, EventKind, Room};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::EventConfig;
use crate::map::{MapGrid, Structure};

/// Seed gameplay events onto room-interior floor cells.
///
/// Room 0, the spawn room, is never seeded, so a fresh player cannot be
/// ambushed on their first cell. Values are always positive: the event kind
/// carries the sign of the effect. Bonus and debuff cells roll a magnitude
/// of 1–3; enemies always carry value 1.
pub fn seed_events(
    map: &MapGrid,
    rooms: &[Room],
    config: &EventConfig,
    rng: &mut StdRng,
) -> HashMap<Coord, (EventKind, u32)> {
    let mut events = HashMap::new();

    for room in rooms.iter().filter(|r| r.id != 0) {
        for y in (room.bounds.y1 + 1)..room.bounds.y2 {
            for x in (room.bounds.x1 + 1)..room.bounds.x2 {
                let c = Coord::new(x, y);
                if !matches!(map.get(c), Structure::Floor(_)) {
                    continue;
                }
                let roll: f64 = rng.random();
                let (kind, value) = if roll < config.bonus_chance {
                    (EventKind::BonusSteps, rng.random_range(1..=3))
                } else if roll < config.bonus_chance + config.debuff_chance {
                    (EventKind::DebuffSteps, rng.random_range(1..=3))
                } else if roll < config.bonus_chance + config.debuff_chance + config.enemy_chance {
                    (EventKind::Enemy, 1)
                } else {
                    continue;
                };
                events.insert(c, (kind, value));
            }
        }
    }

    debug!(events = events.len(), "events seeded");
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::RoomBounds;
    use rand::SeedableRng;

    fn two_rooms() -> (MapGrid, Vec<Room>) {
        let rooms = vec![
            Room::new(0, RoomBounds::new(1, 1, 8, 8)),
            Room::new(1, RoomBounds::new(12, 1, 8, 8)),
        ];
        let mut map = MapGrid::new(24);
        crate::rooms::carve_rooms(&mut map, &rooms);
        (map, rooms)
    }

    #[test]
    fn spawn_room_is_never_seeded() {
        let (map, rooms) = two_rooms();
        let config = EventConfig {
            bonus_chance: 1.0,
            debuff_chance: 0.0,
            enemy_chance: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let events = seed_events(&map, &rooms, &config, &mut rng);
        assert!(!events.is_empty());
        for coord in events.keys() {
            assert!(!rooms[0].bounds.contains(*coord));
        }
    }

    #[test]
    fn values_are_positive_and_enemies_have_one() {
        let (map, rooms) = two_rooms();
        let config = EventConfig {
            bonus_chance: 0.3,
            debuff_chance: 0.3,
            enemy_chance: 0.4,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let events = seed_events(&map, &rooms, &config, &mut rng);
        assert!(!events.is_empty());
        for (kind, value) in events.values() {
            match kind {
                EventKind::BonusSteps | EventKind::DebuffSteps => {
                    assert!((1..=3).contains(value));
                }
                EventKind::Enemy => assert_eq!(*value, 1),
                other => panic!("unexpected seeded kind {other:?}"),
            }
        }
    }

    #[test]
    fn events_land_on_interior_floor_only() {
        let (map, rooms) = two_rooms();
        let config = EventConfig {
            bonus_chance: 1.0,
            debuff_chance: 0.0,
            enemy_chance: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let events = seed_events(&map, &rooms, &config, &mut rng);
        for coord in events.keys() {
            assert!(matches!(map.get(*coord), Structure::Floor(Some(1))));
            assert!(!rooms[1].bounds.is_border(*coord));
        }
    }

    #[test]
    fn zero_densities_seed_nothing() {
        let (map, rooms) = two_rooms();
        let mut rng = StdRng::seed_from_u64(4);
        let events = seed_events(&map, &rooms, &EventConfig::none(), &mut rng);
        assert!(events.is_empty());
    }
}
