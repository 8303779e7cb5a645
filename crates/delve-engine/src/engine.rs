use delve_core::{Cell, Coord, Direction, EventKind, Player, PlayerId, World};
use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::events::EventResolver;
use crate::turn::{self, MoveResult, RollResult};
use crate::visibility;

/// One cell of a player's personal map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCell {
    /// Cell x coordinate.
    pub x: i32,
    /// Cell y coordinate.
    pub y: i32,
    /// Tile identifier.
    pub tile_id: String,
    /// The event as this player knows it. Cells the player has explored
    /// but never stood on show as [`EventKind::Unknown`], whether or not
    /// an event is actually there.
    pub event: EventKind,
    /// The event's magnitude, only for discovered events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_value: Option<u32>,
    /// Inside the current visibility disc.
    pub is_visible: bool,
    /// Seen at some point (always true in this view).
    pub is_explored: bool,
    /// The player has stood on the cell and knows its real event.
    pub is_discovered: bool,
}

/// Everything a player knows of the map, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleMap {
    /// Explored cells in row-major order.
    pub cells: Vec<VisibleCell>,
    /// The player's current position.
    pub center: Coord,
}

/// The thread-safe game facade a transport collaborator talks to.
///
/// One lock over the world aggregate serializes every mutating operation,
/// which trivially serializes the operations addressed to any one player.
/// The resolver and RNG sit behind their own mutexes so rolls from
/// different transports stay well ordered.
#[derive(Debug)]
pub struct GameEngine {
    world: RwLock<World>,
    resolver: Mutex<EventResolver>,
    rng: Mutex<StdRng>,
    spawn: Coord,
}

impl GameEngine {
    /// Create an engine over a world, with a spawn point for joining
    /// players and a seed for the dice RNG.
    pub fn new(world: World, spawn: Coord, seed: u64) -> Self {
        Self {
            world: RwLock::new(world),
            resolver: Mutex::new(EventResolver::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            spawn,
        }
    }

    /// The spawn point handed to joining players.
    pub fn spawn(&self) -> Coord {
        self.spawn
    }

    /// Join a player, creating them at the spawn on first join. Rejoining
    /// returns the existing player unchanged except for a visibility
    /// refresh. Returns a snapshot of the player.
    pub fn join(&self, id: PlayerId, username: &str) -> Player {
        let mut world = self.world.write();
        world.add_player(id.clone(), username, self.spawn);
        // The player was just inserted, so the pair lookup cannot miss.
        let snapshot = world
            .player_and_grid_mut(&id)
            .map(|(player, grid)| {
                visibility::refresh_visibility(player, grid);
                player.clone()
            })
            .unwrap_or_else(|| Player::new(id.clone(), username, self.spawn));
        info!(player = %id, username, "player joined");
        snapshot
    }

    /// Roll the dice to start the player's turn, or consume a pending skip.
    pub fn roll(&self, id: &PlayerId) -> EngineResult<RollResult> {
        let mut world = self.world.write();
        let player = world
            .player_mut(id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))?;
        let mut resolver = self.resolver.lock();
        let mut rng = self.rng.lock();
        Ok(turn::roll_turn(player, &mut rng, &mut resolver))
    }

    /// Attempt one cardinal step for the player.
    ///
    /// A finished battle rides out on the returned result exactly once;
    /// it is cleared from the player before the call returns.
    pub fn move_player(&self, id: &PlayerId, direction: Direction) -> EngineResult<MoveResult> {
        let mut world = self.world.write();
        let (player, grid) = world
            .player_and_grid_mut(id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))?;
        let mut resolver = self.resolver.lock();
        let result = turn::attempt_move(player, grid, &mut resolver, direction);
        if result.battle.as_ref().is_some_and(|b| b.finished) {
            player.battle = None;
        }
        Ok(result)
    }

    /// End the player's turn early without dispatching the final cell.
    pub fn end_turn(&self, id: &PlayerId) -> EngineResult<()> {
        let mut world = self.world.write();
        let player = world
            .player_mut(id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))?;
        turn::end_turn(player);
        Ok(())
    }

    /// A snapshot clone of the player's full state.
    pub fn player_state(&self, id: &PlayerId) -> EngineResult<Player> {
        let world = self.world.read();
        world
            .player(id)
            .cloned()
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))
    }

    /// The player's personal map: every explored cell, with events masked
    /// to what the player has actually discovered.
    pub fn visible_map(&self, id: &PlayerId) -> EngineResult<VisibleMap> {
        let mut world = self.world.write();
        let (player, grid) = world
            .player_and_grid_mut(id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))?;

        let mut explored: Vec<Coord> = player.explored_cells.iter().copied().collect();
        explored.sort_by_key(|c| (c.y, c.x));

        let cells = explored
            .into_iter()
            .map(|coord| {
                let cell = grid.get_cell(coord);
                masked_cell(player, &cell)
            })
            .collect();

        Ok(VisibleMap {
            cells,
            center: player.position,
        })
    }
}

/// Apply the player's knowledge to a raw cell.
fn masked_cell(player: &Player, cell: &Cell) -> VisibleCell {
    let coord = cell.coord();
    let discovered = player.discovered_cells.contains_key(&coord);
    let (event, event_value) = if cell.event == EventKind::Enemy && player.has_cleared(coord) {
        // Defeated enemies vanish from the map.
        (EventKind::Empty, None)
    } else if discovered {
        (cell.event, cell.event_value)
    } else {
        // Every cell the player has not stood on reads the same, plain
        // floor and event cells alike, so event locations cannot be told
        // apart by scanning the map.
        (EventKind::Unknown, None)
    };

    VisibleCell {
        x: coord.x,
        y: coord.y,
        tile_id: cell.tile_id.clone(),
        event,
        event_value,
        is_visible: player.visible_cells.contains(&coord),
        is_explored: true,
        is_discovered: discovered,
    }
}
