use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::coord::Coord;
use crate::grid::TileGrid;
use crate::player::{Player, PlayerId};

/// Metadata about the world itself.
#[derive(Debug, Clone)]
pub struct WorldMeta {
    /// Unique world id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// When the world was constructed.
    pub created_at: DateTime<Utc>,
    /// Last time any world-level mutation happened.
    pub last_updated: DateTime<Utc>,
}

impl WorldMeta {
    /// Create metadata with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// The world aggregate: one tile grid and every active player.
///
/// Constructed once at startup and passed by reference to the engine;
/// there are no ambient singletons. Players are created on first join and
/// live for the process lifetime (no leave path in this scope).
#[derive(Debug)]
pub struct World {
    /// World metadata.
    pub meta: WorldMeta,
    grid: TileGrid,
    players: HashMap<PlayerId, Player>,
}

impl World {
    /// Create a world over a tile grid.
    pub fn new(meta: WorldMeta, grid: TileGrid) -> Self {
        Self {
            meta,
            grid,
            players: HashMap::new(),
        }
    }

    /// The tile grid store.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable access to the tile grid store.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// Look up a player.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Mutable lookup of a player.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// Disjoint mutable access to one player and the grid, for operations
    /// that move a player across the grid.
    pub fn player_and_grid_mut(
        &mut self,
        id: &PlayerId,
    ) -> Option<(&mut Player, &mut TileGrid)> {
        let grid = &mut self.grid;
        self.players.get_mut(id).map(|player| (player, grid))
    }

    /// Join a player: created at `spawn` on first join, returned as-is on
    /// rejoin (position and progress survive reconnects).
    pub fn add_player(
        &mut self,
        id: PlayerId,
        username: impl Into<String>,
        spawn: Coord,
    ) -> &mut Player {
        self.meta.last_updated = Utc::now();
        self.players
            .entry(id.clone())
            .or_insert_with(|| Player::new(id, username, spawn))
    }

    /// All players, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of active players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
