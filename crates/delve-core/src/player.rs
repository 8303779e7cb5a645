use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::EventKind;
use crate::coord::Coord;

/// Identifier for a player. Ids arrive from the transport collaborator,
/// so they are opaque strings rather than generated UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Wrap a transport-provided id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Whose swing it is inside an auto-battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleTurn {
    /// The player strikes next.
    Player,
    /// The enemy strikes next.
    Enemy,
}

/// Transient state of an auto-battle on an enemy cell.
///
/// Created when an unresolved enemy cell is entered and cleared by the
/// engine once the finished battle has been surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    /// The enemy cell the battle is bound to.
    pub enemy_cell: Coord,
    /// Enemy hit points remaining.
    pub enemy_hp: i32,
    /// Player hit points remaining.
    pub player_hp: i32,
    /// Whose swing is next.
    pub turn: BattleTurn,
    /// Human-readable battle log, in order.
    pub log: Vec<String>,
    /// Whether the battle has run to completion.
    pub finished: bool,
    /// Set once finished: `true` if the enemy fell first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory: Option<bool>,
}

impl BattleState {
    /// Starting HP for both sides of an auto-battle.
    pub const STARTING_HP: i32 = 3;

    /// A fresh battle at the given enemy cell. The player swings first.
    pub fn new(enemy_cell: Coord) -> Self {
        Self {
            enemy_cell,
            enemy_hp: Self::STARTING_HP,
            player_hp: Self::STARTING_HP,
            turn: BattleTurn::Player,
            log: vec!["Battle started!".to_string()],
            finished: false,
            victory: None,
        }
    }
}

/// Per-player game state. Owned exclusively by the [`crate::World`];
/// mutated only by the turn engine and event resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// The player's id.
    pub id: PlayerId,
    /// Display name.
    pub username: String,
    /// Current position on the grid.
    pub position: Coord,
    /// Cells currently inside the player's visibility disc.
    pub visible_cells: HashSet<Coord>,
    /// Every cell the player has ever seen (fog of war, monotonic).
    pub explored_cells: HashSet<Coord>,
    /// Events this player has revealed, by cell.
    pub discovered_cells: HashMap<Coord, EventKind>,
    /// Step budget of the current turn; 0 when no roll is active.
    pub current_roll: u32,
    /// First die of the current roll.
    pub die1: u32,
    /// Second die of the current roll.
    pub die2: u32,
    /// Steps consumed this turn. Never exceeds `current_roll`.
    pub steps_taken: u32,
    /// Cells stepped on this turn, starting position first.
    pub path_taken: Vec<Coord>,
    /// Accumulated step modifier for the next roll. Negative after debuffs.
    pub bonus_steps: i32,
    /// Turns that will be consumed as skips before the player may roll.
    pub turns_to_skip: u32,
    /// The battle in progress, if an enemy cell was just entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle: Option<BattleState>,
    /// Enemy cells this player has permanently cleared.
    pub cleared_enemy_cells: HashSet<Coord>,
    /// Last time any operation touched this player.
    pub last_active: DateTime<Utc>,
}

impl Player {
    /// Create a player at a position. The path starts at the position so the
    /// no-revisit rule holds from the first step.
    pub fn new(id: PlayerId, username: impl Into<String>, position: Coord) -> Self {
        Self {
            id,
            username: username.into(),
            position,
            visible_cells: HashSet::new(),
            explored_cells: HashSet::new(),
            discovered_cells: HashMap::new(),
            current_roll: 0,
            die1: 0,
            die2: 0,
            steps_taken: 0,
            path_taken: vec![position],
            bonus_steps: 0,
            turns_to_skip: 0,
            battle: None,
            cleared_enemy_cells: HashSet::new(),
            last_active: Utc::now(),
        }
    }

    /// Steps remaining in the current turn.
    pub fn steps_left(&self) -> u32 {
        self.current_roll.saturating_sub(self.steps_taken)
    }

    /// Begin a turn with a rolled budget, resetting step and path state.
    pub fn begin_turn(&mut self, total: u32, die1: u32, die2: u32) {
        self.current_roll = total;
        self.die1 = die1;
        self.die2 = die2;
        self.steps_taken = 0;
        self.path_taken = vec![self.position];
        self.last_active = Utc::now();
    }

    /// Consume one pending skip, leaving the player without a roll.
    pub fn consume_skip(&mut self) {
        self.turns_to_skip = self.turns_to_skip.saturating_sub(1);
        self.begin_turn(0, 0, 0);
    }

    /// End the turn: zero the roll and reset step and path state.
    pub fn reset_turn(&mut self) {
        self.current_roll = 0;
        self.steps_taken = 0;
        self.path_taken = vec![self.position];
        self.last_active = Utc::now();
    }

    /// Whether the player already crossed `coord` this turn, not counting
    /// the cell they are standing on.
    pub fn has_visited_this_turn(&self, coord: Coord) -> bool {
        let len = self.path_taken.len();
        self.path_taken[..len.saturating_sub(1)].contains(&coord)
    }

    /// Commit one accepted step to `coord`.
    pub fn record_step(&mut self, coord: Coord) {
        self.position = coord;
        self.steps_taken += 1;
        self.path_taken.push(coord);
        self.last_active = Utc::now();
    }

    /// Whether this player has permanently cleared the enemy cell.
    pub fn has_cleared(&self, coord: Coord) -> bool {
        self.cleared_enemy_cells.contains(&coord)
    }
}
