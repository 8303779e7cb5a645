use std::collections::{HashMap, HashSet};

use delve_core::{BattleState, Cell, Coord, EventKind, Player, PlayerId};
use tracing::debug;

use crate::combat;

/// What happened when a cell's event was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    /// Human-readable description of the effect.
    pub message: String,
    /// Whether the event changed player state and was marked processed.
    pub applied: bool,
    /// The battle run to completion, for enemy cells.
    pub battle: Option<BattleState>,
}

impl EventOutcome {
    fn none() -> Self {
        Self {
            message: "No event here.".to_string(),
            applied: false,
            battle: None,
        }
    }
}

/// Dispatches cell events to their effects, at most once per cell per turn.
///
/// The processed set is keyed per player and per coordinate. A mark is
/// recorded only when an event actually applied, and the whole set is
/// dropped when the player rolls a fresh turn, so a cell can fire again
/// next turn but never twice within one.
#[derive(Debug, Default)]
pub struct EventResolver {
    processed: HashMap<PlayerId, HashSet<Coord>>,
}

impl EventResolver {
    /// A resolver with no processed marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this player already had an event applied on `coord` this turn.
    pub fn is_processed(&self, id: &PlayerId, coord: Coord) -> bool {
        self.processed
            .get(id)
            .is_some_and(|cells| cells.contains(&coord))
    }

    /// Drop the player's processed marks. Called on every real roll.
    pub fn reset_for_player(&mut self, id: &PlayerId) {
        self.processed.remove(id);
    }

    /// Dispatch the event on `cell` against `player`.
    pub fn process(&mut self, player: &mut Player, cell: &Cell) -> EventOutcome {
        let coord = cell.coord();
        if self.is_processed(&player.id, coord) {
            return EventOutcome::none();
        }

        let outcome = match cell.event {
            EventKind::Empty | EventKind::Unknown => EventOutcome::none(),
            EventKind::BonusSteps => {
                let value = event_magnitude(cell);
                player.bonus_steps += value;
                EventOutcome {
                    message: format!("Bonus! +{value} steps on your next roll."),
                    applied: true,
                    battle: None,
                }
            }
            EventKind::DebuffSteps => {
                let value = event_magnitude(cell);
                player.bonus_steps -= value;
                EventOutcome {
                    message: format!("Debuff! -{value} steps on your next roll."),
                    applied: true,
                    battle: None,
                }
            }
            EventKind::Enemy => {
                if player.has_cleared(coord) {
                    EventOutcome::none()
                } else {
                    let battle = combat::resolve_battle(player, coord);
                    let message = if battle.victory == Some(true) {
                        "Victory! The enemy is defeated.".to_string()
                    } else {
                        "Defeat! The player has fallen.".to_string()
                    };
                    EventOutcome {
                        message,
                        applied: true,
                        battle: Some(battle),
                    }
                }
            }
        };

        if outcome.applied {
            self.processed
                .entry(player.id.clone())
                .or_default()
                .insert(coord);
            debug!(player = %player.id, cell = %coord, kind = ?cell.event, "event applied");
        }
        outcome
    }
}

/// The signed step magnitude of a cell's event. Values beyond `i32::MAX`
/// in persisted data saturate rather than wrap; the kind alone carries
/// the sign of the effect.
fn event_magnitude(cell: &Cell) -> i32 {
    cell.event_value
        .map_or(0, |v| i32::try_from(v).unwrap_or(i32::MAX))
}
