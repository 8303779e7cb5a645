//! Runtime turn engine for Delve.
//!
//! Drives a [`delve_core::World`]: dice rolls, the move state machine with
//! step budgets and the no-revisit rule, fog-of-war visibility, cell event
//! dispatch, and resolve-to-completion combat. The [`GameEngine`] facade
//! wraps it all behind locks so a transport collaborator can call it from
//! many connections at once.

/// Auto-battle resolution on enemy cells.
pub mod combat;
/// Dice rolls.
pub mod dice;
/// The thread-safe game facade and the per-player map view.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// The cell event resolver and its per-turn idempotence marks.
pub mod events;
/// The turn and movement state machine.
pub mod turn;
/// The visibility disc and fog-of-war refresh.
pub mod visibility;

/// Re-export combat resolution.
pub use combat::resolve_battle;
/// Re-export dice types.
pub use dice::{DiceRoll, roll_dice};
/// Re-export the facade types.
pub use engine::{GameEngine, VisibleCell, VisibleMap};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export event resolution types.
pub use events::{EventOutcome, EventResolver};
/// Re-export turn types.
pub use turn::{MAP_VIEW_RADIUS, MoveResult, RollResult};
/// Re-export the visibility radius.
pub use visibility::{VISIBLE_RADIUS, refresh_visibility, visible_disc};
