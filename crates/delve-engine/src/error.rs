use delve_core::PlayerId;
use thiserror::Error;

/// Errors surfaced by the turn engine.
///
/// Rejected moves and skipped rolls are not errors; they come back as
/// result values. Only addressing a player the world has never seen fails.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The addressed player has never joined this world.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
