/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while validating a generation config.
///
/// Running out of placement attempts is deliberately *not* an error:
/// generation degrades to however many rooms were placed.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Room size bounds are inverted or zero.
    #[error("invalid room size bounds: min {min} .. max {max}")]
    InvalidRoomSize {
        /// Configured minimum room side length.
        min: i32,
        /// Configured maximum room side length.
        max: i32,
    },

    /// The grid is too small to hold even one room.
    #[error("grid of size {size} cannot fit a room of size {max_room}")]
    GridTooSmall {
        /// Configured grid side length.
        size: i32,
        /// Configured maximum room side length.
        max_room: i32,
    },

    /// The chunk size must be positive.
    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(i32),
}
