//! Core types for Delve: the tile grid, cells, rooms, players, and the world
//! model of a turn-based grid dungeon crawler.
//!
//! This crate defines the data model that the generator writes and the runtime
//! engine mutates. It is independent of both: you can construct a [`World`]
//! programmatically or load its grid from persisted chunk records.

/// Cell data and gameplay event kinds.
pub mod cell;
/// Chunk keys, persisted chunk records, and the chunk source seam.
pub mod chunk;
/// Grid coordinates and cardinal directions.
pub mod coord;
/// Error types used throughout the crate.
pub mod error;
/// The chunked, lazily-loaded tile grid store.
pub mod grid;
/// Player state and battle state.
pub mod player;
/// Rooms produced by the dungeon generator.
pub mod room;
/// Tile identifier classification and passability.
pub mod tile;
/// The world aggregate owning the grid and all players.
pub mod world;

/// Re-export cell types.
pub use cell::{Cell, EventKind};
/// Re-export chunk types.
pub use chunk::{ChunkKey, ChunkRecord, ChunkSource, InMemoryChunkSource, RoomsRecord};
/// Re-export coordinate types.
pub use coord::{Coord, Direction};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the tile grid store.
pub use grid::TileGrid;
/// Re-export player types.
pub use player::{BattleState, BattleTurn, Player, PlayerId};
/// Re-export room types.
pub use room::{Room, RoomBounds};
/// Re-export tile classification.
pub use tile::TileKind;
/// Re-export world types.
pub use world::{World, WorldMeta};
