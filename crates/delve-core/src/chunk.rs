use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::coord::Coord;
use crate::error::CoreResult;
use crate::room::Room;

/// Identifies one fixed-size square chunk of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    /// Chunk column: `floor(x / chunk_size)`.
    pub cx: i32,
    /// Chunk row: `floor(y / chunk_size)`.
    pub cy: i32,
}

impl ChunkKey {
    /// The key of the chunk containing the given coordinate.
    pub fn containing(coord: Coord, chunk_size: i32) -> Self {
        Self {
            cx: coord.x.div_euclid(chunk_size),
            cy: coord.y.div_euclid(chunk_size),
        }
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk_{}_{}", self.cx, self.cy)
    }
}

/// The serializable unit the generator emits and a persistence collaborator
/// stores: all cells of one chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Every generated cell in the chunk.
    pub cells: Vec<Cell>,
}

/// The room-metadata record emitted alongside the chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomsRecord {
    /// All rooms of the dungeon.
    pub rooms: Vec<Room>,
}

/// The seam between the grid store and wherever chunks actually live.
///
/// `Ok(None)` means the chunk was never generated; the grid treats every
/// cell in it as a default empty cell.
pub trait ChunkSource {
    /// Load the chunk with the given key, if it exists.
    fn load_chunk(&self, key: ChunkKey) -> CoreResult<Option<ChunkRecord>>;
}

/// A chunk source backed by an in-memory map. Used for generator output
/// and tests; an on-disk JSON store implements the same trait externally.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChunkSource {
    chunks: HashMap<ChunkKey, ChunkRecord>,
}

impl InMemoryChunkSource {
    /// Create an empty source (every chunk missing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a chunk record.
    pub fn insert(&mut self, key: ChunkKey, record: ChunkRecord) {
        self.chunks.insert(key, record);
    }

    /// Number of chunks held.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the source holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<(ChunkKey, ChunkRecord)> for InMemoryChunkSource {
    fn from_iter<I: IntoIterator<Item = (ChunkKey, ChunkRecord)>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl ChunkSource for InMemoryChunkSource {
    fn load_chunk(&self, key: ChunkKey) -> CoreResult<Option<ChunkRecord>> {
        Ok(self.chunks.get(&key).cloned())
    }
}
