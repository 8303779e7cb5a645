use std::collections::HashMap;

use crate::cell::Cell;
use crate::chunk::{ChunkKey, ChunkSource};
use crate::coord::Coord;

/// The chunked, lazily-loaded tile grid store.
///
/// Chunks are pulled from a [`ChunkSource`] on first access and retained
/// in memory for the life of the grid. There is no eviction; world sizes
/// are bounded, and an eviction policy is a documented extension point.
pub struct TileGrid {
    chunk_size: i32,
    source: Box<dyn ChunkSource + Send + Sync>,
    /// Loaded chunks. A chunk missing from the source is cached as an empty
    /// map so it is not re-queried.
    chunks: HashMap<ChunkKey, HashMap<Coord, Cell>>,
}

impl std::fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileGrid")
            .field("chunk_size", &self.chunk_size)
            .field("loaded_chunks", &self.chunks.len())
            .finish()
    }
}

impl TileGrid {
    /// Create a grid over the given chunk source.
    pub fn new(chunk_size: i32, source: Box<dyn ChunkSource + Send + Sync>) -> Self {
        Self {
            chunk_size,
            source,
            chunks: HashMap::new(),
        }
    }

    /// The side length of one chunk, in cells.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of chunks currently materialized.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Get the cell at a coordinate, loading its chunk if needed.
    ///
    /// Never errors toward the caller: out-of-bounds or never-generated
    /// coordinates yield [`Cell::empty`], and a failing chunk source
    /// degrades to the same default.
    pub fn get_cell(&mut self, coord: Coord) -> Cell {
        self.ensure_chunk(ChunkKey::containing(coord, self.chunk_size));
        let key = ChunkKey::containing(coord, self.chunk_size);
        self.chunks
            .get(&key)
            .and_then(|cells| cells.get(&coord))
            .cloned()
            .unwrap_or_else(|| Cell::empty(coord))
    }

    /// Overwrite a cell in place. Used for door-open transitions.
    ///
    /// The write lands in the chunk cache; persisting it back is the
    /// collaborator's concern.
    pub fn update_cell(&mut self, cell: Cell) {
        let key = ChunkKey::containing(cell.coord(), self.chunk_size);
        self.ensure_chunk(key);
        if let Some(cells) = self.chunks.get_mut(&key) {
            cells.insert(cell.coord(), cell);
        }
    }

    /// All cells within the enlarged Manhattan disc around `center`:
    /// `|dx| + |dy| <= radius * 1.5`, computed in integers.
    ///
    /// Intentionally wider than a plain Manhattan disc, matching the
    /// visibility shape of the original game.
    pub fn get_cells_in_radius(&mut self, center: Coord, radius: i32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if in_radius(dx, dy, radius) {
                    cells.push(self.get_cell(center.offset(dx, dy)));
                }
            }
        }
        cells
    }

    /// Force the chunk containing `coord` into memory.
    pub fn ensure_loaded(&mut self, coord: Coord) {
        self.ensure_chunk(ChunkKey::containing(coord, self.chunk_size));
    }

    fn ensure_chunk(&mut self, key: ChunkKey) {
        if self.chunks.contains_key(&key) {
            return;
        }
        let cells = match self.source.load_chunk(key) {
            Ok(Some(record)) => record
                .cells
                .into_iter()
                .map(|cell| (cell.coord(), cell))
                .collect(),
            Ok(None) => HashMap::new(),
            // A broken source behaves like a missing chunk.
            Err(_) => HashMap::new(),
        };
        self.chunks.insert(key, cells);
    }
}

/// The disc inclusion test: `|dx| + |dy| <= radius * 1.5` without floats.
pub(crate) fn in_radius(dx: i32, dy: i32, radius: i32) -> bool {
    2 * (dx.abs() + dy.abs()) <= 3 * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{ChunkRecord, InMemoryChunkSource};

    fn grid_with_one_chunk() -> TileGrid {
        let mut source = InMemoryChunkSource::new();
        source.insert(
            ChunkKey { cx: 0, cy: 0 },
            ChunkRecord {
                cells: vec![
                    Cell::new(Coord::new(0, 0), "floor_0"),
                    Cell::new(Coord::new(1, 0), "wall_single_0"),
                ],
            },
        );
        TileGrid::new(10, Box::new(source))
    }

    #[test]
    fn get_cell_loads_chunk_lazily() {
        let mut grid = grid_with_one_chunk();
        assert_eq!(grid.loaded_chunk_count(), 0);
        let cell = grid.get_cell(Coord::new(0, 0));
        assert_eq!(cell.tile_id, "floor_0");
        assert_eq!(grid.loaded_chunk_count(), 1);
    }

    #[test]
    fn missing_cell_defaults_to_empty() {
        let mut grid = grid_with_one_chunk();
        let cell = grid.get_cell(Coord::new(500, 500));
        assert_eq!(cell.tile_id, "");
        assert!(!cell.is_passable());
        // Negative coordinates too.
        let cell = grid.get_cell(Coord::new(-3, -3));
        assert_eq!(cell.coord(), Coord::new(-3, -3));
    }

    #[test]
    fn update_cell_overwrites_in_place() {
        let mut grid = grid_with_one_chunk();
        let mut cell = grid.get_cell(Coord::new(1, 0));
        cell.tile_id = "door_open_0".to_string();
        grid.update_cell(cell);
        assert_eq!(grid.get_cell(Coord::new(1, 0)).tile_id, "door_open_0");
    }

    #[test]
    fn missing_chunk_cached_and_not_requeried() {
        let mut grid = grid_with_one_chunk();
        grid.get_cell(Coord::new(500, 500));
        let before = grid.loaded_chunk_count();
        grid.get_cell(Coord::new(501, 501));
        assert_eq!(grid.loaded_chunk_count(), before);
    }

    #[test]
    fn radius_test_is_enlarged_manhattan() {
        // radius 2: |dx|+|dy| may reach 3.
        assert!(in_radius(2, 1, 2));
        assert!(!in_radius(2, 2, 2));
        // radius 3: |dx|+|dy| may reach 4 (2*4=8 <= 9) but not 5.
        assert!(in_radius(3, 1, 3));
        assert!(in_radius(0, 4, 3));
        assert!(!in_radius(3, 2, 3));
    }

    #[test]
    fn cells_in_radius_count_matches_disc() {
        let mut grid = grid_with_one_chunk();
        let cells = grid.get_cells_in_radius(Coord::new(0, 0), 1);
        // radius 1: all offsets with |dx|+|dy| <= 1 → 5 cells.
        assert_eq!(cells.len(), 5);
    }
}
