use std::collections::BTreeMap;

use delve_core::{
    Cell, ChunkKey, ChunkRecord, Coord, InMemoryChunkSource, Room, RoomsRecord, TileGrid,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::GenConfig;
use crate::error::GenResult;
use crate::map::MapGrid;
use crate::{corridors, events, rooms, tiles};

/// A fully generated dungeon: the final cells, the room metadata, and the
/// number of corridor connections carved.
#[derive(Debug)]
pub struct Dungeon {
    size: i32,
    rooms: Vec<Room>,
    cells: Vec<Cell>,
    connections: usize,
}

impl Dungeon {
    /// Side length of the generated grid.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The placed rooms, room 0 first.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Every generated cell, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of corridor connections carved (the MST edge count).
    pub fn connections(&self) -> usize {
        self.connections
    }

    /// The cell at a coordinate, if it lies on the generated grid.
    pub fn cell_at(&self, c: Coord) -> Option<&Cell> {
        if c.x < 0 || c.x >= self.size || c.y < 0 || c.y >= self.size {
            return None;
        }
        self.cells.get((c.y * self.size + c.x) as usize)
    }

    /// Where new players enter the dungeon: the center of room 0.
    pub fn spawn(&self) -> Coord {
        self.rooms
            .first()
            .map_or(Coord::new(self.size / 2, self.size / 2), |r| r.center)
    }

    /// The room-metadata record emitted alongside the chunks.
    pub fn rooms_record(&self) -> RoomsRecord {
        RoomsRecord {
            rooms: self.rooms.clone(),
        }
    }

    /// Partition the grid into chunk records, in chunk-key order.
    pub fn into_chunks(&self, chunk_size: i32) -> Vec<(ChunkKey, ChunkRecord)> {
        let mut chunks: BTreeMap<ChunkKey, ChunkRecord> = BTreeMap::new();
        for cell in &self.cells {
            let key = ChunkKey::containing(cell.coord(), chunk_size);
            chunks.entry(key).or_default().cells.push(cell.clone());
        }
        chunks.into_iter().collect()
    }

    /// An in-memory chunk source over the generated chunks.
    pub fn chunk_source(&self, chunk_size: i32) -> InMemoryChunkSource {
        self.into_chunks(chunk_size).into_iter().collect()
    }

    /// A lazily-loading tile grid backed by the generated chunks.
    pub fn into_grid(&self, chunk_size: i32) -> TileGrid {
        TileGrid::new(chunk_size, Box::new(self.chunk_source(chunk_size)))
    }
}

/// Run the full generation pipeline for a config.
///
/// Deterministic per seed. Room placement may fall short of `max_rooms`
/// when the attempt cap runs out; the MST pass still connects whatever was
/// placed, so the result is always one reachable component.
pub fn generate(config: &GenConfig) -> GenResult<Dungeon> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut map = MapGrid::new(config.size);

    let placed = rooms::place_rooms(config, &mut rng);
    rooms::carve_rooms(&mut map, &placed);
    let connections = corridors::connect_rooms(&mut map, &placed, &mut rng);
    tiles::validate_doors(&mut map);
    let tile_ids = tiles::assign_tiles(&map, &placed, &mut rng);
    let seeded = events::seed_events(&map, &placed, &config.events, &mut rng);

    let cells = map
        .coords()
        .zip(tile_ids)
        .map(|(coord, tile_id)| {
            let mut cell = Cell::new(coord, tile_id);
            if let Some((kind, value)) = seeded.get(&coord) {
                cell.event = *kind;
                cell.event_value = Some(*value);
            }
            cell
        })
        .collect();

    info!(
        seed = config.seed,
        rooms = placed.len(),
        connections,
        events = seeded.len(),
        "dungeon generated"
    );

    Ok(Dungeon {
        size: config.size,
        rooms: placed,
        cells,
        connections,
    })
}
