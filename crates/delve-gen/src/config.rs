use crate::error::{GenError, GenResult};

/// Densities for event seeding, per room-interior floor cell.
///
/// All zero reproduces the bare layout with no events anywhere.
#[derive(Debug, Clone, Copy)]
pub struct EventConfig {
    /// Chance of a bonus-steps event on an eligible cell.
    pub bonus_chance: f64,
    /// Chance of a debuff-steps event on an eligible cell.
    pub debuff_chance: f64,
    /// Chance of an enemy on an eligible cell.
    pub enemy_chance: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            bonus_chance: 0.03,
            debuff_chance: 0.02,
            enemy_chance: 0.02,
        }
    }
}

impl EventConfig {
    /// A config that seeds no events at all.
    pub fn none() -> Self {
        Self {
            bonus_chance: 0.0,
            debuff_chance: 0.0,
            enemy_chance: 0.0,
        }
    }
}

/// Configuration for one generator run.
///
/// Defaults match the original dungeon script: a 50×50 grid in 10-cell
/// chunks, rooms of side 6–10, up to 20 rooms with 2 cells of padding,
/// a packing distance of 5, and 1000 placement attempts.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Side length of the square grid.
    pub size: i32,
    /// Side length of one emitted chunk.
    pub chunk_size: i32,
    /// Minimum room side length, wall ring included.
    pub min_room_size: i32,
    /// Maximum room side length, wall ring included.
    pub max_room_size: i32,
    /// Target number of rooms.
    pub max_rooms: usize,
    /// Padding cells required between room bounding boxes.
    pub padding: i32,
    /// Rooms farther than this from the nearest placed room are rejected,
    /// keeping the dungeon compact.
    pub max_connect_dist: i32,
    /// Placement attempts before giving up on further rooms.
    pub max_attempts: u32,
    /// RNG seed; the whole pipeline is deterministic per seed.
    pub seed: u64,
    /// Event seeding densities.
    pub events: EventConfig,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            size: 50,
            chunk_size: 10,
            min_room_size: 6,
            max_room_size: 10,
            max_rooms: 20,
            padding: 2,
            max_connect_dist: 5,
            max_attempts: 1000,
            seed: 42,
            events: EventConfig::default(),
        }
    }
}

impl GenConfig {
    /// Set the grid side length.
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Set the chunk side length.
    pub fn with_chunk_size(mut self, chunk_size: i32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the room side length bounds.
    pub fn with_room_size(mut self, min: i32, max: i32) -> Self {
        self.min_room_size = min;
        self.max_room_size = max;
        self
    }

    /// Set the target room count.
    pub fn with_max_rooms(mut self, max_rooms: usize) -> Self {
        self.max_rooms = max_rooms;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the event seeding densities.
    pub fn with_events(mut self, events: EventConfig) -> Self {
        self.events = events;
        self
    }

    /// Check the config for contradictions the pipeline cannot absorb.
    pub fn validate(&self) -> GenResult<()> {
        if self.min_room_size < 3 || self.min_room_size > self.max_room_size {
            return Err(GenError::InvalidRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.size < self.max_room_size + 2 {
            return Err(GenError::GridTooSmall {
                size: self.size,
                max_room: self.max_room_size,
            });
        }
        if self.chunk_size <= 0 {
            return Err(GenError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}
