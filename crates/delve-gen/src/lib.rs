//! Procedural dungeon generator for Delve.
//!
//! A one-shot pipeline: randomized room placement, Prim MST corridor
//! carving, door validation, structural tile classification, event seeding,
//! and chunk emission. The output is compatible with the chunk and room
//! records that [`delve_core`] consumes. Generation is deterministic for a
//! given [`GenConfig`] seed.

/// Generator configuration and defaults.
pub mod config;
/// Corridor carving and the Prim MST connection pass.
pub mod corridors;
/// Error types for the generator.
pub mod error;
/// Event seeding on generated floors.
pub mod events;
/// The orchestrating pipeline and its output.
pub mod generator;
/// The intermediate structural map the passes operate on.
pub mod map;
/// Room placement.
pub mod rooms;
/// Door validation and tile identifier assignment.
pub mod tiles;

/// Re-export configuration types.
pub use config::{EventConfig, GenConfig};
/// Re-export error types.
pub use error::{GenError, GenResult};
/// Re-export the pipeline entry point and its output.
pub use generator::{Dungeon, generate};
