//! Irregular spherical tile grids for strategy games
//!
//! Subdivides an icosahedron, distorts and relaxes the triangle mesh, and
//! takes its dual to produce a near-uniform grid of hexagonal tiles (plus
//! exactly twelve pentagons), suitable for use with any game engine
//! (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use icosphere_tiles::*;
//!
//! // Generate a world grid
//! let config = GridConfigBuilder::new()
//!     .seed(42)
//!     .resolution(GridResolution::Medium).unwrap()
//!     .distortion_rate(1.0).unwrap()
//!     .build().unwrap();
//!
//! let topology = Topology::generate(config).unwrap();
//! println!("Generated {} tiles", topology.tile_count());
//!
//! // Walk a tile's neighborhood
//! for &neighbor in topology.get_neighbors(0) {
//!     println!("tile 0 borders tile {}", neighbor);
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-tile lookups using KD-tree
//! - `serde`: Enables serialization support for configuration

// Modules
pub mod border;
pub mod config;
pub mod corner;
pub mod error;
pub mod generation;
pub mod random;
pub mod tile;
pub mod topology;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use border::Border;
pub use config::{GridConfig, GridConfigBuilder, GridResolution};
pub use corner::Corner;
pub use error::{Result, TopologyError};
pub use generation::{Edge, Face, Mesh, Node};
pub use random::{ChaChaSource, RandomSource};
pub use tile::{BoundingSphere, Ray, Tile};
pub use topology::Topology;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
