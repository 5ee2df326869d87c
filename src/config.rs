//! Grid configuration and builder
//!
//! This module provides configuration types for deterministic tile grid
//! generation. The configuration is the only thing a save file needs to
//! persist: the same configuration always regenerates the identical grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopologyError};

/// Grid resolution presets
///
/// Each preset maps to an icosahedron subdivision degree. A grid of degree
/// `d` has `10·d² + 2` tiles, so the presets scale quadratically.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridResolution {
    /// Degree 10: 1,002 tiles
    Tiny,
    /// Degree 20: 4,002 tiles
    Small,
    /// Degree 30: 9,002 tiles
    Medium,
    /// Degree 40: 16,002 tiles
    Large,
    /// Custom subdivision degree (must be >= 1)
    Custom {
        /// Icosahedron subdivision degree
        degree: usize,
    },
}

impl GridResolution {
    /// Get the icosahedron subdivision degree for this resolution
    pub fn degree(self) -> usize {
        match self {
            GridResolution::Tiny => 10,
            GridResolution::Small => 20,
            GridResolution::Medium => 30,
            GridResolution::Large => 40,
            GridResolution::Custom { degree } => degree,
        }
    }

    /// Get the exact number of tiles this resolution produces (`10·d² + 2`)
    pub fn tile_count(self) -> usize {
        let d = self.degree();
        10 * d * d + 2
    }

    /// Get a human-readable name for this resolution
    pub fn name(self) -> &'static str {
        match self {
            GridResolution::Tiny => "Tiny",
            GridResolution::Small => "Small",
            GridResolution::Medium => "Medium",
            GridResolution::Large => "Large",
            GridResolution::Custom { .. } => "Custom",
        }
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        GridResolution::Medium
    }
}

/// Configuration for deterministic tile grid generation
///
/// The same configuration will always produce the identical topology,
/// including tile positions and adjacency. Only the configuration is
/// serialized (with the `serde` feature); the grid is rebuilt from it when
/// loading a save file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Random seed driving topology distortion
    ///
    /// The same seed (with the same other parameters) always reproduces the
    /// exact same planet.
    pub seed: u32,

    /// Grid resolution preset (determines the subdivision degree)
    pub resolution: GridResolution,

    /// Fraction of mesh edges to attempt rotating during distortion, in [0, 1]
    ///
    /// - 0.0: perfectly regular grid (icosahedral symmetry fully visible)
    /// - 1.0: one rotation attempt per edge (default, matches the irregular
    ///   look expected of a natural planet)
    pub distortion_rate: f32,

    /// Cap on relaxation iterations after the distortion passes
    ///
    /// Relaxation stops early once the change in total displacement between
    /// consecutive iterations falls below an internal threshold derived from
    /// average node spacing. Hitting the cap is accepted, not an error.
    pub relaxation_iterations: usize,

    /// Sphere radius the finished tile/corner positions are scaled to
    pub radius: f32,
}

impl GridConfig {
    /// Get the subdivision degree for this configuration
    #[inline]
    pub fn degree(&self) -> usize {
        self.resolution.degree()
    }

    /// Get the exact tile count for this configuration
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.resolution.tile_count()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating a `GridConfig` with validation
///
/// # Example
///
/// ```rust
/// use icosphere_tiles::*;
///
/// let config = GridConfigBuilder::new()
///     .seed(42)
///     .resolution(GridResolution::Small)
///     .unwrap()
///     .distortion_rate(0.6)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GridConfigBuilder {
    seed: Option<u32>,
    resolution: GridResolution,
    distortion_rate: f32,
    relaxation_iterations: usize,
    radius: f32,
}

impl GridConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random (generated from thread_rng)
    /// - resolution: Medium (degree 30, 9,002 tiles)
    /// - distortion_rate: 1.0
    /// - relaxation_iterations: 300
    /// - radius: 1000.0
    pub fn new() -> Self {
        Self {
            seed: None,
            resolution: GridResolution::default(),
            distortion_rate: 1.0,
            relaxation_iterations: 300,
            radius: 1000.0,
        }
    }

    /// Set the random seed for grid generation
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the grid resolution preset
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for `Custom { degree: 0 }`.
    pub fn resolution(mut self, resolution: GridResolution) -> Result<Self> {
        if resolution.degree() < 1 {
            return Err(TopologyError::InvalidConfig(
                "subdivision degree must be >= 1".to_string(),
            ));
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Set the fraction of edges to attempt rotating during distortion
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rate is outside [0, 1].
    pub fn distortion_rate(mut self, rate: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(TopologyError::InvalidConfig(format!(
                "distortion rate must be in [0, 1] (got {})",
                rate
            )));
        }
        self.distortion_rate = rate;
        Ok(self)
    }

    /// Set the relaxation iteration cap
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the cap is 0 or over 2000 (excessive and
    /// impractical).
    pub fn relaxation_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations == 0 || iterations > 2000 {
            return Err(TopologyError::InvalidConfig(format!(
                "relaxation iterations must be in [1, 2000] (got {})",
                iterations
            )));
        }
        self.relaxation_iterations = iterations;
        Ok(self)
    }

    /// Set the output sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is not positive.
    pub fn radius(mut self, radius: f32) -> Result<Self> {
        if radius <= 0.0 {
            return Err(TopologyError::InvalidConfig(format!(
                "radius must be positive (got {})",
                radius
            )));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<GridConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(GridConfig {
            seed,
            resolution: self.resolution,
            distortion_rate: self.distortion_rate,
            relaxation_iterations: self.relaxation_iterations,
            radius: self.radius,
        })
    }
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_degrees() {
        assert_eq!(GridResolution::Tiny.degree(), 10);
        assert_eq!(GridResolution::Small.degree(), 20);
        assert_eq!(GridResolution::Medium.degree(), 30);
        assert_eq!(GridResolution::Large.degree(), 40);
        assert_eq!(GridResolution::Custom { degree: 7 }.degree(), 7);
    }

    #[test]
    fn test_resolution_tile_counts() {
        assert_eq!(GridResolution::Tiny.tile_count(), 1_002);
        assert_eq!(GridResolution::Small.tile_count(), 4_002);
        assert_eq!(GridResolution::Medium.tile_count(), 9_002);
        assert_eq!(GridResolution::Large.tile_count(), 16_002);
        assert_eq!(GridResolution::Custom { degree: 1 }.tile_count(), 12);
        assert_eq!(GridResolution::Custom { degree: 2 }.tile_count(), 42);
    }

    #[test]
    fn test_builder_defaults() {
        let config = GridConfigBuilder::new().build().unwrap();
        assert_eq!(config.resolution, GridResolution::Medium);
        assert_eq!(config.distortion_rate, 1.0);
        assert_eq!(config.relaxation_iterations, 300);
        assert_eq!(config.radius, 1000.0);
    }

    #[test]
    fn test_builder_custom() {
        let config = GridConfigBuilder::new()
            .seed(42)
            .resolution(GridResolution::Small)
            .unwrap()
            .distortion_rate(0.25)
            .unwrap()
            .relaxation_iterations(100)
            .unwrap()
            .radius(10.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.resolution, GridResolution::Small);
        assert_eq!(config.distortion_rate, 0.25);
        assert_eq!(config.relaxation_iterations, 100);
        assert_eq!(config.radius, 10.0);
    }

    #[test]
    fn test_builder_rejects_zero_degree() {
        let result = GridConfigBuilder::new().resolution(GridResolution::Custom { degree: 0 });
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_bad_distortion_rate() {
        assert!(GridConfigBuilder::new().distortion_rate(-0.1).is_err());
        assert!(GridConfigBuilder::new().distortion_rate(1.5).is_err());
    }

    #[test]
    fn test_builder_rejects_bad_radius() {
        assert!(GridConfigBuilder::new().radius(0.0).is_err());
        assert!(GridConfigBuilder::new().radius(-5.0).is_err());
    }

    #[test]
    fn test_builder_rejects_bad_iteration_cap() {
        assert!(GridConfigBuilder::new().relaxation_iterations(0).is_err());
        assert!(GridConfigBuilder::new().relaxation_iterations(2001).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = GridConfigBuilder::new()
            .seed(12345)
            .resolution(GridResolution::Small)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: GridConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
