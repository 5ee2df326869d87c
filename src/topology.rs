//! Topology: the finished world grid artifact

use crate::border::Border;
use crate::config::GridConfig;
use crate::corner::Corner;
use crate::error::Result;
use crate::generation::{build_topology, generate_mesh};
use crate::random::{ChaChaSource, RandomSource};
use crate::tile::{Ray, Tile};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::Vec3;

/// A complete spherical tile grid
///
/// The immutable artifact the rest of the game consumes: tiles for gameplay
/// placement, corners and borders for outline rendering. Built once per
/// planet; regenerating a planet replaces the whole structure.
///
/// # Examples
///
/// ```
/// use icosphere_tiles::*;
///
/// let config = GridConfigBuilder::new()
///     .seed(42)
///     .resolution(GridResolution::Custom { degree: 4 })
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let topology = Topology::generate(config).unwrap();
/// println!("Generated {} tiles", topology.tile_count());
///
/// if let Some(tile) = topology.get_tile(0) {
///     println!("Tile 0 has {} neighbors", tile.neighbor_count());
/// }
/// ```
#[derive(Clone)]
pub struct Topology {
    /// Configuration used to generate this grid
    config: GridConfig,

    /// All corners (indexed by corner ID)
    corners: Vec<Corner>,

    /// All borders (indexed by border ID)
    borders: Vec<Border>,

    /// All tiles (indexed by tile ID)
    tiles: Vec<Tile>,

    /// Spatial index over tile positions (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Topology {
    /// Generate a grid with the default seeded random source
    ///
    /// Runs the full pipeline — icosahedron, subdivision, interleaved
    /// distortion/relaxation, dualization — as one blocking call. A host
    /// application may move this to a background thread; the algorithm
    /// itself is single-threaded.
    pub fn generate(config: GridConfig) -> Result<Self> {
        let mut random = ChaChaSource::new(config.seed);
        Self::generate_with_random(&config, &mut random)
    }

    /// Generate a grid with a caller-supplied random source
    ///
    /// The source must be deterministic for replay to work; `config.seed` is
    /// ignored in favor of whatever state the source carries.
    pub fn generate_with_random(
        config: &GridConfig,
        random: &mut dyn RandomSource,
    ) -> Result<Self> {
        let mesh = generate_mesh(config, random)?;
        let (corners, borders, tiles) = build_topology(&mesh, config.radius)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let positions: Vec<Vec3> = tiles.iter().map(|t| t.position).collect();
            SpatialIndex::new(&positions)
        };

        Ok(Self {
            config: *config,
            corners,
            borders,
            tiles,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this grid
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Get the sphere radius tile positions are scaled to
    #[inline]
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Get the number of tiles
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Get the number of corners
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Get the number of borders
    #[inline]
    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    /// Get all tiles as a slice
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get all corners as a slice
    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Get all borders as a slice
    #[inline]
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Get a tile by ID
    ///
    /// Returns `None` if the tile ID is out of bounds.
    #[inline]
    pub fn get_tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Get neighbor IDs for a tile
    ///
    /// The neighbors come back in the tile's winding order. Returns an empty
    /// slice if the tile ID is invalid.
    pub fn get_neighbors(&self, tile_id: usize) -> &[usize] {
        self.tiles
            .get(tile_id)
            .map(|t| t.tiles.as_slice())
            .unwrap_or(&[])
    }

    /// Find tiles within a given hop count from a center tile (BFS)
    ///
    /// Returns the center tile plus everything reachable in at most `hops`
    /// neighbor steps, sorted by tile ID. Returns an empty vec if the center
    /// ID is invalid.
    pub fn find_tiles_within_range(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.tiles.len() {
            return vec![];
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &tile_id in &current {
                for &neighbor in self.get_neighbors(tile_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut result: Vec<usize> = visited.into_iter().collect();
        result.sort_unstable();
        result
    }

    /// Find the tile a ray hits, if any
    ///
    /// Linear scan with per-tile bounding-sphere rejection; intended for
    /// picking/selection, where the caller has a cursor ray from outside the
    /// sphere.
    pub fn pick_tile(&self, ray: &Ray) -> Option<usize> {
        self.tiles
            .iter()
            .find(|tile| tile.intersect_ray(ray, &self.corners))
            .map(|tile| tile.id)
    }

    /// Find the tile nearest a position (requires spatial-index feature)
    ///
    /// O(log n) KD-tree lookup over tile positions; essential for mapping
    /// 3D positions (raycast hits, click points) to tile IDs.
    #[cfg(feature = "spatial-index")]
    pub fn find_tile_at(&self, position: Vec3) -> usize {
        self.spatial_index.find_nearest(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfigBuilder, GridResolution};

    fn small_config(degree: usize, seed: u32, rate: f32) -> GridConfig {
        GridConfigBuilder::new()
            .seed(seed)
            .resolution(GridResolution::Custom { degree })
            .unwrap()
            .distortion_rate(rate)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_degree_one_topology() {
        let topology = Topology::generate(small_config(1, 42, 0.0)).unwrap();
        assert_eq!(topology.tile_count(), 12);
        assert_eq!(topology.corner_count(), 20);
        assert_eq!(topology.border_count(), 30);
        for tile in topology.tiles() {
            assert_eq!(tile.neighbor_count(), 5);
        }
    }

    #[test]
    fn test_degree_two_topology() {
        let topology = Topology::generate(small_config(2, 42, 0.0)).unwrap();
        assert_eq!(topology.tile_count(), 42);
        assert_eq!(topology.corner_count(), 80);
        assert_eq!(topology.border_count(), 120);
    }

    #[test]
    fn test_tile_count_matches_config() {
        let config = small_config(5, 13, 1.0);
        let topology = Topology::generate(config).unwrap();
        assert_eq!(topology.tile_count(), config.tile_count());
    }

    #[test]
    fn test_determinism() {
        let config = small_config(4, 12345, 1.0);
        let t1 = Topology::generate(config).unwrap();
        let t2 = Topology::generate(config).unwrap();

        assert_eq!(t1.tile_count(), t2.tile_count());
        for (a, b) in t1.tiles().iter().zip(t2.tiles().iter()) {
            // Bit-identical, not approximately equal
            assert_eq!(a.position, b.position);
            assert_eq!(a.corners, b.corners);
            assert_eq!(a.borders, b.borders);
            assert_eq!(a.tiles, b.tiles);
        }
        for (a, b) in t1.corners().iter().zip(t2.corners().iter()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn test_positions_scaled_to_radius() {
        let config = GridConfigBuilder::new()
            .seed(4)
            .resolution(GridResolution::Custom { degree: 3 })
            .unwrap()
            .radius(25.0)
            .unwrap()
            .build()
            .unwrap();
        let topology = Topology::generate(config).unwrap();
        for tile in topology.tiles() {
            assert!((tile.position.length() - 25.0).abs() < 1e-3);
        }
        for corner in topology.corners() {
            assert!((corner.position.length() - 25.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_get_tile_bounds() {
        let topology = Topology::generate(small_config(2, 8, 0.5)).unwrap();
        assert!(topology.get_tile(0).is_some());
        assert!(topology.get_tile(topology.tile_count()).is_none());
        assert!(topology.get_neighbors(999_999).is_empty());
    }

    #[test]
    fn test_find_tiles_within_range() {
        let topology = Topology::generate(small_config(4, 21, 0.8)).unwrap();

        let r0 = topology.find_tiles_within_range(0, 0);
        assert_eq!(r0, vec![0]);

        let r1 = topology.find_tiles_within_range(0, 1);
        assert_eq!(r1.len(), 1 + topology.get_neighbors(0).len());

        let r2 = topology.find_tiles_within_range(0, 2);
        assert!(r2.len() > r1.len());

        assert!(topology.find_tiles_within_range(999_999, 3).is_empty());
    }

    #[test]
    fn test_pick_tile_at_average_position() {
        let topology = Topology::generate(small_config(3, 42, 1.0)).unwrap();
        let target = topology.get_tile(17).unwrap();

        // Aim straight down at the tile from outside the sphere.
        let ray = Ray::new(
            target.average_position * 2.0,
            -target.average_position.normalize(),
        );
        assert_eq!(topology.pick_tile(&ray), Some(17));

        // Non-adjacent tiles must not claim the same ray.
        let nearby = topology.find_tiles_within_range(17, 1);
        for tile in topology.tiles() {
            if !nearby.contains(&tile.id) {
                assert!(
                    !tile.intersect_ray(&ray, topology.corners()),
                    "tile {} wrongly intersects",
                    tile.id
                );
            }
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_tile_at() {
        let topology = Topology::generate(small_config(3, 6, 0.7)).unwrap();
        let position = topology.get_tile(5).unwrap().position;
        assert_eq!(topology.find_tile_at(position), 5);
    }
}
