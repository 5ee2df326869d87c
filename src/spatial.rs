//! Spatial indexing for fast position-to-tile lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::Vec3;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// KD-tree over tile positions
///
/// Converts a 3D position on (or near) the sphere into the ID of the
/// closest tile in O(log n). Backs [`Topology::find_tile_at`], which is
/// what raycast hits and unit placement go through.
///
/// [`Topology::find_tile_at`]: crate::Topology::find_tile_at
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build an index from tile positions
    ///
    /// Called once at the end of grid generation; the tree is immutable
    /// after that.
    pub fn new(positions: &[Vec3]) -> Self {
        // kiddo wants plain arrays, not Vec3
        let points: Vec<[f32; 3]> = positions.iter().map(|p| [p.x, p.y, p.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the ID of the tile whose position is nearest to `position`
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.y, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
