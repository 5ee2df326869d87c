//! Corner structure
//!
//! A corner is the dual of a mesh face: the meeting point of exactly three
//! tiles. Corners carry the polygon outline geometry consumed by rendering
//! and the zone-of-influence weight used by downstream density calculations.

use glam::Vec3;

/// A meeting point of three tiles on the sphere surface
///
/// All cross-references are integer indices into the owning
/// [`Topology`](crate::Topology)'s arenas; corners derive from triangular
/// faces, so every corner touches exactly 3 corners, borders, and tiles.
#[derive(Debug, Clone)]
pub struct Corner {
    /// Unique identifier (index into `Topology::corners`)
    pub id: usize,

    /// Position on the sphere (scaled face centroid)
    pub position: Vec3,

    /// The three adjacent corners, one across each border
    pub corners: [usize; 3],

    /// The three borders meeting at this corner
    pub borders: [usize; 3],

    /// The three tiles this corner belongs to
    pub tiles: [usize; 3],

    /// Approximate zone-of-influence weight: the sum over adjacent tiles of
    /// `tile.area / tile.corner_count`
    pub area: f32,
}

impl Corner {
    pub(crate) fn new(id: usize, position: Vec3) -> Self {
        Self {
            id,
            position,
            corners: [usize::MAX; 3],
            borders: [usize::MAX; 3],
            tiles: [usize::MAX; 3],
            area: 0.0,
        }
    }

    /// Check if another corner is directly adjacent
    #[inline]
    pub fn is_adjacent_to(&self, corner_id: usize) -> bool {
        self.corners.contains(&corner_id)
    }
}
