//! Border structure
//!
//! A border is the dual of a mesh edge: the shared boundary segment between
//! exactly two tiles, running between two corners.

use glam::Vec3;

use crate::error::{Result, TopologyError};

/// The boundary segment between two adjacent tiles
///
/// All cross-references are integer indices into the owning
/// [`Topology`](crate::Topology)'s arenas.
#[derive(Debug, Clone)]
pub struct Border {
    /// Unique identifier (index into `Topology::borders`)
    pub id: usize,

    /// Endpoint corners
    ///
    /// Ordered to match the winding of `tiles[0]`; the opposite tile
    /// traverses them in reverse.
    pub corners: [usize; 2],

    /// The four continuation borders, two per endpoint corner
    pub borders: [usize; 4],

    /// The two tiles separated by this border
    pub tiles: [usize; 2],

    /// Cached midpoint (average of the two corner positions)
    pub midpoint: Vec3,
}

impl Border {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            corners: [usize::MAX; 2],
            borders: [usize::MAX; 4],
            tiles: [usize::MAX; 2],
            midpoint: Vec3::ZERO,
        }
    }

    /// The corner at the other end from the given one
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the given corner is not an endpoint of this
    /// border.
    pub fn opposite_corner(&self, corner_id: usize) -> Result<usize> {
        if self.corners[0] == corner_id {
            Ok(self.corners[1])
        } else if self.corners[1] == corner_id {
            Ok(self.corners[0])
        } else {
            Err(TopologyError::InvariantViolation(format!(
                "corner {} is not an endpoint of border {}",
                corner_id, self.id
            )))
        }
    }

    /// The tile on the other side from the given one
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the given tile does not touch this border.
    pub fn opposite_tile(&self, tile_id: usize) -> Result<usize> {
        if self.tiles[0] == tile_id {
            Ok(self.tiles[1])
        } else if self.tiles[1] == tile_id {
            Ok(self.tiles[0])
        } else {
            Err(TopologyError::InvariantViolation(format!(
                "tile {} does not touch border {}",
                tile_id, self.id
            )))
        }
    }
}
