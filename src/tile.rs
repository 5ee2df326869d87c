//! Tile structure
//!
//! A tile is the dual of a mesh node: a pentagonal-to-heptagonal playable
//! location on the planet surface. Tiles are what gameplay consumes —
//! resource deposits, bases, and cities are placed by tile id — so each tile
//! carries its ordered boundary ring and enough cached geometry for fast
//! picking.

use glam::Vec3;

use crate::corner::Corner;

/// A ray for tile picking, in the same coordinate space as tile positions
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// Bounding sphere used for cheap ray rejection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// A single playable tile on the planet surface
///
/// The `corners`, `borders`, and `tiles` rings share one consistent winding
/// established during construction: `borders[k]` runs between `corners[k]`
/// and `corners[(k + 1) % n]`, and `tiles[k]` is the neighbor across
/// `borders[k]`. All cross-references are integer indices into the owning
/// [`Topology`](crate::Topology)'s arenas.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Unique identifier (index into `Topology::tiles`); stable for a given
    /// configuration
    pub id: usize,

    /// Position on the sphere (scaled mesh node position)
    pub position: Vec3,

    /// Boundary corners in winding order (5 to 7 of them)
    pub corners: Vec<usize>,

    /// Boundary borders in winding order
    pub borders: Vec<usize>,

    /// Neighboring tile ids, one across each border
    pub tiles: Vec<usize>,

    /// Surface area of the boundary polygon
    pub area: f32,

    /// Centroid of the boundary corners
    pub average_position: Vec3,

    /// Outward unit normal
    pub normal: Vec3,

    /// Bounding sphere around the boundary corners
    pub bounding_sphere: BoundingSphere,
}

impl Tile {
    pub(crate) fn new(id: usize, position: Vec3, corner_count: usize) -> Self {
        Self {
            id,
            position,
            corners: Vec::with_capacity(corner_count),
            borders: Vec::with_capacity(corner_count),
            tiles: Vec::with_capacity(corner_count),
            area: 0.0,
            average_position: Vec3::ZERO,
            normal: Vec3::ZERO,
            bounding_sphere: BoundingSphere {
                center: Vec3::ZERO,
                radius: 0.0,
            },
        }
    }

    /// Get the number of neighboring tiles (equal to the corner count)
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.tiles.len()
    }

    /// Check if this tile is a neighbor of another tile
    #[inline]
    pub fn is_neighbor_of(&self, tile_id: usize) -> bool {
        self.tiles.contains(&tile_id)
    }

    /// Test whether a ray from outside the sphere hits this tile
    ///
    /// Bounding-sphere reject, then a tangent-plane intersection at the
    /// tile's average position, then a half-plane test against every edge
    /// plane spanned by two consecutive corners and the sphere origin.
    ///
    /// The half-plane test assumes the tile is convex and near-planar, which
    /// holds for the mild irregularity this pipeline produces; an extremely
    /// distorted tile could in principle be non-convex and mis-tested.
    ///
    /// `corners` must be the corner arena of the topology this tile belongs
    /// to.
    pub fn intersect_ray(&self, ray: &Ray, corners: &[Corner]) -> bool {
        if !ray_hits_sphere(ray, &self.bounding_sphere) {
            return false;
        }

        // Tangent surface plane at the tile; the ray origin must be on the
        // outside of it.
        let origin_height = self.normal.dot(ray.origin) - self.normal.dot(self.average_position);
        if origin_height <= 0.0 {
            return false;
        }

        let denominator = self.normal.dot(ray.direction);
        if denominator == 0.0 {
            return false;
        }
        let t = -origin_height / denominator;
        let point = ray.origin + ray.direction * t;

        for i in 0..self.corners.len() {
            let j = (i + 1) % self.corners.len();
            let edge_plane_normal = corners[self.corners[i]]
                .position
                .cross(corners[self.corners[j]].position);
            if point.dot(edge_plane_normal) < 0.0 {
                return false;
            }
        }

        true
    }
}

fn ray_hits_sphere(ray: &Ray, sphere: &BoundingSphere) -> bool {
    let to_center = sphere.center - ray.origin;
    let projected = ray.direction * (to_center.dot(ray.direction) / ray.direction.length_squared());
    to_center.distance(projected) <= sphere.radius
}
