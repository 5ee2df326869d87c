//! Dual topology construction
//!
//! Converts the final triangular mesh into the tile/corner/border structure
//! gameplay and rendering consume: faces become corners, edges become
//! borders, nodes become tiles. Positions are scaled from the unit sphere to
//! the configured radius.
//!
//! A border's own corner order is undirected, so each tile builds its own
//! ring by walking face-to-face around its node and then fixing the winding
//! to counter-clockwise seen from outside. Border endpoint order is
//! normalized to the traversal of the border's first tile.

use glam::Vec3;

use crate::border::Border;
use crate::corner::Corner;
use crate::error::{Result, TopologyError};
use crate::tile::{BoundingSphere, Tile};

use super::mesh::Mesh;

/// Build the tile/corner/border dual of a relaxed mesh
///
/// Expects `mesh.refresh_centroids()` to have run. Positions are scaled by
/// `radius`.
///
/// # Errors
///
/// `InvariantViolation` if the mesh adjacency is corrupt; no partial result
/// is ever returned.
pub fn build_topology(mesh: &Mesh, radius: f32) -> Result<(Vec<Corner>, Vec<Border>, Vec<Tile>)> {
    let mut corners: Vec<Corner> = mesh
        .faces
        .iter()
        .enumerate()
        .map(|(i, face)| {
            let mut corner = Corner::new(i, face.centroid * radius);
            corner.borders = face.edges;
            corner.tiles = face.nodes;
            corner
        })
        .collect();

    let mut borders: Vec<Border> = mesh
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            let mut border = Border::new(i);
            border.tiles = [edge.nodes[0], edge.nodes[1]];
            border
        })
        .collect();

    // Border endpoints and continuations come from the two adjacent faces.
    for (i, edge) in mesh.edges.iter().enumerate() {
        if edge.faces.len() != 2 {
            return Err(TopologyError::InvariantViolation(format!(
                "edge {} borders {} faces (expected 2)",
                i,
                edge.faces.len()
            )));
        }
        let border = &mut borders[i];
        border.corners = [edge.faces[0], edge.faces[1]];

        let mut slot = 0;
        for &corner_id in &border.corners {
            for &other in &corners[corner_id].borders {
                if other != i {
                    border.borders[slot] = other;
                    slot += 1;
                }
            }
        }
        if slot != 4 {
            return Err(TopologyError::InvariantViolation(format!(
                "border {} found {} continuation borders (expected 4)",
                i, slot
            )));
        }

        border.midpoint =
            (corners[border.corners[0]].position + corners[border.corners[1]].position) * 0.5;
    }

    // Corner-to-corner adjacency across each border.
    for i in 0..corners.len() {
        for j in 0..3 {
            let border_id = corners[i].borders[j];
            corners[i].corners[j] = borders[border_id].opposite_corner(i)?;
        }
    }

    let mut tiles: Vec<Tile> = Vec::with_capacity(mesh.nodes.len());
    for (i, node) in mesh.nodes.iter().enumerate() {
        let mut tile = Tile::new(i, node.position * radius, node.faces.len());

        let (ring_corners, ring_borders) = walk_tile_ring(mesh, i)?;
        let (ring_corners, ring_borders) =
            orient_ring(&tile.position, &corners, ring_corners, ring_borders);

        for (k, &border_id) in ring_borders.iter().enumerate() {
            let corner0 = ring_corners[k];
            let corner1 = ring_corners[(k + 1) % ring_corners.len()];
            let border = &mut borders[border_id];
            // Normalize endpoint order to the first tile's traversal; the
            // opposite tile walks the same border in reverse.
            if border.tiles[0] == i {
                border.corners = [corner0, corner1];
            }
            tile.tiles.push(border.opposite_tile(i)?);
        }
        tile.corners = ring_corners;
        tile.borders = ring_borders;

        tile.average_position = tile
            .corners
            .iter()
            .fold(Vec3::ZERO, |sum, &c| sum + corners[c].position)
            / tile.corners.len() as f32;

        let max_distance_to_corner = tile
            .corners
            .iter()
            .map(|&c| corners[c].position.distance(tile.average_position))
            .fold(0.0_f32, f32::max);
        tile.bounding_sphere = BoundingSphere {
            center: tile.average_position,
            radius: max_distance_to_corner,
        };

        tile.normal = tile.position.normalize();

        // Signed triangle fan around the tile position; with the ring wound
        // counter-clockwise every term is positive.
        let mut area = 0.0;
        for k in 0..tile.corners.len() {
            let c0 = corners[tile.corners[k]].position;
            let c1 = corners[tile.corners[(k + 1) % tile.corners.len()]].position;
            area += (c0 - tile.position).cross(c1 - tile.position).dot(tile.normal) * 0.5;
        }
        tile.area = area;

        tiles.push(tile);
    }

    for corner in &mut corners {
        corner.area = corner
            .tiles
            .iter()
            .map(|&t| tiles[t].area / tiles[t].corners.len() as f32)
            .sum();
    }

    Ok((corners, borders, tiles))
}

/// Walk face-to-face around a node, collecting its corner and border rings
///
/// Each face incident to the node has exactly two edges incident to the
/// node; entering through one and leaving through the other visits every
/// incident face exactly once. `ring_borders[k]` is the crossing between
/// `ring_corners[k]` and `ring_corners[k + 1]`.
fn walk_tile_ring(mesh: &Mesh, node_index: usize) -> Result<(Vec<usize>, Vec<usize>)> {
    let node = &mesh.nodes[node_index];
    let expected = node.faces.len();
    if expected < 3 || node.edges.len() != expected {
        return Err(TopologyError::InvariantViolation(format!(
            "node {} has {} faces but {} edges",
            node_index,
            expected,
            node.edges.len()
        )));
    }

    let node_edges_of = |face_index: usize| -> Vec<usize> {
        mesh.faces[face_index]
            .edges
            .iter()
            .copied()
            .filter(|&e| mesh.edges[e].nodes.contains(&node_index))
            .collect()
    };

    let first_face = node.faces[0];
    let start_edges = node_edges_of(first_face);
    if start_edges.len() != 2 {
        return Err(TopologyError::InvariantViolation(format!(
            "face {} touches node {} through {} edges (expected 2)",
            first_face,
            node_index,
            start_edges.len()
        )));
    }

    let mut ring_corners = vec![first_face];
    let mut ring_borders = Vec::with_capacity(expected);
    let mut current_face = first_face;
    let mut exit_edge = start_edges[0];

    loop {
        ring_borders.push(exit_edge);
        let next_face = mesh.opposite_face(exit_edge, current_face)?;
        if next_face == first_face {
            break;
        }
        if ring_corners.len() == expected {
            return Err(TopologyError::InvariantViolation(format!(
                "tile ring around node {} does not close",
                node_index
            )));
        }
        ring_corners.push(next_face);

        let next_edges = node_edges_of(next_face);
        exit_edge = next_edges
            .into_iter()
            .find(|&e| e != exit_edge)
            .ok_or_else(|| {
                TopologyError::InvariantViolation(format!(
                    "face {} has no second edge at node {}",
                    next_face, node_index
                ))
            })?;
        current_face = next_face;
    }

    if ring_corners.len() != expected {
        return Err(TopologyError::InvariantViolation(format!(
            "tile ring around node {} visited {} of {} corners",
            node_index,
            ring_corners.len(),
            expected
        )));
    }

    Ok((ring_corners, ring_borders))
}

/// Flip a tile ring so it winds counter-clockwise seen from outside
fn orient_ring(
    tile_position: &Vec3,
    corners: &[Corner],
    ring_corners: Vec<usize>,
    ring_borders: Vec<usize>,
) -> (Vec<usize>, Vec<usize>) {
    let v0 = corners[ring_corners[0]].position - *tile_position;
    let v1 = corners[ring_corners[1]].position - *tile_position;
    if v0.cross(v1).dot(*tile_position) >= 0.0 {
        return (ring_corners, ring_borders);
    }

    let n = ring_corners.len();
    let reversed_corners: Vec<usize> = (0..n).map(|k| ring_corners[(n - k) % n]).collect();
    let reversed_borders: Vec<usize> = ring_borders.into_iter().rev().collect();
    (reversed_corners, reversed_borders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::distort::distort;
    use crate::generation::icosahedron::base_icosahedron;
    use crate::generation::relax::relax;
    use crate::generation::subdivide::subdivide;
    use crate::random::ChaChaSource;

    fn build(degree: usize, rotations: usize, seed: u32) -> (Vec<Corner>, Vec<Border>, Vec<Tile>) {
        let mut mesh = subdivide(&base_icosahedron(), degree).unwrap();
        if rotations > 0 {
            let mut random = ChaChaSource::new(seed);
            distort(&mut mesh, rotations, &mut random).unwrap();
            relax(&mut mesh, 0.5);
        }
        mesh.refresh_centroids();
        build_topology(&mesh, 1.0).unwrap()
    }

    #[test]
    fn test_degree_one_is_dual_icosahedron() {
        let (corners, borders, tiles) = build(1, 0, 0);
        assert_eq!(tiles.len(), 12);
        assert_eq!(corners.len(), 20);
        assert_eq!(borders.len(), 30);
        for tile in &tiles {
            assert_eq!(tile.neighbor_count(), 5);
            assert_eq!(tile.corners.len(), 5);
        }
    }

    #[test]
    fn test_degree_two_counts() {
        let (corners, borders, tiles) = build(2, 0, 0);
        assert_eq!(tiles.len(), 42);
        assert_eq!(corners.len(), 80);
        assert_eq!(borders.len(), 120);
    }

    #[test]
    fn test_corner_invariants() {
        let (corners, borders, _tiles) = build(3, 40, 42);
        for corner in &corners {
            // Exactly 3 of each, all distinct and mutually consistent.
            assert_eq!(corner.corners.len(), 3);
            for &b in &corner.borders {
                assert!(borders[b].corners.contains(&corner.id));
            }
            for &adjacent in &corner.corners {
                assert!(corners[adjacent].is_adjacent_to(corner.id));
            }
        }
    }

    #[test]
    fn test_border_invariants() {
        let (_corners, borders, tiles) = build(3, 40, 42);
        for border in &borders {
            assert_ne!(border.tiles[0], border.tiles[1]);
            assert_ne!(border.corners[0], border.corners[1]);
            for &t in &border.tiles {
                assert!(tiles[t].borders.contains(&border.id));
            }
        }
    }

    #[test]
    fn test_tile_ring_is_consistent() {
        let (_corners, borders, tiles) = build(4, 80, 7);
        for tile in &tiles {
            let n = tile.corners.len();
            assert_eq!(tile.borders.len(), n);
            assert_eq!(tile.tiles.len(), n);
            for k in 0..n {
                let border = &borders[tile.borders[k]];
                let c0 = tile.corners[k];
                let c1 = tile.corners[(k + 1) % n];
                assert!(border.corners.contains(&c0) && border.corners.contains(&c1));
                assert_eq!(border.opposite_tile(tile.id).unwrap(), tile.tiles[k]);
            }
        }
    }

    #[test]
    fn test_border_endpoint_order_matches_first_tile() {
        let (_corners, borders, tiles) = build(3, 30, 5);
        for border in &borders {
            let tile = &tiles[border.tiles[0]];
            let k = tile.borders.iter().position(|&b| b == border.id).unwrap();
            assert_eq!(border.corners[0], tile.corners[k]);
            assert_eq!(border.corners[1], tile.corners[(k + 1) % tile.corners.len()]);
        }
    }

    #[test]
    fn test_tile_areas_are_positive_and_cover_sphere() {
        let (corners, _borders, tiles) = build(4, 0, 0);
        let mut total = 0.0;
        for tile in &tiles {
            assert!(tile.area > 0.0, "tile {} area {}", tile.id, tile.area);
            total += tile.area;
        }
        // Flat triangle fans underestimate the curved surface slightly.
        let sphere_area = 4.0 * std::f32::consts::PI;
        assert!(total > sphere_area * 0.9 && total < sphere_area * 1.01);

        let corner_total: f32 = corners.iter().map(|c| c.area).sum();
        assert!((corner_total - total).abs() < total * 1e-3);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let (_corners, _borders, tiles) = build(3, 50, 19);
        for tile in &tiles {
            for &neighbor in &tile.tiles {
                assert!(tiles[neighbor].is_neighbor_of(tile.id));
            }
        }
    }
}
