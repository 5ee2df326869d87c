//! Iterative mesh relaxation toward uniform tile area
//!
//! Distortion leaves triangles of very uneven size. Each relaxation pass
//! pulls every node toward a distance-to-centroid derived from the average
//! face area, so repeated passes even the triangles out while the nodes stay
//! on the unit sphere.
//!
//! Relaxation runs interleaved with distortion: rotating edges changes which
//! node moves are geometrically favorable, and moving nodes changes which
//! rotations pass the distortion predicate.

use glam::Vec3;
use std::f32::consts::PI;

use super::mesh::Mesh;

/// Run one relaxation pass and return the total node displacement
///
/// For every face, each of its three nodes accumulates a pull toward the
/// face's normalized centroid, scaled so the node's distance to the centroid
/// approaches the ideal derived from average face area. The accumulated pull
/// is projected onto the node's tangent plane, damped by a per-node rotation
/// suppression factor, and the node is renormalized onto the unit sphere.
///
/// The suppression factor is the max over incident edges of
/// `(1 - dot(old_dir, new_dir)) / 2`: a node whose proposed move would spin
/// its incident edges (fighting a fresh topology rotation) barely moves.
pub fn relax(mesh: &mut Mesh, multiplier: f32) -> f32 {
    let total_surface_area = 4.0 * PI;
    let ideal_face_area = total_surface_area / mesh.faces.len() as f32;
    let ideal_edge_length = (ideal_face_area * 4.0 / 3.0_f32.sqrt()).sqrt();
    let ideal_distance_to_centroid = ideal_edge_length * 3.0_f32.sqrt() / 3.0 * 0.9;

    // Proposed new position per node, starting as an accumulated shift.
    let mut shifts = vec![Vec3::ZERO; mesh.nodes.len()];

    for face in &mesh.faces {
        let centroid = face
            .nodes
            .iter()
            .fold(Vec3::ZERO, |sum, &n| sum + mesh.nodes[n].position)
            / 3.0;
        let centroid = centroid.normalize();

        for &n in &face.nodes {
            let to_centroid = centroid - mesh.nodes[n].position;
            let distance = to_centroid.length();
            let scale = multiplier * (distance - ideal_distance_to_centroid) / distance;
            shifts[n] += to_centroid * scale;
        }
    }

    // Project each shift onto the node's tangent plane (normal = position,
    // through the origin) and turn it into a candidate unit-sphere position.
    for (node, shift) in mesh.nodes.iter().zip(shifts.iter_mut()) {
        let normal = node.position;
        let tangential = *shift - normal * shift.dot(normal);
        *shift = (node.position + tangential).normalize();
    }

    let mut suppressions = vec![0.0_f32; mesh.nodes.len()];
    for edge in &mesh.edges {
        let [n0, n1] = edge.nodes;
        let old_dir = (mesh.nodes[n1].position - mesh.nodes[n0].position).normalize();
        let new_dir = (shifts[n1] - shifts[n0]).normalize();
        let suppression = (1.0 - old_dir.dot(new_dir)) * 0.5;
        suppressions[n0] = suppressions[n0].max(suppression);
        suppressions[n1] = suppressions[n1].max(suppression);
    }

    let mut total_shift = 0.0;
    for (i, node) in mesh.nodes.iter_mut().enumerate() {
        let old_position = node.position;
        node.position = old_position
            .lerp(shifts[i], 1.0 - suppressions[i].max(0.0).sqrt())
            .normalize();
        total_shift += (old_position - node.position).length();
    }

    total_shift
}

/// Convergence threshold for the post-distortion relaxation loop
///
/// Derived from average node spacing so the stop criterion scales with mesh
/// resolution: the loop ends once the change in total displacement between
/// consecutive passes falls below this.
pub fn shift_delta_threshold(mesh: &Mesh) -> f32 {
    let average_node_spacing = (4.0 * PI / mesh.nodes.len() as f32).sqrt();
    average_node_spacing / 50_000.0 * mesh.nodes.len() as f32
}
