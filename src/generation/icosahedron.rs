//! Base icosahedron construction
//!
//! The fixed 12-node, 30-edge, 20-face seed polyhedron every grid starts
//! from. Node coordinates derive from the golden ratio and land exactly on
//! the unit sphere; faces are wound consistently so subdivision and the dual
//! build can rely on orientation.

use glam::Vec3;

use super::mesh::{Edge, Face, Mesh, Node};

/// Golden ratio φ = (1 + √5) / 2
const PHI: f32 = 1.618033988749895;

const EDGE_NODES: [[usize; 2]; 30] = [
    [0, 1],
    [0, 4],
    [0, 5],
    [0, 8],
    [0, 10],
    [1, 6],
    [1, 7],
    [1, 8],
    [1, 10],
    [2, 3],
    [2, 4],
    [2, 5],
    [2, 9],
    [2, 11],
    [3, 6],
    [3, 7],
    [3, 9],
    [3, 11],
    [4, 5],
    [4, 8],
    [4, 9],
    [5, 10],
    [5, 11],
    [6, 7],
    [6, 8],
    [6, 9],
    [7, 10],
    [7, 11],
    [8, 9],
    [10, 11],
];

const FACE_NODES: [[usize; 3]; 20] = [
    [0, 1, 8],
    [0, 4, 5],
    [0, 5, 10],
    [0, 8, 4],
    [0, 10, 1],
    [1, 7, 6],
    [1, 6, 8],
    [1, 10, 7],
    [2, 3, 11],
    [2, 4, 9],
    [2, 5, 4],
    [2, 9, 3],
    [2, 11, 5],
    [3, 6, 7],
    [3, 7, 11],
    [3, 9, 6],
    [4, 8, 9],
    [6, 9, 8],
    [7, 10, 11],
    [5, 11, 10],
];

const FACE_EDGES: [[usize; 3]; 20] = [
    [0, 7, 3],
    [1, 18, 2],
    [2, 21, 4],
    [3, 19, 1],
    [4, 8, 0],
    [6, 23, 5],
    [5, 24, 7],
    [8, 26, 6],
    [9, 17, 13],
    [10, 20, 12],
    [11, 18, 10],
    [12, 16, 9],
    [13, 22, 11],
    [14, 23, 15],
    [15, 27, 17],
    [16, 25, 14],
    [19, 28, 20],
    [25, 28, 24],
    [26, 29, 27],
    [22, 29, 21],
];

/// Build the base icosahedron with full cross-adjacency
///
/// Deterministic and infallible; the tables above are consistent by
/// construction.
pub fn base_icosahedron() -> Mesh {
    // du² + dv² = 1, so every node is already on the unit sphere
    let du = 1.0 / (PHI * PHI + 1.0).sqrt();
    let dv = PHI * du;

    let positions = [
        Vec3::new(0.0, dv, du),
        Vec3::new(0.0, dv, -du),
        Vec3::new(0.0, -dv, du),
        Vec3::new(0.0, -dv, -du),
        Vec3::new(du, 0.0, dv),
        Vec3::new(-du, 0.0, dv),
        Vec3::new(du, 0.0, -dv),
        Vec3::new(-du, 0.0, -dv),
        Vec3::new(dv, du, 0.0),
        Vec3::new(dv, -du, 0.0),
        Vec3::new(-dv, du, 0.0),
        Vec3::new(-dv, -du, 0.0),
    ];

    let mut nodes: Vec<Node> = positions.iter().map(|&p| Node::new(p)).collect();
    let mut edges: Vec<Edge> = EDGE_NODES.iter().map(|&[a, b]| Edge::new(a, b)).collect();
    let faces: Vec<Face> = FACE_NODES
        .iter()
        .zip(FACE_EDGES.iter())
        .map(|(&n, &e)| Face::new(n, e))
        .collect();

    for (i, edge) in EDGE_NODES.iter().enumerate() {
        for &n in edge {
            nodes[n].edges.push(i);
        }
    }
    for (i, face) in FACE_NODES.iter().enumerate() {
        for &n in face {
            nodes[n].faces.push(i);
        }
    }
    for (i, face_edges) in FACE_EDGES.iter().enumerate() {
        for &e in face_edges {
            edges[e].faces.push(i);
        }
    }

    Mesh { nodes, edges, faces }
}
