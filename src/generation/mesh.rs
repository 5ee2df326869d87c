//! Index-arena triangular mesh
//!
//! The intermediate mesh the pipeline mutates before dualization. Nodes,
//! edges, and faces reference each other by integer index only; there are no
//! object references and therefore no ownership cycles.
//!
//! Invariant: the mesh is a closed 2-manifold triangulation of a topological
//! sphere. Every edge borders exactly 2 faces (transiently violated while
//! subdivision is still wiring faces up) and `nodes - edges + faces == 2`.

use glam::Vec3;

use crate::error::{Result, TopologyError};

/// A mesh vertex on the unit sphere
#[derive(Debug, Clone)]
pub struct Node {
    /// Position on the unit sphere
    pub position: Vec3,
    /// Indices of incident edges (unordered)
    pub edges: Vec<usize>,
    /// Indices of incident faces (unordered)
    pub faces: Vec<usize>,
}

impl Node {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }
}

/// An undirected edge between two nodes
#[derive(Debug, Clone)]
pub struct Edge {
    /// Endpoint node indices
    pub nodes: [usize; 2],
    /// Adjacent face indices; exactly 2 once the mesh is fully built
    pub faces: Vec<usize>,
}

impl Edge {
    pub fn new(n0: usize, n1: usize) -> Self {
        Self {
            nodes: [n0, n1],
            faces: Vec::new(),
        }
    }
}

/// A triangular face
///
/// `nodes` are in winding order and `edges[j]` connects `nodes[j]` to
/// `nodes[(j + 1) % 3]`. The centroid is cached by
/// [`Mesh::refresh_centroids`] once relaxation has finished.
#[derive(Debug, Clone)]
pub struct Face {
    pub nodes: [usize; 3],
    pub edges: [usize; 3],
    /// Normalized face centroid, cached after relaxation
    pub centroid: Vec3,
}

impl Face {
    pub fn new(nodes: [usize; 3], edges: [usize; 3]) -> Self {
        Self {
            nodes,
            edges,
            centroid: Vec3::ZERO,
        }
    }
}

/// Arena-backed triangular mesh of a sphere
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Euler characteristic `V - E + F`; 2 for any valid sphere mesh
    pub fn euler_characteristic(&self) -> i64 {
        self.nodes.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    /// Index of the face on the other side of `edge_index` from `face_index`
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the edge does not reference the given face or
    /// is not bordered by exactly 2 faces.
    pub fn opposite_face(&self, edge_index: usize, face_index: usize) -> Result<usize> {
        let edge = &self.edges[edge_index];
        if edge.faces.len() != 2 {
            return Err(TopologyError::InvariantViolation(format!(
                "edge {} borders {} faces (expected 2)",
                edge_index,
                edge.faces.len()
            )));
        }
        if edge.faces[0] == face_index {
            Ok(edge.faces[1])
        } else if edge.faces[1] == face_index {
            Ok(edge.faces[0])
        } else {
            Err(TopologyError::InvariantViolation(format!(
                "edge {} does not border face {}",
                edge_index, face_index
            )))
        }
    }

    /// Position slot (0..3) of the face node not touching the given edge
    pub fn face_node_opposite_edge(&self, face_index: usize, edge_index: usize) -> Result<usize> {
        let face = &self.faces[face_index];
        let edge = &self.edges[edge_index];
        for (slot, &node) in face.nodes.iter().enumerate() {
            if node != edge.nodes[0] && node != edge.nodes[1] {
                return Ok(slot);
            }
        }
        Err(TopologyError::InvariantViolation(format!(
            "face {} has no node opposite edge {}",
            face_index, edge_index
        )))
    }

    /// Recompute and cache every face's normalized centroid
    ///
    /// Run once after the final relaxation pass; the dual builder reads the
    /// cached values.
    pub fn refresh_centroids(&mut self) {
        for i in 0..self.faces.len() {
            let [n0, n1, n2] = self.faces[i].nodes;
            let sum = self.nodes[n0].position + self.nodes[n1].position + self.nodes[n2].position;
            self.faces[i].centroid = (sum / 3.0).normalize();
        }
    }

    /// Check the closed 2-manifold invariants
    ///
    /// Verifies that every edge borders exactly 2 faces, that face/edge/node
    /// cross-references are mutually consistent, and that the Euler formula
    /// holds. Any failure means the mesh is corrupt and all downstream tiles
    /// would be invalid.
    pub fn validate(&self) -> Result<()> {
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.faces.len() != 2 {
                return Err(TopologyError::InvariantViolation(format!(
                    "edge {} borders {} faces (expected 2)",
                    i,
                    edge.faces.len()
                )));
            }
            for &f in &edge.faces {
                if !self.faces[f].edges.contains(&i) {
                    return Err(TopologyError::InvariantViolation(format!(
                        "edge {} references face {} which does not reference it back",
                        i, f
                    )));
                }
            }
            for &n in &edge.nodes {
                if !self.nodes[n].edges.contains(&i) {
                    return Err(TopologyError::InvariantViolation(format!(
                        "edge {} references node {} which does not reference it back",
                        i, n
                    )));
                }
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            for j in 0..3 {
                let a = face.nodes[j];
                let b = face.nodes[(j + 1) % 3];
                let edge = &self.edges[face.edges[j]];
                if !(edge.nodes.contains(&a) && edge.nodes.contains(&b)) {
                    return Err(TopologyError::InvariantViolation(format!(
                        "face {} edge slot {} does not connect its adjacent nodes",
                        i, j
                    )));
                }
            }
            for &n in &face.nodes {
                if !self.nodes[n].faces.contains(&i) {
                    return Err(TopologyError::InvariantViolation(format!(
                        "face {} references node {} which does not reference it back",
                        i, n
                    )));
                }
            }
        }

        let euler = self.euler_characteristic();
        if euler != 2 {
            return Err(TopologyError::InvariantViolation(format!(
                "Euler characteristic is {} (expected 2)",
                euler
            )));
        }

        Ok(())
    }
}

/// Spherical linear interpolation between two unit vectors
///
/// Interpolates along the great-circle arc connecting `p0` and `p1`. Falls
/// back to normalized linear interpolation when the arc is degenerate.
pub fn slerp(p0: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let omega = p0.dot(p1).clamp(-1.0, 1.0).acos();
    let sin_omega = omega.sin();
    if sin_omega < 1e-6 {
        return p0.lerp(p1, t).normalize();
    }
    (p0 * ((1.0 - t) * omega).sin() + p1 * (t * omega).sin()) / sin_omega
}
