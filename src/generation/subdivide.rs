//! Mesh subdivision by spherical interpolation
//!
//! Splits every edge of a triangular sphere mesh into `degree` sub-edges and
//! every face into `degree²` sub-faces, producing a finer mesh with full
//! cross-adjacency. Interpolated nodes are placed by slerp so the refined
//! mesh stays on the unit sphere.
//!
//! Boundary bookkeeping is orientation-aware: each original edge records its
//! interpolated nodes and sub-edges in the direction of its own endpoints,
//! and every adjacent face reads them in the direction matching its own
//! winding. Getting this wrong does not fail loudly — it silently stitches
//! seams between faces — so the direction flips here are load-bearing.

use crate::error::{Result, TopologyError};

use super::mesh::{slerp, Edge, Face, Mesh, Node};

/// Subdivide each edge of `base` into `degree` segments
///
/// For a base icosahedron this yields `10·degree² + 2` nodes,
/// `30·degree²` edges, and `20·degree²` faces. `degree == 1` rebuilds an
/// equivalent copy of the input.
///
/// # Errors
///
/// `InvalidConfig` if `degree < 1` (precondition violation).
pub fn subdivide(base: &Mesh, degree: usize) -> Result<Mesh> {
    if degree < 1 {
        return Err(TopologyError::InvalidConfig(
            "subdivision degree must be >= 1".to_string(),
        ));
    }

    let mut nodes: Vec<Node> = base
        .nodes
        .iter()
        .map(|n| Node::new(n.position))
        .collect();
    let mut edges: Vec<Edge> = Vec::with_capacity(base.edges.len() * degree * degree);
    let mut faces: Vec<Face> = Vec::with_capacity(base.faces.len() * degree * degree);

    // Per original edge: interpolated node ids and sub-edge ids, both listed
    // from nodes[0] toward nodes[1].
    let mut split_nodes: Vec<Vec<usize>> = Vec::with_capacity(base.edges.len());
    let mut split_edges: Vec<Vec<usize>> = Vec::with_capacity(base.edges.len());

    for edge in &base.edges {
        let [n0, n1] = edge.nodes;
        let p0 = base.nodes[n0].position;
        let p1 = base.nodes[n1].position;

        let mut interior = Vec::with_capacity(degree - 1);
        let mut subs = Vec::with_capacity(degree);
        let mut prior = n0;
        nodes[n0].edges.push(edges.len());
        for s in 1..degree {
            let edge_index = edges.len();
            let node_index = nodes.len();
            subs.push(edge_index);
            interior.push(node_index);
            edges.push(Edge::new(prior, node_index));
            // The two collinear sub-edges are known now; cross edges register
            // themselves during the face pass.
            nodes.push(Node {
                position: slerp(p0, p1, s as f32 / degree as f32),
                edges: vec![edge_index, edge_index + 1],
                faces: Vec::new(),
            });
            prior = node_index;
        }
        subs.push(edges.len());
        nodes[n1].edges.push(edges.len());
        edges.push(Edge::new(prior, n1));

        split_nodes.push(interior);
        split_edges.push(subs);
    }

    for face in &base.faces {
        subdivide_face(
            base,
            face,
            degree,
            &split_nodes,
            &split_edges,
            &mut nodes,
            &mut edges,
            &mut faces,
        );
    }

    Ok(Mesh { nodes, edges, faces })
}

/// Build the triangular lattice of one original face
///
/// Rows run parallel to the face's first edge (corner A toward corner B) and
/// advance toward the third corner C. Row `s` holds `degree - s + 1` nodes;
/// its endpoints come from the CA and BC boundary edges and its interior
/// nodes are slerped between them.
#[allow(clippy::too_many_arguments)]
fn subdivide_face(
    base: &Mesh,
    face: &Face,
    degree: usize,
    split_nodes: &[Vec<usize>],
    split_edges: &[Vec<usize>],
    nodes: &mut Vec<Node>,
    edges: &mut Vec<Edge>,
    faces: &mut Vec<Face>,
) {
    let [a, b, c] = face.nodes;
    let [e_ab, e_bc, e_ca] = face.edges;

    // Read an original edge's interpolated nodes / sub-edges in the
    // direction leading away from `from`.
    let boundary_node = |e: usize, from: usize, k: usize| -> usize {
        if base.edges[e].nodes[0] == from {
            split_nodes[e][k]
        } else {
            split_nodes[e][degree - 2 - k]
        }
    };
    let boundary_edge = |e: usize, from: usize, k: usize| -> usize {
        if base.edges[e].nodes[0] == from {
            split_edges[e][k]
        } else {
            split_edges[e][degree - 1 - k]
        }
    };

    // Node rows. rows[s][t]: row s counts s steps from the AB edge toward C.
    let mut rows: Vec<Vec<usize>> = Vec::with_capacity(degree + 1);
    let mut row0 = Vec::with_capacity(degree + 1);
    row0.push(a);
    for k in 0..degree.saturating_sub(1) {
        row0.push(boundary_node(e_ab, a, k));
    }
    row0.push(b);
    rows.push(row0);
    for s in 1..degree {
        let left = boundary_node(e_ca, a, s - 1);
        let right = boundary_node(e_bc, b, s - 1);
        let p_left = nodes[left].position;
        let p_right = nodes[right].position;
        let segments = degree - s;
        let mut row = Vec::with_capacity(segments + 1);
        row.push(left);
        for t in 1..segments {
            row.push(nodes.len());
            nodes.push(Node::new(slerp(p_left, p_right, t as f32 / segments as f32)));
        }
        row.push(right);
        rows.push(row);
    }
    rows.push(vec![c]);

    let mut new_edge = |nodes: &mut Vec<Node>, edges: &mut Vec<Edge>, n0: usize, n1: usize| {
        let index = edges.len();
        edges.push(Edge::new(n0, n1));
        nodes[n0].edges.push(index);
        nodes[n1].edges.push(index);
        index
    };

    // Edge lattice. horiz[s][t] connects (s,t)-(s,t+1); ldiag[s][t] connects
    // (s,t)-(s+1,t) and for t == 0 lies on the CA boundary; rdiag[s][t]
    // connects (s,t+1)-(s+1,t) and for the last t lies on the BC boundary.
    let mut horiz: Vec<Vec<usize>> = Vec::with_capacity(degree);
    for s in 0..degree {
        let segments = degree - s;
        let mut hrow = Vec::with_capacity(segments);
        for t in 0..segments {
            if s == 0 {
                hrow.push(boundary_edge(e_ab, a, t));
            } else {
                hrow.push(new_edge(nodes, edges, rows[s][t], rows[s][t + 1]));
            }
        }
        horiz.push(hrow);
    }

    let mut ldiag: Vec<Vec<usize>> = Vec::with_capacity(degree);
    let mut rdiag: Vec<Vec<usize>> = Vec::with_capacity(degree);
    for s in 0..degree {
        let count = degree - s;
        let mut lrow = Vec::with_capacity(count);
        let mut rrow = Vec::with_capacity(count);
        for t in 0..count {
            lrow.push(if t == 0 {
                boundary_edge(e_ca, a, s)
            } else {
                new_edge(nodes, edges, rows[s][t], rows[s + 1][t])
            });
            rrow.push(if t == count - 1 {
                boundary_edge(e_bc, b, s)
            } else {
                new_edge(nodes, edges, rows[s][t + 1], rows[s + 1][t])
            });
        }
        ldiag.push(lrow);
        rdiag.push(rrow);
    }

    // Sub-faces, preserving the parent winding.
    let mut add_face = |nodes: &mut Vec<Node>,
                        edges: &mut Vec<Edge>,
                        faces: &mut Vec<Face>,
                        face_nodes: [usize; 3],
                        face_edges: [usize; 3]| {
        let index = faces.len();
        faces.push(Face::new(face_nodes, face_edges));
        for n in face_nodes {
            nodes[n].faces.push(index);
        }
        for e in face_edges {
            edges[e].faces.push(index);
        }
    };

    for s in 0..degree {
        let count = degree - s;
        for t in 0..count {
            add_face(
                nodes,
                edges,
                faces,
                [rows[s][t], rows[s][t + 1], rows[s + 1][t]],
                [horiz[s][t], rdiag[s][t], ldiag[s][t]],
            );
            if t + 1 < count {
                add_face(
                    nodes,
                    edges,
                    faces,
                    [rows[s][t + 1], rows[s + 1][t + 1], rows[s + 1][t]],
                    [ldiag[s][t + 1], horiz[s + 1][t], rdiag[s][t]],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::icosahedron::base_icosahedron;

    #[test]
    fn test_rejects_degree_zero() {
        let base = base_icosahedron();
        assert!(subdivide(&base, 0).is_err());
    }

    #[test]
    fn test_degree_one_is_a_copy() {
        let base = base_icosahedron();
        let mesh = subdivide(&base, 1).unwrap();
        assert_eq!(mesh.nodes.len(), 12);
        assert_eq!(mesh.edges.len(), 30);
        assert_eq!(mesh.faces.len(), 20);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_element_counts() {
        let base = base_icosahedron();
        for degree in [2, 3, 5, 8] {
            let mesh = subdivide(&base, degree).unwrap();
            let d = degree;
            assert_eq!(mesh.nodes.len(), 10 * d * d + 2, "nodes at degree {}", d);
            assert_eq!(mesh.edges.len(), 30 * d * d, "edges at degree {}", d);
            assert_eq!(mesh.faces.len(), 20 * d * d, "faces at degree {}", d);
            assert_eq!(mesh.euler_characteristic(), 2);
        }
    }

    #[test]
    fn test_degree_two_counts() {
        let mesh = subdivide(&base_icosahedron(), 2).unwrap();
        assert_eq!(mesh.nodes.len(), 42);
        assert_eq!(mesh.edges.len(), 120);
        assert_eq!(mesh.faces.len(), 80);
    }

    #[test]
    fn test_adjacency_is_consistent() {
        for degree in [2, 3, 6] {
            let mesh = subdivide(&base_icosahedron(), degree).unwrap();
            mesh.validate().unwrap();
        }
    }

    #[test]
    fn test_nodes_stay_on_unit_sphere() {
        let mesh = subdivide(&base_icosahedron(), 4).unwrap();
        for node in &mesh.nodes {
            assert!((node.position.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_valence_distribution() {
        // Exactly the 12 original nodes keep valence 5; every interpolated
        // node is a regular hexagonal junction.
        let mesh = subdivide(&base_icosahedron(), 5).unwrap();
        let pentagons = mesh.nodes.iter().filter(|n| n.faces.len() == 5).count();
        let hexagons = mesh.nodes.iter().filter(|n| n.faces.len() == 6).count();
        assert_eq!(pentagons, 12);
        assert_eq!(hexagons, mesh.nodes.len() - 12);
    }

    #[test]
    fn test_determinism() {
        let m1 = subdivide(&base_icosahedron(), 4).unwrap();
        let m2 = subdivide(&base_icosahedron(), 4).unwrap();
        for (a, b) in m1.nodes.iter().zip(m2.nodes.iter()) {
            assert_eq!(a.position, b.position);
        }
        for (a, b) in m1.faces.iter().zip(m2.faces.iter()) {
            assert_eq!(a.nodes, b.nodes);
            assert_eq!(a.edges, b.edges);
        }
    }
}
