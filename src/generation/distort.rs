//! Randomized topology distortion via edge rotation
//!
//! A freshly subdivided icosahedron is perfectly regular and its icosahedral
//! symmetry shows through any later coloring. Rotating randomly chosen
//! interior edges — replacing the shared edge of two triangles with the
//! other diagonal of their quadrilateral — erases that bias while keeping
//! the mesh a closed 2-manifold.
//!
//! Every rotation is gated by a validity predicate so no single step can
//! leave a node with fewer than 5 or more than 7 faces, stretch an edge past
//! double (or below half) its length, or produce a near-degenerate sliver.

use crate::error::Result;
use crate::random::RandomSource;

use super::mesh::Mesh;

/// Minimum dot product between old and new edge directions, measured from
/// either shared endpoint; lower values mean a sliver triangle.
const MIN_EDGE_DOT: f32 = 0.2;

/// Perform up to `rotation_budget` random edge rotations
///
/// Each attempt draws a uniformly random edge index and, if the rotation
/// there is invalid, scans forward (wrapping) until a valid candidate is
/// found. The scan is bounded by the edge count: if a full pass over every
/// edge finds no valid rotation the remaining budget is abandoned. Returns
/// the number of rotations actually performed.
///
/// # Errors
///
/// `InvariantViolation` if the mesh adjacency is corrupt (an edge without
/// exactly 2 faces, or a face missing its opposite node).
pub fn distort(
    mesh: &mut Mesh,
    rotation_budget: usize,
    random: &mut dyn RandomSource,
) -> Result<usize> {
    let edge_count = mesh.edges.len();
    let mut performed = 0;

    'budget: while performed < rotation_budget {
        let start = random.integer_exclusive(0, edge_count);
        for attempt in 0..edge_count {
            let edge_index = (start + attempt) % edge_count;
            if rotate_edge_if_valid(mesh, edge_index)? {
                performed += 1;
                continue 'budget;
            }
        }
        // No edge in the whole mesh admits a valid rotation right now.
        break;
    }

    Ok(performed)
}

/// Rotate the edge if the resulting topology and geometry are acceptable
///
/// The shared edge of faces `f0`/`f1` runs between the two "old" nodes; the
/// rotation reconnects it between the two "new" nodes (the far node of each
/// face), then rewires the 2 faces, the 4 nodes, and the 2 wing edges whose
/// face adjacency changes.
fn rotate_edge_if_valid(mesh: &mut Mesh, edge_index: usize) -> Result<bool> {
    let [face_index0, face_index1] = {
        let faces = &mesh.edges[edge_index].faces;
        if faces.len() != 2 {
            return Err(crate::error::TopologyError::InvariantViolation(format!(
                "edge {} borders {} faces (expected 2)",
                edge_index,
                faces.len()
            )));
        }
        [faces[0], faces[1]]
    };

    let far_slot0 = mesh.face_node_opposite_edge(face_index0, edge_index)?;
    let far_slot1 = mesh.face_node_opposite_edge(face_index1, edge_index)?;

    // With consistent winding, face0 reads (new0, old0, old1) from its far
    // slot and face1 reads (new1, old1, old0) from its own.
    let new_node0 = mesh.faces[face_index0].nodes[far_slot0];
    let old_node0 = mesh.faces[face_index0].nodes[(far_slot0 + 1) % 3];
    let new_node1 = mesh.faces[face_index1].nodes[far_slot1];
    let old_node1 = mesh.faces[face_index1].nodes[(far_slot1 + 1) % 3];

    if !rotation_is_valid(mesh, old_node0, old_node1, new_node0, new_node1) {
        return Ok(false);
    }

    // Wing edges that change face adjacency: old1-new0 moves from face0 to
    // face1, old0-new1 moves from face1 to face0.
    let wing_edge0 = mesh.faces[face_index0].edges[(far_slot0 + 2) % 3];
    let wing_edge1 = mesh.faces[face_index1].edges[(far_slot1 + 2) % 3];

    detach(&mut mesh.nodes[old_node0].edges, edge_index, "node", old_node0)?;
    detach(&mut mesh.nodes[old_node1].edges, edge_index, "node", old_node1)?;
    mesh.nodes[new_node0].edges.push(edge_index);
    mesh.nodes[new_node1].edges.push(edge_index);
    mesh.edges[edge_index].nodes = [new_node0, new_node1];

    replace(
        &mut mesh.edges[wing_edge0].faces,
        face_index0,
        face_index1,
        "edge",
        wing_edge0,
    )?;
    replace(
        &mut mesh.edges[wing_edge1].faces,
        face_index1,
        face_index0,
        "edge",
        wing_edge1,
    )?;

    detach(&mut mesh.nodes[old_node0].faces, face_index1, "node", old_node0)?;
    detach(&mut mesh.nodes[old_node1].faces, face_index0, "node", old_node1)?;
    mesh.nodes[new_node0].faces.push(face_index1);
    mesh.nodes[new_node1].faces.push(face_index0);

    // face0 becomes (new0, old0, new1), face1 becomes (new1, old1, new0);
    // the far-slot edge stays, the middle slot takes the moved wing edge and
    // the last slot takes the rotated edge itself.
    let face0 = &mut mesh.faces[face_index0];
    face0.nodes[(far_slot0 + 2) % 3] = new_node1;
    face0.edges[(far_slot0 + 1) % 3] = wing_edge1;
    face0.edges[(far_slot0 + 2) % 3] = edge_index;

    let face1 = &mut mesh.faces[face_index1];
    face1.nodes[(far_slot1 + 2) % 3] = new_node0;
    face1.edges[(far_slot1 + 1) % 3] = wing_edge0;
    face1.edges[(far_slot1 + 2) % 3] = edge_index;

    Ok(true)
}

/// Validity predicate for a proposed rotation
fn rotation_is_valid(
    mesh: &Mesh,
    old_node0: usize,
    old_node1: usize,
    new_node0: usize,
    new_node1: usize,
) -> bool {
    // Valence bounds: gaining nodes may not exceed 7 faces, losing nodes may
    // not drop below 5.
    if mesh.nodes[new_node0].faces.len() >= 7
        || mesh.nodes[new_node1].faces.len() >= 7
        || mesh.nodes[old_node0].faces.len() <= 5
        || mesh.nodes[old_node1].faces.len() <= 5
    {
        return false;
    }

    let old_p0 = mesh.nodes[old_node0].position;
    let old_p1 = mesh.nodes[old_node1].position;
    let new_p0 = mesh.nodes[new_node0].position;
    let new_p1 = mesh.nodes[new_node1].position;

    let old_length = old_p0.distance(old_p1);
    let new_length = new_p0.distance(new_p1);
    let ratio = old_length / new_length;
    if ratio >= 2.0 || ratio <= 0.5 {
        return false;
    }

    // Reject slivers: from each shared endpoint, both replacement directions
    // must stay reasonably aligned with the old edge direction.
    let old_dir = (old_p1 - old_p0) / old_length;
    if old_dir.dot((new_p0 - old_p0).normalize()) < MIN_EDGE_DOT
        || old_dir.dot((new_p1 - old_p0).normalize()) < MIN_EDGE_DOT
    {
        return false;
    }
    let old_dir = -old_dir;
    if old_dir.dot((new_p0 - old_p1).normalize()) < MIN_EDGE_DOT
        || old_dir.dot((new_p1 - old_p1).normalize()) < MIN_EDGE_DOT
    {
        return false;
    }

    true
}

fn detach(list: &mut Vec<usize>, value: usize, kind: &str, owner: usize) -> Result<()> {
    match list.iter().position(|&v| v == value) {
        Some(slot) => {
            list.swap_remove(slot);
            Ok(())
        }
        None => Err(crate::error::TopologyError::InvariantViolation(format!(
            "{} {} does not reference {}",
            kind, owner, value
        ))),
    }
}

fn replace(list: &mut [usize], from: usize, to: usize, kind: &str, owner: usize) -> Result<()> {
    match list.iter().position(|&v| v == from) {
        Some(slot) => {
            list[slot] = to;
            Ok(())
        }
        None => Err(crate::error::TopologyError::InvariantViolation(format!(
            "{} {} does not reference {}",
            kind, owner, from
        ))),
    }
}
