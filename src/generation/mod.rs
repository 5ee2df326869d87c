//! Core mesh-generation pipeline
//!
//! Builds the triangular sphere mesh the dual topology derives from:
//! icosahedron → subdivision → interleaved distortion/relaxation passes →
//! convergence relaxation → cached centroids. Purely synchronous and
//! CPU-bound; for a fixed seed and configuration the output is bit-for-bit
//! reproducible.

pub mod mesh;

pub mod distort;
pub mod dual;
pub mod icosahedron;
pub mod relax;
pub mod subdivide;

pub use distort::distort;
pub use dual::build_topology;
pub use icosahedron::base_icosahedron;
pub use mesh::{Edge, Face, Mesh, Node};
pub use relax::relax;
pub use subdivide::subdivide;

use std::time::Instant;

use crate::config::GridConfig;
use crate::error::Result;
use crate::random::RandomSource;

/// Number of interleaved distortion/relaxation passes
///
/// Relaxation changes which rotations are geometrically favorable, so the
/// distortion budget is spread across several passes with a relaxation step
/// between each instead of being spent in one burst.
const DISTORTION_PASSES: usize = 6;

/// Relaxation step size; high enough to converge quickly, low enough not to
/// overshoot
const RELAXATION_MULTIPLIER: f32 = 0.5;

/// Generate the distorted, relaxed triangular mesh for a configuration
///
/// This is the full pipeline short of dualization. The mesh comes out on the
/// unit sphere with face centroids cached.
///
/// # Errors
///
/// `InvalidConfig` for a degree below 1; `InvariantViolation` if mesh
/// adjacency is ever found corrupted (which invalidates the whole run).
pub fn generate_mesh(config: &GridConfig, random: &mut dyn RandomSource) -> Result<Mesh> {
    let start = Instant::now();

    let base = icosahedron::base_icosahedron();
    let mut mesh = subdivide::subdivide(&base, config.degree())?;
    mesh.validate()?;

    let mut remaining_budget =
        (mesh.edges.len() as f32 * config.distortion_rate).ceil() as usize;
    eprintln!(
        "[Mesh] degree {}: {} nodes, {} edges, {} faces; distortion budget {}",
        config.degree(),
        mesh.nodes.len(),
        mesh.edges.len(),
        mesh.faces.len(),
        remaining_budget
    );

    for pass in (1..=DISTORTION_PASSES).rev() {
        let share = remaining_budget / pass;
        remaining_budget -= share;
        let performed = distort::distort(&mut mesh, share, random)?;
        relax::relax(&mut mesh, RELAXATION_MULTIPLIER);
        if performed < share {
            eprintln!(
                "[Mesh] distortion pass ran out of valid rotations ({} of {})",
                performed, share
            );
        }
    }

    let threshold = relax::shift_delta_threshold(&mesh);
    let mut prior_shift = relax::relax(&mut mesh, RELAXATION_MULTIPLIER);
    let mut iterations_run = 1;
    let mut converged = false;
    for _ in 1..config.relaxation_iterations {
        let shift = relax::relax(&mut mesh, RELAXATION_MULTIPLIER);
        iterations_run += 1;
        if (shift - prior_shift).abs() < threshold {
            converged = true;
            break;
        }
        prior_shift = shift;
    }
    // Hitting the cap is an accepted approximation, not an error.
    eprintln!(
        "[Mesh] relaxation: {} iterations (cap {}), converged={}, total={:?}",
        iterations_run,
        config.relaxation_iterations,
        converged,
        start.elapsed()
    );

    mesh.refresh_centroids();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfigBuilder, GridResolution};
    use crate::random::ChaChaSource;

    fn config(degree: usize, seed: u32, rate: f32) -> GridConfig {
        GridConfigBuilder::new()
            .seed(seed)
            .resolution(GridResolution::Custom { degree })
            .unwrap()
            .distortion_rate(rate)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_produces_valid_mesh() {
        let config = config(4, 42, 0.5);
        let mut random = ChaChaSource::new(config.seed);
        let mesh = generate_mesh(&config, &mut random).unwrap();
        mesh.validate().unwrap();
        assert_eq!(mesh.nodes.len(), 162);
        assert_eq!(mesh.edges.len(), 480);
        assert_eq!(mesh.faces.len(), 320);
    }

    #[test]
    fn test_centroids_are_cached() {
        let config = config(2, 1, 0.0);
        let mut random = ChaChaSource::new(config.seed);
        let mesh = generate_mesh(&config, &mut random).unwrap();
        for face in &mesh.faces {
            assert!((face.centroid.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_distortion_keeps_regularity() {
        let config = config(3, 9, 0.0);
        let mut random = ChaChaSource::new(config.seed);
        let mesh = generate_mesh(&config, &mut random).unwrap();
        let pentagons = mesh.nodes.iter().filter(|n| n.faces.len() == 5).count();
        assert_eq!(pentagons, 12);
    }

    #[test]
    fn test_determinism() {
        let config = config(3, 77, 1.0);
        let run = || {
            let mut random = ChaChaSource::new(config.seed);
            generate_mesh(&config, &mut random).unwrap()
        };
        let m1 = run();
        let m2 = run();
        for (a, b) in m1.nodes.iter().zip(m2.nodes.iter()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.faces, b.faces);
        }
        for (a, b) in m1.edges.iter().zip(m2.edges.iter()) {
            assert_eq!(a.nodes, b.nodes);
        }
    }
}
