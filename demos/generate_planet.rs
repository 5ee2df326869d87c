//! Example: Generate a spherical tile grid
//!
//! Demonstrates the basic usage of the generation pipeline.

use icosphere_tiles::*;

fn main() {
    println!("Icosphere Tile Grid Example");
    println!("===========================\n");

    // Small grid for a quick run
    let config = GridConfigBuilder::new()
        .seed(42)
        .resolution(GridResolution::Tiny)
        .unwrap()
        .distortion_rate(1.0)
        .unwrap()
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Resolution: {}", config.resolution.name());
    println!("  Tile Count: {}", config.tile_count());
    println!("  Sphere Radius: {}", config.radius);
    println!("  Distortion Rate: {}", config.distortion_rate);
    println!();

    println!("Generating grid...");
    let topology = Topology::generate(config).expect("Failed to generate grid");
    println!(
        "Generated {} tiles, {} corners, {} borders\n",
        topology.tile_count(),
        topology.corner_count(),
        topology.border_count()
    );

    // Count pentagons vs hexagons and measure area spread
    let pentagons = topology
        .tiles()
        .iter()
        .filter(|t| t.neighbor_count() == 5)
        .count();
    let areas: Vec<f32> = topology.tiles().iter().map(|t| t.area).collect();
    let min_area = areas.iter().cloned().fold(f32::INFINITY, f32::min);
    let max_area = areas.iter().cloned().fold(0.0_f32, f32::max);
    let avg_area = areas.iter().sum::<f32>() / areas.len() as f32;

    println!("Statistics:");
    println!("  Pentagons: {} (always 12)", pentagons);
    println!("  Hexagons: {}", topology.tile_count() - pentagons);
    println!(
        "  Tile area min/avg/max: {:.1} / {:.1} / {:.1}",
        min_area, avg_area, max_area
    );
    println!();

    // Show details for first few tiles
    println!("Sample tiles:");
    for tile in topology.tiles().iter().take(5) {
        println!(
            "  Tile {}: position=({:.2}, {:.2}, {:.2}), neighbors={}, corners={}",
            tile.id,
            tile.position.x,
            tile.position.y,
            tile.position.z,
            tile.neighbor_count(),
            tile.corners.len()
        );
    }

    println!("\nGeneration complete!");
}
