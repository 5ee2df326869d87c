//! Example: Pick tiles with rays and spatial queries
//!
//! Shows the two ways of mapping world-space input to tiles: ray
//! intersection (cursor picking) and nearest-tile lookup.

use icosphere_tiles::*;

fn main() {
    println!("Tile Picking Example");
    println!("====================\n");

    let config = GridConfigBuilder::new()
        .seed(7)
        .resolution(GridResolution::Small)
        .unwrap()
        .build()
        .unwrap();

    let topology = Topology::generate(config).expect("Failed to generate grid");
    println!("Grid ready: {} tiles\n", topology.tile_count());

    // Cast a ray from above the north pole straight down
    let ray = Ray::new(
        Vec3::new(0.0, topology.radius() * 2.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    );

    match topology.pick_tile(&ray) {
        Some(id) => {
            let tile = topology.get_tile(id).unwrap();
            println!(
                "Ray from north pole hit tile {} at ({:.1}, {:.1}, {:.1})",
                id, tile.position.x, tile.position.y, tile.position.z
            );
            println!("  Neighbors: {:?}", topology.get_neighbors(id));

            // Everything within two hops, e.g. a movement range
            let reachable = topology.find_tiles_within_range(id, 2);
            println!("  Tiles within 2 hops: {}", reachable.len());
        }
        None => println!("Ray missed the sphere entirely"),
    }

    #[cfg(feature = "spatial-index")]
    {
        // Nearest-tile lookup for an arbitrary point on the sphere
        let point = Vec3::new(1.0, 1.0, 1.0).normalize() * topology.radius();
        let id = topology.find_tile_at(point);
        println!(
            "\nNearest tile to ({:.1}, {:.1}, {:.1}) is tile {}",
            point.x, point.y, point.z, id
        );
    }
}
