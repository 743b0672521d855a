use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;
use town_layout::host::StaticAssets;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Every asset a town run asks for, with half-extents in world units.
#[allow(dead_code)]
pub fn town_assets() -> StaticAssets {
    const MESHES: &[(&str, f32, f32)] = &[
        ("Town_Hall", 600.0, 600.0),
        ("Large_house", 500.0, 400.0),
        ("Small_house", 300.0, 300.0),
        ("Baker_house", 350.0, 300.0),
        ("Tavern", 500.0, 400.0),
        ("Witch_house", 400.0, 400.0),
        ("Tower", 250.0, 250.0),
        ("Mill", 450.0, 450.0),
        ("Mill_wings", 450.0, 100.0),
        ("Woodmill", 500.0, 350.0),
        ("Woodmill_Saw", 300.0, 100.0),
        ("Forge", 400.0, 300.0),
        ("Mine", 500.0, 400.0),
        ("Tree_1", 120.0, 120.0),
        ("Tree_2", 110.0, 110.0),
        ("Tree_4", 100.0, 100.0),
        ("Pine_tree", 90.0, 90.0),
        ("Pine_tree_2", 80.0, 80.0),
        ("Bush_1", 40.0, 40.0),
        ("Bush_2", 45.0, 45.0),
        ("Fern", 30.0, 30.0),
        ("Flowers_1", 25.0, 25.0),
        ("Flowers_2", 25.0, 25.0),
        ("Plant", 25.0, 25.0),
        ("Rock_1", 60.0, 50.0),
        ("Rock_2", 50.0, 40.0),
        ("Rock_3", 70.0, 60.0),
        ("Rock_4", 40.0, 40.0),
        ("Mushroom_1", 15.0, 15.0),
        ("Mushroom_2", 15.0, 15.0),
        ("Fence", 10.0, 4.0),
        ("Fence_1", 10.0, 4.0),
        ("Fence_2", 12.0, 4.0),
        ("Stone_fence", 12.0, 6.0),
        ("Wall_1", 200.0, 40.0),
        ("Anvil", 20.0, 15.0),
        ("Barrel", 20.0, 20.0),
        ("Chest", 25.0, 15.0),
        ("Cauldron", 25.0, 25.0),
        ("Altar", 40.0, 30.0),
        ("Well", 80.0, 80.0),
        ("Trolley", 40.0, 25.0),
        ("Lamppost", 10.0, 10.0),
        ("street_light", 10.0, 10.0),
        ("Tile_1", 45.0, 45.0),
        ("Tile_2", 45.0, 45.0),
        ("Tile_3", 45.0, 45.0),
        ("Tile_4", 45.0, 45.0),
        ("Tile_5", 45.0, 45.0),
        ("Tile_6", 45.0, 45.0),
        ("Tile_7", 45.0, 45.0),
    ];
    MESHES
        .iter()
        .fold(StaticAssets::new(), |assets, &(name, x, y)| {
            assets.with_mesh(name, Vec3::new(x, y, 100.0))
        })
}
