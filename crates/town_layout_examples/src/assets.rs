use glam::Vec3;
use town_layout::host::StaticAssets;

/// Half-extents (x, y, z) of every mesh the demos use.
const DEMO_MESHES: &[(&str, [f32; 3])] = &[
    ("Town_Hall", [600.0, 600.0, 900.0]),
    ("Large_house", [500.0, 400.0, 600.0]),
    ("Small_house", [300.0, 300.0, 450.0]),
    ("Baker_house", [350.0, 300.0, 500.0]),
    ("Tavern", [500.0, 400.0, 600.0]),
    ("Witch_house", [400.0, 400.0, 650.0]),
    ("Tower", [150.0, 150.0, 1200.0]),
    ("Mill", [450.0, 450.0, 700.0]),
    ("Mill_wings", [450.0, 100.0, 450.0]),
    ("Woodmill", [500.0, 350.0, 500.0]),
    ("Woodmill_Saw", [300.0, 100.0, 150.0]),
    ("Forge", [400.0, 300.0, 450.0]),
    ("Mine", [500.0, 400.0, 400.0]),
    ("Tree_1", [120.0, 120.0, 600.0]),
    ("Tree_2", [110.0, 110.0, 550.0]),
    ("Tree_4", [100.0, 100.0, 500.0]),
    ("Pine_tree", [90.0, 90.0, 700.0]),
    ("Pine_tree_2", [80.0, 80.0, 650.0]),
    ("Bush_1", [40.0, 40.0, 40.0]),
    ("Bush_2", [45.0, 45.0, 45.0]),
    ("Fern", [30.0, 30.0, 25.0]),
    ("Flowers_1", [25.0, 25.0, 20.0]),
    ("Flowers_2", [25.0, 25.0, 20.0]),
    ("Plant", [25.0, 25.0, 30.0]),
    ("Rock_1", [60.0, 50.0, 40.0]),
    ("Rock_2", [50.0, 40.0, 35.0]),
    ("Rock_3", [70.0, 60.0, 50.0]),
    ("Rock_4", [40.0, 40.0, 30.0]),
    ("Mushroom_1", [15.0, 15.0, 12.0]),
    ("Mushroom_2", [15.0, 15.0, 12.0]),
    ("Fence", [10.0, 4.0, 60.0]),
    ("Fence_1", [10.0, 4.0, 60.0]),
    ("Fence_2", [12.0, 4.0, 60.0]),
    ("Stone_fence", [12.0, 6.0, 50.0]),
    ("Wall_1", [200.0, 40.0, 300.0]),
    ("Anvil", [20.0, 15.0, 20.0]),
    ("Barrel", [20.0, 20.0, 30.0]),
    ("Chest", [25.0, 15.0, 20.0]),
    ("Cauldron", [25.0, 25.0, 25.0]),
    ("Altar", [40.0, 30.0, 40.0]),
    ("Well", [80.0, 80.0, 120.0]),
    ("Trolley", [40.0, 25.0, 30.0]),
    ("Lamppost", [10.0, 10.0, 250.0]),
    ("street_light", [10.0, 10.0, 280.0]),
    ("Tile_1", [45.0, 45.0, 2.0]),
    ("Tile_2", [45.0, 45.0, 2.0]),
    ("Tile_3", [45.0, 45.0, 2.0]),
    ("Tile_4", [45.0, 45.0, 2.0]),
    ("Tile_5", [45.0, 45.0, 2.0]),
    ("Tile_6", [45.0, 45.0, 2.0]),
    ("Tile_7", [45.0, 45.0, 2.0]),
    ("Floor_400x400", [200.0, 200.0, 5.0]),
];

/// Asset table covering every name a town run resolves, plus a floor tile.
pub fn demo_assets() -> StaticAssets {
    DEMO_MESHES
        .iter()
        .fold(StaticAssets::new(), |assets, (name, extent)| {
            assets.with_mesh(name, Vec3::from_array(*extent))
        })
}
