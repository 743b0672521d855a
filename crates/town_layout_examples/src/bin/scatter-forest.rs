use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use town_layout::prelude::*;
use town_layout_examples::{
    demo_assets, init_tracing, render_records_to_png, RenderConfig, ZoneStyle,
};

fn resolve_all(assets: &StaticAssets, names: &[&str]) -> Vec<MeshHandle> {
    names.iter().filter_map(|n| assets.resolve(n)).collect()
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let assets = demo_assets();
    let trees = resolve_all(&assets, &["Tree_1", "Tree_2", "Tree_4", "Pine_tree", "Pine_tree_2"]);
    let undergrowth = resolve_all(&assets, &["Bush_1", "Bush_2", "Fern", "Mushroom_1"]);
    let rocks = resolve_all(&assets, &["Rock_1", "Rock_2", "Rock_3", "Rock_4"]);

    let forest_center = Vec2::new(900.0, 600.0);
    let forest_radius = 1200.0;

    let mut world = MemoryWorld::new();
    let mut index = CollisionIndex::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut placer = Placer::new(&mut world, RetryPolicy::default());

    let forest = ScatterSpec::new(
        AnnulusSampling::disk(forest_center, forest_radius, 400),
        trees,
        "Forest_Tree",
    )
    .with_scale_range(0.8, 1.2)
    .with_undergrowth(Undergrowth::new(undergrowth, 0.6, "Forest_Undergrowth"));
    let forest_outcome = scatter(&forest, &mut placer, &mut index, &mut rng)?;

    // Clearing in the middle of the ring: nothing grows inside the forest disk.
    placer.set_zone(Some(Zone::Nature));
    let ring = ScatterSpec::new(
        AnnulusSampling::new(Vec2::ZERO, 2200.0, 2600.0, 200),
        rocks,
        "Ring_Rock",
    )
    .with_scale_range(0.8, 1.5)
    .with_exclusion(Exclusion::Disk {
        center: forest_center,
        radius: forest_radius,
    });
    let ring_outcome = scatter(&ring, &mut placer, &mut index, &mut rng)?;

    println!(
        "forest: {} candidates, {} trees, {} undergrowth",
        forest_outcome.candidates,
        forest_outcome.placed.len(),
        forest_outcome.undergrowth.len()
    );
    println!(
        "ring: {} candidates, {} excluded, {} rocks",
        ring_outcome.candidates,
        ring_outcome.excluded,
        ring_outcome.placed.len()
    );
    println!("drops: {} exhausted", placer.drops().exhausted);

    let mut config = RenderConfig::new((1200, 1200), Vec2::ZERO, Vec2::splat(5600.0));
    config
        .set_zone_style(None, ZoneStyle::filled([46, 110, 52]))
        .set_zone_style(Some(Zone::Nature), ZoneStyle::filled([120, 120, 120]));
    render_records_to_png(index.records(), &config, "scatter-forest.png")?;
    Ok(())
}
