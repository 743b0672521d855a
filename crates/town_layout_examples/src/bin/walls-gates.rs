use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use town_layout::prelude::*;
use town_layout_examples::{demo_assets, init_tracing, render_records_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let assets = demo_assets();
    let wall = assets
        .resolve("Wall_1")
        .ok_or_else(|| Error::MissingAsset {
            name: "Wall_1".into(),
        })?;
    let tower = assets.resolve("Tower");

    // Neighbouring wall segments overlap by 5%; a negative tolerance lets them touch.
    let policy = RetryPolicy::default().with_tolerance(-15.0);
    let center = Vec2::ZERO;
    let half_extent = Vec2::new(3300.0, 2000.0);

    let mut world = MemoryWorld::new();
    let mut index = CollisionIndex::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut placer = Placer::new(&mut world, policy);

    for (side, (start, end)) in rectangle_sides(center, half_extent).into_iter().enumerate() {
        let router = SegmentRouter::new(wall.clone(), format!("Wall_{side}"));
        let plan = router
            .plan(start, end)
            .with_gate_policy(&GatePolicy::Tiered);
        let outcome = router.layout_with_gate_structures(
            &plan,
            tower.as_ref(),
            &format!("Gate_Tower_{side}"),
            &mut placer,
            &mut index,
            &mut rng,
        )?;
        println!(
            "side {side}: {} slots, gates {:?}, {} segments, {} towers",
            plan.segment_count(),
            plan.gates(),
            outcome.segments.len(),
            outcome.gate_structures.len()
        );
    }
    println!(
        "{} placed, {} dropped",
        placer.placed(),
        placer.drops().total()
    );

    let config = RenderConfig::new((1400, 900), center, half_extent * 2.2);
    render_records_to_png(index.records(), &config, "walls-gates.png")?;
    Ok(())
}
