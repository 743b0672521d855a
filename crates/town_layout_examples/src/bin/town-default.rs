use rand::rngs::StdRng;
use rand::SeedableRng;
use town_layout::prelude::*;
use town_layout_examples::{demo_assets, init_tracing, render_records_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let assets = demo_assets();
    let generator = TownGenerator::try_new(TownConfig::default(), &assets)?;
    let spec = LayoutSpec::default();

    let mut world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut warnings = VecSink::new().only(&[LayoutEventKind::Warning]);
    let report = generator.generate_with_events(&spec, &mut world, &mut rng, &mut warnings)?;

    println!("{}", report.summary());
    for zone in &report.zones {
        println!(
            "  {:<10} placed {:>4}  exhausted {:>4}  spawn failed {:>3}  unresolved {:>3}",
            zone.zone.name(),
            zone.placed,
            zone.drops.exhausted,
            zone.drops.spawn_failed,
            zone.drops.unresolved
        );
    }
    println!("  {} warnings", warnings.len());

    let config = RenderConfig::new(
        (1400, 1400),
        spec.center,
        glam::Vec2::new(spec.width, spec.height) * 1.1,
    );
    render_records_to_png(&report.records, &config, "town-default.png")?;
    Ok(())
}
