use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use town_layout::prelude::*;
use town_layout_examples::{demo_assets, init_tracing, render_records_to_png, RenderConfig};

#[derive(Debug, Deserialize)]
struct TownFile {
    #[serde(default)]
    spec: LayoutSpec,
    #[serde(default)]
    config: TownConfig,
    #[serde(default)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        format!("{}/assets/town.ron", env!("CARGO_MANIFEST_DIR"))
    });
    let text = std::fs::read_to_string(&path)?;
    let file: TownFile = ron::from_str(&text)?;
    tracing::info!("Loaded town description from {}.", path);

    let assets = demo_assets();
    let generator = TownGenerator::try_new(file.config, &assets)?;
    let mut world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(file.seed);
    let report = generator.generate(&file.spec, &mut world, &mut rng)?;
    let result = BuildResult::success(report.summary());
    println!("{}", ron::ser::to_string(&result)?);

    let config = RenderConfig::new(
        (1200, 1200),
        file.spec.center,
        glam::Vec2::new(file.spec.width, file.spec.height) * 1.1,
    );
    render_records_to_png(&report.records, &config, "town-from-ron.png")?;
    Ok(())
}
