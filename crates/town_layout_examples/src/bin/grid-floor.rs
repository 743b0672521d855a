use town_layout::prelude::*;
use town_layout_examples::{demo_assets, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut args = std::env::args().skip(1);
    let columns = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10);
    let rows = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10);

    let assets = demo_assets();
    let mut world = MemoryWorld::new();
    let report = build_grid(
        &GridSpec::new("Floor_400x400", columns, rows),
        &assets,
        &mut world,
    )?;

    println!(
        "created {} tiles of {}x{}; center tile {:?} at ({}, {}, {})",
        report.tiles_created,
        report.tile_size.x,
        report.tile_size.y,
        report.center_tile,
        report.center_location.x,
        report.center_location.y,
        report.center_location.z
    );
    Ok(())
}
