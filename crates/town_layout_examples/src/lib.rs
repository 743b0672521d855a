#![forbid(unsafe_code)]

mod assets;
mod rendering;

pub use assets::demo_assets;
pub use rendering::{init_tracing, render_records_to_png, RenderConfig, ZoneStyle};
