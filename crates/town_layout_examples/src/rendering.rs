use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use town_layout::collision::PlacedRecord;
use town_layout::geometry::Footprint;
use town_layout::town::Zone;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Fill and outline colors of one zone's footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneStyle {
    pub fill: [u8; 3],
    pub outline: Option<[u8; 3]>,
}

impl ZoneStyle {
    pub const fn filled(fill: [u8; 3]) -> Self {
        Self {
            fill,
            outline: None,
        }
    }

    pub const fn outlined(fill: [u8; 3], outline: [u8; 3]) -> Self {
        Self {
            fill,
            outline: Some(outline),
        }
    }
}

/// Maps a world-space window onto an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_center: Vec2,
    pub domain_extent: Vec2,
    pub background: [u8; 3],
    styles: Vec<(Option<Zone>, ZoneStyle)>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_center: Vec2, domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_center,
            domain_extent,
            background: [236, 226, 198],
            styles: vec![
                (
                    Some(Zone::Buildings),
                    ZoneStyle::outlined([178, 92, 60], [60, 30, 20]),
                ),
                (Some(Zone::Nature), ZoneStyle::filled([58, 128, 64])),
                (Some(Zone::Fences), ZoneStyle::filled([120, 84, 48])),
                (
                    Some(Zone::Walls),
                    ZoneStyle::outlined([130, 130, 130], [70, 70, 70]),
                ),
                (Some(Zone::Props), ZoneStyle::filled([210, 170, 40])),
                (Some(Zone::Paths), ZoneStyle::filled([190, 180, 160])),
                (None, ZoneStyle::filled([90, 90, 160])),
            ],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Overrides the style of `zone`; `None` styles records placed outside any zone.
    pub fn set_zone_style(&mut self, zone: Option<Zone>, style: ZoneStyle) -> &mut Self {
        match self.styles.iter_mut().find(|(z, _)| *z == zone) {
            Some(entry) => entry.1 = style,
            None => self.styles.push((zone, style)),
        }
        self
    }

    fn style(&self, zone: Option<Zone>) -> ZoneStyle {
        self.styles
            .iter()
            .find(|(z, _)| *z == zone)
            .map(|(_, s)| *s)
            .unwrap_or(ZoneStyle::filled([0, 0, 0]))
    }

    fn to_pixel(&self, p: Vec2) -> Vec2 {
        let min = self.domain_center - self.domain_extent * 0.5;
        let size = Vec2::new(self.image_size.0 as f32, self.image_size.1 as f32);
        (p - min) / self.domain_extent * size
    }
}

/// Draws every record's footprint into a PNG, in placement order.
pub fn render_records_to_png(
    records: &[PlacedRecord],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    for record in records {
        let style = config.style(record.zone);
        draw_footprint(&mut img, config, &record.footprint, style);
    }

    img.save(path.as_ref())?;
    tracing::info!(
        "Wrote {} footprints to {}.",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn draw_footprint(img: &mut RgbImage, config: &RenderConfig, fp: &Footprint, style: ZoneStyle) {
    let a = config.to_pixel(fp.min);
    let b = config.to_pixel(fp.max);
    let (w, h) = (img.width() as i64, img.height() as i64);

    // Keep sub-pixel footprints visible.
    let x0 = (a.x.floor() as i64).clamp(0, w);
    let y0 = (a.y.floor() as i64).clamp(0, h);
    let x1 = (b.x.ceil() as i64).max(a.x.floor() as i64 + 1).clamp(0, w);
    let y1 = (b.y.ceil() as i64).max(a.y.floor() as i64 + 1).clamp(0, h);

    for y in y0..y1 {
        for x in x0..x1 {
            let edge = x == x0 || x == x1 - 1 || y == y0 || y == y1 - 1;
            let color = match (edge, style.outline) {
                (true, Some(outline)) => outline,
                _ => style.fill,
            };
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
}
