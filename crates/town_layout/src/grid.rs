//! Flat tiling of one mesh, without collision checks.
use glam::{Vec2, Vec3};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::host::{AssetResolver, World};

/// Which mesh to tile and how many tiles per axis.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// Logical asset name of the tile mesh.
    pub asset: String,
    pub columns: usize,
    pub rows: usize,
}

impl GridSpec {
    pub fn new(asset: impl Into<String>, columns: usize, rows: usize) -> Self {
        Self {
            asset: asset.into(),
            columns,
            rows,
        }
    }

    /// Validates the grid, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.asset.is_empty() {
            return Err(Error::InvalidConfig("asset must not be empty".into()));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidConfig("columns and rows must be > 0".into()));
        }
        Ok(())
    }
}

/// Outcome of [`build_grid`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GridReport {
    /// Tiles the host actually spawned.
    pub tiles_created: usize,
    /// Tiles the host refused.
    pub tiles_refused: usize,
    /// Tile size on x and y: twice the mesh half-extent.
    pub tile_size: Vec2,
    /// Column and row of the center tile.
    pub center_tile: (usize, usize),
    /// World location of the center tile.
    pub center_location: Vec3,
}

/// Spawn `columns x rows` copies of one mesh at `(x * tile.x, y * tile.y, 0)`,
/// labelled `FloorTile_{x}_{y}`.
///
/// Tiles abut exactly, so no collision index is consulted.
pub fn build_grid(
    spec: &GridSpec,
    assets: &dyn AssetResolver,
    world: &mut dyn World,
) -> Result<GridReport> {
    spec.validate()?;
    let mesh = assets.resolve(&spec.asset).ok_or_else(|| Error::MissingAsset {
        name: spec.asset.clone(),
    })?;
    let tile_size = mesh.box_extent.truncate() * 2.0;

    let mut tiles_created = 0;
    let mut tiles_refused = 0;
    for x in 0..spec.columns {
        for y in 0..spec.rows {
            let location = Vec3::new(x as f32 * tile_size.x, y as f32 * tile_size.y, 0.0);
            match world.spawn(&mesh, location, 0.0)? {
                Some(handle) => {
                    world.set_label(handle, &format!("FloorTile_{x}_{y}"))?;
                    tiles_created += 1;
                }
                None => tiles_refused += 1,
            }
        }
    }
    if tiles_refused > 0 {
        warn!(
            "Host refused {} of {} floor tiles.",
            tiles_refused,
            spec.columns * spec.rows
        );
    }

    let center_tile = (spec.columns / 2, spec.rows / 2);
    let center_location = Vec3::new(
        center_tile.0 as f32 * tile_size.x,
        center_tile.1 as f32 * tile_size.y,
        0.0,
    );
    info!(
        "Created {} floor tiles of '{}'; center tile at {:?}.",
        tiles_created, spec.asset, center_location
    );

    Ok(GridReport {
        tiles_created,
        tiles_refused,
        tile_size,
        center_tile,
        center_location,
    })
}
