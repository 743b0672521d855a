//! Zone-by-zone composition of a complete town.
//!
//! A [`TownGenerator`] walks the zones in [`Zone::ORDER`] over one shared
//! [`CollisionIndex`](crate::collision::CollisionIndex): buildings first, so
//! everything that follows flows around them, then nature, fences, walls, props and
//! finally path tiles. Every coordinate is an offset from [`LayoutSpec::center`]
//! multiplied by [`TownConfig::scale_factor`].
use std::fmt;

use glam::Vec2;
use rand::Rng as RngCore;
use tracing::{info, warn};

use crate::collision::PlacedRecord;
use crate::error::{Error, Result};
use crate::host::{AssetResolver, World};
use crate::placement::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::placement::placer::{DropStats, Placer};
use crate::placement::request::RetryPolicy;

mod buildings;
pub mod catalog;
mod composer;
mod fences;
mod nature;
mod paths;
mod props;
mod walls;

use composer::Composer;

/// One composer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    Buildings,
    Nature,
    Fences,
    Walls,
    Props,
    Paths,
}

impl Zone {
    /// Order in which a town run visits the zones.
    pub const ORDER: [Zone; 6] = [
        Zone::Buildings,
        Zone::Nature,
        Zone::Fences,
        Zone::Walls,
        Zone::Props,
        Zone::Paths,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Buildings => "buildings",
            Zone::Nature => "nature",
            Zone::Fences => "fences",
            Zone::Walls => "walls",
            Zone::Props => "props",
            Zone::Paths => "paths",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the town goes and how large it is.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutSpec {
    /// World-space town center.
    pub center: Vec2,
    /// Total width of the walled area.
    pub width: f32,
    /// Total height of the walled area.
    pub height: f32,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            center: Vec2::new(1250.0, 1250.0),
            width: 7000.0,
            height: 7000.0,
        }
    }
}

impl LayoutSpec {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Validates the layout, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::InvalidConfig("center must be finite".into()));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidConfig("width must be > 0".into()));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidConfig("height must be > 0".into()));
        }
        Ok(())
    }
}

/// Densities, radii and retry settings of a town run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TownConfig {
    /// Multiplier applied to every offset, radius and count.
    pub scale_factor: f32,
    /// Trees in the forest disk before scaling.
    pub forest_tree_count: usize,
    /// Forest disk radius before scaling.
    pub forest_radius: f32,
    /// Chance that a forest tree receives undergrowth.
    pub undergrowth_probability: f32,
    /// Half-width of the undergrowth offset window.
    pub undergrowth_window: f32,
    /// Trees on the ring around town before scaling.
    pub town_tree_count: usize,
    /// Ring radius shared by town trees and rocks, before scaling.
    pub town_tree_radius: f32,
    /// Rocks on the ring before scaling.
    pub rock_count: usize,
    /// Plants per garden before scaling.
    pub plants_per_garden: usize,
    /// Distance between path tiles before scaling.
    pub tile_spacing: f32,
    /// Half-width of the path tile jitter window before scaling.
    pub path_jitter: f32,
    /// Collision tolerance and retry settings.
    pub retry: RetryPolicy,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            forest_tree_count: 500,
            forest_radius: 1500.0,
            undergrowth_probability: 0.6,
            undergrowth_window: 100.0,
            town_tree_count: 100,
            town_tree_radius: 3000.0,
            rock_count: 15,
            plants_per_garden: 5,
            tile_spacing: 100.0,
            path_jitter: 20.0,
            retry: RetryPolicy::default(),
        }
    }
}

impl TownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_forest(mut self, tree_count: usize, radius: f32) -> Self {
        self.forest_tree_count = tree_count;
        self.forest_radius = radius;
        self
    }

    pub fn with_undergrowth(mut self, probability: f32, window: f32) -> Self {
        self.undergrowth_probability = probability;
        self.undergrowth_window = window;
        self
    }

    pub fn with_town_trees(mut self, count: usize, radius: f32) -> Self {
        self.town_tree_count = count;
        self.town_tree_radius = radius;
        self
    }

    pub fn with_rock_count(mut self, rock_count: usize) -> Self {
        self.rock_count = rock_count;
        self
    }

    pub fn with_plants_per_garden(mut self, plants: usize) -> Self {
        self.plants_per_garden = plants;
        self
    }

    pub fn with_paths(mut self, tile_spacing: f32, jitter: f32) -> Self {
        self.tile_spacing = tile_spacing;
        self.path_jitter = jitter;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(Error::InvalidConfig("scale_factor must be > 0".into()));
        }
        if !(self.forest_radius.is_finite() && self.forest_radius >= 0.0) {
            return Err(Error::InvalidConfig("forest_radius must be >= 0".into()));
        }
        if !(self.town_tree_radius.is_finite() && self.town_tree_radius >= 0.0) {
            return Err(Error::InvalidConfig("town_tree_radius must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.undergrowth_probability) {
            return Err(Error::InvalidConfig(
                "undergrowth_probability must be in [0, 1]".into(),
            ));
        }
        if !(self.undergrowth_window.is_finite() && self.undergrowth_window >= 0.0) {
            return Err(Error::InvalidConfig("undergrowth_window must be >= 0".into()));
        }
        if !(self.tile_spacing.is_finite() && self.tile_spacing > 0.0) {
            return Err(Error::InvalidConfig("tile_spacing must be > 0".into()));
        }
        if !(self.path_jitter.is_finite() && self.path_jitter >= 0.0) {
            return Err(Error::InvalidConfig("path_jitter must be >= 0".into()));
        }
        self.retry.validate()
    }
}

/// Outcome of one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneReport {
    pub zone: Zone,
    pub placed: usize,
    pub drops: DropStats,
}

/// Outcome of a town run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct TownReport {
    pub spec: LayoutSpec,
    /// Objects spawned, attachments included.
    pub placed: usize,
    pub drops: DropStats,
    /// Per-zone breakdown in [`Zone::ORDER`].
    pub zones: Vec<ZoneReport>,
    /// Committed footprints in placement order.
    pub records: Vec<PlacedRecord>,
}

impl TownReport {
    pub fn dropped(&self) -> usize {
        self.drops.total()
    }

    pub fn zone(&self, zone: Zone) -> Option<&ZoneReport> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    /// Human-readable summary used as the success message.
    pub fn summary(&self) -> String {
        format!(
            "Successfully created town at ({}, {}) with size {}x{}: {} placed, {} dropped.",
            self.spec.center.x,
            self.spec.center.y,
            self.spec.width,
            self.spec.height,
            self.placed,
            self.dropped()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BuildStatus {
    Success,
    Error,
}

/// Status and message returned by [`build_town`] and [`TownGenerator::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildResult {
    pub status: BuildStatus,
    pub message: String,
}

impl BuildResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: BuildStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: BuildStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BuildStatus::Success
    }
}

/// Builds towns from a validated [`TownConfig`] and an asset resolver.
pub struct TownGenerator<'a> {
    config: TownConfig,
    assets: &'a dyn AssetResolver,
}

impl<'a> TownGenerator<'a> {
    pub fn try_new(config: TownConfig, assets: &'a dyn AssetResolver) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, assets })
    }

    pub fn config(&self) -> &TownConfig {
        &self.config
    }

    /// Runs every zone against `world`.
    ///
    /// Returns an error for an invalid `spec` or a host fault; objects spawned
    /// before a fault stay in the world.
    pub fn generate(
        &self,
        spec: &LayoutSpec,
        world: &mut dyn World,
        rng: &mut dyn RngCore,
    ) -> Result<TownReport> {
        self.generate_internal(spec, world, rng, None)
    }

    pub fn generate_with_events(
        &self,
        spec: &LayoutSpec,
        world: &mut dyn World,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<TownReport> {
        self.generate_internal(spec, world, rng, Some(sink))
    }

    /// Like [`TownGenerator::generate`], folded into a [`BuildResult`].
    pub fn build(
        &self,
        spec: &LayoutSpec,
        world: &mut dyn World,
        rng: &mut dyn RngCore,
    ) -> BuildResult {
        match self.generate(spec, world, rng) {
            Ok(report) => BuildResult::success(report.summary()),
            Err(e) => {
                warn!("Town generation failed: {}.", e);
                BuildResult::error(format!("Error building town: {e}"))
            }
        }
    }

    fn generate_internal(
        &self,
        spec: &LayoutSpec,
        world: &mut dyn World,
        rng: &mut dyn RngCore,
        sink: Option<&mut dyn EventSink>,
    ) -> Result<TownReport> {
        spec.validate()?;
        info!(
            "Building town at ({}, {}) with size {}x{}.",
            spec.center.x, spec.center.y, spec.width, spec.height
        );

        let mut placer = match sink {
            Some(sink) => Placer::with_sink(world, self.config.retry, sink),
            None => Placer::new(world, self.config.retry),
        };
        let spec = *spec;
        placer.emit(LayoutEventKind::RunStarted, || LayoutEvent::RunStarted { spec });

        let mut composer = Composer::new(spec, &self.config, self.assets, placer, rng);
        for zone in Zone::ORDER {
            composer.run_zone(zone)?;
        }
        let report = composer.finish();
        info!(
            "Town finished: {} placed, {} dropped.",
            report.placed,
            report.dropped()
        );
        Ok(report)
    }
}

/// Build a town with the default [`TownConfig`].
pub fn build_town(
    center: Vec2,
    width: f32,
    height: f32,
    assets: &dyn AssetResolver,
    world: &mut dyn World,
    rng: &mut dyn RngCore,
) -> BuildResult {
    match TownGenerator::try_new(TownConfig::default(), assets) {
        Ok(generator) => generator.build(&LayoutSpec::new(center, width, height), world, rng),
        Err(e) => BuildResult::error(format!("Error building town: {e}")),
    }
}
