use glam::Vec2;
use rand::Rng as RngCore;
use tracing::{debug, info};

use crate::collision::CollisionIndex;
use crate::error::Result;
use crate::host::{AssetResolver, MeshHandle, ObjectHandle};
use crate::placement::events::{LayoutEvent, LayoutEventKind};
use crate::placement::placer::Placer;
use crate::placement::request::PlacementRequest;
use crate::placement::scatter::{scatter, ScatterOutcome, ScatterSpec};
use crate::placement::segments::{SegmentOutcome, SegmentPlan, SegmentRouter};
use crate::town::catalog::{AssetCache, NatureGroup, Placeable};
use crate::town::{LayoutSpec, TownConfig, TownReport, Zone, ZoneReport};

/// State shared by all zones of one town run.
pub(crate) struct Composer<'a> {
    pub(super) spec: LayoutSpec,
    pub(super) config: &'a TownConfig,
    pub(super) assets: AssetCache<'a>,
    pub(super) placer: Placer<'a>,
    pub(super) index: CollisionIndex,
    pub(super) rng: &'a mut dyn RngCore,
    zones: Vec<ZoneReport>,
}

impl<'a> Composer<'a> {
    pub(crate) fn new(
        spec: LayoutSpec,
        config: &'a TownConfig,
        assets: &'a dyn AssetResolver,
        placer: Placer<'a>,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            spec,
            config,
            assets: AssetCache::new(assets),
            placer,
            index: CollisionIndex::with_capacity(1024),
            rng,
            zones: Vec::with_capacity(Zone::ORDER.len()),
        }
    }

    pub(crate) fn run_zone(&mut self, zone: Zone) -> Result<()> {
        let placed_before = self.placer.placed();
        let drops_before = self.placer.drops();

        info!("Zone '{}' started.", zone);
        self.placer.set_zone(Some(zone));
        self.placer
            .emit(LayoutEventKind::ZoneStarted, || LayoutEvent::ZoneStarted { zone });

        match zone {
            Zone::Buildings => self.buildings()?,
            Zone::Nature => self.nature()?,
            Zone::Fences => self.fences()?,
            Zone::Walls => self.walls()?,
            Zone::Props => self.props()?,
            Zone::Paths => self.paths()?,
        }

        let placed = self.placer.placed() - placed_before;
        let drops = self.placer.drops().since(&drops_before);
        info!(
            "Zone '{}' finished: {} placed, {} dropped.",
            zone,
            placed,
            drops.total()
        );
        self.placer
            .emit(LayoutEventKind::ZoneFinished, || LayoutEvent::ZoneFinished {
                zone,
                placed,
                drops,
            });
        self.placer.set_zone(None);
        self.zones.push(ZoneReport {
            zone,
            placed,
            drops,
        });
        Ok(())
    }

    pub(crate) fn finish(mut self) -> TownReport {
        let placed = self.placer.placed();
        let drops = self.placer.drops();
        self.placer
            .emit(LayoutEventKind::RunFinished, || LayoutEvent::RunFinished {
                placed,
                drops,
            });
        TownReport {
            spec: self.spec,
            placed,
            drops,
            zones: self.zones,
            records: self.index.into_records(),
        }
    }

    /// World position of a town-relative offset.
    pub(super) fn at(&self, offset: Vec2) -> Vec2 {
        self.spec.center + offset * self.config.scale_factor
    }

    pub(super) fn scaled(&self, value: f32) -> f32 {
        value * self.config.scale_factor
    }

    /// Count-type density after scaling, rounded down.
    pub(super) fn count(&self, base: usize) -> usize {
        (base as f32 * self.config.scale_factor).floor() as usize
    }

    /// Resolve `placeable`, counting an unresolved drop for `label` on failure.
    pub(super) fn mesh(&mut self, placeable: Placeable, label: &str) -> Option<MeshHandle> {
        let mesh = self.assets.get(placeable);
        if mesh.is_none() {
            self.placer.record_unresolved(label, placeable.asset_name());
        }
        mesh
    }

    /// Resolved meshes of `group`, or `None` after counting `count` unresolved
    /// drops labelled `{label_prefix}_{i}` when no member resolves.
    pub(super) fn group(
        &mut self,
        group: NatureGroup,
        label_prefix: &str,
        count: usize,
    ) -> Option<Vec<MeshHandle>> {
        let meshes = self.assets.group(group);
        if meshes.is_empty() {
            self.placer
                .record_unresolved_batch(label_prefix, &format!("{group:?}"), count);
            return None;
        }
        Some(meshes)
    }

    /// Place a catalog entry with identity scale.
    pub(super) fn place(
        &mut self,
        placeable: Placeable,
        position: Vec2,
        yaw_degrees: f32,
        label: &str,
    ) -> Result<Option<ObjectHandle>> {
        let Some(mesh) = self.mesh(placeable, label) else {
            return Ok(None);
        };
        self.place_mesh(mesh, position, placeable.z(), yaw_degrees, 1.0, label)
    }

    pub(super) fn place_mesh(
        &mut self,
        mesh: MeshHandle,
        position: Vec2,
        z: f32,
        yaw_degrees: f32,
        scale: f32,
        label: &str,
    ) -> Result<Option<ObjectHandle>> {
        let request = PlacementRequest::new(mesh, position, label)
            .with_z(z)
            .with_yaw(yaw_degrees)
            .with_uniform_scale(scale)
            .with_max_attempts(self.config.retry.max_attempts);
        self.placer.place(&request, &mut self.index, &mut *self.rng)
    }

    pub(super) fn scatter(&mut self, spec: &ScatterSpec) -> Result<ScatterOutcome> {
        let outcome = scatter(spec, &mut self.placer, &mut self.index, &mut *self.rng)?;
        debug!(
            "Scatter '{}': {} candidates, {} excluded, {} placed, {} undergrowth.",
            spec.label_prefix,
            outcome.candidates,
            outcome.excluded,
            outcome.placed.len(),
            outcome.undergrowth.len()
        );
        Ok(outcome)
    }

    pub(super) fn route(
        &mut self,
        router: &SegmentRouter,
        plan: &SegmentPlan,
        gate_mesh: Option<&MeshHandle>,
        gate_prefix: &str,
    ) -> Result<SegmentOutcome> {
        router.layout_with_gate_structures(
            plan,
            gate_mesh,
            gate_prefix,
            &mut self.placer,
            &mut self.index,
            &mut *self.rng,
        )
    }
}
