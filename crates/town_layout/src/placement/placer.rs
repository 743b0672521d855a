//! Collision-aware object placement with widening jitter retries.
use rand::Rng as RngCore;
use tracing::{debug, warn};

use crate::collision::{CollisionIndex, PlacedRecord};
use crate::error::Result;
use crate::geometry::Footprint;
use crate::host::{ObjectHandle, World};
use crate::placement::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::placement::request::{PlacementRequest, RetryPolicy};
use crate::town::Zone;

/// Why a placement request produced no object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The asset name did not resolve to a mesh.
    Unresolved,
    /// Every attempt collided with a committed footprint.
    Exhausted,
    /// At least one attempt was collision-free but the host refused to spawn.
    SpawnFailed,
}

/// Per-reason drop counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropStats {
    /// Requests skipped for a missing asset. A scattered object, a gate tower or a
    /// path tile counts once each. A fence perimeter or the town wall counts once as
    /// a whole; its segment count depends on the missing mesh.
    pub unresolved: usize,
    pub exhausted: usize,
    pub spawn_failed: usize,
}

impl DropStats {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::Unresolved => self.unresolved += 1,
            DropReason::Exhausted => self.exhausted += 1,
            DropReason::SpawnFailed => self.spawn_failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.unresolved + self.exhausted + self.spawn_failed
    }

    /// Counters accumulated since `earlier` was taken.
    pub fn since(&self, earlier: &DropStats) -> DropStats {
        DropStats {
            unresolved: self.unresolved.saturating_sub(earlier.unresolved),
            exhausted: self.exhausted.saturating_sub(earlier.exhausted),
            spawn_failed: self.spawn_failed.saturating_sub(earlier.spawn_failed),
        }
    }
}

/// Commits objects into a [`World`] while keeping a [`CollisionIndex`] consistent.
///
/// The placer owns no collision state itself; the index is passed to every call so
/// one index can be shared by segment routing, scatter and direct placements within
/// a run.
pub struct Placer<'a> {
    world: &'a mut dyn World,
    sink: Option<&'a mut dyn EventSink>,
    policy: RetryPolicy,
    zone: Option<Zone>,
    placed: usize,
    drops: DropStats,
}

impl<'a> Placer<'a> {
    pub fn new(world: &'a mut dyn World, policy: RetryPolicy) -> Self {
        Self {
            world,
            sink: None,
            policy,
            zone: None,
            placed: 0,
            drops: DropStats::default(),
        }
    }

    pub fn with_sink(
        world: &'a mut dyn World,
        policy: RetryPolicy,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new(world, policy)
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Zone attached to subsequent records and events.
    pub fn set_zone(&mut self, zone: Option<Zone>) {
        self.zone = zone;
    }

    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    /// Objects committed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Drops recorded so far.
    pub fn drops(&self) -> DropStats {
        self.drops
    }

    /// Place `request`, returning the spawned handle or `None` if it was dropped.
    ///
    /// Attempt `k` offsets the requested position by a uniform draw from
    /// `[-jitter_step * k, jitter_step * k]` on both axes. A candidate is committed
    /// only if it clears every footprint in `index` and the host spawns it; nothing
    /// is recorded for failed attempts.
    pub fn place(
        &mut self,
        request: &PlacementRequest,
        index: &mut CollisionIndex,
        rng: &mut dyn RngCore,
    ) -> Result<Option<ObjectHandle>> {
        let size = request.footprint_size();
        let mut spawn_refused = false;

        for attempt in 0..request.max_attempts {
            let position = request.position.truncate() + self.policy.jitter_offset(attempt, rng);
            let footprint = Footprint::rotated(position, size, request.yaw_degrees);

            if index.test(&footprint, self.policy.tolerance) {
                continue;
            }

            let spawned = self.world.spawn(
                &request.mesh,
                position.extend(request.position.z),
                request.yaw_degrees,
            )?;
            let Some(handle) = spawned else {
                spawn_refused = true;
                continue;
            };

            if request.scale != glam::Vec3::ONE {
                self.world.set_scale(handle, request.scale)?;
            }
            self.world.set_label(handle, &request.label)?;

            index.insert(PlacedRecord {
                footprint,
                handle,
                label: request.label.clone(),
                zone: self.zone,
            });
            self.placed += 1;

            if attempt > 0 {
                debug!(
                    "Placed '{}' at alternate position after {} attempts.",
                    request.label,
                    attempt + 1
                );
            }
            let zone = self.zone;
            self.emit(LayoutEventKind::PlacementMade, || LayoutEvent::PlacementMade {
                zone,
                label: request.label.clone(),
                handle,
                footprint,
                attempt: attempt + 1,
            });
            return Ok(Some(handle));
        }

        let reason = if spawn_refused {
            DropReason::SpawnFailed
        } else {
            DropReason::Exhausted
        };
        debug!(
            "Dropped '{}' after {} attempts ({:?}).",
            request.label, request.max_attempts, reason
        );
        self.record_drop(&request.label, reason);
        Ok(None)
    }

    /// Spawn an object that shares the footprint of an already committed one.
    ///
    /// Attachments are spawned exactly at `request.position` in a single attempt
    /// and are not added to the collision index.
    pub fn attach(&mut self, request: &PlacementRequest) -> Result<Option<ObjectHandle>> {
        let spawned = self
            .world
            .spawn(&request.mesh, request.position, request.yaw_degrees)?;
        let Some(handle) = spawned else {
            self.record_drop(&request.label, DropReason::SpawnFailed);
            return Ok(None);
        };
        if request.scale != glam::Vec3::ONE {
            self.world.set_scale(handle, request.scale)?;
        }
        self.world.set_label(handle, &request.label)?;
        self.placed += 1;
        Ok(Some(handle))
    }

    /// Count a request whose asset could not be resolved.
    pub fn record_unresolved(&mut self, label: &str, asset: &str) {
        warn!("Asset '{}' is unresolved; skipping '{}'.", asset, label);
        self.warn(
            format!("asset:{asset}"),
            format!("Unresolved asset; skipping '{label}'"),
        );
        self.record_drop(label, DropReason::Unresolved);
    }

    /// Count `count` requests labelled `{label_prefix}_{i}` whose only asset choices
    /// were all unresolved. Logs once instead of once per request.
    pub fn record_unresolved_batch(&mut self, label_prefix: &str, asset: &str, count: usize) {
        if count == 0 {
            return;
        }
        warn!(
            "No asset in '{}' is resolved; skipping {} '{}' placements.",
            asset, count, label_prefix
        );
        self.warn(
            format!("asset:{asset}"),
            format!("Unresolved assets; skipping {count} '{label_prefix}' placements"),
        );
        for i in 0..count {
            self.record_drop(&format!("{label_prefix}_{i}"), DropReason::Unresolved);
        }
    }

    /// Emit a warning event.
    pub fn warn(&mut self, context: impl Into<String>, message: impl Into<String>) {
        if let Some(sink) = self.sink.as_deref_mut() {
            if sink.wants(LayoutEventKind::Warning) {
                sink.send(LayoutEvent::Warning {
                    context: context.into(),
                    message: message.into(),
                });
            }
        }
    }

    /// Emit an event built lazily by `make` if the sink wants `kind`.
    pub fn emit(&mut self, kind: LayoutEventKind, make: impl FnOnce() -> LayoutEvent) {
        if let Some(sink) = self.sink.as_deref_mut() {
            if sink.wants(kind) {
                sink.send(make());
            }
        }
    }

    fn record_drop(&mut self, label: &str, reason: DropReason) {
        self.drops.record(reason);
        let zone = self.zone;
        self.emit(LayoutEventKind::PlacementDropped, || {
            LayoutEvent::PlacementDropped {
                zone,
                label: label.to_owned(),
                reason,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::Error;
    use crate::host::{MemoryWorld, MeshHandle};
    use crate::placement::events::VecSink;
    use crate::sampling::test_rng::FixedRng;

    fn crate_mesh() -> MeshHandle {
        MeshHandle::centered("Chest", Vec3::new(20.0, 20.0, 20.0))
    }

    #[test]
    fn first_attempt_uses_exact_position() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());

        let req = PlacementRequest::new(crate_mesh(), Vec2::new(100.0, -50.0), "Chest")
            .with_z(2.0)
            .with_yaw(45.0);
        let handle = placer
            .place(&req, &mut index, &mut rng)
            .unwrap()
            .expect("placed");
        assert_eq!(placer.placed(), 1);

        let obj = world.object(handle).expect("spawned");
        assert_eq!(obj.position, Vec3::new(100.0, -50.0, 2.0));
        assert_eq!(obj.yaw_degrees, 45.0);
        assert_eq!(obj.label.as_deref(), Some("Chest"));
        assert_eq!(obj.scale, Vec3::ONE);
        assert_eq!(index.len(), 1);
        assert_eq!(index.records()[0].footprint.center, Vec2::new(100.0, -50.0));
    }

    #[test]
    fn non_identity_scale_is_applied() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());

        let req =
            PlacementRequest::new(crate_mesh(), Vec2::ZERO, "Big_Chest").with_uniform_scale(1.5);
        let handle = placer.place(&req, &mut index, &mut rng).unwrap().unwrap();
        assert_eq!(world.object(handle).unwrap().scale, Vec3::splat(1.5));
        assert_eq!(index.records()[0].footprint.width(), 30.0);
    }

    #[test]
    fn blocked_request_is_dropped_without_records() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut sink = VecSink::new();
        let mut placer = Placer::with_sink(&mut world, RetryPolicy::default(), &mut sink);

        let first = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "A");
        assert!(placer.place(&first, &mut index, &mut rng).unwrap().is_some());

        let second = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "B").with_max_attempts(1);
        assert!(placer.place(&second, &mut index, &mut rng).unwrap().is_none());
        assert_eq!(placer.drops().exhausted, 1);
        assert_eq!(placer.placed(), 1);
        assert_eq!(index.len(), 1);
        assert_eq!(world.len(), 1);

        let dropped: Vec<_> = sink
            .into_inner()
            .into_iter()
            .filter_map(|e| match e {
                LayoutEvent::PlacementDropped { label, reason, .. } => Some((label, reason)),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, vec![("B".to_string(), DropReason::Exhausted)]);
    }

    #[test]
    fn retry_jitter_escapes_collision() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut placer = Placer::new(&mut world, RetryPolicy::default());
        // rand01 == 0 pushes every retry to the negative corner of its window.
        let mut rng = FixedRng { value: 0 };

        let small = MeshHandle::centered("Barrel", Vec3::new(10.0, 10.0, 10.0));
        let a = PlacementRequest::new(small.clone(), Vec2::ZERO, "A");
        placer.place(&a, &mut index, &mut rng).unwrap().unwrap();

        // Attempt 1 lands at (-20, -20): still within tolerance. Attempt 2 at (-40, -40) is clear.
        let b = PlacementRequest::new(small, Vec2::ZERO, "B");
        let handle = placer.place(&b, &mut index, &mut rng).unwrap().unwrap();
        assert_eq!(
            world.object(handle).unwrap().position,
            Vec3::new(-40.0, -40.0, 0.0)
        );
    }

    #[test]
    fn refused_spawns_are_reported_as_spawn_failures() {
        let mut world = MemoryWorld::new().with_spawn_limit(0);
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());

        let req = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "Chest");
        assert!(placer.place(&req, &mut index, &mut rng).unwrap().is_none());
        assert_eq!(placer.drops().spawn_failed, 1);
        assert!(index.is_empty());
    }

    #[test]
    fn host_faults_propagate() {
        struct BrokenWorld;
        impl World for BrokenWorld {
            fn spawn(
                &mut self,
                _mesh: &MeshHandle,
                _position: Vec3,
                _yaw_degrees: f32,
            ) -> Result<Option<ObjectHandle>> {
                Err(Error::Host("editor closed".into()))
            }
            fn set_label(&mut self, _handle: ObjectHandle, _label: &str) -> Result<()> {
                Ok(())
            }
            fn set_scale(&mut self, _handle: ObjectHandle, _scale: Vec3) -> Result<()> {
                Ok(())
            }
        }

        let mut world = BrokenWorld;
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());
        let req = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "Chest");
        let err = placer.place(&req, &mut index, &mut rng).unwrap_err();
        assert!(matches!(err, Error::Host(_)));
        assert!(index.is_empty());
    }

    #[test]
    fn attachments_skip_the_index() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(6);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());

        let mill = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "Watermill");
        placer.place(&mill, &mut index, &mut rng).unwrap().unwrap();
        let wings = PlacementRequest::new(crate_mesh(), Vec2::ZERO, "Watermill_Wings");
        assert!(placer.attach(&wings).unwrap().is_some());
        assert_eq!(placer.placed(), 2);
        assert_eq!(index.len(), 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn unresolved_batches_count_every_request() {
        let mut world = MemoryWorld::new();
        let mut sink = VecSink::new().only(&[LayoutEventKind::PlacementDropped]);
        let mut placer = Placer::with_sink(&mut world, RetryPolicy::default(), &mut sink);
        placer.record_unresolved("Tavern", "Tavern");
        placer.record_unresolved_batch("Rock", "Rock_*", 3);
        placer.record_unresolved_batch("Town_Tree", "Tree_*", 0);
        assert_eq!(placer.drops().unresolved, 4);
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn drop_stats_since_subtracts_snapshot() {
        let mut stats = DropStats::default();
        stats.record(DropReason::Exhausted);
        let snapshot = stats;
        stats.record(DropReason::Unresolved);
        stats.record(DropReason::Exhausted);
        let delta = stats.since(&snapshot);
        assert_eq!(delta.exhausted, 1);
        assert_eq!(delta.unresolved, 1);
        assert_eq!(delta.total(), 2);
    }
}
