//! Radial scatter of many similar objects with optional exclusion and undergrowth.
use glam::Vec2;
use rand::Rng as RngCore;
use tracing::warn;

use crate::collision::CollisionIndex;
use crate::error::Result;
use crate::host::{MeshHandle, ObjectHandle};
use crate::placement::placer::Placer;
use crate::placement::request::PlacementRequest;
use crate::sampling::{
    chance, rand01, rand_index, rand_range, rand_signed, AnnulusSampling, PointSampling,
};

/// Region in which scatter candidates are discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exclusion {
    /// Points strictly closer than `radius` to `center`.
    Disk { center: Vec2, radius: f32 },
    /// Points inside the closed rectangle `[min, max]`.
    Rect { min: Vec2, max: Vec2 },
}

impl Exclusion {
    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            Exclusion::Disk { center, radius } => p.distance(center) < radius,
            Exclusion::Rect { min, max } => {
                p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
            }
        }
    }
}

/// Secondary objects placed next to successfully scattered primaries.
#[derive(Debug, Clone)]
pub struct Undergrowth {
    pub meshes: Vec<MeshHandle>,
    /// Chance that a placed primary receives one undergrowth object.
    pub probability: f32,
    /// Half-width of the square offset window around the primary's candidate point.
    pub window: f32,
    pub scale_range: (f32, f32),
    pub label_prefix: String,
}

impl Undergrowth {
    pub fn new(meshes: Vec<MeshHandle>, probability: f32, label_prefix: impl Into<String>) -> Self {
        Self {
            meshes,
            probability,
            window: 100.0,
            scale_range: (0.7, 1.0),
            label_prefix: label_prefix.into(),
        }
    }

    pub fn with_window(mut self, window: f32) -> Self {
        self.window = window;
        self
    }

    pub fn with_scale_range(mut self, lo: f32, hi: f32) -> Self {
        self.scale_range = (lo, hi);
        self
    }
}

/// Parameters of one scatter pass.
#[derive(Debug, Clone)]
pub struct ScatterSpec {
    /// Candidate generator.
    pub sampling: AnnulusSampling,
    /// Meshes chosen uniformly per candidate.
    pub meshes: Vec<MeshHandle>,
    /// Uniform scale range applied identically on all axes.
    pub scale_range: (f32, f32),
    pub exclusion: Option<Exclusion>,
    /// Labels are `{label_prefix}_{candidate}`.
    pub label_prefix: String,
    pub z: f32,
    pub undergrowth: Option<Undergrowth>,
    /// Attempt override; the placer's policy applies when unset.
    pub max_attempts: Option<usize>,
}

impl ScatterSpec {
    pub fn new(
        sampling: AnnulusSampling,
        meshes: Vec<MeshHandle>,
        label_prefix: impl Into<String>,
    ) -> Self {
        Self {
            sampling,
            meshes,
            scale_range: (1.0, 1.0),
            exclusion: None,
            label_prefix: label_prefix.into(),
            z: 0.0,
            undergrowth: None,
            max_attempts: None,
        }
    }

    pub fn with_scale_range(mut self, lo: f32, hi: f32) -> Self {
        self.scale_range = (lo, hi);
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    pub fn with_undergrowth(mut self, undergrowth: Undergrowth) -> Self {
        self.undergrowth = Some(undergrowth);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Result of a scatter pass.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ScatterOutcome {
    /// Placed primary objects.
    pub placed: Vec<ObjectHandle>,
    /// Placed undergrowth objects.
    pub undergrowth: Vec<ObjectHandle>,
    /// Candidate points generated.
    pub candidates: usize,
    /// Candidates discarded by the exclusion region.
    pub excluded: usize,
    /// Candidate points that passed the exclusion test, in order.
    pub accepted_points: Vec<Vec2>,
}

/// Run one scatter pass.
///
/// Excluded candidates are skipped outright and never reach the placer, so the
/// realized density can fall below the requested count without any drop being
/// recorded.
pub fn scatter(
    spec: &ScatterSpec,
    placer: &mut Placer<'_>,
    index: &mut CollisionIndex,
    rng: &mut dyn RngCore,
) -> Result<ScatterOutcome> {
    if spec.meshes.is_empty() {
        warn!("Scatter '{}' has no meshes; skipping.", spec.label_prefix);
        placer.warn(
            format!("scatter:{}", spec.label_prefix),
            "Scatter has no meshes; skipping",
        );
        return Ok(ScatterOutcome::default());
    }

    let max_attempts = spec.max_attempts.unwrap_or(placer.policy().max_attempts);
    let candidates = spec.sampling.generate(rng);

    let mut outcome = ScatterOutcome {
        candidates: candidates.len(),
        ..Default::default()
    };

    for (i, p) in candidates.into_iter().enumerate() {
        let point = Vec2::from(p);
        if spec.exclusion.is_some_and(|ex| ex.contains(point)) {
            outcome.excluded += 1;
            continue;
        }
        outcome.accepted_points.push(point);

        let Some(mesh) = pick(&spec.meshes, rng) else {
            continue;
        };
        let yaw = rand01(rng) * 360.0;
        let scale = rand_range(rng, spec.scale_range.0, spec.scale_range.1);

        let request = PlacementRequest::new(
            mesh.clone(),
            point,
            format!("{}_{}", spec.label_prefix, i),
        )
        .with_z(spec.z)
        .with_yaw(yaw)
        .with_uniform_scale(scale)
        .with_max_attempts(max_attempts);

        let Some(handle) = placer.place(&request, index, rng)? else {
            continue;
        };
        outcome.placed.push(handle);

        if let Some(under) = &spec.undergrowth {
            let anchor = UndergrowthAnchor {
                point,
                candidate: i,
                z: spec.z,
                max_attempts,
            };
            if let Some(handle) = place_undergrowth(under, &anchor, placer, index, rng)? {
                outcome.undergrowth.push(handle);
            }
        }
    }

    Ok(outcome)
}

struct UndergrowthAnchor {
    point: Vec2,
    candidate: usize,
    z: f32,
    max_attempts: usize,
}

fn place_undergrowth(
    under: &Undergrowth,
    anchor: &UndergrowthAnchor,
    placer: &mut Placer<'_>,
    index: &mut CollisionIndex,
    rng: &mut dyn RngCore,
) -> Result<Option<ObjectHandle>> {
    if !chance(rng, under.probability) {
        return Ok(None);
    }
    let Some(mesh) = pick(&under.meshes, rng) else {
        return Ok(None);
    };
    let offset = Vec2::new(rand_signed(rng, under.window), rand_signed(rng, under.window));
    let scale = rand_range(rng, under.scale_range.0, under.scale_range.1);
    let yaw = rand01(rng) * 360.0;

    let request = PlacementRequest::new(
        mesh.clone(),
        anchor.point + offset,
        format!("{}_{}", under.label_prefix, anchor.candidate),
    )
    .with_z(anchor.z)
    .with_yaw(yaw)
    .with_uniform_scale(scale)
    .with_max_attempts(anchor.max_attempts);
    placer.place(&request, index, rng)
}

fn pick<'m>(meshes: &'m [MeshHandle], rng: &mut dyn RngCore) -> Option<&'m MeshHandle> {
    rand_index(rng, meshes.len()).map(|i| &meshes[i])
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::host::MemoryWorld;
    use crate::placement::request::RetryPolicy;

    fn trees() -> Vec<MeshHandle> {
        vec![
            MeshHandle::centered("Tree_1", Vec3::new(8.0, 8.0, 60.0)),
            MeshHandle::centered("Pine_tree", Vec3::new(6.0, 6.0, 80.0)),
        ]
    }

    #[test]
    fn accepted_points_respect_ring_and_exclusion() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(21);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());

        let center = Vec2::new(1250.0, 1250.0);
        let forest = Exclusion::Disk {
            center: Vec2::new(4150.0, 3450.0),
            radius: 1500.0,
        };
        let spec = ScatterSpec::new(
            AnnulusSampling::new(center, 2500.0, 3000.0, 200),
            trees(),
            "Town_Tree",
        )
        .with_scale_range(0.9, 1.1)
        .with_exclusion(forest);

        let outcome = scatter(&spec, &mut placer, &mut index, &mut rng).unwrap();
        assert_eq!(outcome.candidates, 200);
        assert_eq!(outcome.accepted_points.len() + outcome.excluded, 200);
        assert!(outcome.excluded > 0, "ring crosses the forest disk");
        for p in &outcome.accepted_points {
            let d = p.distance(center);
            assert!(d >= 2500.0 - 0.01 && d <= 3000.0 + 0.01);
            assert!(!forest.contains(*p));
        }
        assert_eq!(outcome.placed.len(), placer.placed());
    }

    #[test]
    fn placed_objects_never_overlap() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(22);
        let policy = RetryPolicy::default();
        let mut placer = Placer::new(&mut world, policy);

        let spec = ScatterSpec::new(
            AnnulusSampling::disk(Vec2::new(500.0, 500.0), 300.0, 300),
            trees(),
            "Forest_Tree",
        )
        .with_scale_range(0.8, 1.2)
        .with_undergrowth(Undergrowth::new(trees(), 0.6, "Forest_Undergrowth"));

        let outcome = scatter(&spec, &mut placer, &mut index, &mut rng).unwrap();
        assert!(!outcome.placed.is_empty());
        assert!(placer.drops().exhausted > 0, "dense disk forces drops");

        let records = index.records();
        for (j, later) in records.iter().enumerate() {
            for earlier in &records[..j] {
                assert!(!later.footprint.overlaps(&earlier.footprint, policy.tolerance));
            }
        }
    }

    #[test]
    fn empty_mesh_list_places_nothing() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(23);
        let mut placer = Placer::new(&mut world, RetryPolicy::default());
        let spec = ScatterSpec::new(AnnulusSampling::disk(Vec2::ZERO, 10.0, 5), Vec::new(), "X");
        let outcome = scatter(&spec, &mut placer, &mut index, &mut rng).unwrap();
        assert_eq!(outcome.candidates, 0);
        assert!(world.is_empty());
    }

    #[test]
    fn undergrowth_stays_in_window() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(24);
        // One attempt keeps undergrowth at its drawn position.
        let mut placer = Placer::new(&mut world, RetryPolicy::default());
        let bush = vec![MeshHandle::centered("Bush_1", Vec3::splat(1.0))];
        let spec = ScatterSpec::new(
            AnnulusSampling::new(Vec2::ZERO, 0.0, 20_000.0, 20),
            trees(),
            "Tree",
        )
        .with_max_attempts(1)
        .with_undergrowth(Undergrowth::new(bush, 1.0, "Bush").with_window(100.0));

        scatter(&spec, &mut placer, &mut index, &mut rng).unwrap();
        for obj in world.objects() {
            let Some(label) = obj.label.as_deref() else { continue };
            let Some(idx) = label.strip_prefix("Bush_") else { continue };
            let tree = world
                .find_by_label(&format!("Tree_{idx}"))
                .expect("undergrowth only follows placed trees");
            let d = (obj.position - tree.position).truncate().abs();
            assert!(d.x <= 100.0 + 1e-2 && d.y <= 100.0 + 1e-2);
        }
    }

    #[test]
    fn rect_exclusion_is_inclusive() {
        let ex = Exclusion::Rect {
            min: Vec2::ZERO,
            max: Vec2::splat(10.0),
        };
        assert!(ex.contains(Vec2::new(10.0, 0.0)));
        assert!(!ex.contains(Vec2::new(10.1, 5.0)));
        let disk = Exclusion::Disk {
            center: Vec2::ZERO,
            radius: 5.0,
        };
        assert!(disk.contains(Vec2::new(4.9, 0.0)));
        assert!(!disk.contains(Vec2::new(5.0, 0.0)));
    }
}
