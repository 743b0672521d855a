//! Line subdivision into repeated segment meshes with gates.
//!
//! A [`SegmentPlan`] turns a straight line into `count` evenly parametrized slots,
//! `t = i / count`, spaced so consecutive segments overlap by a small fraction of
//! their length. Slots listed as skip indices stay empty and form gates.
//! [`SegmentRouter`] places one mesh per remaining slot through a [`Placer`].
use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use rand::Rng as RngCore;
use tracing::warn;

use crate::collision::CollisionIndex;
use crate::error::Result;
use crate::geometry::heading_degrees;
use crate::host::{MeshHandle, ObjectHandle};
use crate::placement::placer::Placer;
use crate::placement::request::PlacementRequest;

/// Fraction by which consecutive segments overlap.
pub const SEGMENT_OVERLAP: f32 = 0.05;

/// Upper bound on the segments of a single line.
pub const MAX_LINE_SEGMENTS: usize = 1 << 16;

/// Segment count above which tiered gating places two gates.
pub const TIERED_GATE_THRESHOLD: usize = 8;

/// Gate indices for a side of `count` segments: two gates at the thirds when
/// `count > 8`, otherwise one gate in the middle.
pub fn tiered_gate_indices(count: usize) -> Vec<usize> {
    if count > TIERED_GATE_THRESHOLD {
        vec![count / 3, 2 * count / 3]
    } else {
        vec![count / 2]
    }
}

/// How skip indices are chosen for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GatePolicy {
    /// Continuous line without openings.
    None,
    /// Explicit indices; indices beyond the segment count are ignored.
    Fixed(Vec<usize>),
    /// [`tiered_gate_indices`] applied to the line's segment count.
    Tiered,
}

impl GatePolicy {
    pub fn skip_indices(&self, count: usize) -> Vec<usize> {
        match self {
            GatePolicy::None => Vec::new(),
            GatePolicy::Fixed(indices) => indices.clone(),
            GatePolicy::Tiered => tiered_gate_indices(count),
        }
    }
}

/// A straight line to be covered by repeated segments.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    pub start: Vec2,
    pub end: Vec2,
    /// Height passed through to the host.
    pub z: f32,
    /// Footprint length of one segment along its primary axis.
    pub segment_length: f32,
    /// Fraction of `segment_length` shared by neighbours.
    pub overlap: f32,
    /// Added to the line heading to get each segment's yaw.
    pub rotation_offset: f32,
    /// Slots left empty.
    pub skip: BTreeSet<usize>,
}

impl SegmentPlan {
    pub fn new(start: Vec2, end: Vec2, segment_length: f32) -> Self {
        Self {
            start,
            end,
            z: 0.0,
            segment_length,
            overlap: SEGMENT_OVERLAP,
            rotation_offset: 0.0,
            skip: BTreeSet::new(),
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_rotation_offset(mut self, degrees: f32) -> Self {
        self.rotation_offset = degrees;
        self
    }

    pub fn with_skip_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.skip.extend(indices);
        self
    }

    /// Add skip indices chosen by `policy` for this line's segment count.
    pub fn with_gate_policy(self, policy: &GatePolicy) -> Self {
        let indices = policy.skip_indices(self.segment_count());
        self.with_skip_indices(indices)
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn heading_degrees(&self) -> f32 {
        heading_degrees(self.start, self.end)
    }

    /// Distance between consecutive segment centers before rescaling to the line.
    pub fn effective_spacing(&self) -> f32 {
        self.segment_length * (1.0 - self.overlap)
    }

    /// `ceil(length / effective_spacing)`, clamped to `1..=MAX_LINE_SEGMENTS`.
    ///
    /// A zero-length line or a non-positive spacing yields a single segment.
    pub fn segment_count(&self) -> usize {
        let length = self.length();
        let spacing = self.effective_spacing();
        if length <= 0.0 || !length.is_finite() || spacing <= 0.0 || !spacing.is_finite() {
            return 1;
        }
        ((length / spacing).ceil() as usize).clamp(1, MAX_LINE_SEGMENTS)
    }

    /// Interpolation parameter of slot `i`.
    pub fn parameter(&self, i: usize) -> f32 {
        i as f32 / self.segment_count() as f32
    }

    /// Position of slot `i`.
    pub fn point_at(&self, i: usize) -> Vec2 {
        self.start.lerp(self.end, self.parameter(i))
    }

    pub fn is_gate(&self, i: usize) -> bool {
        self.skip.contains(&i)
    }

    /// Skip indices that fall on an actual slot, in ascending order.
    pub fn gates(&self) -> Vec<usize> {
        let count = self.segment_count();
        self.skip.iter().copied().filter(|&i| i < count).collect()
    }
}

/// Handles produced by [`SegmentRouter::layout_with_gate_structures`].
#[derive(Debug, Clone, Default)]
pub struct SegmentOutcome {
    /// Successfully placed segments.
    pub segments: Vec<ObjectHandle>,
    /// Successfully placed gate structures.
    pub gate_structures: Vec<ObjectHandle>,
}

/// Places one mesh repeatedly along [`SegmentPlan`]s.
#[derive(Debug, Clone)]
pub struct SegmentRouter {
    mesh: MeshHandle,
    scale: Vec3,
    label_prefix: String,
    max_attempts: Option<usize>,
}

impl SegmentRouter {
    pub fn new(mesh: MeshHandle, label_prefix: impl Into<String>) -> Self {
        Self {
            mesh,
            scale: Vec3::ONE,
            label_prefix: label_prefix.into(),
            max_attempts: None,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Override the placer's attempt count for segments.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    /// Segment length of the routed mesh: its footprint width after scale.
    pub fn segment_length(&self) -> f32 {
        self.mesh.footprint_size(self.scale).x
    }

    /// Plan covering `start -> end` with this router's segment length.
    pub fn plan(&self, start: Vec2, end: Vec2) -> SegmentPlan {
        SegmentPlan::new(start, end, self.segment_length())
    }

    /// Place segments for every non-gate slot of `plan`, labelled `{prefix}_{i}`.
    ///
    /// Dropped segments are absent from the result; they never raise an error.
    pub fn layout(
        &self,
        plan: &SegmentPlan,
        placer: &mut Placer<'_>,
        index: &mut CollisionIndex,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ObjectHandle>> {
        if plan.length() <= 0.0 {
            warn!(
                "Segment line '{}' has zero length; placing a single segment.",
                self.label_prefix
            );
        }

        let count = plan.segment_count();
        if count == MAX_LINE_SEGMENTS {
            warn!(
                "Segment line '{}' is capped at {} segments.",
                self.label_prefix, MAX_LINE_SEGMENTS
            );
        }
        let yaw = plan.heading_degrees() + plan.rotation_offset;
        let max_attempts = self
            .max_attempts
            .unwrap_or(placer.policy().max_attempts);

        let mut placed = Vec::with_capacity(count);
        for i in 0..count {
            if plan.is_gate(i) {
                continue;
            }
            let request = PlacementRequest::new(
                self.mesh.clone(),
                plan.point_at(i),
                format!("{}_{}", self.label_prefix, i),
            )
            .with_z(plan.z)
            .with_yaw(yaw)
            .with_scale(self.scale)
            .with_max_attempts(max_attempts);

            if let Some(handle) = placer.place(&request, index, rng)? {
                placed.push(handle);
            }
        }
        Ok(placed)
    }

    /// Like [`SegmentRouter::layout`], then places `gate_mesh` at every gate slot,
    /// rotated perpendicular to the line and labelled `{gate_prefix}_{i}`.
    pub fn layout_with_gate_structures(
        &self,
        plan: &SegmentPlan,
        gate_mesh: Option<&MeshHandle>,
        gate_prefix: &str,
        placer: &mut Placer<'_>,
        index: &mut CollisionIndex,
        rng: &mut dyn RngCore,
    ) -> Result<SegmentOutcome> {
        let segments = self.layout(plan, placer, index, rng)?;

        let mut gate_structures = Vec::new();
        if let Some(mesh) = gate_mesh {
            let yaw = plan.heading_degrees() + 90.0;
            for gate in plan.gates() {
                let request = PlacementRequest::new(
                    mesh.clone(),
                    plan.point_at(gate),
                    format!("{gate_prefix}_{gate}"),
                )
                .with_z(plan.z)
                .with_yaw(yaw)
                .with_max_attempts(placer.policy().max_attempts);
                if let Some(handle) = placer.place(&request, index, rng)? {
                    gate_structures.push(handle);
                }
            }
        }

        Ok(SegmentOutcome {
            segments,
            gate_structures,
        })
    }
}

/// The four sides of the axis-aligned rectangle centered at `center`, walked
/// counter-clockwise from the minimum corner.
pub fn rectangle_sides(center: Vec2, half_extent: Vec2) -> [(Vec2, Vec2); 4] {
    let corners = [
        Vec2::new(center.x - half_extent.x, center.y - half_extent.y),
        Vec2::new(center.x + half_extent.x, center.y - half_extent.y),
        Vec2::new(center.x + half_extent.x, center.y + half_extent.y),
        Vec2::new(center.x - half_extent.x, center.y + half_extent.y),
    ];
    [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::host::MemoryWorld;
    use crate::placement::request::RetryPolicy;

    fn wall_mesh() -> MeshHandle {
        MeshHandle::centered("Wall_1", Vec3::new(10.0, 2.0, 30.0))
    }

    #[test]
    fn segment_count_matches_ceil_formula() {
        let plan = SegmentPlan::new(Vec2::ZERO, Vec2::new(90.0, 0.0), 10.0);
        assert_eq!(plan.effective_spacing(), 9.5);
        assert_eq!(plan.segment_count(), 10);

        let long = SegmentPlan::new(Vec2::ZERO, Vec2::new(0.0, 1000.0), 10.0);
        assert_eq!(long.segment_count(), (1000.0f32 / 9.5).ceil() as usize);

        let short = SegmentPlan::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 100.0);
        assert_eq!(short.segment_count(), 1);
    }

    #[test]
    fn parameters_are_i_over_count() {
        let plan = SegmentPlan::new(Vec2::ZERO, Vec2::new(90.0, 0.0), 10.0);
        let count = plan.segment_count();
        for i in 0..count {
            assert_eq!(plan.parameter(i), i as f32 / count as f32);
        }
        assert_eq!(plan.point_at(0), Vec2::ZERO);
        assert!((plan.point_at(5).x - 45.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_line_is_single_segment_at_start() {
        let p = Vec2::new(7.0, -3.0);
        let plan = SegmentPlan::new(p, p, 10.0);
        assert_eq!(plan.segment_count(), 1);
        assert_eq!(plan.point_at(0), p);
        assert_eq!(plan.heading_degrees(), 0.0);

        let zero_len_mesh = SegmentPlan::new(Vec2::ZERO, Vec2::new(50.0, 0.0), 0.0);
        assert_eq!(zero_len_mesh.segment_count(), 1);
    }

    #[test]
    fn needle_thin_meshes_hit_the_segment_cap() {
        let plan = SegmentPlan::new(Vec2::ZERO, Vec2::new(1.0e9, 0.0), 1.0e-3);
        assert_eq!(plan.segment_count(), MAX_LINE_SEGMENTS);
        let last = plan.point_at(MAX_LINE_SEGMENTS - 1);
        assert!(last.x > 0.99e9 && last.x < 1.0e9);
    }

    #[test]
    fn tiered_gates_follow_count_threshold() {
        assert_eq!(tiered_gate_indices(8), vec![4]);
        assert_eq!(tiered_gate_indices(5), vec![2]);
        assert_eq!(tiered_gate_indices(1), vec![0]);
        assert_eq!(tiered_gate_indices(9), vec![3, 6]);
        assert_eq!(tiered_gate_indices(10), vec![3, 6]);
        assert_eq!(tiered_gate_indices(30), vec![10, 20]);
    }

    #[test]
    fn gate_policy_produces_skip_set() {
        let plan = SegmentPlan::new(Vec2::ZERO, Vec2::new(90.0, 0.0), 10.0)
            .with_gate_policy(&GatePolicy::Tiered);
        assert_eq!(plan.gates(), vec![3, 6]);

        let fixed = SegmentPlan::new(Vec2::ZERO, Vec2::new(90.0, 0.0), 10.0)
            .with_gate_policy(&GatePolicy::Fixed(vec![1, 40]));
        assert_eq!(fixed.gates(), vec![1]);

        let none = SegmentPlan::new(Vec2::ZERO, Vec2::new(90.0, 0.0), 10.0)
            .with_gate_policy(&GatePolicy::None);
        assert!(none.gates().is_empty());
    }

    #[test]
    fn router_skips_gates_and_labels_segments() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(11);
        // Neighbouring segments overlap by half a unit; a negative tolerance lets them touch.
        let policy = RetryPolicy::default().with_tolerance(-2.0);
        let mut placer = Placer::new(&mut world, policy);

        let router = SegmentRouter::new(wall_mesh(), "Wall").with_max_attempts(1);
        let plan = router
            .plan(Vec2::ZERO, Vec2::new(90.0, 0.0))
            .with_gate_policy(&GatePolicy::Tiered);
        let handles = router
            .layout(&plan, &mut placer, &mut index, &mut rng)
            .unwrap();

        assert_eq!(handles.len(), 8);
        assert!(world.find_by_label("Wall_3").is_none());
        assert!(world.find_by_label("Wall_6").is_none());
        let seg = world.find_by_label("Wall_2").expect("segment 2");
        assert_eq!(seg.position, Vec3::new(18.0, 0.0, 0.0));
        assert_eq!(seg.yaw_degrees, 0.0);
    }

    #[test]
    fn gate_structures_sit_on_gaps_perpendicular_to_line() {
        let mut world = MemoryWorld::new();
        let mut index = CollisionIndex::new();
        let mut rng = StdRng::seed_from_u64(12);
        let policy = RetryPolicy::default().with_tolerance(-2.0);
        let mut placer = Placer::new(&mut world, policy);

        let tower = MeshHandle::centered("Tower", Vec3::new(2.0, 2.0, 50.0));
        let router = SegmentRouter::new(wall_mesh(), "Wall").with_max_attempts(1);
        let plan = router
            .plan(Vec2::ZERO, Vec2::new(0.0, 90.0))
            .with_gate_policy(&GatePolicy::Tiered);
        let outcome = router
            .layout_with_gate_structures(
                &plan,
                Some(&tower),
                "Gate_Tower_0",
                &mut placer,
                &mut index,
                &mut rng,
            )
            .unwrap();

        assert_eq!(outcome.gate_structures.len(), 2);
        let t = world.find_by_label("Gate_Tower_0_3").expect("tower at gate 3");
        assert!((t.position.y - 27.0).abs() < 1e-3);
        assert!((t.yaw_degrees - 180.0).abs() < 1e-3);
    }

    #[test]
    fn rectangle_sides_close_the_loop() {
        let sides = rectangle_sides(Vec2::new(10.0, 10.0), Vec2::new(5.0, 3.0));
        assert_eq!(sides[0].0, Vec2::new(5.0, 7.0));
        assert_eq!(sides[1].0, Vec2::new(15.0, 7.0));
        assert_eq!(sides[3].1, sides[0].0);
        for i in 0..4 {
            assert_eq!(sides[i].1, sides[(i + 1) % 4].0);
        }
    }
}
