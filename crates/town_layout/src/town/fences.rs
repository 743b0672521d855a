use glam::Vec2;

use crate::error::Result;
use crate::placement::segments::{rectangle_sides, GatePolicy, SegmentRouter};
use crate::town::catalog::{Fence, Placeable};
use crate::town::composer::Composer;

/// Fence meshes are modelled perpendicular to their run.
const FENCE_ROTATION_OFFSET: f32 = 90.0;

const FENCE_GATE_INDEX: usize = 1;

const SQUARE_SIZE: f32 = 90.0;

struct GardenFence {
    name: &'static str,
    offset: Vec2,
    size: Vec2,
    fence: Fence,
}

const GARDEN_FENCES: [GardenFence; 3] = [
    GardenFence {
        name: "North_House_1_Garden",
        offset: Vec2::new(-1800.0, -1900.0),
        size: Vec2::new(30.0, 30.0),
        fence: Fence::Wood,
    },
    GardenFence {
        name: "East_House_1_Garden",
        offset: Vec2::new(2400.0, 1200.0),
        size: Vec2::new(25.0, 30.0),
        fence: Fence::Wood1,
    },
    GardenFence {
        name: "South_LargeHouse_Garden",
        offset: Vec2::new(1300.0, 2200.0),
        size: Vec2::new(35.0, 35.0),
        fence: Fence::Wood2,
    },
];

impl Composer<'_> {
    pub(super) fn fences(&mut self) -> Result<()> {
        for garden in &GARDEN_FENCES {
            let center = self.at(garden.offset);
            let half_extent = garden.size * self.config.scale_factor / 2.0;
            // Only the front side of a garden has a gate.
            self.fence_perimeter(garden.name, garden.fence, center, half_extent, |side| {
                side == 0
            })?;
        }

        let half_extent = Vec2::splat(self.scaled(SQUARE_SIZE) / 2.0);
        self.fence_perimeter(
            "Town_Square",
            Fence::Stone,
            self.spec.center,
            half_extent,
            |_| true,
        )
    }

    fn fence_perimeter(
        &mut self,
        name: &str,
        fence: Fence,
        center: Vec2,
        half_extent: Vec2,
        gated: impl Fn(usize) -> bool,
    ) -> Result<()> {
        let Some(mesh) = self.mesh(Placeable::Fence(fence), &format!("{name}_Fence")) else {
            return Ok(());
        };

        for (side, (start, end)) in rectangle_sides(center, half_extent).into_iter().enumerate() {
            let router = SegmentRouter::new(mesh.clone(), format!("{name}_Fence_{side}"));
            let gates = if gated(side) {
                GatePolicy::Fixed(vec![FENCE_GATE_INDEX])
            } else {
                GatePolicy::None
            };
            let plan = router
                .plan(start, end)
                .with_z(Placeable::Fence(fence).z())
                .with_rotation_offset(FENCE_ROTATION_OFFSET)
                .with_gate_policy(&gates);
            self.route(&router, &plan, None, "")?;
        }
        Ok(())
    }
}
