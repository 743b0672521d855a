use glam::Vec2;
use tracing::{debug, warn};

use crate::error::Result;
use crate::placement::segments::{rectangle_sides, GatePolicy, SegmentRouter};
use crate::town::catalog::{Building, Placeable, Wall};
use crate::town::composer::Composer;

impl Composer<'_> {
    /// Perimeter wall inset by one segment width, with a tower at every gate.
    pub(super) fn walls(&mut self) -> Result<()> {
        let Some(wall) = self.mesh(Placeable::Wall(Wall::Wall1), "Town_Wall") else {
            return Ok(());
        };
        let tower = self.assets.get(Placeable::Building(Building::Tower));

        let sizing = SegmentRouter::new(wall.clone(), "Town_Wall");
        let wall_width = sizing.segment_length();
        let half_extent = Vec2::new(
            self.spec.width / 2.0 - wall_width,
            self.spec.height / 2.0 - wall_width,
        );
        if half_extent.x <= 0.0 || half_extent.y <= 0.0 {
            warn!(
                "Town of {}x{} is too small for a wall {} wide; skipping.",
                self.spec.width, self.spec.height, wall_width
            );
            self.placer.warn(
                "walls",
                format!("Town too small for a perimeter wall {wall_width} wide"),
            );
            return Ok(());
        }

        for (side, (start, end)) in rectangle_sides(self.spec.center, half_extent)
            .into_iter()
            .enumerate()
        {
            let router = SegmentRouter::new(wall.clone(), format!("Town_Wall_Wall1_{side}"));
            let plan = router
                .plan(start, end)
                .with_gate_policy(&GatePolicy::Tiered);
            let gate_prefix = format!("Gate_Tower_{side}");

            if tower.is_none() {
                for gate in plan.gates() {
                    self.placer.record_unresolved(
                        &format!("{gate_prefix}_{gate}"),
                        Building::Tower.asset_name(),
                    );
                }
            }

            let outcome = self.route(&router, &plan, tower.as_ref(), &gate_prefix)?;
            debug!(
                "Wall side {}: {} of {} segments, {} gate towers.",
                side,
                outcome.segments.len(),
                plan.segment_count() - plan.gates().len(),
                outcome.gate_structures.len()
            );
        }
        Ok(())
    }
}
