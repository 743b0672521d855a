use glam::Vec2;

use crate::error::Result;
use crate::sampling::{rand01, rand_index, rand_signed};
use crate::town::catalog::{Placeable, Tile};
use crate::town::composer::Composer;

/// Points of interest joined in order: center, tavern, forge, tower, watermill,
/// woodmill, mine, witch house.
const PATH_POINTS: [Vec2; 8] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(700.0, 600.0),
    Vec2::new(600.0, -500.0),
    Vec2::new(-1000.0, -1700.0),
    Vec2::new(1700.0, -1200.0),
    Vec2::new(-1800.0, -400.0),
    Vec2::new(-2200.0, 1800.0),
    Vec2::new(1800.0, 1500.0),
];

/// Number of tiles on a leg of `distance`; tile `j` sits at `t = j / n`.
fn tiles_on_leg(distance: f32, spacing: f32) -> usize {
    if spacing <= 0.0 || !distance.is_finite() {
        return 0;
    }
    (distance / spacing).floor() as usize
}

impl Composer<'_> {
    pub(super) fn paths(&mut self) -> Result<()> {
        let tiles: Vec<_> = Tile::ALL
            .iter()
            .filter_map(|&t| self.assets.get(Placeable::Tile(t)))
            .collect();
        let spacing = self.scaled(self.config.tile_spacing);
        let jitter = self.scaled(self.config.path_jitter);
        let z = Placeable::Tile(Tile::Tile1).z();

        for (i, leg) in PATH_POINTS.windows(2).enumerate() {
            let start = self.at(leg[0]);
            let end = self.at(leg[1]);
            let n = tiles_on_leg(start.distance(end), spacing);
            if tiles.is_empty() {
                self.placer
                    .record_unresolved_batch(&format!("Path_Tile_{i}"), "Tile_*", n);
                continue;
            }

            for j in 0..n {
                let t = j as f32 / n as f32;
                let offset = Vec2::new(
                    rand_signed(&mut *self.rng, jitter),
                    rand_signed(&mut *self.rng, jitter),
                );
                let Some(pick) = rand_index(&mut *self.rng, tiles.len()) else {
                    continue;
                };
                let yaw = rand01(&mut *self.rng) * 360.0;
                let label = format!("Path_Tile_{i}_{j}");
                self.place_mesh(
                    tiles[pick].clone(),
                    start.lerp(end, t) + offset,
                    z,
                    yaw,
                    1.0,
                    &label,
                )?;
            }
        }
        Ok(())
    }
}
