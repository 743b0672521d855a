use glam::Vec2;
use tracing::warn;

use crate::error::Result;
use crate::placement::scatter::{Exclusion, ScatterSpec, Undergrowth};
use crate::sampling::{rand01, rand_index, rand_range, rand_signed, AnnulusSampling};
use crate::town::catalog::{Nature, NatureGroup, Placeable};
use crate::town::composer::Composer;

const FOREST_OFFSET: Vec2 = Vec2::new(2900.0, 2200.0);

/// Houses that get a garden: North_House_1, North_House_2, East_House_1, South_House_1.
const GARDEN_HOUSES: [Vec2; 4] = [
    Vec2::new(-2000.0, -1900.0),
    Vec2::new(-1300.0, -2000.0),
    Vec2::new(2400.0, 1200.0),
    Vec2::new(-1200.0, 1950.0),
];

/// Range of the random garden offset from its house, per axis.
const GARDEN_OFFSET: (f32, f32) = (200.0, 300.0);

/// Half-width of the plant spread around a garden center.
const GARDEN_SPREAD: f32 = 100.0;

impl Composer<'_> {
    pub(super) fn nature(&mut self) -> Result<()> {
        let center = self.at(FOREST_OFFSET);
        let radius = self.scaled(self.config.forest_radius);
        self.forest(center, radius)?;
        self.town_trees(Exclusion::Disk { center, radius })?;
        self.rocks()?;
        self.gardens()
    }

    fn forest(&mut self, center: Vec2, radius: f32) -> Result<()> {
        let count = self.count(self.config.forest_tree_count);
        let Some(trees) = self.group(NatureGroup::ForestTrees, "Forest_Tree", count) else {
            return Ok(());
        };
        let (lo, hi) = NatureGroup::ForestTrees.scale_range();
        let mut spec = ScatterSpec::new(
            AnnulusSampling::disk(center, radius, count),
            trees,
            "Forest_Tree",
        )
        .with_scale_range(lo, hi);

        let undergrowth = self.assets.group(NatureGroup::Undergrowth);
        if undergrowth.is_empty() {
            warn!("No undergrowth asset is resolved; forest stays bare.");
            self.placer
                .warn("nature:undergrowth", "No undergrowth asset is resolved");
        } else {
            let (lo, hi) = NatureGroup::Undergrowth.scale_range();
            spec = spec.with_undergrowth(
                Undergrowth::new(
                    undergrowth,
                    self.config.undergrowth_probability,
                    "Forest_Undergrowth",
                )
                .with_window(self.config.undergrowth_window)
                .with_scale_range(lo, hi),
            );
        }

        self.scatter(&spec)?;
        Ok(())
    }

    fn town_trees(&mut self, forest: Exclusion) -> Result<()> {
        let count = self.count(self.config.town_tree_count);
        let Some(trees) = self.group(NatureGroup::TownTrees, "Town_Tree", count) else {
            return Ok(());
        };
        let radius = self.scaled(self.config.town_tree_radius);
        let (lo, hi) = NatureGroup::TownTrees.scale_range();
        let spec = ScatterSpec::new(
            AnnulusSampling::new(self.spec.center, radius, radius, count),
            trees,
            "Town_Tree",
        )
        .with_scale_range(lo, hi)
        .with_exclusion(forest);
        self.scatter(&spec)?;
        Ok(())
    }

    fn rocks(&mut self) -> Result<()> {
        let count = self.count(self.config.rock_count);
        let Some(rocks) = self.group(NatureGroup::Rocks, "Rock", count) else {
            return Ok(());
        };
        let radius = self.scaled(self.config.town_tree_radius);
        let (lo, hi) = NatureGroup::Rocks.scale_range();
        let spec = ScatterSpec::new(
            AnnulusSampling::new(self.spec.center, radius, radius, count),
            rocks,
            "Rock",
        )
        .with_scale_range(lo, hi);
        self.scatter(&spec)?;
        Ok(())
    }

    fn gardens(&mut self) -> Result<()> {
        let plants = self.count(self.config.plants_per_garden);
        let z = Placeable::Nature(Nature::Plant).z();

        for (idx, house) in GARDEN_HOUSES.iter().enumerate() {
            let prefix = format!("Garden_{idx}_Plant");
            let Some(meshes) = self.group(NatureGroup::GardenPlants, &prefix, plants) else {
                continue;
            };
            let offset = Vec2::new(
                rand_range(&mut *self.rng, GARDEN_OFFSET.0, GARDEN_OFFSET.1),
                rand_range(&mut *self.rng, GARDEN_OFFSET.0, GARDEN_OFFSET.1),
            );
            let garden = self.at(*house) + offset;

            for j in 0..plants {
                let jitter = Vec2::new(
                    rand_signed(&mut *self.rng, GARDEN_SPREAD),
                    rand_signed(&mut *self.rng, GARDEN_SPREAD),
                );
                let Some(pick) = rand_index(&mut *self.rng, meshes.len()) else {
                    continue;
                };
                let mesh = meshes[pick].clone();
                let yaw = rand01(&mut *self.rng) * 360.0;
                let label = format!("{prefix}_{j}");
                self.place_mesh(mesh, garden + jitter, z, yaw, 1.0, &label)?;
            }
        }
        Ok(())
    }
}
