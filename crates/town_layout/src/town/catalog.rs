//! Closed set of placeable categories and their asset names.
use std::collections::HashMap;

use tracing::warn;

use crate::host::{AssetResolver, MeshHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Building {
    TownHall,
    LargeHouse,
    SmallHouse,
    BakerHouse,
    Tavern,
    WitchHouse,
    Tower,
    Mill,
    MillWings,
    Woodmill,
    WoodmillSaw,
    Forge,
    Mine,
}

impl Building {
    pub fn asset_name(self) -> &'static str {
        match self {
            Building::TownHall => "Town_Hall",
            Building::LargeHouse => "Large_house",
            Building::SmallHouse => "Small_house",
            Building::BakerHouse => "Baker_house",
            Building::Tavern => "Tavern",
            Building::WitchHouse => "Witch_house",
            Building::Tower => "Tower",
            Building::Mill => "Mill",
            Building::MillWings => "Mill_wings",
            Building::Woodmill => "Woodmill",
            Building::WoodmillSaw => "Woodmill_Saw",
            Building::Forge => "Forge",
            Building::Mine => "Mine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nature {
    Tree1,
    Tree2,
    Tree4,
    PineTree,
    PineTree2,
    Bush1,
    Bush2,
    Fern,
    Flowers1,
    Flowers2,
    Plant,
    Rock1,
    Rock2,
    Rock3,
    Rock4,
    Mushroom1,
    Mushroom2,
}

impl Nature {
    pub fn asset_name(self) -> &'static str {
        match self {
            Nature::Tree1 => "Tree_1",
            Nature::Tree2 => "Tree_2",
            Nature::Tree4 => "Tree_4",
            Nature::PineTree => "Pine_tree",
            Nature::PineTree2 => "Pine_tree_2",
            Nature::Bush1 => "Bush_1",
            Nature::Bush2 => "Bush_2",
            Nature::Fern => "Fern",
            Nature::Flowers1 => "Flowers_1",
            Nature::Flowers2 => "Flowers_2",
            Nature::Plant => "Plant",
            Nature::Rock1 => "Rock_1",
            Nature::Rock2 => "Rock_2",
            Nature::Rock3 => "Rock_3",
            Nature::Rock4 => "Rock_4",
            Nature::Mushroom1 => "Mushroom_1",
            Nature::Mushroom2 => "Mushroom_2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fence {
    Wood,
    Wood1,
    Wood2,
    Stone,
}

impl Fence {
    pub fn asset_name(self) -> &'static str {
        match self {
            Fence::Wood => "Fence",
            Fence::Wood1 => "Fence_1",
            Fence::Wood2 => "Fence_2",
            Fence::Stone => "Stone_fence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Wall1,
}

impl Wall {
    pub fn asset_name(self) -> &'static str {
        match self {
            Wall::Wall1 => "Wall_1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    Anvil,
    Barrel,
    Chest,
    Cauldron,
    Altar,
    Well,
    Trolley,
    Lamppost,
    StreetLight,
}

impl Prop {
    pub fn asset_name(self) -> &'static str {
        match self {
            Prop::Anvil => "Anvil",
            Prop::Barrel => "Barrel",
            Prop::Chest => "Chest",
            Prop::Cauldron => "Cauldron",
            Prop::Altar => "Altar",
            Prop::Well => "Well",
            Prop::Trolley => "Trolley",
            Prop::Lamppost => "Lamppost",
            Prop::StreetLight => "street_light",
        }
    }
}

/// One of the seven interchangeable path tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Tile1,
    Tile2,
    Tile3,
    Tile4,
    Tile5,
    Tile6,
    Tile7,
}

impl Tile {
    pub const ALL: [Tile; 7] = [
        Tile::Tile1,
        Tile::Tile2,
        Tile::Tile3,
        Tile::Tile4,
        Tile::Tile5,
        Tile::Tile6,
        Tile::Tile7,
    ];

    pub fn asset_name(self) -> &'static str {
        match self {
            Tile::Tile1 => "Tile_1",
            Tile::Tile2 => "Tile_2",
            Tile::Tile3 => "Tile_3",
            Tile::Tile4 => "Tile_4",
            Tile::Tile5 => "Tile_5",
            Tile::Tile6 => "Tile_6",
            Tile::Tile7 => "Tile_7",
        }
    }
}

/// Every object category the town composer can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeable {
    Building(Building),
    Nature(Nature),
    Fence(Fence),
    Wall(Wall),
    Prop(Prop),
    Tile(Tile),
}

impl Placeable {
    /// Logical name handed to the [`AssetResolver`].
    pub fn asset_name(self) -> &'static str {
        match self {
            Placeable::Building(b) => b.asset_name(),
            Placeable::Nature(n) => n.asset_name(),
            Placeable::Fence(f) => f.asset_name(),
            Placeable::Wall(w) => w.asset_name(),
            Placeable::Prop(p) => p.asset_name(),
            Placeable::Tile(t) => t.asset_name(),
        }
    }

    /// Height at which the category is spawned. Tiles sit slightly above ground.
    pub fn z(self) -> f32 {
        match self {
            Placeable::Tile(_) => 1.0,
            _ => 0.0,
        }
    }
}

/// Groups of interchangeable nature assets with their scale ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NatureGroup {
    ForestTrees,
    TownTrees,
    Undergrowth,
    Rocks,
    GardenPlants,
}

impl NatureGroup {
    pub fn members(self) -> &'static [Nature] {
        match self {
            NatureGroup::ForestTrees => &[
                Nature::Tree1,
                Nature::Tree2,
                Nature::Tree4,
                Nature::PineTree,
                Nature::PineTree2,
            ],
            NatureGroup::TownTrees => &[Nature::Tree1, Nature::Tree2, Nature::Tree4],
            NatureGroup::Undergrowth => &[
                Nature::Bush1,
                Nature::Bush2,
                Nature::Fern,
                Nature::Mushroom1,
                Nature::Mushroom2,
            ],
            NatureGroup::Rocks => &[Nature::Rock1, Nature::Rock2, Nature::Rock3, Nature::Rock4],
            NatureGroup::GardenPlants => &[
                Nature::Flowers1,
                Nature::Flowers2,
                Nature::Plant,
                Nature::Bush1,
            ],
        }
    }

    /// Uniform scale range applied to members of the group.
    pub fn scale_range(self) -> (f32, f32) {
        match self {
            NatureGroup::ForestTrees => (0.8, 1.2),
            NatureGroup::TownTrees => (0.9, 1.1),
            NatureGroup::Undergrowth => (0.7, 1.0),
            NatureGroup::Rocks => (0.8, 1.5),
            NatureGroup::GardenPlants => (1.0, 1.0),
        }
    }
}

/// Memoizing front for an [`AssetResolver`] keyed by [`Placeable`].
pub(crate) struct AssetCache<'a> {
    resolver: &'a dyn AssetResolver,
    cache: HashMap<Placeable, Option<MeshHandle>>,
}

impl<'a> AssetCache<'a> {
    pub(crate) fn new(resolver: &'a dyn AssetResolver) -> Self {
        Self {
            resolver,
            cache: HashMap::new(),
        }
    }

    pub(crate) fn get(&mut self, placeable: Placeable) -> Option<MeshHandle> {
        let resolver = self.resolver;
        self.cache
            .entry(placeable)
            .or_insert_with(|| {
                let mesh = resolver.resolve(placeable.asset_name());
                if mesh.is_none() {
                    warn!("Asset '{}' could not be resolved.", placeable.asset_name());
                }
                mesh
            })
            .clone()
    }

    /// Resolved meshes of a nature group; unresolved members are left out.
    pub(crate) fn group(&mut self, group: NatureGroup) -> Vec<MeshHandle> {
        group
            .members()
            .iter()
            .filter_map(|&n| self.get(Placeable::Nature(n)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::host::StaticAssets;

    #[test]
    fn asset_names_follow_the_content_library() {
        assert_eq!(
            Placeable::Building(Building::MillWings).asset_name(),
            "Mill_wings"
        );
        assert_eq!(Placeable::Fence(Fence::Stone).asset_name(), "Stone_fence");
        assert_eq!(Placeable::Prop(Prop::StreetLight).asset_name(), "street_light");
        assert_eq!(Placeable::Tile(Tile::Tile7).asset_name(), "Tile_7");
    }

    #[test]
    fn only_tiles_are_raised() {
        assert_eq!(Placeable::Tile(Tile::Tile3).z(), 1.0);
        assert_eq!(Placeable::Building(Building::Tavern).z(), 0.0);
    }

    #[test]
    fn cache_skips_unresolved_group_members() {
        let assets = StaticAssets::new()
            .with_mesh("Rock_1", Vec3::splat(20.0))
            .with_mesh("Rock_3", Vec3::splat(25.0));
        let mut cache = AssetCache::new(&assets);
        let rocks = cache.group(NatureGroup::Rocks);
        let names: Vec<&str> = rocks.iter().map(|m| &*m.name).collect();
        assert_eq!(names, vec!["Rock_1", "Rock_3"]);
        assert!(cache.get(Placeable::Nature(Nature::Rock2)).is_none());
    }
}
