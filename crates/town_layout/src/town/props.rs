use glam::Vec2;

use crate::error::Result;
use crate::sampling::{rand01, rand_signed};
use crate::town::catalog::{Placeable, Prop};
use crate::town::composer::Composer;

const WELL_OFFSET: Vec2 = Vec2::new(150.0, -150.0);

const LIGHT_SQUARE_SIZE: f32 = 90.0;
const LIGHT_SPACING: f32 = 30.0;
/// Slots per square side; the middle one is left open for the entrance.
const LIGHT_SLOTS: usize = 3;

const TAVERN_ANCHOR: Vec2 = Vec2::new(700.0, 600.0);
const TAVERN_BARRELS: usize = 3;
const TAVERN_BARREL_SPREAD: f32 = 150.0;

/// A prop at a fixed offset from an anchor.
struct PropSite {
    label: &'static str,
    prop: Prop,
    offset: Vec2,
    yaw: f32,
}

/// Anchors and their fixed props: forge, tavern chest, witch house, mine.
const PROP_GROUPS: [(Vec2, &[PropSite]); 4] = [
    (
        Vec2::new(600.0, -500.0),
        &[
            PropSite {
                label: "Forge_Anvil",
                prop: Prop::Anvil,
                offset: Vec2::new(50.0, -80.0),
                yaw: 45.0,
            },
            PropSite {
                label: "Forge_Barrel",
                prop: Prop::Barrel,
                offset: Vec2::new(-70.0, -60.0),
                yaw: 0.0,
            },
        ],
    ),
    (
        TAVERN_ANCHOR,
        &[PropSite {
            label: "Tavern_Chest",
            prop: Prop::Chest,
            offset: Vec2::new(-100.0, 120.0),
            yaw: 45.0,
        }],
    ),
    (
        Vec2::new(1800.0, 1500.0),
        &[
            PropSite {
                label: "Witch_Altar",
                prop: Prop::Altar,
                offset: Vec2::new(150.0, 100.0),
                yaw: 215.0,
            },
            PropSite {
                label: "Witch_Cauldron",
                prop: Prop::Cauldron,
                offset: Vec2::new(-80.0, 120.0),
                yaw: 0.0,
            },
        ],
    ),
    (
        Vec2::new(-2200.0, 1800.0),
        &[PropSite {
            label: "Mine_Trolley",
            prop: Prop::Trolley,
            offset: Vec2::new(150.0, -100.0),
            yaw: 45.0,
        }],
    ),
];

/// Position and yaw of light slot `j` on square side `i`, relative to the center.
fn light_slot(side: usize, slot: usize) -> (Vec2, f32) {
    let half = LIGHT_SQUARE_SIZE / 2.0;
    let along = slot as f32 * LIGHT_SPACING;
    match side {
        0 => (Vec2::new(-half + along, -half), 0.0),
        1 => (Vec2::new(half, -half + along), 90.0),
        2 => (Vec2::new(half - along, half), 180.0),
        _ => (Vec2::new(-half, half - along), 270.0),
    }
}

impl Composer<'_> {
    pub(super) fn props(&mut self) -> Result<()> {
        let well = self.at(WELL_OFFSET);
        self.place(Placeable::Prop(Prop::Well), well, 0.0, "Town_Center_Well")?;

        self.square_lights()?;

        // Forge props first, then the randomly strewn tavern barrels ahead of the chest.
        let (forge_anchor, forge_props) = PROP_GROUPS[0];
        self.place_sites(forge_anchor, forge_props)?;
        self.tavern_barrels()?;
        for &(anchor, sites) in &PROP_GROUPS[1..] {
            self.place_sites(anchor, sites)?;
        }
        Ok(())
    }

    fn square_lights(&mut self) -> Result<()> {
        for side in 0..4 {
            for slot in (0..LIGHT_SLOTS).filter(|&j| j != LIGHT_SLOTS / 2) {
                let (offset, yaw) = light_slot(side, slot);
                // Lamppost first, street light last on every side.
                let prop = if slot == 0 {
                    Prop::Lamppost
                } else {
                    Prop::StreetLight
                };
                let label = format!("Square_Light_{side}_{slot}");
                let position = self.at(offset);
                self.place(Placeable::Prop(prop), position, yaw, &label)?;
            }
        }
        Ok(())
    }

    fn tavern_barrels(&mut self) -> Result<()> {
        for i in 0..TAVERN_BARRELS {
            let offset = Vec2::new(
                rand_signed(&mut *self.rng, TAVERN_BARREL_SPREAD),
                rand_signed(&mut *self.rng, TAVERN_BARREL_SPREAD),
            );
            let yaw = rand01(&mut *self.rng) * 360.0;
            let position = self.at(TAVERN_ANCHOR + offset);
            let label = format!("Tavern_Barrel_{i}");
            self.place(Placeable::Prop(Prop::Barrel), position, yaw, &label)?;
        }
        Ok(())
    }

    fn place_sites(&mut self, anchor: Vec2, sites: &[PropSite]) -> Result<()> {
        for site in sites {
            let position = self.at(anchor + site.offset);
            self.place(Placeable::Prop(site.prop), position, site.yaw, site.label)?;
        }
        Ok(())
    }
}
