use glam::Vec2;

use crate::error::Result;
use crate::placement::request::PlacementRequest;
use crate::town::catalog::{Building, Placeable};
use crate::town::composer::Composer;

struct Site {
    label: &'static str,
    building: Building,
    offset: Vec2,
    yaw: f32,
}

const fn site(label: &'static str, building: Building, x: f32, y: f32, yaw: f32) -> Site {
    Site {
        label,
        building,
        offset: Vec2::new(x, y),
        yaw,
    }
}

const SITES: [Site; 18] = [
    site("Central_TownHall", Building::TownHall, 0.0, 0.0, 0.0),
    site("Tavern", Building::Tavern, 800.0, 600.0, 135.0),
    // North district
    site("North_House_1", Building::SmallHouse, -1800.0, -1900.0, 45.0),
    site("North_BakerHouse", Building::BakerHouse, -2100.0, -2200.0, 30.0),
    site("North_House_2", Building::SmallHouse, -1300.0, -2000.0, 15.0),
    // East district
    site("East_LargeHouse", Building::LargeHouse, 2200.0, -1300.0, 270.0),
    site("East_House_1", Building::SmallHouse, 2400.0, 1200.0, 300.0),
    site("East_House_2", Building::SmallHouse, 1900.0, -1700.0, 315.0),
    // South district
    site("South_LargeHouse", Building::LargeHouse, 1300.0, 2100.0, 180.0),
    site("South_House_1", Building::SmallHouse, -1200.0, 1950.0, 135.0),
    // West district
    site("West_LargeHouse", Building::LargeHouse, -2000.0, 1100.0, 90.0),
    site("West_House_1", Building::SmallHouse, -2300.0, 1500.0, 45.0),
    // Outskirts
    site("North_Tower", Building::Tower, -3000.0, -2900.0, 45.0),
    site("WitchHouse", Building::WitchHouse, 3000.0, 2900.0, 215.0),
    site("Watermill", Building::Mill, 2900.0, -3000.0, 270.0),
    site("Woodmill", Building::Woodmill, -2900.0, -2400.0, 135.0),
    site("Forge", Building::Forge, 1600.0, -1500.0, 330.0),
    site("Mine", Building::Mine, -2900.0, 2900.0, 135.0),
];

/// Structures spawned on top of a placed primary: (primary label, structure, label).
const ATTACHMENTS: [(&str, Building, &str); 2] = [
    ("Watermill", Building::MillWings, "Watermill_Wings"),
    ("Woodmill", Building::WoodmillSaw, "Woodmill_Saw"),
];

impl Composer<'_> {
    pub(super) fn buildings(&mut self) -> Result<()> {
        for site in &SITES {
            let position = self.at(site.offset);
            let placeable = Placeable::Building(site.building);
            let Some(handle) = self.place(placeable, position, site.yaw, site.label)? else {
                continue;
            };

            let Some(&(_, building, label)) =
                ATTACHMENTS.iter().find(|(primary, _, _)| *primary == site.label)
            else {
                continue;
            };
            let Some(anchor) = self.index.find(handle).map(|r| r.footprint.center) else {
                continue;
            };
            let Some(mesh) = self.mesh(Placeable::Building(building), label) else {
                continue;
            };
            let request = PlacementRequest::new(mesh, anchor, label).with_yaw(site.yaw);
            self.placer.attach(&request)?;
        }
        Ok(())
    }
}
