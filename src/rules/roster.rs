//! Named type handles resolved once per agent.
//!
//! The decision rules talk about "cities", "settlers" and so on. Those names
//! are looked up in the ruleset when an agent is built; a name the ruleset
//! lacks is reported and the rules depending on it stay silent for the
//! rest of the game.

use tracing::warn;

use super::bible::{Bible, TileType, UnitType};

/// Tile and unit handles used by the decision rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roster {
    pub city: Option<TileType>,
    pub town: Option<TileType>,
    pub farm: Option<TileType>,
    pub soil: Option<TileType>,
    pub barracks: Option<TileType>,
    pub industry: Option<TileType>,
    pub airfield: Option<TileType>,
    pub settler: Option<UnitType>,
    pub militia: Option<UnitType>,
    pub rifleman: Option<UnitType>,
    pub gunner: Option<UnitType>,
    pub tank: Option<UnitType>,
    pub zeppelin: Option<UnitType>,
}

impl Roster {
    /// Resolves every name against the ruleset, warning about missing ones.
    pub fn resolve(bible: &Bible) -> Roster {
        let tile = |name: &str| {
            let typ = bible.tile_type(name);
            if typ.is_none() {
                warn!(ruleset = %bible.name, tile = name, "tile type missing from ruleset");
            }
            typ
        };
        let unit = |name: &str| {
            let typ = bible.unit_type(name);
            if typ.is_none() {
                warn!(ruleset = %bible.name, unit = name, "unit type missing from ruleset");
            }
            typ
        };

        Roster {
            city: tile("city"),
            town: tile("town"),
            farm: tile("farm"),
            soil: tile("soil"),
            barracks: tile("barracks"),
            industry: tile("industry"),
            airfield: tile("airfield"),
            settler: unit("settler"),
            militia: unit("militia"),
            rifleman: unit("rifleman"),
            gunner: unit("gunner"),
            tank: unit("tank"),
            zeppelin: unit("zeppelin"),
        }
    }

    /// Tile types that count as settlements: cities and towns.
    pub fn settlements(&self) -> impl Iterator<Item = TileType> {
        [self.city, self.town].into_iter().flatten()
    }
}
