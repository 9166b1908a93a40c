//! # Terrain
//!
//! Per-tile movement and visibility properties keyed by a display symbol.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Properties of a single map tile.
///
/// Terrain is a plain value: a map edit replaces the terrain of a cell
/// instead of mutating it.
///
/// # Examples
///
/// ```
/// use tactica::Terrain;
///
/// let wall = Terrain::with_properties('#', false, false, false, false);
/// assert!(!wall.can_see_through());
/// assert_eq!(wall.movement_cost(), 1);
///
/// let swamp = Terrain::with_cost('-', 3);
/// assert!(swamp.can_move_to());
/// assert_eq!(swamp.movement_cost(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TerrainFields")]
pub struct Terrain {
    symbol: char,
    movement_cost: u32,
    can_shoot_through: bool,
    can_see_through: bool,
    can_walk_through: bool,
    can_build_on: bool,
}

impl Terrain {
    /// Open terrain: cost 1, every property set.
    pub fn new(symbol: char) -> Self {
        Self {
            symbol,
            movement_cost: 1,
            can_shoot_through: true,
            can_see_through: true,
            can_walk_through: true,
            can_build_on: true,
        }
    }

    /// Terrain with explicit properties and a movement cost of 1.
    pub fn with_properties(
        symbol: char,
        can_shoot: bool,
        can_see: bool,
        can_walk: bool,
        can_build: bool,
    ) -> Self {
        Self {
            symbol,
            movement_cost: 1,
            can_shoot_through: can_shoot,
            can_see_through: can_see,
            can_walk_through: can_walk,
            can_build_on: can_build,
        }
    }

    /// Open terrain with a custom movement cost. Costs below 1 are raised to 1.
    pub fn with_cost(symbol: char, movement_cost: u32) -> Self {
        Self {
            movement_cost: movement_cost.max(1),
            ..Self::new(symbol)
        }
    }

    /// Returns a copy of this terrain with a different movement cost.
    pub fn and_cost(self, movement_cost: u32) -> Self {
        Self {
            movement_cost: movement_cost.max(1),
            ..self
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn movement_cost(&self) -> u32 {
        self.movement_cost
    }

    pub fn can_move_to(&self) -> bool {
        self.can_walk_through
    }

    pub fn can_see_through(&self) -> bool {
        self.can_see_through
    }

    pub fn can_shoot_through(&self) -> bool {
        self.can_shoot_through
    }

    pub fn can_build_on(&self) -> bool {
        self.can_build_on
    }
}

/// Serialized shape of [`Terrain`]; converting clamps the movement cost.
#[derive(Deserialize)]
struct TerrainFields {
    symbol: char,
    movement_cost: u32,
    can_shoot_through: bool,
    can_see_through: bool,
    can_walk_through: bool,
    can_build_on: bool,
}

impl From<TerrainFields> for Terrain {
    fn from(fields: TerrainFields) -> Self {
        Self {
            symbol: fields.symbol,
            movement_cost: fields.movement_cost.max(1),
            can_shoot_through: fields.can_shoot_through,
            can_see_through: fields.can_see_through,
            can_walk_through: fields.can_walk_through,
            can_build_on: fields.can_build_on,
        }
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new('.')
    }
}

/// Lookup table from display symbol to terrain.
///
/// Scenario loaders hand the engine a grid of symbols; the palette decides
/// what each symbol means.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainPalette {
    terrains: HashMap<char, Terrain>,
}

impl TerrainPalette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in terrain set.
    ///
    /// | symbol | terrain | cost | walk | see | shoot | build |
    /// |--------|---------|------|------|-----|-------|-------|
    /// | `.`    | plain   | 1    | yes  | yes | yes   | yes   |
    /// | `#`    | wall    | 1    | no   | no  | no    | no    |
    /// | `-`    | swamp   | 3    | yes  | yes | yes   | yes   |
    /// | `~`    | water   | 1    | no   | yes | yes   | no    |
    /// | `^`    | forest  | 2    | yes  | no  | yes   | no    |
    pub fn standard() -> Self {
        let mut palette = Self::new();
        palette.insert(Terrain::new('.'));
        palette.insert(Terrain::with_properties('#', false, false, false, false));
        palette.insert(Terrain::with_cost('-', 3));
        palette.insert(Terrain::with_properties('~', true, true, false, false));
        palette.insert(Terrain::with_properties('^', true, false, true, false).and_cost(2));
        palette
    }

    /// Registers a terrain under its own symbol, replacing any previous entry.
    pub fn insert(&mut self, terrain: Terrain) {
        self.terrains.insert(terrain.symbol(), terrain);
    }

    /// Looks up the terrain for a symbol.
    pub fn get(&self, symbol: char) -> Option<Terrain> {
        self.terrains.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.terrains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terrains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terrain_is_open() {
        let plain = Terrain::default();
        assert_eq!(plain.symbol(), '.');
        assert_eq!(plain.movement_cost(), 1);
        assert!(plain.can_move_to());
        assert!(plain.can_see_through());
        assert!(plain.can_shoot_through());
        assert!(plain.can_build_on());
    }

    #[test]
    fn test_zero_cost_is_clamped() {
        assert_eq!(Terrain::with_cost('x', 0).movement_cost(), 1);
    }

    #[test]
    fn test_deserialized_zero_cost_is_clamped() {
        let json = r#"{"symbol":"x","movement_cost":0,"can_shoot_through":true,
            "can_see_through":true,"can_walk_through":true,"can_build_on":false}"#;
        let terrain: Terrain = serde_json::from_str(json).unwrap();
        assert_eq!(terrain.movement_cost(), 1);
        assert!(!terrain.can_build_on());

        let swamp = Terrain::with_cost('-', 3);
        let back: Terrain = serde_json::from_str(&serde_json::to_string(&swamp).unwrap()).unwrap();
        assert_eq!(back, swamp);
    }

    #[test]
    fn test_standard_palette() {
        let palette = TerrainPalette::standard();
        assert_eq!(palette.len(), 5);

        let water = palette.get('~').unwrap();
        assert!(!water.can_move_to());
        assert!(water.can_see_through());

        let forest = palette.get('^').unwrap();
        assert_eq!(forest.movement_cost(), 2);
        assert!(!forest.can_see_through());
        assert!(forest.can_shoot_through());

        assert!(palette.get('?').is_none());
    }
}
