//! # Map Module
//!
//! Terrain grid, unit occupancy index and the spatial queries built on top
//! of them: vision, movement reach and attack reach.

use crate::utils::{line_is_clear, reachable_within};
use crate::{Coord, TacticaError, TacticaResult, Terrain, TerrainPalette, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Fixed-size grid of terrain plus the location of every unit on it.
///
/// The map never owns units. It only records which [`UnitId`] stands on
/// which cell; at most one unit may occupy a cell.
///
/// # Examples
///
/// ```
/// use tactica::{Coord, Map, UnitId};
///
/// let mut map = Map::new(10, 8);
/// assert!(map.add_unit(UnitId(1), Coord::new(2, 3)));
/// assert!(!map.add_unit(UnitId(2), Coord::new(2, 3)));
/// assert_eq!(map.get_unit(Coord::new(2, 3)), Some(UnitId(1)));
/// assert_eq!(map.get_unit_location(UnitId(1)), Some(Coord::new(2, 3)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    width: usize,
    height: usize,
    /// Terrain in row-major order
    tiles: Vec<Terrain>,
    /// Spatial index mapping cells to the unit standing there
    occupants: HashMap<Coord, UnitId>,
    /// Reverse index mapping units to their cell
    locations: HashMap<UnitId, Coord>,
}

impl Map {
    /// Creates a map filled with open terrain.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Terrain::default())
    }

    /// Creates a map where every cell holds `terrain`.
    pub fn filled(width: usize, height: usize, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            tiles: vec![terrain; width * height],
            occupants: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    /// Builds a map from rows of terrain symbols.
    ///
    /// Every row must have the same length and every symbol must be known
    /// to the palette.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactica::{Coord, Map, TerrainPalette};
    ///
    /// let map = Map::from_rows(&["..#", ".-."], &TerrainPalette::standard()).unwrap();
    /// assert_eq!(map.width(), 3);
    /// assert_eq!(map.height(), 2);
    /// assert_eq!(map.get_terrain(Coord::new(2, 0)).unwrap().symbol(), '#');
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S], palette: &TerrainPalette) -> TacticaResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(TacticaError::InvalidMap("map has no cells".to_string()));
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(TacticaError::InvalidMap(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let terrain = palette.get(symbol).ok_or_else(|| {
                    TacticaError::InvalidMap(format!(
                        "unknown terrain symbol '{}' at ({}, {})",
                        symbol, x, y
                    ))
                })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
            occupants: HashMap::new(),
            locations: HashMap::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the coordinate lies inside `[0, width) x [0, height)`.
    pub fn are_valid_coords(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.are_valid_coords(coord)
            .then(|| coord.y * self.width + coord.x)
    }

    /// Gets the terrain at a coordinate.
    pub fn get_terrain(&self, coord: Coord) -> Option<&Terrain> {
        self.index(coord).map(|index| &self.tiles[index])
    }

    /// Replaces the terrain at a coordinate and returns the old terrain.
    ///
    /// Cached visibility is not refreshed; the caller recomputes it.
    pub fn update_terrain(&mut self, coord: Coord, terrain: Terrain) -> Option<Terrain> {
        let index = self.index(coord)?;
        Some(std::mem::replace(&mut self.tiles[index], terrain))
    }

    /// Returns true if a unit stands on the coordinate.
    pub fn has_unit(&self, coord: Coord) -> bool {
        self.occupants.contains_key(&coord)
    }

    /// Gets the unit standing on a coordinate.
    pub fn get_unit(&self, coord: Coord) -> Option<UnitId> {
        self.occupants.get(&coord).copied()
    }

    /// Gets the coordinate a unit stands on.
    pub fn get_unit_location(&self, unit: UnitId) -> Option<Coord> {
        self.locations.get(&unit).copied()
    }

    /// Places a unit on an empty, in-bounds cell.
    ///
    /// Returns false if the cell is outside the map, already occupied, or
    /// the unit is already placed somewhere else.
    pub fn add_unit(&mut self, unit: UnitId, coord: Coord) -> bool {
        if !self.are_valid_coords(coord)
            || self.has_unit(coord)
            || self.locations.contains_key(&unit)
        {
            return false;
        }
        self.occupants.insert(coord, unit);
        self.locations.insert(unit, coord);
        true
    }

    /// Takes a unit off the map and returns where it stood.
    pub fn remove_unit(&mut self, unit: UnitId) -> Option<Coord> {
        let coord = self.locations.remove(&unit)?;
        self.occupants.remove(&coord);
        Some(coord)
    }

    /// Moves a placed unit to another empty, in-bounds cell.
    ///
    /// Terrain is not checked here; reachability is the caller's concern.
    pub fn move_unit(&mut self, unit: UnitId, to: Coord) -> bool {
        let Some(from) = self.get_unit_location(unit) else {
            return false;
        };
        if from == to {
            return true;
        }
        if !self.are_valid_coords(to) || self.has_unit(to) {
            return false;
        }
        self.occupants.remove(&from);
        self.occupants.insert(to, unit);
        self.locations.insert(unit, to);
        true
    }

    /// Returns true if a unit could stand on the cell: in bounds, walkable
    /// and unoccupied.
    pub fn can_move_to_coords(&self, coord: Coord) -> bool {
        self.get_terrain(coord)
            .is_some_and(|terrain| terrain.can_move_to())
            && !self.has_unit(coord)
    }

    /// Iterates over all placed units and their cells.
    pub fn placed_units(&self) -> impl Iterator<Item = (UnitId, Coord)> + '_ {
        self.locations.iter().map(|(&unit, &coord)| (unit, coord))
    }

    /// All in-bounds cells within a Euclidean radius of `origin`.
    fn cells_in_radius(&self, origin: Coord, range: u32) -> Vec<Coord> {
        let reach = range as usize;
        let min_x = origin.x.saturating_sub(reach);
        let min_y = origin.y.saturating_sub(reach);
        let max_x = (origin.x + reach).min(self.width.saturating_sub(1));
        let max_y = (origin.y + reach).min(self.height.saturating_sub(1));

        let mut cells = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let coord = Coord::new(x, y);
                if origin.within_range(coord, range) {
                    cells.push(coord);
                }
            }
        }
        cells
    }

    /// Cells a unit standing on `origin` can see within `range`.
    ///
    /// The radius is Euclidean. A cell is visible if every cell strictly
    /// between it and the origin is see-through; the cell itself may be
    /// opaque, so walls are seen but not seen past. The origin is always
    /// visible. An out-of-bounds origin sees nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactica::{Coord, Map, TerrainPalette};
    ///
    /// let map = Map::from_rows(&[".#.."], &TerrainPalette::standard()).unwrap();
    /// let seen = map.tiles_unit_sees(Coord::new(0, 0), 5);
    /// assert!(seen.contains(&Coord::new(1, 0)));
    /// assert!(!seen.contains(&Coord::new(2, 0)));
    /// ```
    pub fn tiles_unit_sees(&self, origin: Coord, range: u32) -> Vec<Coord> {
        if !self.are_valid_coords(origin) {
            return Vec::new();
        }
        self.cells_in_radius(origin, range)
            .into_iter()
            .filter(|&target| {
                line_is_clear(origin, target, |cell| {
                    self.get_terrain(cell)
                        .is_some_and(|terrain| terrain.can_see_through())
                })
            })
            .collect()
    }

    /// Cells a unit standing on `origin` can move to with `budget`
    /// movement points.
    ///
    /// Uniform-cost search over walkable, unoccupied cells, where entering a
    /// cell costs its terrain's movement cost. Occupied cells block
    /// traversal and are never destinations. The origin is not included.
    pub fn possible_tiles_to_move_to(&self, origin: Coord, budget: u32) -> Vec<Coord> {
        self.movement_costs(origin, budget)
            .into_iter()
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Like [`Map::possible_tiles_to_move_to`] but keeps the cheapest cost
    /// of reaching each cell.
    pub fn movement_costs(&self, origin: Coord, budget: u32) -> Vec<(Coord, u32)> {
        if !self.are_valid_coords(origin) {
            return Vec::new();
        }
        reachable_within(origin, budget, |cell| self.entry_cost(cell))
    }

    /// Cost of stepping onto a cell, or `None` if it cannot be entered.
    pub(crate) fn entry_cost(&self, cell: Coord) -> Option<u32> {
        self.can_move_to_coords(cell)
            .then(|| self.get_terrain(cell).map(|terrain| terrain.movement_cost()))
            .flatten()
    }

    /// Cells a unit standing on `origin` can target within `range`.
    ///
    /// Starts from the visible cells and additionally requires the line of
    /// fire to pass only through shoot-through terrain. The origin itself
    /// is included so self-targeted items work.
    pub fn tiles_can_shoot_on(&self, origin: Coord, range: u32) -> Vec<Coord> {
        self.tiles_unit_sees(origin, range)
            .into_iter()
            .filter(|&target| {
                line_is_clear(origin, target, |cell| {
                    self.get_terrain(cell)
                        .is_some_and(|terrain| terrain.can_shoot_through())
                })
            })
            .collect()
    }
}

impl fmt::Display for Map {
    /// Renders the terrain symbols, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|terrain| terrain.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
