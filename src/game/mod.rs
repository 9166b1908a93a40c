//! # Game Module
//!
//! Core rules: terrain, the map, units and their items, actions, teams and
//! the turn state machine.
//!
//! This module contains the fundamental building blocks of Tactica:
//! - Terrain and map queries (vision, movement and attack reach)
//! - Items and the actions they produce
//! - Units, teams and their per-turn action logs
//! - The game state machine and the enemy AI

pub mod actions;
pub mod enemy_ai;
pub mod events;
pub mod items;
pub mod map;
pub mod state;
pub mod team;
pub mod terrain;
pub mod units;

pub use actions::*;
pub use enemy_ai::*;
pub use events::*;
pub use items::*;
pub use map::*;
pub use state::*;
pub use team::*;
pub use terrain::*;
pub use units::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the map grid.
///
/// `x` is the column and `y` the row. Coordinates are unsigned, so anything
/// left of or above the map simply cannot be expressed; the right and
/// bottom edges are checked by [`Map::are_valid_coords`].
///
/// # Examples
///
/// ```
/// use tactica::Coord;
///
/// let coord = Coord::new(3, 4);
/// assert_eq!(coord.x, 3);
/// assert_eq!(coord.y, 4);
/// assert_eq!(coord.cardinal_neighbors().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, exact in integers. Saturates instead of
    /// overflowing for far-apart coordinates.
    pub fn distance_squared(self, other: Coord) -> usize {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Euclidean distance to another coordinate.
    pub fn euclidean_distance(self, other: Coord) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Returns true if `other` lies inside a circle of `range` around self.
    pub fn within_range(self, other: Coord, range: u32) -> bool {
        let range = range as usize;
        self.distance_squared(other) <= range.saturating_mul(range)
    }

    /// Returns the up to 4 cardinal neighbours that do not underflow.
    ///
    /// The right and bottom neighbours are always returned; callers filter
    /// them against the map bounds.
    pub fn cardinal_neighbors(self) -> Vec<Coord> {
        let mut neighbors = Vec::with_capacity(4);
        if self.y > 0 {
            neighbors.push(Coord::new(self.x, self.y - 1)); // N
        }
        if self.x > 0 {
            neighbors.push(Coord::new(self.x - 1, self.y)); // W
        }
        neighbors.push(Coord::new(self.x + 1, self.y)); // E
        neighbors.push(Coord::new(self.x, self.y + 1)); // S
        neighbors
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identifier of a unit within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle into an [`ItemCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub usize);

/// Hands out unit identifiers in increasing order.
///
/// Owned by the [`Game`], so every game numbers its units independently and
/// tests can start from a known value.
///
/// # Examples
///
/// ```
/// use tactica::{IdAllocator, UnitId};
///
/// let mut ids = IdAllocator::starting_at(10);
/// assert_eq!(ids.allocate(), UnitId(10));
/// assert_eq!(ids.allocate(), UnitId(11));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator starting from zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator whose first identifier is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Returns the next unused identifier.
    pub fn allocate(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next += 1;
        id
    }

    /// Identifier the next call to `allocate` will return.
    pub fn peek(&self) -> UnitId {
        UnitId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_ordering_is_column_major() {
        let mut coords = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        coords.sort();
        assert_eq!(
            coords,
            vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]
        );
    }

    #[test]
    fn test_coord_distance() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(a.euclidean_distance(b), 5.0);
        assert!(a.within_range(b, 5));
        assert!(!a.within_range(b, 4));
    }

    #[test]
    fn test_far_apart_distances_saturate() {
        let origin = Coord::new(0, 0);
        let far = Coord::new(usize::MAX / 2, usize::MAX / 2);
        assert_eq!(origin.distance_squared(far), usize::MAX);
        assert!(!origin.within_range(far, u32::MAX));
        assert!(origin.within_range(Coord::new(3, 4), u32::MAX));
    }

    #[test]
    fn test_cardinal_neighbors_at_origin() {
        let neighbors = Coord::new(0, 0).cardinal_neighbors();
        assert_eq!(neighbors, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_cardinal_neighbors_interior() {
        let neighbors = Coord::new(5, 5).cardinal_neighbors();
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.contains(&Coord::new(5, 4)));
        assert!(neighbors.contains(&Coord::new(4, 5)));
        assert!(!neighbors.contains(&Coord::new(4, 4)));
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let first = ids.allocate();
        let second = ids.allocate();
        assert!(second > first);
        assert_eq!(ids.peek(), UnitId(2));
    }
}
