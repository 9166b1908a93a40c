//! # Utilities Module
//!
//! Grid geometry and pathfinding helpers shared by the map and the AI.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
