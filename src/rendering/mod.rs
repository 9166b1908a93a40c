//! # Rendering Module
//!
//! Plain-text views of the game for terminals and logs.
//!
//! The engine itself never draws anything. These helpers turn the map, the
//! active team's vision and the rosters into strings a front end can print.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
