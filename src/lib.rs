//! # Tactica
//!
//! Rules engine for a turn-based grid tactics game.
//!
//! ## Architecture Overview
//!
//! Teams of units share a grid map and take turns issuing movement and
//! item actions. The engine tracks whose turn it is, what each unit may
//! still do this turn, what the active team can see under fog of war, and
//! how to take back an action before the turn is over.
//!
//! - **Map**: terrain grid, unit occupancy, vision and reachability sets
//! - **Items and Actions**: closed enums that execute and undo themselves
//! - **Teams**: unit rosters plus a per-turn action log
//! - **Game**: the turn state machine tying everything together
//! - **Enemy AI**: a turn policy that plays a whole team's turn
//!
//! Rendering, widget toolkits, scenario files and the window event loop live
//! outside this crate and talk to it through [`Game`] and
//! [`SelectionController`].

pub mod config;
pub mod game;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Tactica rules engine.
///
/// Only setup and loading paths produce errors. Rejected moves, empty undo
/// logs and similar player-triggered conditions are reported as `false` or
/// `None` by the game operations themselves.
#[derive(thiserror::Error, Debug)]
pub enum TacticaError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Map layout could not be built
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// A unit could not be placed on the map
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    /// Referenced team does not exist
    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    /// Rules configuration is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Tactica codebase.
pub type TacticaResult<T> = Result<T, TacticaError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
