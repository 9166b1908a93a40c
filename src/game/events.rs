//! # Game Events
//!
//! Entries of the game's append-only event log. Each event renders as one
//! human-readable line.

use crate::{Coord, TeamId, UnitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    TurnStarted {
        team: TeamId,
    },
    UnitMoved {
        unit: UnitId,
        from: Coord,
        to: Coord,
    },
    AttackHit {
        attacker: UnitId,
        target: UnitId,
        damage: i32,
    },
    AttackMissed {
        attacker: UnitId,
        target: Coord,
    },
    UnitHealed {
        healer: UnitId,
        target: UnitId,
        amount: i32,
    },
    StructureBuilt {
        builder: UnitId,
        at: Coord,
        symbol: char,
    },
    UnitDied {
        unit: UnitId,
    },
    ActionUndone {
        unit: UnitId,
    },
    GameOver {
        winner: Option<TeamId>,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted => write!(f, "Initiating game"),
            GameEvent::TurnStarted { team } => write!(f, "Team {} turn", team),
            GameEvent::UnitMoved { unit, from, to } => {
                write!(f, "Unit {} moved from {} to {}", unit, from, to)
            }
            GameEvent::AttackHit {
                attacker,
                target,
                damage,
            } => write!(f, "Unit {} hit unit {} for {} damage", attacker, target, damage),
            GameEvent::AttackMissed { attacker, target } => {
                write!(f, "Unit {} missed at {}", attacker, target)
            }
            GameEvent::UnitHealed {
                healer,
                target,
                amount,
            } => write!(f, "Unit {} healed unit {} by {}", healer, target, amount),
            GameEvent::StructureBuilt {
                builder,
                at,
                symbol,
            } => write!(f, "Unit {} built '{}' at {}", builder, symbol, at),
            GameEvent::UnitDied { unit } => write!(f, "Unit {} died", unit),
            GameEvent::ActionUndone { unit } => write!(f, "Undid last action of unit {}", unit),
            GameEvent::GameOver { winner: Some(team) } => write!(f, "Team {} wins", team),
            GameEvent::GameOver { winner: None } => write!(f, "Game ends in a draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        assert_eq!(
            GameEvent::TurnStarted { team: TeamId(2) }.to_string(),
            "Team 2 turn"
        );
        assert_eq!(
            GameEvent::UnitMoved {
                unit: UnitId(4),
                from: Coord::new(0, 0),
                to: Coord::new(1, 2),
            }
            .to_string(),
            "Unit #4 moved from (0, 0) to (1, 2)"
        );
        assert_eq!(
            GameEvent::GameOver { winner: None }.to_string(),
            "Game ends in a draw"
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::AttackHit {
            attacker: UnitId(1),
            target: UnitId(2),
            damage: 30,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
