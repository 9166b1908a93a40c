//! # Command Definitions
//!
//! Serializable player commands, so any front end (a terminal prompt, a
//! GUI, a replay file) can drive a [`crate::SelectionController`].

use crate::{Coord, ItemId, TacticaResult};
use serde::{Deserialize, Serialize};

/// One player request against the active team.
///
/// # Examples
///
/// ```
/// use tactica::{Coord, PlayerCommand};
///
/// let command = PlayerCommand::from_json(r#"{"command":"move","to":{"x":2,"y":3}}"#).unwrap();
/// assert_eq!(command, PlayerCommand::Move { to: Coord::new(2, 3) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Select the unit standing on a cell
    Select { at: Coord },
    /// Move the selected unit
    Move { to: Coord },
    /// Use one of the selected unit's items on a cell
    UseItem { item: ItemId, target: Coord },
    /// Take back the active team's last action
    Undo,
    /// End the active team's turn
    EndTurn,
    /// Select the next living unit of the active team
    Cycle,
    Deselect,
}

impl PlayerCommand {
    pub fn from_json(json: &str) -> TacticaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TacticaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_variants_parse() {
        assert_eq!(
            PlayerCommand::from_json(r#"{"command":"end_turn"}"#).unwrap(),
            PlayerCommand::EndTurn
        );
        assert!(PlayerCommand::from_json(r#"{"command":"fly"}"#).is_err());
    }

    #[test]
    fn test_use_item_serialization() {
        let command = PlayerCommand::UseItem {
            item: ItemId(2),
            target: Coord::new(4, 1),
        };
        let json = command.to_json().unwrap();
        assert!(json.contains("\"use_item\""));
        assert_eq!(PlayerCommand::from_json(&json).unwrap(), command);
    }
}
