//! # Teams
//!
//! A team owns its roster of units and the log of actions submitted during
//! its current turn.

use crate::{Action, TeamId, Unit, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A side in the battle.
///
/// The action log is appended at the back. Undo pops the back (LIFO) and
/// the end-of-turn flush consumes the front (FIFO).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    units: Vec<Unit>,
    actions: VecDeque<Action>,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            units: Vec::new(),
            actions: VecDeque::new(),
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    /// Takes ownership of a unit. It stays on this team for its whole life.
    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub fn get_unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    pub fn get_unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id() == id)
    }

    pub fn has_unit(&self, id: UnitId) -> bool {
        self.get_unit(id).is_some()
    }

    pub fn get_alive_units(&self) -> Vec<&Unit> {
        self.units.iter().filter(|unit| !unit.is_dead()).collect()
    }

    /// True when no unit has hit points left. An empty team counts as dead.
    pub fn all_dead(&self) -> bool {
        self.units.iter().all(Unit::is_dead)
    }

    pub fn team_size(&self) -> usize {
        self.units.len()
    }

    pub fn enqueue_action(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Removes the most recently submitted action.
    pub fn undo_action(&mut self) -> Option<Action> {
        self.actions.pop_back()
    }

    /// Removes the oldest submitted action.
    pub fn dequeue_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn pending_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn clear_action_flags(&mut self) {
        for unit in &mut self.units {
            unit.clear_action_flags();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, RulesConfig};

    fn step(unit: u32, x: usize) -> Action {
        Action::movement(UnitId(unit), Coord::new(0, 0), Coord::new(x, 0))
    }

    #[test]
    fn test_log_is_lifo_for_undo_and_fifo_for_flush() {
        let mut team = Team::new(TeamId(1));
        team.enqueue_action(step(1, 1));
        team.enqueue_action(step(1, 2));
        team.enqueue_action(step(1, 3));

        assert_eq!(team.undo_action().unwrap().target(), Coord::new(3, 0));
        assert_eq!(team.dequeue_action().unwrap().target(), Coord::new(1, 0));
        assert_eq!(team.dequeue_action().unwrap().target(), Coord::new(2, 0));
        assert!(team.dequeue_action().is_none());
        assert!(team.undo_action().is_none());
    }

    #[test]
    fn test_alive_units_and_all_dead() {
        let config = RulesConfig::default();
        let mut team = Team::new(TeamId(1));
        assert!(team.all_dead());

        team.add_unit(Unit::new(UnitId(1), "A", &config));
        team.add_unit(Unit::new(UnitId(2), "B", &config));
        assert!(!team.all_dead());

        team.get_unit_mut(UnitId(1)).unwrap().take_damage(500);
        assert_eq!(team.get_alive_units().len(), 1);
        assert!(!team.all_dead());

        team.get_unit_mut(UnitId(2)).unwrap().take_damage(500);
        assert!(team.all_dead());
        assert_eq!(team.team_size(), 2);
    }
}
