//! # Enemy AI
//!
//! Policies that play a whole team's turn. A policy submits its actions
//! through [`Game::add_action`] like a human player, so it is bound by the
//! same per-unit limits.

use crate::utils::find_path;
use crate::{Action, Coord, Game, TeamId, UnitId};
use log::debug;
use std::fmt;

/// Something that can play every turn of one team.
pub trait TurnPolicy: fmt::Debug {
    /// The team this policy plays.
    fn team_id(&self) -> TeamId;

    /// Decides and submits the actions of every living unit of the team.
    fn generate_whole_teams_turns(&mut self, game: &mut Game);
}

/// Straightforward skirmish AI.
///
/// Each living unit, in roster order:
/// 1. heals itself when below half health and carrying a healing item
/// 2. otherwise shoots the nearest enemy if a weapon reaches it
/// 3. otherwise walks along the shortest path toward that enemy as far as
///    its movement allows, then tries to shoot again
#[derive(Debug, Clone)]
pub struct EnemyAi {
    team_id: TeamId,
}

impl EnemyAi {
    pub fn new(team_id: TeamId) -> Self {
        Self { team_id }
    }

    fn play_unit(&self, game: &mut Game, unit: UnitId) {
        if self.try_heal_self(game, unit) || self.try_attack(game, unit) {
            return;
        }
        if self.advance(game, unit) {
            self.try_attack(game, unit);
        }
    }

    /// Nearest living enemy by Euclidean distance, ties broken by coordinate.
    fn nearest_enemy(&self, game: &Game, origin: Coord) -> Option<Coord> {
        game.teams()
            .iter()
            .filter(|team| team.id() != self.team_id)
            .flat_map(|team| team.get_alive_units())
            .filter_map(|enemy| game.get_unit_location(enemy.id()))
            .min_by_key(|&location| (origin.distance_squared(location), location))
    }

    fn try_heal_self(&self, game: &mut Game, unit: UnitId) -> bool {
        let Some(origin) = game.get_unit_location(unit) else {
            return false;
        };
        let action = game.get_unit(unit).and_then(|this| {
            if this.hp() * 2 >= this.max_hp() {
                return None;
            }
            let (item, _) = this.healing_items(game.items()).into_iter().next()?;
            game.items().get(item)?.get_action(origin, unit, origin)
        });

        match action {
            Some(action) => {
                debug!("Unit {} patches itself up", unit);
                game.add_action(action, self.team_id)
            }
            None => false,
        }
    }

    fn try_attack(&self, game: &mut Game, unit: UnitId) -> bool {
        let Some(origin) = game.get_unit_location(unit) else {
            return false;
        };
        let Some(target) = self.nearest_enemy(game, origin) else {
            return false;
        };
        let in_sight = game
            .map()
            .tiles_can_shoot_on(origin, game.config().visual_range)
            .contains(&target);
        if !in_sight {
            return false;
        }

        let action = game.get_unit(unit).and_then(|this| {
            let (weapon, _) = this
                .weapons(game.items())
                .into_iter()
                .filter(|(_, weapon)| origin.within_range(target, weapon.range))
                .max_by_key(|(_, weapon)| weapon.range)?;
            game.items().get(weapon)?.get_action(target, unit, origin)
        });

        match action {
            Some(action) => {
                debug!("Unit {} fires at {}", unit, target);
                game.add_action(action, self.team_id)
            }
            None => false,
        }
    }

    /// Moves toward the nearest enemy. Returns true if a move was submitted.
    fn advance(&self, game: &mut Game, unit: UnitId) -> bool {
        let Some(origin) = game.get_unit_location(unit) else {
            return false;
        };
        let Some(enemy) = self.nearest_enemy(game, origin) else {
            return false;
        };

        // Plan through other units, they may have moved out of the way by
        // the time this one gets there
        let map = game.map();
        let Some((path, _)) = find_path(origin, enemy, |cell| {
            map.get_terrain(cell)
                .filter(|terrain| terrain.can_move_to())
                .map(|terrain| terrain.movement_cost())
        }) else {
            debug!("Unit {} has no path to {}", unit, enemy);
            return false;
        };

        let reachable = map.possible_tiles_to_move_to(origin, game.config().move_range);
        let Some(&destination) = path
            .iter()
            .skip(1)
            .rev()
            .find(|cell| reachable.contains(cell))
        else {
            return false;
        };

        game.add_action(Action::movement(unit, origin, destination), self.team_id)
    }
}

impl TurnPolicy for EnemyAi {
    fn team_id(&self) -> TeamId {
        self.team_id
    }

    fn generate_whole_teams_turns(&mut self, game: &mut Game) {
        let units: Vec<UnitId> = match game.team(self.team_id) {
            Some(team) => team.get_alive_units().iter().map(|unit| unit.id()).collect(),
            None => return,
        };
        for unit in units {
            self.play_unit(game, unit);
        }
    }
}
