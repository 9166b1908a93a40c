//! # Input Module
//!
//! Unit selection and command handling for human players.
//!
//! The [`SelectionController`] sits between a front end and the [`Game`]: it
//! remembers the selected unit, caches where that unit can move and shoot,
//! and turns clicks into actions submitted for the active team.

pub mod commands;

pub use commands::*;

use crate::{Action, Coord, Game, ItemId, TeamId, UnitId};
use log::debug;

/// Selection state of a human player.
///
/// # Examples
///
/// ```
/// use tactica::{Coord, Game, Map, SelectionController, TeamId};
///
/// let mut game = Game::new(Map::new(6, 6), 0);
/// game.add_team(TeamId(1));
/// game.add_team(TeamId(2));
/// let scout = game.spawn_unit(TeamId(1), "Scout", Coord::new(0, 0)).unwrap();
/// game.spawn_unit(TeamId(2), "Raider", Coord::new(5, 5)).unwrap();
/// game.init_game();
///
/// let mut controller = SelectionController::new();
/// assert!(controller.select_unit_on_coords(&game, Coord::new(0, 0)));
/// assert!(controller.enqueue_movement_action(&mut game, Coord::new(2, 1)));
/// assert_eq!(game.get_unit_location(scout), Some(Coord::new(2, 1)));
/// assert_eq!(controller.selected_unit(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<UnitId>,
    move_tiles: Vec<Coord>,
    shoot_tiles: Vec<Coord>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected
    }

    /// Cells the selected unit could move to when it was selected.
    pub fn move_tiles(&self) -> &[Coord] {
        &self.move_tiles
    }

    /// Cells the selected unit could target when it was selected.
    pub fn shoot_tiles(&self) -> &[Coord] {
        &self.shoot_tiles
    }

    /// Selects the living unit of the active team standing on `coord`.
    ///
    /// Anything else (an empty cell, an enemy, a game that has not started)
    /// clears the selection and returns false.
    pub fn select_unit_on_coords(&mut self, game: &Game, coord: Coord) -> bool {
        self.deselect_unit();

        let Some(team) = game.active_team_id() else {
            return false;
        };
        let Some(unit_id) = game.map().get_unit(coord) else {
            return false;
        };
        let selectable = game
            .team(team)
            .and_then(|team| team.get_unit(unit_id))
            .is_some_and(|unit| !unit.is_dead());
        if !selectable {
            debug!("Unit {} cannot be selected by team {}", unit_id, team);
            return false;
        }

        let config = game.config();
        self.selected = Some(unit_id);
        self.move_tiles = game
            .map()
            .possible_tiles_to_move_to(coord, config.move_range);
        self.shoot_tiles = game.map().tiles_can_shoot_on(coord, config.visual_range);
        true
    }

    pub fn deselect_unit(&mut self) {
        self.selected = None;
        self.move_tiles.clear();
        self.shoot_tiles.clear();
    }

    /// Selects the next living unit of the active team in roster order.
    pub fn cycle_units(&mut self, game: &Game) -> Option<UnitId> {
        let team = game.get_active_team()?;
        let alive: Vec<UnitId> = team
            .get_alive_units()
            .iter()
            .map(|unit| unit.id())
            .filter(|&id| game.get_unit_location(id).is_some())
            .collect();
        if alive.is_empty() {
            self.deselect_unit();
            return None;
        }

        let next = match self
            .selected
            .and_then(|current| alive.iter().position(|&id| id == current))
        {
            Some(index) => alive[(index + 1) % alive.len()],
            None => alive[0],
        };
        let location = game.get_unit_location(next)?;
        self.select_unit_on_coords(game, location);
        self.selected
    }

    pub fn can_selected_unit_move_to(&self, game: &Game, coord: Coord) -> bool {
        self.selected
            .and_then(|id| game.get_unit(id))
            .is_some_and(|unit| {
                !unit.has_moved
                    && self.move_tiles.contains(&coord)
                    && game.map().can_move_to_coords(coord)
            })
    }

    pub fn can_selected_unit_use_item_to(&self, game: &Game, item: ItemId, coord: Coord) -> bool {
        let Some(unit) = self.selected.and_then(|id| game.get_unit(id)) else {
            return false;
        };
        let Some(origin) = game.get_unit_location(unit.id()) else {
            return false;
        };
        !unit.has_added_action
            && unit.has_item(item)
            && self.shoot_tiles.contains(&coord)
            && game
                .items()
                .get(item)
                .is_some_and(|item| item.reaches(origin, coord))
    }

    /// Submits a move of the selected unit. Clears the selection on success.
    pub fn enqueue_movement_action(&mut self, game: &mut Game, coord: Coord) -> bool {
        if !self.can_selected_unit_move_to(game, coord) {
            return false;
        }
        let Some((unit, origin, team)) = self.selection_context(game) else {
            return false;
        };
        self.submit(game, Action::movement(unit, origin, coord), team)
    }

    /// Submits the selected unit's use of `item` on `coord`. Clears the
    /// selection on success.
    pub fn enqueue_item_action(&mut self, game: &mut Game, item: ItemId, coord: Coord) -> bool {
        if !self.can_selected_unit_use_item_to(game, item, coord) {
            return false;
        }
        let Some((unit, origin, team)) = self.selection_context(game) else {
            return false;
        };
        let Some(action) = game
            .items()
            .get(item)
            .and_then(|item| item.get_action(coord, unit, origin))
        else {
            return false;
        };
        self.submit(game, action, team)
    }

    fn selection_context(&self, game: &Game) -> Option<(UnitId, Coord, TeamId)> {
        let unit = self.selected?;
        Some((unit, game.get_unit_location(unit)?, game.active_team_id()?))
    }

    fn submit(&mut self, game: &mut Game, action: Action, team: TeamId) -> bool {
        if !game.add_action(action, team) {
            return false;
        }
        self.deselect_unit();
        true
    }

    /// Takes back the active team's last action.
    pub fn undo_action(&mut self, game: &mut Game) -> bool {
        self.deselect_unit();
        game.active_team_id()
            .is_some_and(|team| game.undo_action(team))
    }

    pub fn next_turn(&mut self, game: &mut Game) {
        self.deselect_unit();
        game.next_turn();
    }

    /// Hover text for `coord`, previewing `item` when one is chosen.
    ///
    /// Units outside the active team's vision are not described.
    pub fn get_action_info(&self, game: &Game, coord: Coord, item: Option<ItemId>) -> String {
        let Some(terrain) = game.map().get_terrain(coord) else {
            return String::new();
        };
        let mut info = format!("Tile {}: '{}'\n", coord, terrain.symbol());

        if let Some(other) = game
            .map()
            .get_unit(coord)
            .filter(|_| game.is_visible(coord))
            .and_then(|id| game.get_unit(id))
        {
            let friendly = game.get_unit_team_id(other.id()) == game.active_team_id();
            info.push_str(if friendly { "Friendly " } else { "Enemy " });
            info.push_str(&format!(
                "{} HP: {}/{}\n",
                other.name(),
                other.hp(),
                other.max_hp()
            ));
        }

        let Some(unit) = self.selected.and_then(|id| game.get_unit(id)) else {
            return info;
        };
        if unit.has_moved {
            info.push_str(&format!("{} has already moved\n", unit.name()));
        } else if self.can_selected_unit_move_to(game, coord) {
            info.push_str("can move here\n");
        } else {
            info.push_str("cannot move here\n");
        }

        if let Some(item) = item {
            if unit.has_added_action {
                info.push_str("item action already queued\n");
            } else if self.can_selected_unit_use_item_to(game, item, coord) {
                let origin = game.get_unit_location(unit.id());
                if let (Some(origin), Some(item)) = (origin, game.items().get(item)) {
                    info.push_str(&item.get_info(origin, coord));
                }
            } else {
                info.push_str("Can not use item here\n");
            }
        }
        info
    }

    /// Applies a command for the active team. Returns whether it did
    /// anything.
    pub fn apply(&mut self, game: &mut Game, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::Select { at } => self.select_unit_on_coords(game, at),
            PlayerCommand::Move { to } => self.enqueue_movement_action(game, to),
            PlayerCommand::UseItem { item, target } => {
                self.enqueue_item_action(game, item, target)
            }
            PlayerCommand::Undo => self.undo_action(game),
            PlayerCommand::EndTurn => {
                if !game.game_started() || game.is_game_over() {
                    return false;
                }
                self.next_turn(game);
                true
            }
            PlayerCommand::Cycle => self.cycle_units(game).is_some(),
            PlayerCommand::Deselect => {
                let had_selection = self.selected.is_some();
                self.deselect_unit();
                had_selection
            }
        }
    }
}
