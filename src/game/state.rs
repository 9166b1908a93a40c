//! # Game State Module
//!
//! Central game state and the turn state machine.
//!
//! [`Game`] owns the map, every team (and through them every unit), the item
//! catalog and the event log. All rule-changing operations go through it:
//! submitting and undoing actions, ending turns, letting AI-controlled teams
//! play and deciding the winner.

use crate::{
    Action, Coord, GameEvent, IdAllocator, Item, ItemCatalog, ItemId, Map, RulesConfig,
    TacticaError, TacticaResult, Team, TeamId, TurnPolicy, Unit, UnitId,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    NotStarted,
    /// The given team is issuing actions
    TeamTurn(TeamId),
    /// Finished, with the winner or `None` for a draw
    GameOver(Option<TeamId>),
}

/// The authoritative game state.
///
/// # Examples
///
/// ```
/// use tactica::{Coord, Game, Map, TeamId, TurnPhase};
///
/// let mut game = Game::new(Map::new(8, 8), 42);
/// game.add_team(TeamId(1));
/// game.add_team(TeamId(2));
/// game.spawn_unit(TeamId(1), "Ada", Coord::new(0, 0)).unwrap();
/// game.spawn_unit(TeamId(2), "Bo", Coord::new(7, 7)).unwrap();
///
/// assert!(game.init_game());
/// assert_eq!(game.phase(), TurnPhase::TeamTurn(TeamId(1)));
/// game.next_turn();
/// assert_eq!(game.active_team_id(), Some(TeamId(2)));
/// ```
#[derive(Debug)]
pub struct Game {
    teams: Vec<Team>,
    map: Map,
    items: ItemCatalog,
    config: RulesConfig,
    ids: IdAllocator,
    /// Index into `teams`, `None` until the game starts
    active_team: Option<usize>,
    /// Sorted, deduplicated
    visible_coords: Vec<Coord>,
    policies: Vec<Box<dyn TurnPolicy>>,
    events: Vec<GameEvent>,
    rng: StdRng,
    rng_seed: u64,
    turn_number: u64,
    game_over_logged: bool,
}

impl Game {
    /// Creates a game on `map` with the default rules.
    pub fn new(map: Map, seed: u64) -> Self {
        Self::with_config(map, RulesConfig::default(), seed)
    }

    pub fn with_config(map: Map, config: RulesConfig, seed: u64) -> Self {
        Self {
            teams: Vec::new(),
            map,
            items: ItemCatalog::new(),
            config,
            ids: IdAllocator::new(),
            active_team: None,
            visible_coords: Vec::new(),
            policies: Vec::new(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            rng_seed: seed,
            turn_number: 0,
            game_over_logged: false,
        }
    }

    /// Replaces the unit id allocator, so ids can start at a known value.
    pub fn with_id_allocator(mut self, ids: IdAllocator) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Adds an empty team. Returns false if the id is already taken.
    pub fn add_team(&mut self, id: TeamId) -> bool {
        if self.team(id).is_some() {
            warn!("Team {} already exists", id);
            return false;
        }
        self.teams.push(Team::new(id));
        true
    }

    /// Stores an item in the catalog.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        self.items.add(item)
    }

    /// Puts an item handle into a unit's inventory.
    pub fn give_item(&mut self, unit: UnitId, item: ItemId) -> bool {
        if self.items.get(item).is_none() {
            return false;
        }
        self.get_unit_mut(unit)
            .is_some_and(|unit| unit.add_item(item))
    }

    /// Creates a unit for `team_id` and places it on `coord`.
    pub fn spawn_unit(
        &mut self,
        team_id: TeamId,
        name: impl Into<String>,
        coord: Coord,
    ) -> TacticaResult<UnitId> {
        let name = name.into();
        let team_index = self
            .team_index(team_id)
            .ok_or(TacticaError::UnknownTeam(team_id))?;
        if !self.map.can_move_to_coords(coord) {
            return Err(TacticaError::InvalidPlacement(format!(
                "cannot place {} at {}",
                name, coord
            )));
        }

        let id = self.ids.allocate();
        self.map.add_unit(id, coord);
        self.teams[team_index].add_unit(Unit::new(id, name, &self.config));
        debug!("Spawned unit {} for team {} at {}", id, team_id, coord);

        self.update_visible_tiles();
        Ok(id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id() == id)
    }

    /// Looks up a team that must exist.
    ///
    /// # Panics
    ///
    /// Panics if no team has this id.
    pub fn get_team_by_id(&self, id: TeamId) -> &Team {
        self.team(id)
            .unwrap_or_else(|| panic!("no team with id {}", id))
    }

    pub fn get_team_by_id_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|team| team.id() == id)
    }

    fn team_index(&self, id: TeamId) -> Option<usize> {
        self.teams.iter().position(|team| team.id() == id)
    }

    /// Every unit of every team, dead ones included.
    pub fn get_units(&self) -> impl Iterator<Item = &Unit> {
        self.teams.iter().flat_map(|team| team.units().iter())
    }

    pub fn get_unit(&self, id: UnitId) -> Option<&Unit> {
        self.teams.iter().find_map(|team| team.get_unit(id))
    }

    pub fn get_unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.teams.iter_mut().find_map(|team| team.get_unit_mut(id))
    }

    pub fn get_unit_team_id(&self, id: UnitId) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|team| team.has_unit(id))
            .map(Team::id)
    }

    /// Location of a living unit. Dead units are off the map.
    pub fn get_unit_location(&self, id: UnitId) -> Option<Coord> {
        self.map.get_unit_location(id)
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// Recomputes what the active team's living units can see.
    pub fn update_visible_tiles(&mut self) {
        let mut visible = Vec::new();
        if let Some(index) = self.active_team {
            let range = self.config.visual_range;
            for unit in self.teams[index].get_alive_units() {
                if let Some(location) = self.map.get_unit_location(unit.id()) {
                    visible.extend(self.map.tiles_unit_sees(location, range));
                }
            }
        }
        visible.sort_unstable();
        visible.dedup();
        self.visible_coords = visible;
    }

    pub fn get_visible_tiles(&self) -> &[Coord] {
        &self.visible_coords
    }

    pub fn is_visible(&self, coord: Coord) -> bool {
        self.visible_coords.binary_search(&coord).is_ok()
    }

    /// Lets the built-in [`crate::EnemyAi`] play `team_id`.
    pub fn set_ai_controlled_team(&mut self, team_id: TeamId) {
        self.set_turn_policy(Box::new(crate::EnemyAi::new(team_id)));
    }

    /// Binds a policy to the team it names, replacing any earlier one.
    pub fn set_turn_policy(&mut self, policy: Box<dyn TurnPolicy>) {
        let team_id = policy.team_id();
        self.policies.retain(|bound| bound.team_id() != team_id);
        info!("Team {} is now AI controlled", team_id);
        self.policies.push(policy);
    }

    pub fn is_ai_controlled(&self, team_id: TeamId) -> bool {
        self.policies
            .iter()
            .any(|policy| policy.team_id() == team_id)
    }

    /// Submits an action for a unit of `team_id`.
    ///
    /// Returns false, changing nothing, when the unit is not a living
    /// member of the team or already used its movement (or item action)
    /// this turn. Actions without randomness are applied right away; the
    /// others wait for the end of the turn.
    pub fn add_action(&mut self, mut action: Action, team_id: TeamId) -> bool {
        let Some(team_index) = self.team_index(team_id) else {
            debug!("Rejected action for unknown team {}", team_id);
            return false;
        };
        let Some(unit) = self.teams[team_index].get_unit_mut(action.unit()) else {
            debug!("Unit {} is not on team {}", action.unit(), team_id);
            return false;
        };
        if unit.is_dead() {
            return false;
        }

        if action.is_movement() {
            if unit.has_moved {
                return false;
            }
            unit.has_moved = true;
        } else {
            if unit.has_added_action {
                return false;
            }
            unit.has_added_action = true;
        }

        if !action.contains_randomness() {
            self.execute_action(&mut action);
        }
        self.teams[team_index].enqueue_action(action);
        self.update_visible_tiles();
        true
    }

    /// Applies an action from wherever its unit currently stands.
    ///
    /// A unit that is no longer on the map (it died earlier in the turn)
    /// does nothing.
    pub fn execute_action(&mut self, action: &mut Action) {
        match self.map.get_unit_location(action.unit()) {
            Some(origin) => action.execute(self, origin),
            None => debug!("Skipping action of unit {} which is off the map", action.unit()),
        }
    }

    /// Takes back the most recent action of `team_id`.
    pub fn undo_action(&mut self, team_id: TeamId) -> bool {
        let Some(team_index) = self.team_index(team_id) else {
            return false;
        };
        let Some(mut action) = self.teams[team_index].undo_action() else {
            return false;
        };

        if let Some(unit) = self.teams[team_index].get_unit_mut(action.unit()) {
            if action.is_movement() {
                unit.has_moved = false;
            } else {
                unit.has_added_action = false;
            }
        }
        action.undo(self);
        self.update_visible_tiles();
        true
    }

    /// Flushes the active team's log and resets its units' flags.
    ///
    /// Only actions that were not applied on submission run here, each
    /// exactly once, in submission order.
    pub fn end_team_turns(&mut self) {
        let Some(team_index) = self.active_team else {
            return;
        };
        while let Some(mut action) = self.teams[team_index].dequeue_action() {
            if !action.is_executed() {
                self.execute_action(&mut action);
            }
        }
        self.teams[team_index].clear_action_flags();
    }

    /// Moves to the first team and lets leading AI teams play.
    ///
    /// Returns false if there are no teams or the game already started.
    pub fn init_game(&mut self) -> bool {
        if self.teams.is_empty() || self.active_team.is_some() {
            return false;
        }
        self.log_event(GameEvent::GameStarted);
        self.active_team = Some(0);
        self.announce_active_team();
        self.play_ai_teams();
        true
    }

    pub fn game_started(&self) -> bool {
        self.active_team.is_some()
    }

    /// Ends the active team's turn and advances to the next human team.
    ///
    /// AI-controlled teams play their whole turn in between. At most one
    /// full rotation of AI turns runs per call, so a game without human
    /// teams advances one round at a time.
    pub fn next_turn(&mut self) {
        let Some(active) = self.active_team_id() else {
            return;
        };
        if self.check_game_over() {
            return;
        }
        if !self.is_ai_controlled(active) {
            self.finish_turn();
        }
        self.play_ai_teams();
    }

    /// Advances the active index, wrapping around.
    pub fn next_team(&mut self) {
        if self.teams.is_empty() {
            return;
        }
        let next = self.active_team.map_or(0, |index| (index + 1) % self.teams.len());
        self.active_team = Some(next);
        self.announce_active_team();
    }

    fn finish_turn(&mut self) {
        self.end_team_turns();
        self.turn_number += 1;
        self.next_team();
    }

    fn announce_active_team(&mut self) {
        if let Some(team) = self.active_team_id() {
            info!("Team {} turn", team);
            self.log_event(GameEvent::TurnStarted { team });
        }
        self.update_visible_tiles();
    }

    fn play_ai_teams(&mut self) {
        for _ in 0..self.teams.len() {
            if self.check_game_over() {
                return;
            }
            let Some(team) = self.active_team_id() else {
                return;
            };
            if !self.run_policy(team) {
                return;
            }
            self.finish_turn();
        }
        self.check_game_over();
    }

    fn run_policy(&mut self, team: TeamId) -> bool {
        let Some(position) = self
            .policies
            .iter()
            .position(|policy| policy.team_id() == team)
        else {
            return false;
        };
        let mut policy = self.policies.remove(position);
        policy.generate_whole_teams_turns(self);
        let index = position.min(self.policies.len());
        self.policies.insert(index, policy);
        true
    }

    fn check_game_over(&mut self) -> bool {
        if !self.game_started() || !self.is_game_over() {
            return false;
        }
        if !self.game_over_logged {
            let winner = self.get_winner().map(Team::id);
            self.log_event(GameEvent::GameOver { winner });
            self.game_over_logged = true;
        }
        true
    }

    pub fn get_active_team(&self) -> Option<&Team> {
        self.active_team.map(|index| &self.teams[index])
    }

    pub fn active_team_id(&self) -> Option<TeamId> {
        self.get_active_team().map(Team::id)
    }

    /// The only team with a living unit, if exactly one has any.
    pub fn get_winner(&self) -> Option<&Team> {
        let mut alive = self.teams.iter().filter(|team| !team.all_dead());
        match (alive.next(), alive.next()) {
            (Some(team), None) => Some(team),
            _ => None,
        }
    }

    /// True once the game started and no team has a living unit left.
    pub fn is_draw(&self) -> bool {
        self.game_started() && self.teams.iter().all(Team::all_dead)
    }

    pub fn is_game_over(&self) -> bool {
        self.get_winner().is_some() || self.is_draw()
    }

    pub fn phase(&self) -> TurnPhase {
        match self.active_team_id() {
            None => TurnPhase::NotStarted,
            Some(_) if self.is_game_over() => {
                TurnPhase::GameOver(self.get_winner().map(Team::id))
            }
            Some(team) => TurnPhase::TeamTurn(team),
        }
    }

    /// Number of team turns completed so far.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// The event log, one line per event.
    pub fn get_output(&self) -> String {
        self.events
            .iter()
            .map(|event| format!("{}\n", event))
            .collect()
    }

    /// Returns the event log text and empties it.
    pub fn drain_output(&mut self) -> String {
        let output = self.get_output();
        self.events.clear();
        output
    }

    pub fn clear_output(&mut self) {
        self.events.clear();
    }

    pub(crate) fn log_event(&mut self, event: GameEvent) {
        debug!("{}", event);
        self.events.push(event);
    }

    /// Rolls a number in `0..100`.
    pub(crate) fn roll_percent(&mut self) -> u32 {
        self.rng.gen_range(0..100)
    }

    /// Takes a unit with no hit points left off the map.
    pub(crate) fn remove_if_dead(&mut self, unit: UnitId) -> bool {
        if !self.get_unit(unit).is_some_and(Unit::is_dead) {
            return false;
        }
        self.map.remove_unit(unit);
        self.log_event(GameEvent::UnitDied { unit });
        true
    }
}
