//! # Action System
//!
//! Commands a unit submits during its team's turn. Every action knows how
//! to apply itself to a [`Game`] and how to reverse exactly what it applied.
//!
//! Actions are created by items (or directly, for movement), submitted with
//! [`Game::add_action`], and kept in the team's action log until the turn
//! ends. Actions that involve randomness are not applied on submission;
//! they run when the log is flushed so a rolled outcome can never be undone.

use crate::{Coord, Game, GameEvent, Terrain, UnitId};
use log::debug;
use serde::{Deserialize, Serialize};

/// What an attack did when it was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Unit standing on the target cell, if any
    pub target: Option<UnitId>,
    /// Hit points actually removed
    pub dealt: i32,
    /// Whether the hit killed the target
    pub killed: bool,
}

/// The closed set of action kinds.
///
/// Each variant carries the parameters fixed at creation plus the state
/// recorded during execution that its undo needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    Movement {
        /// Cell the unit left, set once the move happened
        from: Option<Coord>,
    },
    Attack {
        damage: i32,
        accuracy: u32,
        outcome: Option<AttackOutcome>,
    },
    Heal {
        amount: i32,
        /// Healed unit and the hit points it actually gained
        applied: Option<(UnitId, i32)>,
    },
    Build {
        terrain: Terrain,
        /// Terrain that was replaced
        replaced: Option<Terrain>,
    },
}

/// A single unit's action.
///
/// # Examples
///
/// ```
/// use tactica::{Action, Coord, UnitId};
///
/// let step = Action::movement(UnitId(1), Coord::new(0, 0), Coord::new(1, 0));
/// assert!(step.is_movement());
/// assert!(!step.contains_randomness());
/// assert!(!step.is_executed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    unit: UnitId,
    origin: Coord,
    target: Coord,
    kind: ActionKind,
    executed: bool,
}

impl Action {
    fn new(unit: UnitId, origin: Coord, target: Coord, kind: ActionKind) -> Self {
        Self {
            unit,
            origin,
            target,
            kind,
            executed: false,
        }
    }

    /// Moves `unit` from `origin` to `target`.
    pub fn movement(unit: UnitId, origin: Coord, target: Coord) -> Self {
        Self::new(unit, origin, target, ActionKind::Movement { from: None })
    }

    /// Attacks whatever stands on `target`, hitting with `accuracy` percent.
    pub fn attack(unit: UnitId, origin: Coord, target: Coord, damage: i32, accuracy: u32) -> Self {
        Self::new(
            unit,
            origin,
            target,
            ActionKind::Attack {
                damage,
                accuracy,
                outcome: None,
            },
        )
    }

    /// Heals the unit standing on `target` by up to `amount`.
    pub fn heal(unit: UnitId, origin: Coord, target: Coord, amount: i32) -> Self {
        Self::new(
            unit,
            origin,
            target,
            ActionKind::Heal {
                amount,
                applied: None,
            },
        )
    }

    /// Places `terrain` on `target`.
    pub fn build(unit: UnitId, origin: Coord, target: Coord, terrain: Terrain) -> Self {
        Self::new(
            unit,
            origin,
            target,
            ActionKind::Build {
                terrain,
                replaced: None,
            },
        )
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// Where the unit stood when the action was created.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn target(&self) -> Coord {
        self.target
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn is_movement(&self) -> bool {
        matches!(self.kind, ActionKind::Movement { .. })
    }

    /// True for actions whose outcome is rolled. Fixed at creation.
    pub fn contains_randomness(&self) -> bool {
        matches!(self.kind, ActionKind::Attack { .. })
    }

    /// True once the effect has been applied and not undone.
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Applies the effect with the acting unit standing on `origin`.
    ///
    /// An effect that cannot apply any more (the target cell got occupied,
    /// nobody stands on the healed cell) is recorded as a no-op so a later
    /// undo reverses nothing.
    pub fn execute(&mut self, game: &mut Game, origin: Coord) {
        let unit = self.unit;
        let target = self.target;

        match &mut self.kind {
            ActionKind::Movement { from } => {
                *from = None;
                if game.map().can_move_to_coords(target) && game.map_mut().move_unit(unit, target)
                {
                    *from = Some(origin);
                    game.log_event(GameEvent::UnitMoved {
                        unit,
                        from: origin,
                        to: target,
                    });
                } else {
                    debug!("Unit {} cannot move to {}", unit, target);
                }
            }

            ActionKind::Attack {
                damage,
                accuracy,
                outcome,
            } => {
                let hit = game.roll_percent() < *accuracy;
                let victim = game.map().get_unit(target);
                let mut result = AttackOutcome {
                    target: victim,
                    dealt: 0,
                    killed: false,
                };

                match victim {
                    Some(victim) if hit => {
                        result.dealt = game
                            .get_unit_mut(victim)
                            .map(|unit| unit.take_damage(*damage))
                            .unwrap_or(0);
                        game.log_event(GameEvent::AttackHit {
                            attacker: unit,
                            target: victim,
                            damage: result.dealt,
                        });
                        result.killed = game.remove_if_dead(victim);
                    }
                    _ => {
                        game.log_event(GameEvent::AttackMissed {
                            attacker: unit,
                            target,
                        });
                    }
                }
                *outcome = Some(result);
            }

            ActionKind::Heal { amount, applied } => {
                *applied = None;
                let patient = game.map().get_unit(target);
                if let Some(patient) = patient {
                    if let Some(healed) = game
                        .get_unit_mut(patient)
                        .filter(|unit| !unit.is_dead())
                        .map(|unit| unit.change_hp_by((*amount).max(0)))
                    {
                        *applied = Some((patient, healed));
                        game.log_event(GameEvent::UnitHealed {
                            healer: unit,
                            target: patient,
                            amount: healed,
                        });
                    }
                }
            }

            ActionKind::Build { terrain, replaced } => {
                *replaced = None;
                let buildable = game
                    .map()
                    .get_terrain(target)
                    .is_some_and(|current| current.can_build_on())
                    && !game.map().has_unit(target);
                if buildable {
                    *replaced = game.map_mut().update_terrain(target, *terrain);
                    game.log_event(GameEvent::StructureBuilt {
                        builder: unit,
                        at: target,
                        symbol: terrain.symbol(),
                    });
                } else {
                    debug!("Unit {} cannot build on {}", unit, target);
                }
            }
        }

        self.executed = true;
    }

    /// Reverses exactly what [`Action::execute`] applied.
    ///
    /// Does nothing for an action that was never executed, such as a
    /// deferred attack taken back before the turn ended.
    pub fn undo(&mut self, game: &mut Game) {
        let unit = self.unit;
        let target = self.target;

        if self.executed {
            match &mut self.kind {
                ActionKind::Movement { from } => {
                    if let Some(from) = from.take() {
                        game.map_mut().move_unit(unit, from);
                    }
                }
                ActionKind::Attack { outcome, .. } => {
                    if let Some(AttackOutcome {
                        target: Some(victim),
                        dealt,
                        killed,
                    }) = outcome.take()
                    {
                        if let Some(victim_unit) = game.get_unit_mut(victim) {
                            victim_unit.change_hp_by(dealt);
                        }
                        if killed {
                            game.map_mut().add_unit(victim, target);
                        }
                    }
                }
                ActionKind::Heal { applied, .. } => {
                    if let Some((patient, healed)) = applied.take() {
                        if let Some(patient_unit) = game.get_unit_mut(patient) {
                            patient_unit.change_hp_by(-healed);
                        }
                    }
                }
                ActionKind::Build { replaced, .. } => {
                    if let Some(previous) = replaced.take() {
                        game.map_mut().update_terrain(target, previous);
                    }
                }
            }
            self.executed = false;
        }

        game.log_event(GameEvent::ActionUndone { unit });
    }
}
