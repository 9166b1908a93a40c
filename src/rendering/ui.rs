//! # User Interface Elements
//!
//! Status lines for rosters and the turn indicator.

use crate::{Game, Team, TurnPhase};

/// One-line description of the turn state.
pub fn phase_line(game: &Game) -> String {
    match game.phase() {
        TurnPhase::NotStarted => "Waiting to start".to_string(),
        TurnPhase::TeamTurn(team) => {
            format!("Turn {}: team {} to act", game.turn_number() + 1, team)
        }
        TurnPhase::GameOver(Some(team)) => format!("Game over, team {} wins", team),
        TurnPhase::GameOver(None) => "Game over, draw".to_string(),
    }
}

/// Roster summary of a team, one unit per line.
pub fn team_panel(game: &Game, team: &Team) -> String {
    let mut panel = format!("Team {}\n", team.id());
    for unit in team.units() {
        let status = match game.get_unit_location(unit.id()) {
            Some(location) if !unit.is_dead() => format!("at {}", location),
            _ => "down".to_string(),
        };
        panel.push_str(&format!(
            "  {} {:<10} {:>3}/{:<3} {}\n",
            unit.id(),
            unit.name(),
            unit.hp(),
            unit.max_hp(),
            status
        ));
    }
    panel
}

/// Turn indicator followed by every team's roster.
pub fn status_panel(game: &Game) -> String {
    let mut panel = format!("{}\n", phase_line(game));
    for team in game.teams() {
        panel.push_str(&team_panel(game, team));
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, Map, TeamId};

    #[test]
    fn test_status_panel_lists_units() {
        let mut game = Game::new(Map::new(4, 4), 0);
        game.add_team(TeamId(1));
        game.add_team(TeamId(2));
        game.spawn_unit(TeamId(1), "Ada", Coord::new(0, 0)).unwrap();
        let bo = game.spawn_unit(TeamId(2), "Bo", Coord::new(3, 3)).unwrap();
        assert_eq!(phase_line(&game), "Waiting to start");

        game.init_game();
        game.get_unit_mut(bo).unwrap().take_damage(40);
        let panel = status_panel(&game);
        assert!(panel.starts_with("Turn 1: team 1 to act\n"));
        assert!(panel.contains("Ada"));
        assert!(panel.contains(" 60/100"));
        assert!(panel.contains("at (3, 3)"));
    }
}
