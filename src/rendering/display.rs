//! # Display Management
//!
//! Character grid rendering of the map with fog of war.

use crate::{Coord, Game};

/// Drawn on cells the active team cannot see.
pub const FOG_SYMBOL: char = ' ';

/// Renders a [`Game`] as a character grid, one line per map row.
///
/// Terrain shows its symbol and units show the last digit of their team id.
/// Unless `reveal` is set, cells outside the active team's vision are fog
/// and hide whatever stands on them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub reveal: bool,
}

impl TextRenderer {
    pub fn new(reveal: bool) -> Self {
        Self { reveal }
    }

    pub fn render(&self, game: &Game) -> String {
        let map = game.map();
        let mut out = String::with_capacity((map.width() + 1) * map.height());
        for y in 0..map.height() {
            for x in 0..map.width() {
                out.push(self.cell_symbol(game, Coord::new(x, y)));
            }
            out.push('\n');
        }
        out
    }

    fn cell_symbol(&self, game: &Game, coord: Coord) -> char {
        if !self.reveal && !game.is_visible(coord) {
            return FOG_SYMBOL;
        }
        if let Some(team) = game
            .map()
            .get_unit(coord)
            .and_then(|unit| game.get_unit_team_id(unit))
        {
            return char::from_digit(team.0 % 10, 10).unwrap_or('@');
        }
        game.map()
            .get_terrain(coord)
            .map_or(FOG_SYMBOL, |terrain| terrain.symbol())
    }
}

impl Game {
    /// What the active team sees: the map restricted to its visible cells.
    pub fn render_fog_of_war(&self) -> String {
        TextRenderer::new(false).render(self)
    }
}
