//! # Tactica Main Entry Point
//!
//! Runs a headless skirmish between two AI-controlled teams on a built-in
//! map and prints the event log, the rosters and the final view.

use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;
use tactica::{
    status_panel, BuildingPart, Coord, Game, HealingItem, Item, Map, RulesConfig, TacticaResult,
    TeamId, TerrainPalette, TextRenderer, Weapon,
};

/// Command line arguments for the Tactica skirmish runner.
#[derive(Parser, Debug)]
#[command(name = "tactica")]
#[command(about = "Headless turn-based tactics skirmish")]
#[command(version)]
struct Args {
    /// Random seed for hit rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of rounds to play
    #[arg(short, long, default_value_t = 20)]
    turns: u32,

    /// Rules configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Show the whole map instead of the active team's view
    #[arg(long)]
    reveal: bool,
}

const SKIRMISH_MAP: [&str; 10] = [
    "................",
    "..##......^^....",
    "..#.......^^..~~",
    "......--......~~",
    "...^..--...#....",
    "....#...--.#....",
    "~~..........^...",
    "~~..^^.......#..",
    "....^^......##..",
    "................",
];

fn main() -> TacticaResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Tactica v{}", tactica::VERSION);

    let config = match &args.config {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    let mut game = build_skirmish(config, seed)?;
    game.init_game();
    print!("{}", game.drain_output());

    for _ in 1..args.turns {
        if game.is_game_over() {
            break;
        }
        game.next_turn();
        print!("{}", game.drain_output());
    }

    println!();
    print!("{}", status_panel(&game));
    println!();
    if args.reveal {
        print!("{}", TextRenderer::new(true).render(&game));
    } else {
        print!("{}", game.render_fog_of_war());
    }
    Ok(())
}

/// Initializes env_logger, letting `RUST_LOG` override the command line.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

/// Two squads of three on opposite corners, both played by the AI.
fn build_skirmish(config: RulesConfig, seed: u64) -> TacticaResult<Game> {
    let palette = TerrainPalette::standard();
    let map = Map::from_rows(&SKIRMISH_MAP, &palette)?;
    let mut game = Game::with_config(map, config, seed);

    let rifle = game.add_item(Item::Weapon(Weapon::new("Rifle", 35, 65, 6)));
    let shotgun = game.add_item(Item::Weapon(Weapon::new("Shotgun", 60, 80, 2)));
    let medkit = game.add_item(Item::Healing(HealingItem::new("Medkit", 30)));
    let sandbags = palette
        .get('#')
        .map(|wall| game.add_item(Item::Building(BuildingPart::new("Sandbags", wall))));

    let squads = [
        (TeamId(1), [Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)]),
        (TeamId(2), [Coord::new(15, 9), Coord::new(14, 9), Coord::new(15, 8)]),
    ];
    for (team, positions) in squads {
        game.add_team(team);
        for (index, position) in positions.into_iter().enumerate() {
            let unit = game.spawn_unit(team, format!("T{}-{}", team, index + 1), position)?;
            game.give_item(unit, if index == 1 { shotgun } else { rifle });
            game.give_item(unit, medkit);
            if let Some(sandbags) = sandbags {
                game.give_item(unit, sandbags);
            }
        }
        game.set_ai_controlled_team(team);
    }
    Ok(game)
}
