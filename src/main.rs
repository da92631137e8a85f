//! One-shot command line front end: runs a single tool and prints its JSON report.

use clap::{Parser, Subcommand};
use dexmcp::cli::{init_tracing, CommonArgs};
use dexmcp::moveset::DEFAULT_LIMIT;
use dexmcp::{
    analyze_type_coverage, explore_abilities, find_encounters, get_breeding_info,
    get_descriptions, get_moves, get_pokemon, get_sprite, plan_evolutions, suggest_moveset,
    DexClient,
};
use serde::Serialize;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "dexmcp")]
#[command(author, version, about = "Query PokeAPI the same way the DexMCP tools do")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary stats, typing and measurements
    Creature { pokemon: String },
    /// Moves learnable in one game
    Moves { pokemon: String, game: String },
    /// Sprite URL for a side and variant
    Sprite {
        pokemon: String,
        #[arg(long, default_value = "front")]
        side: String,
        #[arg(long, default_value = "default")]
        variant: String,
    },
    /// Flavor text per game version
    Descriptions {
        pokemon: String,
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// Defensive type coverage for a roster
    Coverage {
        #[arg(required = true)]
        team: Vec<String>,
    },
    /// Abilities with their effect text
    Abilities { pokemon: String },
    /// Every evolution path through a creature
    Evolutions { pokemon: String },
    /// Wild encounter locations
    Encounters { pokemon: String },
    /// Egg groups, hatch steps, gender ratio and egg moves
    Breeding {
        pokemon: String,
        #[arg(long)]
        game: Option<String>,
    },
    /// Ranked damaging moves for one game
    Moveset {
        pokemon: String,
        game: String,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long)]
        include_tm: bool,
    },
}

fn print_json<T: Serialize>(report: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

async fn run(client: &DexClient, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Creature { pokemon } => print_json(&get_pokemon(client, &pokemon).await?),
        Command::Moves { pokemon, game } => print_json(&get_moves(client, &pokemon, &game).await?),
        Command::Sprite {
            pokemon,
            side,
            variant,
        } => print_json(&get_sprite(client, &pokemon, &side, &variant).await?),
        Command::Descriptions { pokemon, language } => {
            print_json(&get_descriptions(client, &pokemon, &language).await?)
        }
        Command::Coverage { team } => {
            print_json(&analyze_type_coverage(client, team.as_slice()).await?)
        }
        Command::Abilities { pokemon } => print_json(&explore_abilities(client, &pokemon).await?),
        Command::Evolutions { pokemon } => print_json(&plan_evolutions(client, &pokemon).await?),
        Command::Encounters { pokemon } => print_json(&find_encounters(client, &pokemon).await?),
        Command::Breeding { pokemon, game } => {
            print_json(&get_breeding_info(client, &pokemon, game.as_deref()).await?)
        }
        Command::Moveset {
            pokemon,
            game,
            limit,
            include_tm,
        } => print_json(&suggest_moveset(client, &pokemon, &game, limit, include_tm).await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);

    let config = cli.common.resolve_config()?;
    let client = DexClient::from_config(&config)?;
    run(&client, cli.command).await
}
