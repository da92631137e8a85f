//! DexMCP
//!
//! Pokedex lookups and light team analysis over PokeAPI, packaged as tools
//! for an MCP client. Every tool takes a shared [`DexClient`], which owns the
//! HTTP fetcher and the memoized lookups.

// --- MODULE DECLARATIONS ---
pub mod abilities;
pub mod breeding;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod coverage;
pub mod encounters;
pub mod errors;
pub mod evolution;
pub mod fetch;
pub mod mcp_interface;
pub mod moveset;
pub mod pokeapi;
pub mod pokemon;
pub mod species;

#[cfg(test)]
mod test_support;

// --- PUBLIC API RE-EXPORTS ---

// Report and record types from the `schema` crate.
pub use schema::{
    AbilityDetail, AbilityReport, BaseStats, BreedingInfo, CreatureRecord, DamageClass,
    EncounterReport, EvolutionPath, EvolutionReport, EvolutionStep, GenderRatio, LearnsetEntry,
    MoveRecommendation, MovesetRecommendation, PokemonSummary, SpriteSide, SpriteUrl,
    TypeCoverageReport, TypeMatchupSummary, TypeRelations,
};

// The shared client and its configuration.
pub use client::DexClient;
pub use config::{CacheConfig, DexConfig};
pub use fetch::{HttpFetcher, JsonFetcher};

// One entry point per tool.
pub use abilities::explore_abilities;
pub use breeding::get_breeding_info;
pub use coverage::analyze_type_coverage;
pub use encounters::find_encounters;
pub use evolution::plan_evolutions;
pub use moveset::suggest_moveset;
pub use pokemon::{get_descriptions, get_moves, get_pokemon, get_sprite, resolve};

// Crate-specific error and result types.
pub use errors::{ConfigError, DexError, DexResult, FetchError, FetchResult};
