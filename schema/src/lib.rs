// DexMCP Schema - Shared type definitions
// This crate contains the canonical creature record and every report shape the
// tool surface returns, so the server and any client agree on field names.

// Re-export the main types
pub use pokemon_types::*;
pub use reports::*;
pub use species_data::*;

pub mod pokemon_types;
pub mod reports;
pub mod species_data;
