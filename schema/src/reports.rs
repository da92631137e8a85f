//! Structured outputs returned by each tool.

use crate::{BaseStats, DamageClass, SpriteSide};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub dex: u32,
    pub name: String,
    pub types: Vec<String>,
    pub height_dm: u32,
    pub height_m: f64,
    pub weight_hg: u32,
    pub weight_kg: f64,
    pub base_experience: Option<u32>,
    pub base_stats: BaseStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteUrl {
    pub url: Option<String>,
    pub side: SpriteSide,
    pub variant: String,
}

// --- Coverage analysis ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMatchupSummary {
    pub attack_type: String,
    /// Members taking more than 1x damage.
    pub weak: usize,
    /// Members taking less than 1x but more than 0x damage.
    pub resistant: usize,
    pub immune: usize,
    pub neutral: usize,
}

impl TypeMatchupSummary {
    pub fn total(&self) -> usize {
        self.weak + self.resistant + self.immune + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCoverageReport {
    pub team: Vec<String>,
    pub matchup_summary: Vec<TypeMatchupSummary>,
    /// Attack types that threaten at least half the roster.
    pub notable_weaknesses: Vec<String>,
    /// Attack types every member resists or is immune to.
    pub notable_resistances: Vec<String>,
}

// --- Abilities ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDetail {
    pub name: String,
    pub is_hidden: bool,
    pub short_effect: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityReport {
    pub pokemon: String,
    pub abilities: Vec<AbilityDetail>,
}

// --- Evolution ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStep {
    pub from_species: String,
    pub to_species: String,
    pub trigger: Option<String>,
    pub minimum_level: Option<u32>,
    pub item: Option<String>,
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
}

impl EvolutionStep {
    pub fn mentions(&self, species: &str) -> bool {
        self.from_species == species || self.to_species == species
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPath {
    pub steps: Vec<EvolutionStep>,
}

impl EvolutionPath {
    pub fn mentions(&self, species: &str) -> bool {
        self.steps.iter().any(|step| step.mentions(species))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub pokemon: String,
    pub paths: Vec<EvolutionPath>,
}

// --- Encounters ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDetail {
    pub method: String,
    pub min_level: u32,
    pub max_level: u32,
    pub chance: u32,
    pub condition_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterVersion {
    pub version: String,
    pub max_chance: u32,
    pub details: Vec<EncounterDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterLocation {
    pub location_area: String,
    pub versions: Vec<EncounterVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterReport {
    pub pokemon: String,
    pub locations: Vec<EncounterLocation>,
}

// --- Breeding ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderRatio {
    pub female_percent: f64,
    pub male_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingInfo {
    pub pokemon: String,
    pub egg_groups: Vec<String>,
    pub gender: GenderRatio,
    pub hatch_steps: Option<u32>,
    pub egg_moves: Vec<String>,
}

// --- Moveset recommendations ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecommendation {
    pub name: String,
    pub move_type: Option<String>,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub damage_class: DamageClass,
    pub learn_method: String,
    pub level: Option<u32>,
    pub stab: bool,
    /// Heuristic ranking score, not a competitive tier.
    pub score: f64,
    pub short_effect: Option<String>,
    pub effect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovesetRecommendation {
    pub pokemon: String,
    pub game: String,
    pub recommendations: Vec<MoveRecommendation>,
}
