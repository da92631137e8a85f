use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_atk: u32,
    pub sp_def: u32,
    pub speed: u32,
}

/// One way a creature learns a move in a given game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub name: String,
    pub learn_method: String,
    /// Only set for level-up moves.
    pub level: Option<u32>,
}

impl LearnsetEntry {
    pub fn is_egg_move(&self) -> bool {
        self.learn_method == "egg"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpriteSide {
    Front,
    Back,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub default: Option<String>,
    pub shiny: Option<String>,
    pub female: Option<String>,
    pub female_shiny: Option<String>,
}

impl SpriteSet {
    /// Looks up a variant by name; unknown variants have no sprite.
    pub fn variant(&self, variant: &str) -> Option<&str> {
        let url = match variant {
            "default" => &self.default,
            "shiny" => &self.shiny,
            "female" => &self.female,
            "female_shiny" => &self.female_shiny,
            _ => return None,
        };
        url.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front: SpriteSet,
    pub back: SpriteSet,
}

impl Sprites {
    pub fn side(&self, side: SpriteSide) -> &SpriteSet {
        match side {
            SpriteSide::Front => &self.front,
            SpriteSide::Back => &self.back,
        }
    }
}

/// Canonical creature record resolved from a name or national dex number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub dex: u32,
    pub name: String,
    /// Types in slot order.
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub height_dm: u32,
    pub weight_hg: u32,
    pub base_experience: Option<u32>,
    pub abilities: Vec<AbilitySlot>,
    /// Learnsets keyed by game (version group) identifier.
    pub moves: BTreeMap<String, Vec<LearnsetEntry>>,
    pub sprites: Sprites,
}

impl CreatureRecord {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn learnset(&self, game: &str) -> Option<&[LearnsetEntry]> {
        self.moves.get(game).map(Vec::as_slice)
    }
}
