//! PokeAPI payload shapes.
//!
//! Only the fields the tools read are modelled; everything else in the
//! upstream documents is ignored during deserialization.

use schema::{AbilitySlot, BaseStats, CreatureRecord, LearnsetEntry, SpriteSet, Sprites};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub short_effect: Option<String>,
    pub language: NamedResource,
}

fn english_entry(entries: &[EffectEntry]) -> Option<&EffectEntry> {
    entries.iter().find(|entry| entry.language.name == "en")
}

pub fn english_short_effect(entries: &[EffectEntry]) -> Option<String> {
    english_entry(entries).and_then(|entry| entry.short_effect.clone())
}

pub fn english_effect(entries: &[EffectEntry]) -> Option<String> {
    english_entry(entries).and_then(|entry| entry.effect.clone())
}

// --- /type ---

#[derive(Debug, Deserialize)]
pub struct TypeListing {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DamageRelations {
    pub double_damage_to: Vec<NamedResource>,
    pub half_damage_to: Vec<NamedResource>,
    pub no_damage_to: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub struct TypeResource {
    #[serde(default)]
    pub damage_relations: DamageRelations,
}

impl From<DamageRelations> for schema::TypeRelations {
    fn from(raw: DamageRelations) -> Self {
        let names = |list: Vec<NamedResource>| list.into_iter().map(|r| r.name).collect();
        schema::TypeRelations {
            double_damage_to: names(raw.double_damage_to),
            half_damage_to: names(raw.half_damage_to),
            no_damage_to: names(raw.no_damage_to),
        }
    }
}

// --- /move/{name} and /ability/{name} ---

#[derive(Debug, Clone, Deserialize)]
pub struct MoveDetails {
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
    #[serde(rename = "type", default)]
    pub move_type: Option<NamedResource>,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AbilityResource {
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

// --- /pokemon/{id} ---

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatValue {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilityEntry {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Debug, Deserialize)]
struct VersionGroupDetail {
    #[serde(default)]
    level_learned_at: u32,
    move_learn_method: NamedResource,
    version_group: NamedResource,
}

#[derive(Debug, Deserialize)]
struct MoveEntry {
    #[serde(rename = "move")]
    move_: NamedResource,
    #[serde(default)]
    version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpriteUrls {
    front_default: Option<String>,
    front_shiny: Option<String>,
    front_female: Option<String>,
    front_shiny_female: Option<String>,
    back_default: Option<String>,
    back_shiny: Option<String>,
    back_female: Option<String>,
    back_shiny_female: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PokemonResource {
    id: u32,
    name: String,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatValue>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    base_experience: Option<u32>,
    #[serde(default)]
    abilities: Vec<AbilityEntry>,
    #[serde(default)]
    moves: Vec<MoveEntry>,
    #[serde(default)]
    sprites: SpriteUrls,
}

impl PokemonResource {
    pub fn into_record(self) -> CreatureRecord {
        let mut types = self.types;
        types.sort_by_key(|slot| slot.slot);

        let stat = |name: &str| {
            self.stats
                .iter()
                .find(|s| s.stat.name == name)
                .map_or(0, |s| s.base_stat)
        };
        let base_stats = BaseStats {
            hp: stat("hp"),
            attack: stat("attack"),
            defense: stat("defense"),
            sp_atk: stat("special-attack"),
            sp_def: stat("special-defense"),
            speed: stat("speed"),
        };

        let mut moves: BTreeMap<String, Vec<LearnsetEntry>> = BTreeMap::new();
        for entry in self.moves {
            for detail in entry.version_group_details {
                let learn_method = detail.move_learn_method.name;
                let level = (learn_method == "level-up").then_some(detail.level_learned_at);
                moves
                    .entry(detail.version_group.name)
                    .or_default()
                    .push(LearnsetEntry {
                        name: entry.move_.name.clone(),
                        learn_method,
                        level,
                    });
            }
        }

        let sprites = self.sprites;
        CreatureRecord {
            dex: self.id,
            name: self.name,
            types: types.into_iter().map(|slot| slot.type_.name).collect(),
            base_stats,
            height_dm: self.height,
            weight_hg: self.weight,
            base_experience: self.base_experience,
            abilities: self
                .abilities
                .into_iter()
                .map(|a| AbilitySlot {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
            moves,
            sprites: Sprites {
                front: SpriteSet {
                    default: sprites.front_default,
                    shiny: sprites.front_shiny,
                    female: sprites.front_female,
                    female_shiny: sprites.front_shiny_female,
                },
                back: SpriteSet {
                    default: sprites.back_default,
                    shiny: sprites.back_shiny,
                    female: sprites.back_female,
                    female_shiny: sprites.back_shiny_female,
                },
            },
        }
    }
}

// --- /pokemon-species/{id} ---

#[derive(Debug, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpeciesResource {
    pub evolution_chain: Option<ApiResource>,
    pub egg_groups: Vec<NamedResource>,
    pub hatch_counter: Option<u32>,
    pub gender_rate: Option<i32>,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

// --- /pokemon/{id}/encounters ---

#[derive(Debug, Deserialize)]
pub struct EncounterDetailResource {
    #[serde(default)]
    pub method: Option<NamedResource>,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub max_level: u32,
    #[serde(default)]
    pub chance: u32,
    #[serde(default)]
    pub condition_values: Vec<Option<NamedResource>>,
}

#[derive(Debug, Deserialize)]
pub struct VersionEncounterResource {
    pub version: NamedResource,
    #[serde(default)]
    pub max_chance: u32,
    #[serde(default)]
    pub encounter_details: Vec<EncounterDetailResource>,
}

#[derive(Debug, Deserialize)]
pub struct LocationAreaEncounter {
    pub location_area: NamedResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterResource>,
}
