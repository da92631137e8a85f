//! In-memory PokeAPI stand-in shared by the unit tests.

use crate::client::DexClient;
use crate::config::CacheConfig;
use crate::errors::{FetchError, FetchResult};
use crate::fetch::JsonFetcher;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://pokeapi.test/api/v2";

/// Serves canned documents by exact URL and counts every request.
/// Unknown URLs answer with HTTP 404.
#[derive(Clone, Default)]
pub struct StubFetcher {
    responses: HashMap<String, Value>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    /// Registers a document below the stub API root.
    pub fn with_path(self, path: &str, body: Value) -> Self {
        self.with(format!("{}/{}", BASE_URL, path), body)
    }

    /// Registers a `/pokemon` document under both its name and its id.
    pub fn with_pokemon(self, body: Value) -> Self {
        let name = body["name"].as_str().unwrap_or_default().to_string();
        let id = body["id"].as_u64().unwrap_or_default();
        self.with_path(&format!("pokemon/{}", name), body.clone())
            .with_path(&format!("pokemon/{}", id), body)
    }

    pub fn without_path(mut self, path: &str) -> Self {
        self.responses.remove(&format!("{}/{}", BASE_URL, path));
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl JsonFetcher for StubFetcher {
    async fn get_json(&self, url: &str) -> FetchResult<Value> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// A client backed by a clone of `stub`; the clone shares call counters.
pub fn stub_client(stub: &StubFetcher) -> DexClient {
    DexClient::new(Arc::new(stub.clone()), BASE_URL, &CacheConfig::default())
}

pub mod fixtures {
    use super::StubFetcher;
    use serde_json::{json, Value};

    pub struct MoveSpec<'a> {
        pub game: &'a str,
        pub name: &'a str,
        pub method: &'a str,
        pub level: u32,
    }

    pub fn learn<'a>(game: &'a str, name: &'a str, method: &'a str, level: u32) -> MoveSpec<'a> {
        MoveSpec {
            game,
            name,
            method,
            level,
        }
    }

    /// Builds a `/pokemon/{id}` document. `stats` is hp, atk, def, spa, spd, spe.
    pub fn pokemon(
        id: u32,
        name: &str,
        types: &[&str],
        stats: [u32; 6],
        moves: &[MoveSpec<'_>],
        abilities: &[(&str, bool)],
    ) -> Value {
        let stat_names = [
            "hp",
            "attack",
            "defense",
            "special-attack",
            "special-defense",
            "speed",
        ];
        json!({
            "id": id,
            "name": name,
            "height": 19,
            "weight": 950,
            "base_experience": 270,
            "types": types.iter().enumerate().map(|(i, t)| json!({
                "slot": i + 1,
                "type": {"name": t, "url": format!("https://pokeapi.test/api/v2/type/{}/", t)}
            })).collect::<Vec<_>>(),
            "stats": stat_names.iter().zip(stats).map(|(n, v)| json!({
                "base_stat": v,
                "effort": 0,
                "stat": {"name": n}
            })).collect::<Vec<_>>(),
            "abilities": abilities.iter().enumerate().map(|(i, (a, hidden))| json!({
                "ability": {"name": a},
                "is_hidden": hidden,
                "slot": i + 1
            })).collect::<Vec<_>>(),
            "moves": moves.iter().map(|m| json!({
                "move": {"name": m.name},
                "version_group_details": [{
                    "level_learned_at": m.level,
                    "move_learn_method": {"name": m.method},
                    "version_group": {"name": m.game}
                }]
            })).collect::<Vec<_>>(),
            "sprites": {
                "front_default": format!("https://img.pokeapi.test/{}/front.png", name),
                "front_shiny": format!("https://img.pokeapi.test/{}/front-shiny.png", name),
                "front_female": null,
                "front_shiny_female": null,
                "back_default": format!("https://img.pokeapi.test/{}/back.png", name),
                "back_shiny": format!("https://img.pokeapi.test/{}/back-shiny.png", name),
                "back_female": null,
                "back_shiny_female": null
            }
        })
    }

    pub fn garchomp() -> Value {
        pokemon(
            445,
            "garchomp",
            &["dragon", "ground"],
            [108, 130, 95, 80, 85, 102],
            &[
                learn("omega-ruby-alpha-sapphire", "dragon-claw", "level-up", 24),
                learn("omega-ruby-alpha-sapphire", "earthquake", "level-up", 48),
                learn("omega-ruby-alpha-sapphire", "stone-edge", "tutor", 0),
                learn("omega-ruby-alpha-sapphire", "swords-dance", "level-up", 36),
                learn("sun-moon", "iron-tail", "egg", 0),
                learn("sun-moon", "hydro-pump", "egg", 0),
                learn("x-y", "iron-tail", "egg", 0),
                learn("x-y", "outrage", "egg", 0),
            ],
            &[("sand-veil", false), ("rough-skin", true)],
        )
    }

    pub fn pikachu() -> Value {
        pokemon(
            25,
            "pikachu",
            &["electric"],
            [35, 55, 40, 50, 50, 90],
            &[learn("scarlet-violet", "thunderbolt", "level-up", 36)],
            &[("static", false), ("lightning-rod", true)],
        )
    }

    pub fn gyarados() -> Value {
        pokemon(
            130,
            "gyarados",
            &["water", "flying"],
            [95, 125, 79, 60, 100, 81],
            &[learn("scarlet-violet", "hurricane", "tutor", 0)],
            &[("intimidate", false)],
        )
    }

    /// A creature whose learnset exercises every moveset filter.
    pub fn stubmon() -> Value {
        pokemon(
            9999,
            "stubmon",
            &["normal"],
            [50, 100, 50, 50, 50, 50],
            &[
                learn("demo-game", "egg-move", "egg", 0),
                learn("demo-game", "tm-move", "machine", 0),
                learn("demo-game", "status-move", "level-up", 1),
                learn("demo-game", "bad-move", "level-up", 5),
                learn("demo-game", "powerless-move", "level-up", 10),
            ],
            &[],
        )
    }

    fn names(list: &[&str]) -> Vec<Value> {
        list.iter().map(|n| json!({"name": n})).collect()
    }

    pub fn type_doc(double: &[&str], half: &[&str], none: &[&str]) -> Value {
        json!({
            "damage_relations": {
                "double_damage_to": names(double),
                "half_damage_to": names(half),
                "no_damage_to": names(none),
                "double_damage_from": [],
                "half_damage_from": [],
                "no_damage_from": []
            }
        })
    }

    pub fn move_doc(class: &str, power: Option<u32>, accuracy: Option<u32>, type_name: &str) -> Value {
        json!({
            "power": power,
            "accuracy": accuracy,
            "damage_class": {"name": class},
            "type": {"name": type_name},
            "effect_entries": [
                {"effect": format!("{} long effect.", type_name), "short_effect": format!("{} hit.", type_name), "language": {"name": "en"}}
            ]
        })
    }

    fn chain_link(name: &str, details: Value, evolves_to: Vec<Value>) -> Value {
        json!({
            "species": {"name": name, "url": format!("https://pokeapi.test/api/v2/pokemon-species/{}/", name)},
            "evolution_details": details,
            "evolves_to": evolves_to
        })
    }

    pub fn gible_chain() -> Value {
        let level = |lvl: u32| {
            json!([{
                "trigger": {"name": "level-up"},
                "min_level": lvl,
                "item": null,
                "time_of_day": "",
                "needs_overworld_rain": false,
                "gender": null,
                "min_happiness": null
            }])
        };
        json!({
            "id": 222,
            "chain": chain_link(
                "gible",
                json!([]),
                vec![chain_link(
                    "gabite",
                    level(24),
                    vec![chain_link("garchomp", level(48), vec![])],
                )],
            )
        })
    }

    /// Registers the whole fixture world: types, creatures, species, moves,
    /// abilities, encounters and evolution chains.
    pub fn standard_stub() -> StubFetcher {
        StubFetcher::new()
            .with_path(
                "type",
                json!({"count": 13, "results": names(&[
                    "normal", "fighting", "flying", "ground", "fire", "water", "grass",
                    "electric", "ice", "dragon", "fairy", "unknown", "shadow"
                ])}),
            )
            .with_path("type/dragon", type_doc(&["dragon"], &["steel"], &["fairy"]))
            .with_path(
                "type/electric",
                type_doc(&["water", "flying"], &["electric", "grass", "dragon"], &["ground"]),
            )
            .with_path(
                "type/fairy",
                type_doc(&["fighting", "dragon", "dark"], &["fire", "poison", "steel"], &[]),
            )
            .with_path(
                "type/fighting",
                type_doc(
                    &["normal", "ice", "rock", "dark", "steel"],
                    &["flying", "poison", "bug", "psychic", "fairy"],
                    &["ghost"],
                ),
            )
            .with_path(
                "type/fire",
                type_doc(&["grass", "ice", "bug", "steel"], &["fire", "water", "rock", "dragon"], &[]),
            )
            .with_path(
                "type/flying",
                type_doc(&["grass", "fighting", "bug"], &["electric", "rock", "steel"], &[]),
            )
            .with_path(
                "type/grass",
                type_doc(
                    &["water", "ground", "rock"],
                    &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"],
                    &[],
                ),
            )
            .with_path(
                "type/ground",
                type_doc(&["fire", "electric", "poison", "rock", "steel"], &["grass", "bug"], &["flying"]),
            )
            .with_path(
                "type/ice",
                type_doc(&["grass", "ground", "flying", "dragon"], &["fire", "water", "ice", "steel"], &[]),
            )
            .with_path("type/normal", type_doc(&[], &["rock", "steel"], &["ghost"]))
            .with_path(
                "type/water",
                type_doc(&["fire", "ground", "rock"], &["water", "grass", "dragon"], &[]),
            )
            .with_pokemon(garchomp())
            .with_pokemon(pikachu())
            .with_pokemon(gyarados())
            .with_pokemon(stubmon())
            .with_path(
                "pokemon-species/445",
                json!({
                    "name": "garchomp",
                    "gender_rate": 4,
                    "hatch_counter": 40,
                    "egg_groups": names(&["monster", "dragon"]),
                    "evolution_chain": {"url": "https://pokeapi.test/api/v2/evolution-chain/222/"},
                    "flavor_text_entries": [
                        {"flavor_text": "It flies at sonic\nspeed, taking on\u{c}its foes head-on.", "language": {"name": "en"}, "version": {"name": "omega-ruby"}},
                        {"flavor_text": "Il vole a la vitesse du son.", "language": {"name": "fr"}, "version": {"name": "omega-ruby"}},
                        {"flavor_text": "When it folds up its body, it resembles a jet plane.", "language": {"name": "en"}, "version": {"name": "x"}}
                    ]
                }),
            )
            .with_path(
                "pokemon-species/25",
                json!({
                    "name": "pikachu",
                    "gender_rate": 4,
                    "hatch_counter": 10,
                    "egg_groups": names(&["ground", "fairy"]),
                    "evolution_chain": {"url": "https://pokeapi.test/api/v2/evolution-chain/10/"},
                    "flavor_text_entries": []
                }),
            )
            .with_path("pokemon-species/9999", json!({"name": "stubmon"}))
            .with("https://pokeapi.test/api/v2/evolution-chain/222/", gible_chain())
            .with_path("move/dragon-claw", move_doc("physical", Some(80), Some(100), "dragon"))
            .with_path("move/earthquake", move_doc("physical", Some(100), Some(100), "ground"))
            .with_path("move/stone-edge", move_doc("physical", Some(100), Some(80), "rock"))
            .with_path("move/swords-dance", move_doc("status", None, None, "normal"))
            .with_path("move/thunderbolt", move_doc("special", Some(90), Some(100), "electric"))
            .with_path("move/egg-move", move_doc("physical", Some(40), Some(100), "normal"))
            .with_path("move/tm-move", move_doc("physical", Some(120), Some(100), "normal"))
            .with_path("move/status-move", move_doc("status", None, None, "normal"))
            .with_path("move/powerless-move", move_doc("physical", None, None, "normal"))
            .with_path(
                "ability/sand-veil",
                json!({"effect_entries": [
                    {"effect": "Boosts evasion in a sandstorm.", "short_effect": "Evasion up in sandstorm.", "language": {"name": "en"}}
                ]}),
            )
            .with_path(
                "ability/rough-skin",
                json!({"effect_entries": [
                    {"effect": "Hurts attackers on contact.", "short_effect": "Damages on contact.", "language": {"name": "en"}}
                ]}),
            )
            .with_path("pokemon/445/encounters", json!([]))
            .with_path(
                "pokemon/25/encounters",
                json!([{
                    "location_area": {"name": "viridian-forest-area"},
                    "version_details": [{
                        "version": {"name": "red"},
                        "max_chance": 5,
                        "encounter_details": [{
                            "method": {"name": "walk"},
                            "min_level": 3,
                            "max_level": 5,
                            "chance": 5,
                            "condition_values": [{"name": "time-day"}]
                        }]
                    }]
                }]),
            )
    }
}
