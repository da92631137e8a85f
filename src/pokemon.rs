//! Creature lookups: the identifier resolver and the simple record tools.

use crate::client::DexClient;
use crate::errors::{DexError, DexResult};
use crate::pokeapi::PokemonResource;
use crate::species::fetch_species;
use schema::{CreatureRecord, LearnsetEntry, PokemonSummary, SpriteSide, SpriteUrl};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// How an identifier is looked up upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Dex(u32),
    Name(String),
}

impl LookupKey {
    /// All-digit identifiers are dex numbers; anything else is a lowercased name.
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(dex) = trimmed.parse() {
                return LookupKey::Dex(dex);
            }
        }
        LookupKey::Name(trimmed.to_lowercase())
    }

    /// Whether the key can name a creature at all. Names are PokeAPI slugs:
    /// lowercase ASCII letters, digits, `-`, `.` and `'`, with at least one
    /// letter or digit. Keys that fail this never reach the network.
    pub fn is_valid(&self) -> bool {
        match self {
            LookupKey::Dex(_) => true,
            LookupKey::Name(name) => {
                let slug_byte = |b: u8| {
                    b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'.' | b'\'')
                };
                name.bytes().any(|b| b.is_ascii_alphanumeric()) && name.bytes().all(slug_byte)
            }
        }
    }

    fn path(&self) -> String {
        match self {
            LookupKey::Dex(dex) => format!("pokemon/{}", dex),
            LookupKey::Name(name) => format!("pokemon/{}", name),
        }
    }
}

/// Resolves a name (any case) or national dex number to its canonical record.
pub async fn resolve(client: &DexClient, identifier: &str) -> DexResult<CreatureRecord> {
    let not_found = |source: Box<dyn std::error::Error + Send + Sync>| DexError::NotFound {
        identifier: identifier.to_string(),
        source,
    };

    let key = LookupKey::parse(identifier);
    if !key.is_valid() {
        return Err(not_found("not a Pokemon name or dex number".into()));
    }
    debug!(identifier, ?key, "resolving creature");

    let url = client.endpoint(&key.path());
    let value = client
        .fetch_json(&url, &format!("Pokemon data for {}", identifier))
        .await
        .map_err(|err| not_found(Box::new(err)))?;
    let raw = PokemonResource::deserialize(&*value).map_err(|err| not_found(Box::new(err)))?;
    Ok(raw.into_record())
}

/// Summary stats, typing and measurements.
pub async fn get_pokemon(client: &DexClient, identifier: &str) -> DexResult<PokemonSummary> {
    let record = resolve(client, identifier).await?;
    Ok(summarize(record))
}

pub fn summarize(record: CreatureRecord) -> PokemonSummary {
    PokemonSummary {
        dex: record.dex,
        height_m: f64::from(record.height_dm) / 10.0,
        weight_kg: f64::from(record.weight_hg) / 10.0,
        name: record.name,
        types: record.types,
        height_dm: record.height_dm,
        weight_hg: record.weight_hg,
        base_experience: record.base_experience,
        base_stats: record.base_stats,
    }
}

/// Moves learnable in `game`; a game with no learnset yields an empty list.
pub async fn get_moves(
    client: &DexClient,
    identifier: &str,
    game: &str,
) -> DexResult<Vec<LearnsetEntry>> {
    let record = resolve(client, identifier).await?;
    Ok(record
        .learnset(game)
        .map(<[LearnsetEntry]>::to_vec)
        .unwrap_or_default())
}

/// Direct sprite URL for a side and variant. The side is checked before any lookup.
pub async fn get_sprite(
    client: &DexClient,
    identifier: &str,
    side: &str,
    variant: &str,
) -> DexResult<SpriteUrl> {
    let side: SpriteSide = side
        .parse()
        .map_err(|_| DexError::validation("side must be 'front' or 'back'"))?;
    let record = resolve(client, identifier).await?;
    let url = record.sprites.side(side).variant(variant).map(str::to_string);
    Ok(SpriteUrl {
        url,
        side,
        variant: variant.to_string(),
    })
}

/// Flavor text in `language`, keyed by game version.
pub async fn get_descriptions(
    client: &DexClient,
    identifier: &str,
    language: &str,
) -> DexResult<BTreeMap<String, String>> {
    let record = resolve(client, identifier).await?;
    let species = fetch_species(client, &record).await?;
    Ok(species.descriptions(language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixtures, stub_client};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("25", LookupKey::Dex(25))]
    #[case("0445", LookupKey::Dex(445))]
    #[case("Garchomp", LookupKey::Name("garchomp".to_string()))]
    #[case(" PIKACHU ", LookupKey::Name("pikachu".to_string()))]
    #[case("mr-mime", LookupKey::Name("mr-mime".to_string()))]
    #[case("25a", LookupKey::Name("25a".to_string()))]
    fn test_lookup_key_parsing(#[case] input: &str, #[case] expected: LookupKey) {
        assert_eq!(LookupKey::parse(input), expected);
    }

    #[rstest]
    #[case("25", true)]
    #[case("mr-mime", true)]
    #[case("mr.-mime", true)]
    #[case("farfetch'd", true)]
    #[case("porygon-z", true)]
    #[case("", false)]
    #[case("..", false)]
    #[case("pikachu#x", false)]
    #[case("pikachu?form=1", false)]
    #[case("../type/fire", false)]
    #[case("pikachu/encounters", false)]
    #[case("pika chu", false)]
    #[case("flabébé", false)]
    fn test_lookup_key_validity(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(LookupKey::parse(input).is_valid(), valid);
    }

    #[tokio::test]
    async fn test_resolution_is_case_insensitive_and_accepts_dex() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let canonical = resolve(&client, "pikachu").await.unwrap();
        for identifier in ["Pikachu", "PIKACHU", "25"] {
            assert_eq!(resolve(&client, identifier).await.unwrap(), canonical);
        }
        assert_eq!(canonical.dex, 25);
    }

    #[tokio::test]
    async fn test_case_variants_share_one_fetch() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);
        for identifier in ["Garchomp", "garchomp", "GARCHOMP"] {
            resolve(&client, identifier).await.unwrap();
        }
        assert_eq!(stub.calls(&client.endpoint("pokemon/garchomp")), 1);
    }

    #[tokio::test]
    async fn test_unknown_creature_is_not_found() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let err = resolve(&client, "MissingNo").await.unwrap_err();
        match &err {
            DexError::NotFound { identifier, .. } => assert_eq!(identifier, "MissingNo"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Could not find Pokemon 'MissingNo'"));
        assert!(matches!(
            resolve(&client, "   ").await,
            Err(DexError::NotFound { .. })
        ));

        // URL syntax in a name must not reach a real endpoint.
        for identifier in ["pikachu#x", "pikachu?form=1", "../type/fire", "pikachu/encounters"] {
            let err = resolve(&client, identifier).await.unwrap_err();
            assert!(
                matches!(err, DexError::NotFound { identifier: ref id, .. } if id == identifier),
                "{identifier} resolved to something"
            );
        }
        assert_eq!(stub.calls(&client.endpoint("pokemon/pikachu")), 0);
        assert_eq!(stub.calls(&client.endpoint("type/fire")), 0);
    }

    #[tokio::test]
    async fn test_get_pokemon_derives_units() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let summary = get_pokemon(&client, "445").await.unwrap();
        assert_eq!(summary.name, "garchomp");
        assert_eq!(summary.types, vec!["dragon", "ground"]);
        assert_eq!(summary.height_dm, 19);
        assert_eq!(summary.height_m, 1.9);
        assert_eq!(summary.weight_kg, 95.0);
        assert_eq!(summary.base_experience, Some(270));
        assert_eq!(summary.base_stats.speed, 102);
    }

    #[tokio::test]
    async fn test_get_moves_for_game() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let moves = get_moves(&client, "pikachu", "scarlet-violet").await.unwrap();
        assert_eq!(
            moves,
            vec![LearnsetEntry {
                name: "thunderbolt".to_string(),
                learn_method: "level-up".to_string(),
                level: Some(36),
            }]
        );
        assert!(get_moves(&client, "pikachu", "red-blue").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_sprite() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let sprite = get_sprite(&client, "garchomp", "back", "shiny").await.unwrap();
        assert_eq!(
            sprite.url.as_deref(),
            Some("https://img.pokeapi.test/garchomp/back-shiny.png")
        );
        assert_eq!(sprite.side, SpriteSide::Back);

        let missing = get_sprite(&client, "garchomp", "front", "female").await.unwrap();
        assert_eq!(missing.url, None);
    }

    #[tokio::test]
    async fn test_invalid_sprite_side_fails_before_lookup() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let err = get_sprite(&client, "garchomp", "side", "default").await.unwrap_err();
        assert!(matches!(err, DexError::Validation(ref msg) if msg == "side must be 'front' or 'back'"));
        assert_eq!(stub.calls(&client.endpoint("pokemon/garchomp")), 0);
    }

    #[tokio::test]
    async fn test_get_descriptions_filters_language() {
        let stub = fixtures::standard_stub();
        let client = stub_client(&stub);

        let english = get_descriptions(&client, "garchomp", "en").await.unwrap();
        assert_eq!(english.len(), 2);
        assert_eq!(
            english["omega-ruby"],
            "It flies at sonic speed, taking on its foes head-on."
        );

        let french = get_descriptions(&client, "garchomp", "fr").await.unwrap();
        assert_eq!(french.len(), 1);
        assert!(get_descriptions(&client, "garchomp", "ja").await.unwrap().is_empty());
    }
}
