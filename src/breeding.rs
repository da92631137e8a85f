use crate::client::DexClient;
use crate::errors::DexResult;
use crate::pokemon::resolve;
use crate::species::fetch_species;
use schema::{BreedingInfo, CreatureRecord, GenderRatio};
use std::collections::BTreeSet;

/// Steps walked per hatch cycle.
const STEPS_PER_CYCLE: u32 = 255;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts PokeAPI's gender rate (eighths female, -1 for genderless) to percentages.
pub fn gender_from_rate(gender_rate: i32) -> GenderRatio {
    if gender_rate == -1 {
        return GenderRatio {
            female_percent: 0.0,
            male_percent: 0.0,
        };
    }
    let female = f64::from(gender_rate) / 8.0 * 100.0;
    GenderRatio {
        female_percent: round2(female),
        male_percent: round2(100.0 - female),
    }
}

pub fn hatch_steps(hatch_counter: Option<u32>) -> Option<u32> {
    hatch_counter.map(|counter| (counter + 1) * STEPS_PER_CYCLE)
}

/// Egg moves for one game, or across every game when `game` is `None` or
/// blank. Sorted and deduplicated; an unknown game has none.
pub fn egg_moves(record: &CreatureRecord, game: Option<&str>) -> Vec<String> {
    let learnsets: Vec<_> = match game.map(str::trim).filter(|g| !g.is_empty()) {
        Some(game) => record.moves.get(game).into_iter().collect(),
        None => record.moves.values().collect(),
    };
    learnsets
        .into_iter()
        .flatten()
        .filter(|entry| entry.is_egg_move())
        .map(|entry| entry.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Egg groups, hatch steps, gender ratio and egg moves in one report.
pub async fn get_breeding_info(
    client: &DexClient,
    identifier: &str,
    game: Option<&str>,
) -> DexResult<BreedingInfo> {
    let record = resolve(client, identifier).await?;
    let species = fetch_species(client, &record).await?;

    Ok(BreedingInfo {
        egg_groups: species.egg_groups.into_iter().map(|g| g.name).collect(),
        gender: gender_from_rate(species.gender_rate.unwrap_or(-1)),
        hatch_steps: hatch_steps(species.hatch_counter),
        egg_moves: egg_moves(&record, game),
        pokemon: record.name,
    })
}
