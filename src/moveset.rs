//! Moveset recommendations.
//!
//! A lightweight heuristic that ranks damaging moves by power, accuracy,
//! same-type bonus and how well the move's class fits the creature's stronger
//! attacking stat. It is a starting point for team building, not a tier list.

use crate::client::DexClient;
use crate::errors::{DexError, DexResult};
use crate::pokeapi::{english_effect, english_short_effect};
use crate::pokemon::resolve;
use ordered_float::OrderedFloat;
use schema::{BaseStats, DamageClass, LearnsetEntry, MoveRecommendation, MovesetRecommendation};
use std::cmp::Reverse;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 4;

const DEFAULT_ACCURACY_FACTOR: f64 = 0.85;
const MATCHING_CLASS_FACTOR: f64 = 1.1;
const OFF_CLASS_FACTOR: f64 = 0.9;
const STAB_FACTOR: f64 = 1.3;

/// Physical when attack is at least special attack, otherwise special.
pub fn preferred_class(stats: &BaseStats) -> DamageClass {
    if stats.attack >= stats.sp_atk {
        DamageClass::Physical
    } else {
        DamageClass::Special
    }
}

/// Heuristic score before rounding.
pub fn score_move(
    power: Option<u32>,
    accuracy: Option<u32>,
    class: DamageClass,
    preferred: DamageClass,
    stab: bool,
) -> f64 {
    let power_factor = f64::from(power.unwrap_or(0));
    let accuracy_factor = match accuracy {
        Some(accuracy) if accuracy > 0 => f64::from(accuracy) / 100.0,
        _ => DEFAULT_ACCURACY_FACTOR,
    };
    let class_factor = if class == preferred {
        MATCHING_CLASS_FACTOR
    } else {
        OFF_CLASS_FACTOR
    };
    let stab_factor = if stab { STAB_FACTOR } else { 1.0 };
    power_factor * accuracy_factor * class_factor * stab_factor
}

/// Whether a learnset entry is worth fetching move data for.
fn is_candidate(entry: &LearnsetEntry, include_tm: bool) -> bool {
    // Egg moves are reported by the breeding tool.
    if entry.is_egg_move() {
        return false;
    }
    include_tm || matches!(entry.learn_method.as_str(), "level-up" | "tutor")
}

/// Ranks the damaging moves a creature learns in `game`.
pub async fn suggest_moveset(
    client: &DexClient,
    identifier: &str,
    game: &str,
    limit: usize,
    include_tm: bool,
) -> DexResult<MovesetRecommendation> {
    let record = resolve(client, identifier).await?;
    let moves = record
        .learnset(game)
        .ok_or_else(|| DexError::validation(format!("No move data for game '{}'", game)))?;

    let preferred = preferred_class(&record.base_stats);
    let mut candidates = Vec::new();
    for entry in moves.iter().filter(|entry| is_candidate(entry, include_tm)) {
        let move_data = match client.move_data(&entry.name).await {
            Ok(data) => data,
            Err(err) => {
                debug!(move_name = entry.name.as_str(), error = %err, "dropping move without data");
                continue;
            }
        };

        let Some(class) = move_data
            .damage_class
            .as_ref()
            .and_then(|c| c.name.parse::<DamageClass>().ok())
            .filter(|c| c.is_damaging())
        else {
            continue;
        };

        let move_type = move_data.move_type.as_ref().map(|t| t.name.clone());
        let stab = move_type.as_deref().is_some_and(|t| record.has_type(t));
        let score = score_move(move_data.power, move_data.accuracy, class, preferred, stab);

        candidates.push(MoveRecommendation {
            name: entry.name.clone(),
            move_type,
            power: move_data.power,
            accuracy: move_data.accuracy,
            damage_class: class,
            learn_method: entry.learn_method.clone(),
            level: entry.level,
            stab,
            score: (score * 100.0).round() / 100.0,
            short_effect: english_short_effect(&move_data.effect_entries),
            effect: english_effect(&move_data.effect_entries),
        });
    }

    candidates.sort_by_key(|rec| Reverse(OrderedFloat(rec.score)));
    candidates.truncate(limit);

    Ok(MovesetRecommendation {
        pokemon: record.name,
        game: game.to_string(),
        recommendations: candidates,
    })
}
