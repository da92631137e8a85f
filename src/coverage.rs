//! Defensive type coverage for a roster.
//!
//! Every canonical attacking type is scored against each roster member's
//! typing, and the per-type tallies are condensed into the attack types that
//! threaten half the team and the ones the whole team shrugs off.

use crate::client::DexClient;
use crate::errors::{DexError, DexResult};
use crate::pokemon::resolve;
use schema::{CreatureRecord, TypeCoverageReport, TypeMatchupSummary, TypeRelations};
use std::sync::Arc;
use tracing::warn;

/// How one member fares against one attacking type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matchup {
    Weak,
    Resistant,
    Immune,
    Neutral,
}

impl Matchup {
    pub fn classify(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Matchup::Immune
        } else if multiplier > 1.0 {
            Matchup::Weak
        } else if multiplier < 1.0 {
            Matchup::Resistant
        } else {
            Matchup::Neutral
        }
    }
}

fn record(row: &mut TypeMatchupSummary, matchup: Matchup) {
    match matchup {
        Matchup::Weak => row.weak += 1,
        Matchup::Resistant => row.resistant += 1,
        Matchup::Immune => row.immune += 1,
        Matchup::Neutral => row.neutral += 1,
    }
}

/// Multiplier against a defending typing. Attack types without relation
/// data count as neutral.
pub fn calc_multiplier<S: AsRef<str>>(relations: Option<&TypeRelations>, defending: &[S]) -> f64 {
    relations.map_or(1.0, |relations| relations.multiplier_against(defending))
}

async fn relations_or_neutral(client: &DexClient, attack_type: &str) -> Option<Arc<TypeRelations>> {
    match client.type_relations(attack_type).await {
        Ok(relations) => Some(relations),
        Err(err) => {
            warn!(attack_type, error = %err, "type relations unavailable, treating as neutral");
            None
        }
    }
}

/// Tallies one attacking type across the roster.
pub fn tally(
    attack_type: &str,
    relations: Option<&TypeRelations>,
    roster: &[CreatureRecord],
) -> TypeMatchupSummary {
    let mut row = TypeMatchupSummary {
        attack_type: attack_type.to_string(),
        ..Default::default()
    };
    for member in roster {
        record(&mut row, Matchup::classify(calc_multiplier(relations, &member.types)));
    }
    row
}

/// Builds the report from per-type rows; the roster size is `team.len()`.
pub fn summarize(team: Vec<String>, rows: Vec<TypeMatchupSummary>) -> TypeCoverageReport {
    let roster_size = team.len();
    let weak_threshold = roster_size.div_ceil(2).max(1);
    let notable_weaknesses = rows
        .iter()
        .filter(|row| row.weak >= weak_threshold)
        .map(|row| row.attack_type.clone())
        .collect();
    let notable_resistances = rows
        .iter()
        .filter(|row| row.resistant + row.immune == roster_size)
        .map(|row| row.attack_type.clone())
        .collect();
    TypeCoverageReport {
        team,
        matchup_summary: rows,
        notable_weaknesses,
        notable_resistances,
    }
}

/// Summarizes defensive coverage for a roster of names or dex numbers.
pub async fn analyze_type_coverage<S: AsRef<str>>(
    client: &DexClient,
    identifiers: &[S],
) -> DexResult<TypeCoverageReport> {
    if identifiers.is_empty() {
        return Err(DexError::validation(
            "roster must contain at least one member",
        ));
    }

    let mut roster = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        roster.push(resolve(client, identifier.as_ref()).await?);
    }

    let attack_types = client.list_all_types().await?;
    let mut rows = Vec::with_capacity(attack_types.len());
    for attack_type in attack_types.iter() {
        let relations = relations_or_neutral(client, attack_type).await;
        rows.push(tally(attack_type, relations.as_deref(), &roster));
    }

    let team = roster.into_iter().map(|member| member.name).collect();
    Ok(summarize(team, rows))
}
