//! Evolution chain traversal.
//!
//! A chain is a tree rooted at the base species. Each child link carries one
//! or more detail records, and every record is an alternative way to make the
//! same transition, so each one becomes its own step and its own path.

use crate::client::DexClient;
use crate::errors::{DexError, DexResult};
use crate::pokeapi::NamedResource;
use crate::pokemon::resolve;
use crate::species::fetch_species;
use schema::{EvolutionPath, EvolutionReport, EvolutionStep};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Keys lifted into dedicated step fields rather than `conditions`.
const STEP_FIELDS: [&str; 3] = ["trigger", "min_level", "item"];

/// One species in the chain plus the links to what it evolves into.
/// The details on a node describe how its parent evolves into it.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionNode {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<Map<String, Value>>,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

#[derive(Debug, Deserialize)]
struct EvolutionChainResource {
    chain: EvolutionNode,
}

fn named(value: Option<&Value>) -> Option<String> {
    value?.get("name")?.as_str().map(str::to_string)
}

/// String form of an auxiliary condition, or `None` when it is unset.
fn condition_value(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if key == "time_of_day" && !s.is_empty() => Some(s.clone()),
        Value::Object(_) => named(Some(value)),
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        // Existing DexMCP clients match on the capitalized form.
        Value::Bool(true) => Some("True".to_string()),
        other => Some(other.to_string()),
    }
}

/// Normalizes one raw detail record into a step.
pub fn build_step(from_species: &str, to_species: &str, detail: &Map<String, Value>) -> EvolutionStep {
    let conditions: BTreeMap<String, String> = detail
        .iter()
        .filter(|(key, _)| !STEP_FIELDS.contains(&key.as_str()))
        .filter_map(|(key, value)| Some((key.clone(), condition_value(key, value)?)))
        .collect();

    EvolutionStep {
        from_species: from_species.to_string(),
        to_species: to_species.to_string(),
        trigger: named(detail.get("trigger")),
        minimum_level: detail
            .get("min_level")
            .and_then(Value::as_u64)
            .and_then(|level| u32::try_from(level).ok()),
        item: named(detail.get("item")),
        conditions,
    }
}

/// Depth-first walk collecting every root-to-leaf path.
///
/// `current_path` holds the steps from the root to `node`; a step is pushed
/// before descending into a child and popped on the way back up.
pub fn expand_chain(
    node: &EvolutionNode,
    current_path: &mut Vec<EvolutionStep>,
    all_paths: &mut Vec<EvolutionPath>,
) {
    if node.evolves_to.is_empty() {
        all_paths.push(EvolutionPath {
            steps: current_path.clone(),
        });
        return;
    }

    let no_details = [Map::new()];
    for child in &node.evolves_to {
        let details = if child.evolution_details.is_empty() {
            &no_details[..]
        } else {
            &child.evolution_details[..]
        };
        for detail in details {
            current_path.push(build_step(&node.species.name, &child.species.name, detail));
            expand_chain(child, current_path, all_paths);
            current_path.pop();
        }
    }
}

/// Keeps the paths that mention `species`. When none do, every path is
/// returned instead.
// NOTE: the fallback can hide a species missing from its own chain upstream;
// revisit once PokeAPI data for alternate forms is reliable.
pub fn relevant_paths(all_paths: Vec<EvolutionPath>, species: &str) -> Vec<EvolutionPath> {
    if all_paths.iter().any(|path| path.mentions(species)) {
        return all_paths
            .into_iter()
            .filter(|path| path.mentions(species))
            .collect();
    }
    if !all_paths.is_empty() {
        warn!(species, "species absent from its own evolution chain, returning full chain");
    }
    all_paths
}

/// Enumerates the evolution paths that include the requested creature.
pub async fn plan_evolutions(client: &DexClient, identifier: &str) -> DexResult<EvolutionReport> {
    let record = resolve(client, identifier).await?;
    let species = fetch_species(client, &record).await?;

    let Some(chain_url) = species.evolution_chain_url() else {
        debug!(pokemon = record.name.as_str(), "no evolution chain");
        return Ok(EvolutionReport {
            pokemon: record.name,
            paths: Vec::new(),
        });
    };

    let chain = client.fetch_json(chain_url, "evolution chain").await?;
    let chain = EvolutionChainResource::deserialize(&*chain)
        .map_err(|err| DexError::malformed("evolution chain", err))?;

    let mut all_paths = Vec::new();
    expand_chain(&chain.chain, &mut Vec::new(), &mut all_paths);

    let paths = relevant_paths(all_paths, &record.name);
    Ok(EvolutionReport {
        pokemon: record.name,
        paths,
    })
}
