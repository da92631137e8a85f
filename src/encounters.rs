use crate::client::DexClient;
use crate::errors::DexResult;
use crate::pokeapi::{EncounterDetailResource, LocationAreaEncounter, VersionEncounterResource};
use crate::pokemon::resolve;
use schema::{EncounterDetail, EncounterLocation, EncounterReport, EncounterVersion};

fn to_detail(raw: EncounterDetailResource) -> EncounterDetail {
    EncounterDetail {
        method: raw.method.map_or_else(|| "unknown".to_string(), |m| m.name),
        min_level: raw.min_level,
        max_level: raw.max_level,
        chance: raw.chance,
        condition_values: raw.condition_values.into_iter().flatten().map(|c| c.name).collect(),
    }
}

fn to_version(raw: VersionEncounterResource) -> EncounterVersion {
    EncounterVersion {
        version: raw.version.name,
        max_chance: raw.max_chance,
        details: raw.encounter_details.into_iter().map(to_detail).collect(),
    }
}

/// Wild encounter locations grouped by area, then game version.
pub async fn find_encounters(client: &DexClient, identifier: &str) -> DexResult<EncounterReport> {
    let record = resolve(client, identifier).await?;
    let areas: Vec<LocationAreaEncounter> = client
        .fetch_as(
            &client.endpoint(&format!("pokemon/{}/encounters", record.dex)),
            &format!("encounter data for {}", record.name),
        )
        .await?;

    let locations = areas
        .into_iter()
        .map(|area| EncounterLocation {
            location_area: area.location_area.name,
            versions: area.version_details.into_iter().map(to_version).collect(),
        })
        .collect();

    Ok(EncounterReport {
        pokemon: record.name,
        locations,
    })
}
