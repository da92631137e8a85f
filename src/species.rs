use crate::client::DexClient;
use crate::errors::DexResult;
use crate::pokeapi::SpeciesResource;
use schema::CreatureRecord;
use std::collections::BTreeMap;

/// Fetches `/pokemon-species/{dex}` for a resolved creature.
pub async fn fetch_species(client: &DexClient, record: &CreatureRecord) -> DexResult<SpeciesResource> {
    client
        .fetch_as(
            &client.endpoint(&format!("pokemon-species/{}", record.dex)),
            &format!("species data for {}", record.name),
        )
        .await
}

impl SpeciesResource {
    pub fn evolution_chain_url(&self) -> Option<&str> {
        self.evolution_chain
            .as_ref()
            .map(|chain| chain.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Flavor texts in one language keyed by version. Line breaks and form
    /// feeds in the game text collapse to single spaces.
    pub fn descriptions(&self, language: &str) -> BTreeMap<String, String> {
        self.flavor_text_entries
            .iter()
            .filter(|entry| entry.language.name == language)
            .filter_map(|entry| {
                let version = entry.version.as_ref()?.name.clone();
                let text = entry.flavor_text.split_whitespace().collect::<Vec<_>>().join(" ");
                Some((version, text))
            })
            .collect()
    }
}
