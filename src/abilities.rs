use crate::client::DexClient;
use crate::errors::DexResult;
use crate::pokeapi::{english_effect, english_short_effect, AbilityResource};
use crate::pokemon::resolve;
use schema::{AbilityDetail, AbilityReport};

/// Every ability a creature can have, with its English effect text.
pub async fn explore_abilities(client: &DexClient, identifier: &str) -> DexResult<AbilityReport> {
    let record = resolve(client, identifier).await?;

    let mut abilities = Vec::with_capacity(record.abilities.len());
    for slot in &record.abilities {
        let ability: AbilityResource = client
            .fetch_as(
                &client.endpoint(&format!("ability/{}", slot.name)),
                &format!("ability data for {}", slot.name),
            )
            .await?;
        abilities.push(AbilityDetail {
            name: slot.name.clone(),
            is_hidden: slot.is_hidden,
            short_effect: english_short_effect(&ability.effect_entries),
            effect: english_effect(&ability.effect_entries),
        });
    }

    Ok(AbilityReport {
        pokemon: record.name,
        abilities,
    })
}
