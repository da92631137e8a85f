use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};

/// Types PokeAPI lists that never appear in standard battles.
pub const IGNORED_TYPES: [&str; 2] = ["unknown", "shadow"];

/// Returns true when a type name takes part in regular battles.
pub fn is_battle_type(type_name: &str) -> bool {
    !IGNORED_TYPES.contains(&type_name)
}

/// Offensive damage relations of one attacking type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRelations {
    pub double_damage_to: BTreeSet<String>,
    pub half_damage_to: BTreeSet<String>,
    pub no_damage_to: BTreeSet<String>,
}

impl TypeRelations {
    /// Calculate the multiplier this attacking type deals to a set of defending types.
    /// Returns: 0.0 as soon as any defending type is immune, otherwise the product of
    /// 2.0 (super effective), 0.5 (not very effective) and 1.0 (unlisted) per type.
    pub fn multiplier_against<S: AsRef<str>>(&self, defending: &[S]) -> f64 {
        let mut multiplier = 1.0;
        for defend_type in defending {
            let defend_type = defend_type.as_ref();
            if self.no_damage_to.contains(defend_type) {
                return 0.0;
            }
            if self.double_damage_to.contains(defend_type) {
                multiplier *= 2.0;
            } else if self.half_damage_to.contains(defend_type) {
                multiplier *= 0.5;
            }
        }
        multiplier
    }
}

/// How a damaging move computes its damage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DamageClass {
    Physical,
    Special,
    Status,
}

impl DamageClass {
    pub fn is_damaging(self) -> bool {
        !matches!(self, DamageClass::Status)
    }
}
