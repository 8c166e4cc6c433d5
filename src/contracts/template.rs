//! Contract templates - the job catalog offers are rolled from
//!
//! A template fixes the job's flavour, base pay and issuing faction. The
//! destination, risk, bonus and deadline are rolled per offer.

use serde::{Deserialize, Serialize};

use crate::core::types::{Credits, Faction};

/// A delivery job blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTemplate {
    pub title: String,
    /// `{destination}` is replaced by the rolled destination's name
    pub description: String,
    pub base_pay: Credits,
    pub faction: Faction,
}

impl ContractTemplate {
    pub fn new(title: &str, description: &str, base_pay: Credits, faction: Faction) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            base_pay,
            faction,
        }
    }

    /// Description with the destination name filled in
    pub fn describe(&self, destination_name: &str) -> String {
        self.description.replace("{destination}", destination_name)
    }
}

/// Built-in job catalog
pub fn default_templates() -> Vec<ContractTemplate> {
    vec![
        ContractTemplate::new(
            "Medical Supplies",
            "Rush a crate of trauma kits to {destination}.",
            150,
            Faction::Federation,
        ),
        ContractTemplate::new(
            "Ore Samples",
            "Carry sealed assay cores to the labs at {destination}.",
            120,
            Faction::MiningGuild,
        ),
        ContractTemplate::new(
            "Diplomatic Pouch",
            "Deliver a sealed pouch to the envoy at {destination}. No questions.",
            220,
            Faction::Federation,
        ),
        ContractTemplate::new(
            "Spare Reactor Parts",
            "A freighter is stranded at {destination} waiting on coolant pumps.",
            180,
            Faction::FreeTraders,
        ),
        ContractTemplate::new(
            "Passenger Transfer",
            "Ferry a contractor and their luggage to {destination}.",
            100,
            Faction::Neutral,
        ),
        ContractTemplate::new(
            "Unmarked Cargo",
            "Drop three unlabelled containers at {destination}. Pays on arrival.",
            260,
            Faction::FreeTraders,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_fills_destination() {
        let t = ContractTemplate::new("T", "Go to {destination} now", 10, Faction::Neutral);
        assert_eq!(t.describe("Ceres"), "Go to Ceres now");
    }

    #[test]
    fn test_default_catalog_is_usable() {
        let templates = default_templates();
        assert!(!templates.is_empty());
        assert!(templates.iter().all(|t| t.base_pay > 0));
        assert!(templates.iter().any(|t| t.faction.is_neutral()));
    }
}
