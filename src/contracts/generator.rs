//! Contract generation
//!
//! Rolls a fresh offer for a station. Draw order is fixed (template,
//! destination, risk, duration) so a seeded source replays exactly.

use serde::{Deserialize, Serialize};

use super::template::ContractTemplate;
use crate::campaign::location::Location;
use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{ContractId, Credits, Faction, LocationId, RiskLevel, Tick};

/// A timed delivery job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub title: String,
    pub description: String,
    pub destination: LocationId,
    pub pay: Credits,
    pub risk: RiskLevel,
    pub faction: Faction,
    /// Absolute tick at which an unaccepted offer lapses
    pub expires_at: Tick,
}

impl Contract {
    /// An open offer is gone once its deadline tick is reached
    pub fn is_expired(&self, tick: Tick) -> bool {
        self.expires_at <= tick
    }
}

/// Rolls contracts from the template table against the location table
#[derive(Debug, Clone, Copy)]
pub struct ContractGenerator<'a> {
    locations: &'a [Location],
    templates: &'a [ContractTemplate],
    config: &'a SimulationConfig,
}

impl<'a> ContractGenerator<'a> {
    pub fn new(
        locations: &'a [Location],
        templates: &'a [ContractTemplate],
        config: &'a SimulationConfig,
    ) -> Self {
        Self {
            locations,
            templates,
            config,
        }
    }

    /// Generate one offer posted at `station`
    ///
    /// Returns `None` when the station is unknown, or when the tables leave
    /// nothing to roll (no templates, no other location to deliver to).
    pub fn generate(
        &self,
        station: &LocationId,
        tick: Tick,
        salt: u32,
        rng: &mut impl RandomSource,
    ) -> Option<Contract> {
        if !self.locations.iter().any(|loc| &loc.id == station) {
            return None;
        }
        if self.templates.is_empty() {
            return None;
        }

        let destinations: Vec<&Location> =
            self.locations.iter().filter(|loc| &loc.id != station).collect();
        if destinations.is_empty() {
            return None;
        }

        let template = &self.templates[rng.index(self.templates.len())];
        let destination = destinations[rng.index(destinations.len())];
        let risk = self.config.risk_for_roll(rng.unit());
        let duration = rng.between(
            self.config.contract_duration_min,
            self.config.contract_duration_max,
        );

        Some(Contract {
            id: ContractId::new(tick, salt),
            title: template.title.clone(),
            description: template.describe(&destination.name),
            destination: destination.id.clone(),
            pay: template.base_pay + self.config.risk_bonus(risk),
            risk,
            faction: template.faction,
            expires_at: tick + duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::location::LocationKind;
    use crate::core::random::{ScriptedRandom, SeededRandom};

    fn locations() -> Vec<Location> {
        vec![
            Location::new("hub", "Hub", LocationKind::Station).with_orbit(100.0, 0.1, 0.0),
            Location::new("luna", "Luna", LocationKind::Moon).with_orbit(150.0, 0.2, 90.0),
            Location::new("mars", "Mars", LocationKind::Planet).with_orbit(250.0, 0.05, 180.0),
        ]
    }

    fn templates() -> Vec<ContractTemplate> {
        vec![
            ContractTemplate::new("Med", "To {destination}", 100, Faction::Federation),
            ContractTemplate::new("Ore", "Ore for {destination}", 50, Faction::Neutral),
        ]
    }

    #[test]
    fn test_unknown_station_yields_none() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(1);
        assert!(gen.generate(&LocationId::new("pluto"), 0, 0, &mut rng).is_none());
    }

    #[test]
    fn test_destination_never_the_station() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(99);
        let hub = LocationId::new("hub");
        for salt in 0..500 {
            let c = gen.generate(&hub, 10, salt, &mut rng).unwrap();
            assert_ne!(c.destination, hub);
            assert!(c.expires_at >= 10 + 1500 && c.expires_at < 10 + 4500);
        }
    }

    #[test]
    fn test_scripted_high_risk_roll() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        // template 0, destination 1 ("mars"), risk 0.9 => HIGH, duration start
        let mut rng = ScriptedRandom::new(vec![0.0, 0.6, 0.9, 0.0]);
        let c = gen.generate(&LocationId::new("hub"), 100, 3, &mut rng).unwrap();
        assert_eq!(c.id, ContractId::new(100, 3));
        assert_eq!(c.title, "Med");
        assert_eq!(c.destination, LocationId::new("mars"));
        assert_eq!(c.description, "To Mars");
        assert_eq!(c.risk, RiskLevel::High);
        assert_eq!(c.pay, 300);
        assert_eq!(c.faction, Faction::Federation);
        assert_eq!(c.expires_at, 1600);
    }

    #[test]
    fn test_scripted_low_and_med_risk_pay() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut low = ScriptedRandom::new(vec![0.9, 0.0, 0.1, 0.5]);
        let c = gen.generate(&LocationId::new("hub"), 0, 0, &mut low).unwrap();
        assert_eq!(c.risk, RiskLevel::Low);
        assert_eq!(c.pay, 50);
        assert_eq!(c.destination, LocationId::new("luna"));
        assert_eq!(c.expires_at, 3000);

        let mut med = ScriptedRandom::new(vec![0.9, 0.0, 0.5, 0.5]);
        let c = gen.generate(&LocationId::new("hub"), 0, 1, &mut med).unwrap();
        assert_eq!(c.risk, RiskLevel::Med);
        assert_eq!(c.pay, 130);
    }

    #[test]
    fn test_lonely_sector_yields_none() {
        let locs = vec![Location::new("hub", "Hub", LocationKind::Station)];
        let (temps, config) = (templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(1);
        assert!(gen.generate(&LocationId::new("hub"), 0, 0, &mut rng).is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let (locs, temps, config) = (locations(), templates(), SimulationConfig::default());
        let gen = ContractGenerator::new(&locs, &temps, &config);
        let mut rng = SeededRandom::new(5);
        let c = gen.generate(&LocationId::new("hub"), 0, 0, &mut rng).unwrap();
        assert!(!c.is_expired(c.expires_at - 1));
        assert!(c.is_expired(c.expires_at));
    }
}
