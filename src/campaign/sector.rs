//! Sector definition - the static tables a playthrough is built from
//!
//! A sector bundles the location table, the contract template table, the
//! ship stats, the starting conditions and any simulation overrides. It is
//! loaded once at startup, either from the built-in defaults or from TOML.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::location::{Location, LocationKind};
use crate::contracts::template::{default_templates, ContractTemplate};
use crate::core::config::SimulationConfig;
use crate::core::error::SectorLoadError;
use crate::core::types::{Credits, Faction, LocationId};
use crate::ship::stats::ShipStats;

/// Where and with what the player begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingConditions {
    pub location: LocationId,
    pub credits: Credits,
    /// Defaults to a full tank
    #[serde(default)]
    pub fuel: Option<f64>,
    /// Defaults to a pristine hull
    #[serde(default)]
    pub hull: Option<f64>,
}

/// Complete static configuration for one playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub start: StartingConditions,
    #[serde(default)]
    pub ship: ShipStats,
    pub locations: Vec<Location>,
    #[serde(default = "default_templates")]
    pub contracts: Vec<ContractTemplate>,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Sector {
    /// The built-in inner-system sector
    pub fn with_defaults() -> Self {
        let locations = vec![
            Location::new("gateway", "Gateway Station", LocationKind::Station)
                .with_faction(Faction::Federation)
                .with_orbit(90.0, 0.08, 0.0)
                .with_fuel_price(1.0),
            Location::new("luna", "Luna", LocationKind::Moon)
                .with_faction(Faction::Federation)
                .with_orbit(130.0, 0.12, 120.0),
            Location::new("mars", "Mars", LocationKind::Planet)
                .with_orbit(170.0, 0.05, 200.0),
            Location::new("phobos", "Phobos Yards", LocationKind::Station)
                .with_faction(Faction::FreeTraders)
                .with_orbit(200.0, 0.09, 310.0)
                .with_fuel_price(1.4),
            Location::new("ceres", "Ceres Hub", LocationKind::Station)
                .with_faction(Faction::MiningGuild)
                .with_orbit(240.0, 0.03, 45.0)
                .with_fuel_price(1.8),
            Location::new("vesta", "Vesta", LocationKind::Moon)
                .with_faction(Faction::MiningGuild)
                .with_orbit(240.0, 0.03, 225.0),
            Location::new("jupiter", "Jupiter", LocationKind::Planet)
                .with_orbit(280.0, 0.01, 150.0),
        ];

        Self {
            name: "Inner Reach".into(),
            start: StartingConditions {
                location: LocationId::new("gateway"),
                credits: 500,
                fuel: None,
                hull: None,
            },
            ship: ShipStats::default(),
            locations,
            contracts: default_templates(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Load a sector from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, SectorLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a sector from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, SectorLoadError> {
        let sector: Sector = toml::from_str(content)?;
        sector.validate()?;
        Ok(sector)
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| &loc.id == id)
    }

    /// Check the tables are consistent enough to play on
    pub fn validate(&self) -> Result<(), SectorLoadError> {
        if self.locations.len() < 2 {
            return Err(SectorLoadError::Invalid(
                "a sector needs at least two locations".into(),
            ));
        }

        let mut seen = HashSet::new();
        for loc in &self.locations {
            if !seen.insert(&loc.id) {
                return Err(SectorLoadError::Invalid(format!(
                    "duplicate location id: {}",
                    loc.id
                )));
            }
            if let Some(orbit) = loc.orbit {
                if orbit.radius < 0.0 || orbit.speed < 0.0 {
                    return Err(SectorLoadError::Invalid(format!(
                        "{} has a negative orbit radius or speed",
                        loc.id
                    )));
                }
            }
            match loc.fuel_price {
                Some(price) if price <= 0.0 || !price.is_finite() => {
                    return Err(SectorLoadError::Invalid(format!(
                        "{} has a non-positive fuel price",
                        loc.id
                    )));
                }
                Some(_) if !loc.is_station() => {
                    return Err(SectorLoadError::Invalid(format!(
                        "{} sells fuel but is not a station",
                        loc.id
                    )));
                }
                _ => {}
            }
        }

        if self.location(&self.start.location).is_none() {
            return Err(SectorLoadError::Invalid(format!(
                "starting location {} is not in the location table",
                self.start.location
            )));
        }

        if self.ship.max_fuel <= 0.0 || self.ship.max_hull <= 0.0 {
            return Err(SectorLoadError::Invalid(
                "ship max_fuel and max_hull must be positive".into(),
            ));
        }
        if self.ship.fuel_efficiency < 0.0 {
            return Err(SectorLoadError::Invalid(
                "ship fuel_efficiency must not be negative".into(),
            ));
        }

        self.simulation.validate()?;
        Ok(())
    }
}

impl Default for Sector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
