//! Location - a place a ship can dock
//!
//! Locations are the nodes of the sector map. Their position is never stored:
//! it is derived from the orbit parameters and the current tick.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, LocationId};

/// What kind of body a location is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Station,
    Moon,
    Planet,
}

/// Static circular orbit around the sector center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Distance from the center (map units)
    pub radius: f64,
    /// Angular speed in degrees per tick
    pub speed: f64,
    /// Angle at tick 0, in degrees
    pub initial_angle: f64,
}

impl Orbit {
    pub fn new(radius: f64, speed: f64, initial_angle: f64) -> Self {
        Self {
            radius,
            speed,
            initial_angle,
        }
    }

    /// Angular position in degrees at `tick`, normalized to [0, 360)
    pub fn angle_at(&self, tick: u64) -> f64 {
        (self.initial_angle + self.speed * tick as f64).rem_euclid(360.0)
    }
}

/// A location in the sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub faction: Faction,
    pub kind: LocationKind,
    /// Bodies without an orbit sit at the sector center
    #[serde(default)]
    pub orbit: Option<Orbit>,
    /// Credits per fuel unit; only stations sell fuel
    #[serde(default)]
    pub fuel_price: Option<f64>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
            faction: Faction::Neutral,
            kind,
            orbit: None,
            fuel_price: None,
        }
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    pub fn with_orbit(mut self, radius: f64, speed: f64, initial_angle: f64) -> Self {
        self.orbit = Some(Orbit::new(radius, speed, initial_angle));
        self
    }

    pub fn with_fuel_price(mut self, price: f64) -> Self {
        self.fuel_price = Some(price);
        self
    }

    pub fn is_station(&self) -> bool {
        self.kind == LocationKind::Station
    }

    /// Stations can patch a hull; moons and planets cannot
    pub fn offers_repairs(&self) -> bool {
        self.is_station()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_builder() {
        let loc = Location::new("ceres", "Ceres Hub", LocationKind::Station)
            .with_faction(Faction::MiningGuild)
            .with_orbit(250.0, 0.05, 90.0)
            .with_fuel_price(1.5);
        assert_eq!(loc.id, LocationId::new("ceres"));
        assert!(loc.is_station());
        assert!(loc.offers_repairs());
        assert_eq!(loc.fuel_price, Some(1.5));
        assert_eq!(loc.orbit.map(|o| o.radius), Some(250.0));
    }

    #[test]
    fn test_orbit_angle_wraps() {
        let orbit = Orbit::new(100.0, 1.0, 350.0);
        assert!((orbit.angle_at(0) - 350.0).abs() < 1e-9);
        assert!((orbit.angle_at(20) - 10.0).abs() < 1e-9);
        assert!((orbit.angle_at(370) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_moon_has_no_repairs() {
        let moon = Location::new("luna", "Luna", LocationKind::Moon);
        assert!(!moon.offers_repairs());
        assert!(moon.orbit.is_none());
    }
}
