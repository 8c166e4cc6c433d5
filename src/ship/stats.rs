use serde::{Deserialize, Serialize};

/// Performance characteristics of the player's ship
///
/// Fixed for a playthrough; the sector file may tune them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    /// Cruise speed (informational; trip time is fixed by config)
    pub speed: f64,
    /// Burn multiplier, lower is better
    pub fuel_efficiency: f64,
    pub max_fuel: f64,
    pub max_hull: f64,
    pub cargo_capacity: u32,
}

impl Default for ShipStats {
    fn default() -> Self {
        Self {
            speed: 1.0,
            fuel_efficiency: 1.0,
            max_fuel: 400.0,
            max_hull: 100.0,
            cargo_capacity: 20,
        }
    }
}
