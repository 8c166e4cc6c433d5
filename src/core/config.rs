//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. A sector file can override any of
//! them through its `[simulation]` table; omitted keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::{Credits, RiskLevel, Tick, Vec2};

/// Configuration for the simulation systems
///
/// These values set the pacing of a playthrough. The tick is nominally one
/// display frame at 60 FPS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === ORBITS ===
    /// Fixed point every orbit circles around (map space)
    pub orbit_center: Vec2,

    // === FLIGHT ===
    /// Frames a trip takes, regardless of distance
    ///
    /// Trip time is constant; only the fuel bill scales with distance.
    /// At 120 frames a trip lasts about two seconds of real time.
    pub flight_duration_frames: u32,

    /// Fuel burned per unit of distance before ship efficiency is applied
    pub burn_factor: f64,

    /// Per-tick chance of a hazard hit while in flight
    pub hazard_chance: f64,

    /// Hull lost per hazard hit
    pub hazard_damage: f64,

    // === CONTRACTS ===
    /// Per-tick chance a rival hauler takes one open offer
    ///
    /// At 1/2000 a rival strikes about every 33 seconds of play.
    pub snatch_chance: f64,

    /// Below this many open offers the board tries to replenish
    pub offer_floor: usize,

    /// Per-tick chance to add one offer while under the floor
    pub replenish_chance: f64,

    /// Per-tick chance to add an offer when the board is empty and docked
    ///
    /// Independent of and higher than `replenish_chance` so a docked player
    /// never stares at an empty board for long.
    pub recovery_chance: f64,

    /// Offers generated when arriving at a location
    pub offers_per_spawn: usize,

    /// Offer lifetime range in ticks, start inclusive, end exclusive
    pub contract_duration_min: Tick,
    pub contract_duration_max: Tick,

    /// Risk draw above this is HIGH
    pub risk_high_threshold: f64,

    /// Risk draw above this (and not HIGH) is MED
    pub risk_med_threshold: f64,

    /// Pay bonus for a HIGH risk contract
    pub risk_bonus_high: Credits,

    /// Pay bonus for a MED risk contract
    pub risk_bonus_med: Credits,

    /// Reputation granted with the contract's faction on delivery
    pub reputation_gain: i32,

    // === TIME ===
    /// Ticks between docking-overtime charges
    pub penalty_interval: Tick,

    /// Credits charged per docking-overtime interval
    pub penalty_amount: Credits,

    /// Ticks skipped by the wait command
    pub wait_ticks: Tick,

    /// Ticks per in-game day (one minute of frames at 60 FPS)
    pub ticks_per_day: Tick,

    // === SERVICES ===
    /// Credits per hull point restored at a station
    pub repair_cost_per_point: f64,

    // === LOG ===
    /// Entries kept in the ship log
    pub log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            orbit_center: Vec2::new(400.0, 300.0),

            flight_duration_frames: 120,
            burn_factor: 0.5,
            hazard_chance: 0.005,
            hazard_damage: 5.0,

            snatch_chance: 1.0 / 2000.0,
            offer_floor: 3,
            replenish_chance: 0.005,
            recovery_chance: 0.01,
            offers_per_spawn: 3,
            contract_duration_min: 1500,
            contract_duration_max: 4500,
            risk_high_threshold: 0.7,
            risk_med_threshold: 0.4,
            risk_bonus_high: 200,
            risk_bonus_med: 80,
            reputation_gain: 5,

            penalty_interval: 60,
            penalty_amount: 1,
            wait_ticks: 500,
            ticks_per_day: 3600,

            repair_cost_per_point: 2.0,

            log_capacity: 12,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress gained per flight tick
    pub fn progress_increment(&self) -> f64 {
        1.0 / self.flight_duration_frames as f64
    }

    /// Classify a uniform draw in [0, 1) into a risk level
    pub fn risk_for_roll(&self, roll: f64) -> RiskLevel {
        if roll > self.risk_high_threshold {
            RiskLevel::High
        } else if roll > self.risk_med_threshold {
            RiskLevel::Med
        } else {
            RiskLevel::Low
        }
    }

    /// Pay bonus for a risk level
    pub fn risk_bonus(&self, risk: RiskLevel) -> Credits {
        match risk {
            RiskLevel::High => self.risk_bonus_high,
            RiskLevel::Med => self.risk_bonus_med,
            RiskLevel::Low => 0,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("hazard_chance", self.hazard_chance),
            ("snatch_chance", self.snatch_chance),
            ("replenish_chance", self.replenish_chance),
            ("recovery_chance", self.recovery_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { name, value });
            }
        }

        if self.flight_duration_frames == 0 {
            return Err(ConfigError::NotPositive("flight_duration_frames"));
        }
        if self.ticks_per_day == 0 {
            return Err(ConfigError::NotPositive("ticks_per_day"));
        }
        if self.penalty_interval == 0 {
            return Err(ConfigError::NotPositive("penalty_interval"));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::NotPositive("log_capacity"));
        }
        if self.burn_factor.is_nan() || self.burn_factor <= 0.0 {
            return Err(ConfigError::NotPositive("burn_factor"));
        }

        if self.contract_duration_min >= self.contract_duration_max {
            return Err(ConfigError::EmptyDurationRange {
                start: self.contract_duration_min,
                end: self.contract_duration_max,
            });
        }

        let (med, high) = (self.risk_med_threshold, self.risk_high_threshold);
        if !(0.0 <= med && med < high && high <= 1.0) {
            return Err(ConfigError::RiskThresholds { med, high });
        }

        Ok(())
    }
}
