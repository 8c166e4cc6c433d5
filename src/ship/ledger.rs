//! Resource ledger for credits, fuel and hull
//!
//! The ledger enforces bounds only. It never logs; callers turn outcomes into
//! events.

use serde::{Deserialize, Serialize};

use super::stats::ShipStats;
use crate::core::error::CommandError;
use crate::core::types::Credits;

/// Ship-side resources with their bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    credits: Credits,
    fuel: f64,
    hull: f64,
    max_fuel: f64,
    max_hull: f64,
}

impl ResourceLedger {
    /// Starting ledger; initial fuel and hull are clamped to the ship's bounds
    pub fn new(stats: &ShipStats, credits: Credits, fuel: f64, hull: f64) -> Self {
        Self {
            credits,
            fuel: fuel.clamp(0.0, stats.max_fuel),
            hull: hull.clamp(0.0, stats.max_hull),
            max_fuel: stats.max_fuel,
            max_hull: stats.max_hull,
        }
    }

    /// Ledger with full tank and hull
    pub fn full(stats: &ShipStats, credits: Credits) -> Self {
        Self::new(stats, credits, stats.max_fuel, stats.max_hull)
    }

    pub fn credits(&self) -> Credits {
        self.credits
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn hull(&self) -> f64 {
        self.hull
    }

    pub fn max_fuel(&self) -> f64 {
        self.max_fuel
    }

    pub fn max_hull(&self) -> f64 {
        self.max_hull
    }

    /// Room left in the tank
    pub fn fuel_capacity_left(&self) -> f64 {
        self.max_fuel - self.fuel
    }

    /// Hull points missing
    pub fn hull_damage(&self) -> f64 {
        self.max_hull - self.hull
    }

    /// Deduct credits, failing without change if the balance is short
    pub fn spend_credits(&mut self, amount: Credits) -> Result<(), CommandError> {
        if self.credits < amount {
            return Err(CommandError::InsufficientFunds {
                required: amount,
                available: self.credits,
            });
        }
        self.credits -= amount;
        Ok(())
    }

    pub fn add_credits(&mut self, amount: Credits) {
        self.credits = self.credits.saturating_add(amount);
    }

    /// Deduct up to `amount` credits, stopping at zero; returns what was taken
    pub fn charge_credits(&mut self, amount: Credits) -> Credits {
        let taken = amount.min(self.credits);
        self.credits -= taken;
        taken
    }

    pub fn consume_fuel(&mut self, amount: f64) {
        self.fuel = (self.fuel - amount.max(0.0)).max(0.0);
    }

    pub fn add_fuel(&mut self, amount: f64) {
        self.fuel = (self.fuel + amount.max(0.0)).min(self.max_fuel);
    }

    pub fn damage_hull(&mut self, amount: f64) {
        self.hull = (self.hull - amount.max(0.0)).max(0.0);
    }

    pub fn repair_hull(&mut self) {
        self.hull = self.max_hull;
    }

    /// Direct fuel override for scripted scenarios; still clamped
    pub fn set_fuel(&mut self, fuel: f64) {
        self.fuel = fuel.clamp(0.0, self.max_fuel);
    }

    /// Direct hull override for scripted scenarios; still clamped
    pub fn set_hull(&mut self, hull: f64) {
        self.hull = hull.clamp(0.0, self.max_hull);
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel <= 0.0
    }

    pub fn is_wrecked(&self) -> bool {
        self.hull <= 0.0
    }
}
