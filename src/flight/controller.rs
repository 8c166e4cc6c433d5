//! Flight controller - the Docked / InFlight / Lost state machine
//!
//! A trip always lasts `flight_duration_frames` ticks; only the fuel bill
//! scales with distance. The straight-line path uses both endpoints as they
//! stood at departure, even though the bodies keep orbiting during the trip.

use serde::{Deserialize, Serialize};

use crate::campaign::orbit::position_of;
use crate::campaign::sector::Sector;
use crate::core::config::SimulationConfig;
use crate::core::error::CommandError;
use crate::core::random::RandomSource;
use crate::core::types::{distance, ContractId, Credits, Faction, LocationId, Vec2};
use crate::ship::stats::ShipStats;
use crate::simulation::state::GameState;

/// Fuel needed to cover `distance`
///
/// Shared by route planning and per-tick burn so the two never disagree.
pub fn fuel_cost(distance: f64, stats: &ShipStats, config: &SimulationConfig) -> f64 {
    distance.max(0.0) * stats.fuel_efficiency * config.burn_factor
}

/// An in-progress trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub origin: LocationId,
    pub destination: LocationId,
    /// Origin coordinates sampled at departure
    pub from: Vec2,
    /// Destination coordinates sampled at departure
    pub to: Vec2,
    pub frames_elapsed: u32,
    pub duration_frames: u32,
}

impl Flight {
    /// Fraction of the trip flown, in [0, 1]
    pub fn progress(&self) -> f64 {
        (self.frames_elapsed as f64 / self.duration_frames.max(1) as f64).min(1.0)
    }

    pub fn distance(&self) -> f64 {
        distance(self.from, self.to)
    }

    pub fn has_arrived(&self) -> bool {
        self.frames_elapsed >= self.duration_frames
    }

    /// Interpolated ship position along the departure-time path
    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress())
    }

    /// Sprite heading in degrees: direction of travel rotated by 90°
    pub fn heading_degrees(&self) -> f64 {
        let d = self.to - self.from;
        d.y.atan2(d.x).to_degrees() + 90.0
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    OutOfFuel,
    HullBreach,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::OutOfFuel => f.write_str("ran out of fuel"),
            LossReason::HullBreach => f.write_str("hull breached"),
        }
    }
}

/// Ship state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShipStatus {
    Docked,
    InFlight(Flight),
    /// Terminal: the run is over
    Lost { reason: LossReason, flight: Flight },
}

impl ShipStatus {
    pub fn is_flying(&self) -> bool {
        matches!(self, ShipStatus::InFlight(_))
    }

    pub fn is_docked(&self) -> bool {
        matches!(self, ShipStatus::Docked)
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, ShipStatus::Lost { .. })
    }

    pub fn flight(&self) -> Option<&Flight> {
        match self {
            ShipStatus::InFlight(flight) => Some(flight),
            _ => None,
        }
    }
}

/// Contract settled on arrival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub contract: ContractId,
    pub title: String,
    pub pay: Credits,
    pub faction: Faction,
    /// Reputation granted; zero for neutral work
    pub reputation: i32,
}

/// Result of reaching a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    pub destination: LocationId,
    pub destination_name: String,
    pub payout: Option<Payout>,
}

/// What happened to the ship during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightReport {
    pub hazard_damage: Option<f64>,
    pub arrival: Option<Arrival>,
    pub lost: Option<LossReason>,
}

/// Plan a trip from the current location without committing to it
///
/// Returns the departure-time endpoints and the fuel bill.
pub fn plan_route(
    state: &GameState,
    sector: &Sector,
    destination: &LocationId,
) -> Result<(Vec2, Vec2, f64), CommandError> {
    let origin = sector
        .location(&state.location)
        .ok_or_else(|| CommandError::UnknownLocation(state.location.clone()))?;
    let target = sector
        .location(destination)
        .ok_or_else(|| CommandError::UnknownLocation(destination.clone()))?;

    let center = sector.simulation.orbit_center;
    let from = position_of(origin, state.game_time, center);
    let to = position_of(target, state.game_time, center);
    let cost = fuel_cost(distance(from, to), &sector.ship, &sector.simulation);
    Ok((from, to, cost))
}

/// Docked -> InFlight
///
/// Fails without side effects unless docked somewhere other than the
/// destination with enough fuel for the whole trip.
pub fn start_travel(
    state: &mut GameState,
    sector: &Sector,
    destination: &LocationId,
) -> Result<Flight, CommandError> {
    match &state.status {
        ShipStatus::Lost { .. } => return Err(CommandError::GameOver),
        ShipStatus::InFlight(_) => return Err(CommandError::NotDocked),
        ShipStatus::Docked => {}
    }
    if &state.location == destination {
        return Err(CommandError::AlreadyAtLocation(destination.clone()));
    }

    let (from, to, cost) = plan_route(state, sector, destination)?;
    if state.ledger.fuel() < cost {
        return Err(CommandError::InsufficientFuel {
            required: cost,
            available: state.ledger.fuel(),
        });
    }

    let flight = Flight {
        origin: state.location.clone(),
        destination: destination.clone(),
        from,
        to,
        frames_elapsed: 0,
        duration_frames: sector.simulation.flight_duration_frames,
    };
    tracing::info!(
        "Departing {} for {} ({:.1} fuel)",
        flight.origin,
        flight.destination,
        cost
    );
    state.status = ShipStatus::InFlight(flight.clone());
    Ok(flight)
}

/// Advance an in-progress trip by one tick
///
/// Exhaustion is checked first, against the state the previous tick left
/// behind. Then progress, burn and the hazard roll are applied, and the
/// arrival settles if the trip is complete.
pub fn tick_flight(
    state: &mut GameState,
    sector: &Sector,
    rng: &mut impl RandomSource,
) -> FlightReport {
    let mut report = FlightReport::default();
    let ShipStatus::InFlight(flight) = &mut state.status else {
        return report;
    };

    let loss = if state.ledger.is_out_of_fuel() {
        Some(LossReason::OutOfFuel)
    } else if state.ledger.is_wrecked() {
        Some(LossReason::HullBreach)
    } else {
        None
    };
    if let Some(reason) = loss {
        tracing::warn!("Ship lost en route to {}: {}", flight.destination, reason);
        let flight = flight.clone();
        state.status = ShipStatus::Lost { reason, flight };
        report.lost = Some(reason);
        return report;
    }

    let config = &sector.simulation;
    let step = config.progress_increment();
    flight.frames_elapsed += 1;
    let burn = fuel_cost(flight.distance(), &sector.ship, config) * step;
    state.ledger.consume_fuel(burn);

    if rng.chance(config.hazard_chance) {
        state.ledger.damage_hull(config.hazard_damage);
        tracing::debug!("Hazard hit: -{} hull, {} left", config.hazard_damage, state.ledger.hull());
        report.hazard_damage = Some(config.hazard_damage);
    }

    if flight.has_arrived() {
        let destination = flight.destination.clone();
        report.arrival = Some(settle_arrival(state, sector, destination));
    }

    report
}

/// InFlight -> Docked: move the ship and pay out a matching contract
fn settle_arrival(state: &mut GameState, sector: &Sector, destination: LocationId) -> Arrival {
    state.status = ShipStatus::Docked;
    state.location = destination.clone();

    let destination_name = sector
        .location(&destination)
        .map(|loc| loc.name.clone())
        .unwrap_or_else(|| destination.to_string());

    let delivered = state
        .active_contract
        .as_ref()
        .is_some_and(|c| c.destination == destination);

    let payout = if delivered {
        state.active_contract.take().map(|contract| {
            state.ledger.add_credits(contract.pay);
            let reputation = if contract.faction.is_neutral() {
                0
            } else {
                sector.simulation.reputation_gain
            };
            if reputation != 0 {
                *state.reputation.entry(contract.faction).or_insert(0) += reputation;
            }
            tracing::info!("Contract {} delivered for {} credits", contract.id, contract.pay);
            Payout {
                contract: contract.id,
                title: contract.title,
                pay: contract.pay,
                faction: contract.faction,
                reputation,
            }
        })
    } else {
        None
    };

    tracing::info!("Arrived at {}", destination_name);
    Arrival {
        destination,
        destination_name,
        payout,
    }
}
