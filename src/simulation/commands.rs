//! Player commands - validated, all-or-nothing state changes
//!
//! A rejected command leaves the whole `GameState` untouched, ship log
//! included. The rejection only reaches collaborators as a queued
//! `CommandRejected` event.

use serde::{Deserialize, Serialize};

use crate::core::error::{CommandError, Service};
use crate::core::random::RandomSource;
use crate::core::types::{ContractId, Credits, LocationId};
use crate::flight::controller::start_travel;
use crate::simulation::events::GameEvent;
use crate::simulation::snapshot::Snapshot;
use crate::simulation::tick::Simulation;

/// Everything a player (or autopilot) can ask for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    StartTravel(LocationId),
    AcceptContract(ContractId),
    /// Units of fuel to buy; clamped to the room left in the tank
    PurchaseFuel(f64),
    RepairHull,
    Wait,
    AdvanceTick,
}

impl<R: RandomSource> Simulation<R> {
    /// Apply one command and return the resulting snapshot
    pub fn apply(&mut self, command: Command) -> Result<Snapshot, CommandError> {
        let result = match &command {
            Command::StartTravel(destination) => self.start_travel(destination),
            Command::AcceptContract(id) => self.accept_contract(*id),
            Command::PurchaseFuel(amount) => self.purchase_fuel(*amount).map(|_| ()),
            Command::RepairHull => self.repair_hull().map(|_| ()),
            Command::Wait => self.wait().map(|_| ()),
            Command::AdvanceTick => {
                if self.tick() {
                    Ok(())
                } else {
                    Err(CommandError::GameOver)
                }
            }
        };

        match result {
            Ok(()) => Ok(self.snapshot()),
            Err(err) => {
                tracing::warn!("{:?} rejected: {}", command, err);
                let now = self.state.game_time;
                self.events.emit(now, GameEvent::CommandRejected(err.clone()));
                Err(err)
            }
        }
    }

    fn start_travel(&mut self, destination: &LocationId) -> Result<(), CommandError> {
        start_travel(&mut self.state, &self.sector, destination)?;
        let line = format!("Departed for {}.", self.location_name(destination));
        self.state.record(line);
        Ok(())
    }

    fn accept_contract(&mut self, id: ContractId) -> Result<(), CommandError> {
        if self.state.is_game_over() {
            return Err(CommandError::GameOver);
        }
        self.board.accept(id, &mut self.state.active_contract)?;
        if let Some(contract) = &self.state.active_contract {
            tracing::info!("Accepted {} to {}", contract.id, contract.destination);
            let line = format!("Accepted: {}.", contract.title);
            self.state.record(line);
        }
        Ok(())
    }

    /// Buy fuel at the docked station's price
    ///
    /// Returns the credits spent.
    fn purchase_fuel(&mut self, amount: f64) -> Result<Credits, CommandError> {
        self.require_docked()?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CommandError::InvalidAmount(amount));
        }
        let price = self
            .sector
            .location(&self.state.location)
            .and_then(|loc| loc.fuel_price)
            .ok_or_else(|| CommandError::ServiceUnavailable {
                location: self.state.location.clone(),
                service: Service::Refuel,
            })?;

        let quantity = amount.min(self.state.ledger.fuel_capacity_left());
        if quantity <= 0.0 {
            return Err(CommandError::TankFull);
        }
        let cost = (quantity * price).ceil() as Credits;
        self.state.ledger.spend_credits(cost)?;
        self.state.ledger.add_fuel(quantity);

        tracing::info!("Bought {:.1} fuel for {} credits", quantity, cost);
        self.state
            .record(format!("Refueled {quantity:.0} units for {cost} credits."));
        Ok(cost)
    }

    /// Restore the hull to full at a station
    ///
    /// Returns the credits spent.
    fn repair_hull(&mut self) -> Result<Credits, CommandError> {
        self.require_docked()?;
        let offers_repairs = self
            .sector
            .location(&self.state.location)
            .is_some_and(|loc| loc.offers_repairs());
        if !offers_repairs {
            return Err(CommandError::ServiceUnavailable {
                location: self.state.location.clone(),
                service: Service::Repair,
            });
        }

        let damage = self.state.ledger.hull_damage();
        if damage <= 0.0 {
            return Err(CommandError::NothingToRepair);
        }
        let cost = (damage * self.sector.simulation.repair_cost_per_point).ceil() as Credits;
        self.state.ledger.spend_credits(cost)?;
        self.state.ledger.repair_hull();

        tracing::info!("Repaired {:.1} hull for {} credits", damage, cost);
        self.state.record(format!("Hull repaired for {cost} credits."));
        Ok(cost)
    }

    fn require_docked(&self) -> Result<(), CommandError> {
        if self.state.is_game_over() {
            return Err(CommandError::GameOver);
        }
        if !self.state.is_docked() {
            return Err(CommandError::NotDocked);
        }
        Ok(())
    }
}
