//! Tick scheduler - the fixed per-tick update order
//!
//! Each tick runs, in order:
//! clock -> docking penalty -> flight -> offer board maintenance
//!
//! A lost ship freezes the whole simulation: ticks stop mutating state and
//! every command is refused.

use crate::campaign::sector::Sector;
use crate::contracts::board::{BoardContext, MaintenanceReport, OfferBoard};
use crate::contracts::generator::ContractGenerator;
use crate::core::calendar::Calendar;
use crate::core::error::{CommandError, SectorLoadError};
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::types::{LocationId, Tick};
use crate::flight::controller::{tick_flight, FlightReport};
use crate::simulation::events::{EventQueue, GameEvent};
use crate::simulation::snapshot::Snapshot;
use crate::simulation::state::GameState;

/// Owns every piece of a playthrough and drives it forward
pub struct Simulation<R: RandomSource = SeededRandom> {
    pub(crate) sector: Sector,
    pub(crate) state: GameState,
    pub(crate) board: OfferBoard,
    pub(crate) events: EventQueue,
    pub(crate) calendar: Calendar,
    pub(crate) rng: R,
}

impl Simulation<SeededRandom> {
    /// New game with a seeded ChaCha source
    pub fn with_seed(sector: Sector, seed: u64) -> Result<Self, SectorLoadError> {
        Self::new(sector, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// New game: fresh state at the sector start and an initial set of offers
    pub fn new(sector: Sector, rng: R) -> Result<Self, SectorLoadError> {
        sector.validate()?;
        let state = GameState::new(&sector);
        let mut sim = Self::from_parts(sector, state, OfferBoard::new(), rng);

        let station = sim.state.location.clone();
        let generator = ContractGenerator::new(
            &sim.sector.locations,
            &sim.sector.contracts,
            &sim.sector.simulation,
        );
        let posted = sim.board.spawn_offers(
            &generator,
            &station,
            sim.state.game_time,
            sim.sector.simulation.offers_per_spawn,
            &mut sim.rng,
        );
        tracing::info!("New game at {} with {} offers", station, posted);
        let line = format!("Day 1. Docked at {}.", sim.location_name(&station));
        sim.state.record(line);
        Ok(sim)
    }

    /// Reassemble a simulation from saved or hand-built pieces
    pub fn from_parts(sector: Sector, state: GameState, board: OfferBoard, rng: R) -> Self {
        let calendar = Calendar::new(sector.simulation.ticks_per_day);
        Self {
            sector,
            state,
            board,
            events: EventQueue::new(),
            calendar,
            rng,
        }
    }

    pub fn into_parts(self) -> (Sector, GameState, OfferBoard, R) {
        (self.sector, self.state, self.board, self.rng)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    pub fn board(&self) -> &OfferBoard {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.sector, &self.state, &self.board)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.peek()
    }

    /// Advance one tick
    ///
    /// Returns `false` without touching anything once the run is over.
    pub fn tick(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }

        self.state.game_time += 1;
        self.state.day = self.calendar.day_at(self.state.game_time);
        let now = self.state.game_time;

        self.apply_docking_penalty(now);

        let report = tick_flight(&mut self.state, &self.sector, &mut self.rng);
        self.handle_flight(now, report);
        if self.state.is_game_over() {
            return true;
        }

        let generator = ContractGenerator::new(
            &self.sector.locations,
            &self.sector.contracts,
            &self.sector.simulation,
        );
        let ctx = BoardContext {
            tick: now,
            station: Some(&self.state.location),
            docked: self.state.is_docked(),
        };
        let report = self
            .board
            .maintain(ctx, &generator, &self.sector.simulation, &mut self.rng);
        self.handle_maintenance(now, report);
        true
    }

    /// Run up to `count` ticks, stopping early if the run ends
    ///
    /// Returns how many ticks actually ran.
    pub fn run(&mut self, count: u64) -> u64 {
        let mut ran = 0;
        while ran < count && self.tick() {
            ran += 1;
        }
        ran
    }

    /// Skip ahead while docked
    ///
    /// A pure clock jump: no penalty, maintenance or random draws happen
    /// during the skipped ticks.
    pub fn wait(&mut self) -> Result<Tick, CommandError> {
        if self.state.is_game_over() {
            return Err(CommandError::GameOver);
        }
        if !self.state.is_docked() {
            return Err(CommandError::NotDocked);
        }
        let ticks = self.sector.simulation.wait_ticks;
        self.state.game_time += ticks;
        self.state.day = self.calendar.day_at(self.state.game_time);
        tracing::debug!("Waited {} ticks, now day {}", ticks, self.state.day);
        self.state.record("Waited for new opportunities.");
        Ok(ticks)
    }

    fn apply_docking_penalty(&mut self, now: Tick) {
        let config = &self.sector.simulation;
        if self.state.active_contract.is_none() || !self.state.is_docked() {
            return;
        }
        if now.checked_rem(config.penalty_interval) != Some(0) {
            return;
        }
        let taken = self.state.ledger.charge_credits(config.penalty_amount);
        if taken > 0 {
            tracing::trace!("Docking fee: -{} credits", taken);
        }
    }

    fn handle_flight(&mut self, now: Tick, report: FlightReport) {
        if let Some(amount) = report.hazard_damage {
            let hull_left = self.state.ledger.hull();
            self.emit(now, GameEvent::HazardDamage { amount, hull_left });
        }

        if let Some(reason) = report.lost {
            self.emit(now, GameEvent::GameOver { reason });
            return;
        }

        let Some(arrival) = report.arrival else {
            return;
        };
        self.emit(
            now,
            GameEvent::Arrived {
                location: arrival.destination.clone(),
                name: arrival.destination_name,
            },
        );
        if let Some(payout) = arrival.payout {
            self.emit(
                now,
                GameEvent::Payout {
                    contract: payout.contract,
                    title: payout.title,
                    pay: payout.pay,
                    faction: payout.faction,
                    reputation: payout.reputation,
                },
            );
        }

        let generator = ContractGenerator::new(
            &self.sector.locations,
            &self.sector.contracts,
            &self.sector.simulation,
        );
        let posted = self.board.spawn_offers(
            &generator,
            &arrival.destination,
            now,
            self.sector.simulation.offers_per_spawn,
            &mut self.rng,
        );
        tracing::debug!("{} offers posted at {}", posted, arrival.destination);
    }

    fn handle_maintenance(&mut self, now: Tick, report: MaintenanceReport) {
        if report.is_quiet() {
            return;
        }
        if !report.expired.is_empty() {
            let count = report.expired.len();
            self.emit(now, GameEvent::ContractsExpired { count });
        }
        if let Some(contract) = report.snatched {
            self.emit(
                now,
                GameEvent::ContractSnatched {
                    contract: contract.id,
                    title: contract.title,
                },
            );
        }
        if !report.posted.is_empty() {
            tracing::debug!("{} offers replenished", report.posted.len());
        }
    }

    /// Queue an event and mirror it into the ship log
    pub(crate) fn emit(&mut self, tick: Tick, event: GameEvent) {
        let line = event.describe();
        if self.events.emit(tick, event) {
            tracing::info!("{}", line);
            self.state.record(line);
        }
    }

    pub(crate) fn location_name(&self, id: &LocationId) -> String {
        self.sector
            .location(id)
            .map(|loc| loc.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
