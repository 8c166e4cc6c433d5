//! GameState - the single mutable aggregate of a playthrough
//!
//! Owned by the `Simulation`; collaborators only ever see it through shared
//! references or serialized snapshots.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::campaign::sector::Sector;
use crate::contracts::generator::Contract;
use crate::core::types::{Faction, LocationId, Tick};
use crate::flight::controller::ShipStatus;
use crate::ship::ledger::ResourceLedger;

/// One line of the ship log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub day: u64,
    pub tick: Tick,
    pub message: String,
}

/// Bounded log, most recent entry first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ShipLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Complete mutable state of a playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ledger: ResourceLedger,
    /// Where the ship is docked, or the origin of the current trip
    pub location: LocationId,
    pub reputation: AHashMap<Faction, i32>,
    pub day: u64,
    /// Global tick counter; never decreases
    pub game_time: Tick,
    pub status: ShipStatus,
    pub active_contract: Option<Contract>,
    pub log: ShipLog,
}

impl GameState {
    /// Fresh state at the sector's starting conditions
    pub fn new(sector: &Sector) -> Self {
        let start = &sector.start;
        let ledger = ResourceLedger::new(
            &sector.ship,
            start.credits,
            start.fuel.unwrap_or(sector.ship.max_fuel),
            start.hull.unwrap_or(sector.ship.max_hull),
        );

        let mut reputation = AHashMap::new();
        for loc in &sector.locations {
            reputation.entry(loc.faction).or_insert(0);
        }
        for template in &sector.contracts {
            reputation.entry(template.faction).or_insert(0);
        }

        Self {
            ledger,
            location: start.location.clone(),
            reputation,
            day: 1,
            game_time: 0,
            status: ShipStatus::Docked,
            active_contract: None,
            log: ShipLog::new(sector.simulation.log_capacity),
        }
    }

    pub fn reputation_with(&self, faction: Faction) -> i32 {
        self.reputation.get(&faction).copied().unwrap_or(0)
    }

    pub fn is_flying(&self) -> bool {
        self.status.is_flying()
    }

    pub fn is_docked(&self) -> bool {
        self.status.is_docked()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_lost()
    }

    /// Trip progress in [0, 1]; zero unless flying
    pub fn flight_progress(&self) -> f64 {
        self.status.flight().map_or(0.0, |f| f.progress())
    }

    pub fn flight_origin(&self) -> Option<&LocationId> {
        self.status.flight().map(|f| &f.origin)
    }

    pub fn flight_destination(&self) -> Option<&LocationId> {
        self.status.flight().map(|f| &f.destination)
    }

    /// Append to the ship log, stamped with the current time
    pub fn record(&mut self, message: impl Into<String>) {
        self.log.push(LogEntry {
            day: self.day,
            tick: self.game_time,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_from_sector() {
        let sector = Sector::with_defaults();
        let state = GameState::new(&sector);
        assert_eq!(state.ledger.credits(), 500);
        assert_eq!(state.ledger.fuel(), sector.ship.max_fuel);
        assert_eq!(state.ledger.hull(), sector.ship.max_hull);
        assert_eq!(state.location, sector.start.location);
        assert_eq!(state.day, 1);
        assert!(state.is_docked());
        assert_eq!(state.flight_progress(), 0.0);
        assert!(state.flight_origin().is_none() && state.flight_destination().is_none());
        assert_eq!(state.reputation_with(Faction::MiningGuild), 0);
    }

    #[test]
    fn test_log_is_bounded_newest_first() {
        let mut log = ShipLog::new(3);
        for i in 0..5 {
            log.push(LogEntry { day: 1, tick: i, message: format!("entry {i}") });
        }
        assert_eq!(log.len(), 3);
        let ticks: Vec<Tick> = log.entries().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![4, 3, 2]);
        assert_eq!(log.latest().map(|e| e.message.as_str()), Some("entry 4"));
    }
}
