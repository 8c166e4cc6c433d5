//! Events emitted for audio and log collaborators

use serde::Serialize;

use crate::core::error::CommandError;
use crate::core::types::{ContractId, Credits, Faction, LocationId, Tick};
use crate::flight::controller::LossReason;

/// Something a collaborator may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ship docked at a destination
    Arrived {
        location: LocationId,
        name: String,
    },
    /// A delivered contract paid out
    Payout {
        contract: ContractId,
        title: String,
        pay: Credits,
        faction: Faction,
        reputation: i32,
    },
    /// Hull took a hazard hit in flight
    HazardDamage { amount: f64, hull_left: f64 },
    /// A rival hauler took an open offer
    ContractSnatched { contract: ContractId, title: String },
    /// Open offers lapsed unaccepted
    ContractsExpired { count: usize },
    /// A player command was refused
    CommandRejected(CommandError),
    /// The run is over
    GameOver { reason: LossReason },
}

impl GameEvent {
    /// Events of the same kind are emitted at most once per tick
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Arrived { .. } => "arrived",
            GameEvent::Payout { .. } => "payout",
            GameEvent::HazardDamage { .. } => "hazard_damage",
            GameEvent::ContractSnatched { .. } => "contract_snatched",
            GameEvent::ContractsExpired { .. } => "contracts_expired",
            GameEvent::CommandRejected(err) => err.kind(),
            GameEvent::GameOver { .. } => "game_over",
        }
    }

    fn same_kind(&self, other: &GameEvent) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other) && self.kind() == other.kind()
    }

    /// Human-readable line for the ship log
    pub fn describe(&self) -> String {
        match self {
            GameEvent::Arrived { name, .. } => format!("Arrived at {name}."),
            GameEvent::Payout { title, pay, .. } => {
                format!("Contract complete: {title}. +{pay} credits.")
            }
            GameEvent::HazardDamage { amount, hull_left } => {
                format!("Debris strike! Hull -{amount:.0} ({hull_left:.0} left).")
            }
            GameEvent::ContractSnatched { title, .. } => {
                format!("A rival hauler took the {title} job.")
            }
            GameEvent::ContractsExpired { count: 1 } => "An offer expired.".to_string(),
            GameEvent::ContractsExpired { count } => format!("{count} offers expired."),
            GameEvent::CommandRejected(err) => format!("Rejected: {err}."),
            GameEvent::GameOver { reason } => format!("GAME OVER: ship {reason}."),
        }
    }
}

/// Pending events, deduplicated by kind within each tick
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Vec<(Tick, GameEvent)>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` unless one of the same kind was already queued at `tick`
    ///
    /// Returns whether the event was queued.
    pub fn emit(&mut self, tick: Tick, event: GameEvent) -> bool {
        let duplicate = self
            .pending
            .iter()
            .any(|(t, e)| *t == tick && e.same_kind(&event));
        if duplicate {
            return false;
        }
        self.pending.push((tick, event));
        true
    }

    /// Take every pending event in emission order
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).map(|(_, e)| e).collect()
    }

    pub fn peek(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter().map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
