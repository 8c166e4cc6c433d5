use serde::Serialize;
use thiserror::Error;

use crate::core::types::{ContractId, Credits, LocationId};

/// Why a player command was rejected
///
/// Every variant is a validation failure: the command did nothing and the
/// caller may try something else.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CommandError {
    #[error("Insufficient fuel: route needs {required:.1}, tank holds {available:.1}")]
    InsufficientFuel { required: f64, available: f64 },

    #[error("Insufficient funds: need {required} credits, have {available}")]
    InsufficientFunds { required: Credits, available: Credits },

    #[error("Contract {0} is already active")]
    ContractAlreadyActive(ContractId),

    #[error("Unknown location: {0}")]
    UnknownLocation(LocationId),

    #[error("Unknown contract: {0}")]
    UnknownContract(ContractId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Ship is not docked")]
    NotDocked,

    #[error("{location} does not offer {service}")]
    ServiceUnavailable { location: LocationId, service: Service },

    #[error("Already at {0}")]
    AlreadyAtLocation(LocationId),

    #[error("Hull is already at full integrity")]
    NothingToRepair,

    #[error("Fuel tank is already full")]
    TankFull,

    #[error("Game over")]
    GameOver,
}

impl CommandError {
    /// Stable kind used to deduplicate rejection events within a tick
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientFuel { .. } => "insufficient_fuel",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::ContractAlreadyActive(_) => "contract_already_active",
            Self::UnknownLocation(_) => "unknown_location",
            Self::UnknownContract(_) => "unknown_contract",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::NotDocked => "not_docked",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::AlreadyAtLocation(_) => "already_at_location",
            Self::NothingToRepair => "nothing_to_repair",
            Self::TankFull => "tank_full",
            Self::GameOver => "game_over",
        }
    }
}

/// Dockside services a location may or may not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Service {
    Refuel,
    Repair,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Refuel => f.write_str("refueling"),
            Service::Repair => f.write_str("repairs"),
        }
    }
}

/// Errors raised while loading a sector definition
#[derive(Error, Debug)]
pub enum SectorLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid sector: {0}")]
    Invalid(String),

    #[error("Invalid simulation config: {0}")]
    Config(#[from] ConfigError),
}

/// Internal inconsistencies in a `SimulationConfig`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    NotAProbability { name: &'static str, value: f64 },

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("contract duration range {start}..{end} is empty")]
    EmptyDurationRange { start: u64, end: u64 },

    #[error("risk thresholds must satisfy 0 <= med ({med}) < high ({high}) <= 1")]
    RiskThresholds { med: f64, high: f64 },
}

pub type Result<T> = std::result::Result<T, CommandError>;
