//! Player ship: fixed stats plus the resource ledger

pub mod ledger;
pub mod stats;

pub use ledger::ResourceLedger;
pub use stats::ShipStats;
