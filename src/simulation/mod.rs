//! Simulation driver: the game state aggregate and the fixed-step loop
//!
//! `Simulation` owns the state, the offer board and the random source.
//! Collaborators drive it with `Command`s and read it through `Snapshot`s
//! and drained `GameEvent`s.

pub mod commands;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use commands::Command;
pub use events::{EventQueue, GameEvent};
pub use snapshot::{LocationView, OfferView, Snapshot};
pub use state::{GameState, LogEntry, ShipLog};
pub use tick::Simulation;
