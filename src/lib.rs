//! Orbital Courier - simulation core for a 2D orbital delivery game
//!
//! Bodies orbit a fixed center, the player flies a courier ship between
//! them, buys fuel and repairs, and hauls contracts for credits and faction
//! reputation. Rendering, audio and input live outside this crate.

pub mod campaign;
pub mod contracts;
pub mod core;
pub mod flight;
pub mod ship;
pub mod simulation;

pub use crate::campaign::Sector;
pub use crate::simulation::{Command, GameEvent, Simulation, Snapshot};
