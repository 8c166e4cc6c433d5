//! Sector map: locations, their orbits, and the sector tables

pub mod location;
pub mod orbit;
pub mod sector;

pub use location::{Location, LocationKind, Orbit};
pub use orbit::{position_of, positions_at};
pub use sector::{Sector, StartingConditions};
