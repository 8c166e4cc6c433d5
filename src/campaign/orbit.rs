//! Orbital position model
//!
//! Maps a tick to every location's map coordinates. Everything here is pure:
//! the same tick always yields the same positions, and nothing is cached
//! between ticks.

use ahash::AHashMap;

use super::location::Location;
use crate::core::types::{LocationId, Tick, Vec2};

/// Position of a single location at `tick`
///
/// Locations without orbit parameters sit at `center`.
pub fn position_of(location: &Location, tick: Tick, center: Vec2) -> Vec2 {
    let Some(orbit) = location.orbit else {
        return center;
    };

    let angle = orbit.angle_at(tick).to_radians();
    center + Vec2::new(angle.cos(), angle.sin()) * orbit.radius
}

/// Positions of every location at `tick`
pub fn positions_at(locations: &[Location], tick: Tick, center: Vec2) -> AHashMap<LocationId, Vec2> {
    locations
        .iter()
        .map(|loc| (loc.id.clone(), position_of(loc, tick, center)))
        .collect()
}
