//! Read-only snapshot handed to rendering and UI collaborators

use serde::Serialize;

use crate::campaign::location::LocationKind;
use crate::campaign::orbit::positions_at;
use crate::campaign::sector::Sector;
use crate::contracts::board::OfferBoard;
use crate::contracts::generator::Contract;
use crate::core::types::{distance, Faction, LocationId, Vec2};
use crate::flight::controller::{fuel_cost, ShipStatus};
use crate::simulation::state::GameState;

/// A location with its coordinates at the snapshot tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationKind,
    pub faction: Faction,
    pub position: Vec2,
    pub fuel_price: Option<f64>,
}

/// An open offer with route figures from the current location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferView {
    pub contract: Contract,
    pub distance: f64,
    pub fuel_cost: f64,
    /// Whether the current tank covers the trip
    pub reachable: bool,
}

/// Full state plus derived display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub locations: Vec<LocationView>,
    pub ship_position: Vec2,
    /// Sprite heading in degrees
    pub ship_heading: f64,
    pub offers: Vec<OfferView>,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(sector: &Sector, state: &GameState, board: &OfferBoard) -> Self {
        let tick = state.game_time;
        let center = sector.simulation.orbit_center;

        let positions = positions_at(&sector.locations, tick, center);
        let position_of_id = |id: &LocationId| positions.get(id).copied();

        let locations: Vec<LocationView> = sector
            .locations
            .iter()
            .map(|loc| LocationView {
                id: loc.id.clone(),
                name: loc.name.clone(),
                kind: loc.kind,
                faction: loc.faction,
                position: position_of_id(&loc.id).unwrap_or(center),
                fuel_price: loc.fuel_price,
            })
            .collect();

        let here = position_of_id(&state.location).unwrap_or(center);
        let (ship_position, ship_heading) = match &state.status {
            ShipStatus::Docked => (here, 0.0),
            ShipStatus::InFlight(flight) | ShipStatus::Lost { flight, .. } => {
                (flight.position(), flight.heading_degrees())
            }
        };

        let offers = board
            .offers()
            .iter()
            .filter_map(|contract| {
                let target = position_of_id(&contract.destination)?;
                let distance = distance(here, target);
                let fuel_cost = fuel_cost(distance, &sector.ship, &sector.simulation);
                Some(OfferView {
                    contract: contract.clone(),
                    distance,
                    fuel_cost,
                    reachable: fuel_cost <= state.ledger.fuel(),
                })
            })
            .collect();

        Self {
            state: state.clone(),
            locations,
            ship_position,
            ship_heading,
            offers,
            game_over: state.is_game_over(),
        }
    }

    pub fn location(&self, id: &LocationId) -> Option<&LocationView> {
        self.locations.iter().find(|view| &view.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
