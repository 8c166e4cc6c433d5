//! Flight: route costing, in-flight integration and arrival settlement

pub mod controller;

pub use controller::{
    fuel_cost, plan_route, start_travel, tick_flight, Arrival, Flight, FlightReport, LossReason,
    Payout, ShipStatus,
};
