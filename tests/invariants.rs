//! Property tests for simulation invariants
//!
//! Random command sequences against seeded simulations; every reachable
//! state must keep resources in bounds and the flight fields consistent.

use orbital_courier::campaign::{position_of, Location, LocationKind, Sector};
use orbital_courier::core::config::SimulationConfig;
use orbital_courier::core::types::{LocationId, Vec2};
use orbital_courier::flight::fuel_cost;
use orbital_courier::ship::ShipStats;
use orbital_courier::simulation::{Command, Simulation};
use proptest::prelude::*;

const CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn location_ids() -> Vec<LocationId> {
    Sector::with_defaults()
        .locations
        .into_iter()
        .map(|loc| loc.id)
        .collect()
}

/// Abstract command; offers are picked by index at apply time
#[derive(Debug, Clone)]
enum Step {
    Travel(usize),
    Accept(usize),
    Refuel(f64),
    Repair,
    Wait,
    Ticks(u16),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..7).prop_map(Step::Travel),
        (0usize..4).prop_map(Step::Accept),
        (-10.0f64..500.0).prop_map(Step::Refuel),
        Just(Step::Repair),
        Just(Step::Wait),
        (1u16..400).prop_map(Step::Ticks),
    ]
}

fn hazardous_sector() -> Sector {
    let mut sector = Sector::with_defaults();
    sector.simulation.hazard_chance = 0.05;
    sector.simulation.snatch_chance = 0.01;
    sector.simulation.replenish_chance = 0.05;
    sector
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_position_is_pure(
        radius in 0.0f64..500.0,
        speed in -1.0f64..1.0,
        angle in 0.0f64..360.0,
        tick in 0u64..10_000_000,
    ) {
        let loc = Location::new("x", "X", LocationKind::Moon).with_orbit(radius, speed, angle);
        let first = position_of(&loc, tick, CENTER);
        let second = position_of(&loc, tick, CENTER);
        prop_assert_eq!(first, second);
        prop_assert!((first.distance(CENTER) - radius).abs() < 1e-6 * radius.max(1.0));
    }

    #[test]
    fn prop_fuel_cost_is_monotonic(a in 0.0f64..5_000.0, b in 0.0f64..5_000.0) {
        let stats = ShipStats::default();
        let config = SimulationConfig::default();
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(fuel_cost(near, &stats, &config) <= fuel_cost(far, &stats, &config));
        prop_assert!(fuel_cost(near, &stats, &config) >= 0.0);
    }

    #[test]
    fn prop_commands_keep_state_consistent(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let ids = location_ids();
        let mut sim = Simulation::with_seed(hazardous_sector(), seed).unwrap();
        let mut last_time = 0;

        for step in steps {
            let command = match step {
                Step::Travel(i) => Command::StartTravel(ids[i % ids.len()].clone()),
                Step::Accept(i) => match sim.board().offers().get(i) {
                    Some(offer) => Command::AcceptContract(offer.id),
                    None => Command::AdvanceTick,
                },
                Step::Refuel(amount) => Command::PurchaseFuel(amount),
                Step::Repair => Command::RepairHull,
                Step::Wait => Command::Wait,
                Step::Ticks(n) => {
                    sim.run(u64::from(n));
                    Command::AdvanceTick
                }
            };
            let before = sim.state().clone();
            let result = sim.apply(command);

            let state = sim.state();
            let ledger = &state.ledger;
            prop_assert!(ledger.fuel() >= 0.0 && ledger.fuel() <= ledger.max_fuel());
            prop_assert!(ledger.hull() >= 0.0 && ledger.hull() <= ledger.max_hull());
            prop_assert!(state.game_time >= last_time);
            last_time = state.game_time;

            prop_assert_eq!(
                state.is_flying(),
                state.flight_origin().is_some() && state.flight_destination().is_some()
            );
            let progress = state.flight_progress();
            prop_assert!((0.0..=1.0).contains(&progress));

            if let Some(active) = &state.active_contract {
                prop_assert!(!sim.board().contains(active.id));
            }

            if result.is_err() {
                prop_assert_eq!(&before, state);
            }
        }
    }
}
