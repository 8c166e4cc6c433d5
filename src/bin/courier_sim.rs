//! Courier Autopilot
//! Runs a headless playthrough with a simple greedy pilot

use orbital_courier::campaign::Sector;
use orbital_courier::core::error::CommandError;
use orbital_courier::flight::ShipStatus;
use orbital_courier::simulation::{Command, GameEvent, OfferView, Simulation, Snapshot};
use clap::Parser;
use std::path::PathBuf;

/// Courier autopilot - fly contracts without a player
#[derive(Parser, Debug)]
#[command(name = "courier_sim")]
#[command(about = "Run a headless Orbital Courier playthrough with a greedy autopilot")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Sector TOML file; the built-in sector is used when omitted
    #[arg(long)]
    sector: Option<PathBuf>,

    /// Print every event as it happens
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Print the final snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Running totals for the summary
#[derive(Debug, Default)]
struct Tally {
    deliveries: u32,
    earned: u64,
    hazard_hits: u32,
    snatched: u32,
    expired: usize,
    rejected: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Payout { pay, .. } => {
                self.deliveries += 1;
                self.earned += pay;
            }
            GameEvent::HazardDamage { .. } => self.hazard_hits += 1,
            GameEvent::ContractSnatched { .. } => self.snatched += 1,
            GameEvent::ContractsExpired { count } => self.expired += count,
            GameEvent::CommandRejected(_) => self.rejected += 1,
            GameEvent::Arrived { .. } | GameEvent::GameOver { .. } => {}
        }
    }
}

/// Pick the next command for a docked ship
fn decide(snap: &Snapshot) -> Command {
    let state = &snap.state;
    let ledger = &state.ledger;
    let here = snap.location(&state.location);
    let fuel_price = here.and_then(|loc| loc.fuel_price);

    if let Some(price) = fuel_price {
        if ledger.hull() < ledger.max_hull() * 0.5 && ledger.credits() > 300 {
            return Command::RepairHull;
        }
        let room = ledger.fuel_capacity_left();
        let affordable = ledger.credits() as f64 / price;
        if room > 1.0 && ledger.fuel() < ledger.max_fuel() * 0.6 && affordable >= 1.0 {
            return Command::PurchaseFuel(room.min(affordable.floor()));
        }
    }

    if let Some(contract) = &state.active_contract {
        return Command::StartTravel(contract.destination.clone());
    }

    let best = snap
        .offers
        .iter()
        .filter(|offer| offer.reachable)
        .max_by(|a, b| {
            let score = |o: &OfferView| o.contract.pay as f64 / (o.fuel_cost + 1.0);
            score(a).total_cmp(&score(b))
        });
    match best {
        Some(offer) => Command::AcceptContract(offer.contract.id),
        None => Command::Wait,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose { "orbital_courier=debug" } else { "orbital_courier=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .init();

    let sector = match &args.sector {
        Some(path) => Sector::load_from_toml(path)?,
        None => Sector::with_defaults(),
    };
    let mut sim = Simulation::with_seed(sector, args.seed)?;
    let mut tally = Tally::default();

    while sim.state().game_time < args.ticks && !sim.is_game_over() {
        let command = if sim.state().is_docked() {
            decide(&sim.snapshot())
        } else {
            Command::AdvanceTick
        };

        match sim.apply(command) {
            Ok(_) => {}
            // A stale plan: let time pass and decide again
            Err(CommandError::GameOver) => break,
            Err(_) => {
                sim.apply(Command::AdvanceTick).ok();
            }
        }

        for event in sim.drain_events() {
            if args.verbose {
                println!("[tick {:>6}] {}", sim.state().game_time, event.describe());
            }
            tally.record(&event);
        }
    }

    let snap = sim.snapshot();
    let state = &snap.state;
    println!("=== Courier Autopilot (seed {}) ===", args.seed);
    println!("Ticks:       {}", state.game_time);
    println!("Day:         {}", state.day);
    println!("Credits:     {}", state.ledger.credits());
    println!("Fuel:        {:.1}", state.ledger.fuel());
    println!("Hull:        {:.1}", state.ledger.hull());
    println!("Deliveries:  {} ({} cr)", tally.deliveries, tally.earned);
    println!("Hazard hits: {}", tally.hazard_hits);
    println!("Snatched:    {}", tally.snatched);
    println!("Expired:     {}", tally.expired);
    println!("Rejected:    {}", tally.rejected);
    if let ShipStatus::Lost { reason, .. } = &state.status {
        println!("Outcome:     LOST ({})", reason);
    } else {
        println!("Outcome:     operational at {}", state.location);
    }

    if args.json {
        println!("{}", snap.to_json()?);
    }
    Ok(())
}
