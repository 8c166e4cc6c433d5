//! Orbital Courier - Entry Point
//!
//! Text front end for the simulation core: loads a sector, then reads
//! commands from stdin and prints the resulting state.

use orbital_courier::campaign::Sector;
use orbital_courier::core::types::{ContractId, LocationId};
use orbital_courier::simulation::{Command, Simulation, Snapshot};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Orbital Courier - fly contracts between orbiting stations
#[derive(Parser, Debug)]
#[command(name = "orbital_courier")]
#[command(about = "Play Orbital Courier from the terminal")]
struct Args {
    /// Sector TOML file; the built-in sector is used when omitted
    #[arg(long)]
    sector: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orbital_courier=info".into()),
        )
        .init();

    let args = Args::parse();
    let sector = match &args.sector {
        Some(path) => Sector::load_from_toml(path)?,
        None => Sector::with_defaults(),
    };
    tracing::info!("Loaded sector '{}' ({} locations)", sector.name, sector.locations.len());

    let mut sim = Simulation::with_seed(sector, args.seed)?;

    println!("\n=== ORBITAL COURIER ===");
    println!("Haul contracts between orbiting stations. Don't run dry.");
    println!();
    println!("Commands:");
    println!("  tick / t          - Advance one tick");
    println!("  run <n>           - Advance n ticks");
    println!("  travel <id>       - Depart for a location");
    println!("  accept <id>       - Accept an offer (e.g. C0-1)");
    println!("  refuel <n>        - Buy n units of fuel");
    println!("  repair            - Repair the hull");
    println!("  wait              - Wait at the dock for new offers");
    println!("  status / s        - Show status (add --json for raw output)");
    println!("  quit / q          - Exit");
    println!();

    loop {
        display_status(&sim.snapshot());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&sim.snapshot());
            continue;
        }
        if input == "status --json" || input == "s --json" {
            println!("{}", sim.snapshot().to_json()?);
            continue;
        }

        if let Some(n) = input.strip_prefix("run ") {
            match n.trim().parse::<u64>() {
                Ok(n) => {
                    let ran = sim.run(n);
                    println!("Ran {} ticks. Now at tick {}.", ran, sim.state().game_time);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            print_events(&mut sim);
            continue;
        }

        match parse_command(input) {
            Ok(command) => {
                if let Err(err) = sim.apply(command) {
                    println!("Rejected: {}", err);
                }
            }
            Err(usage) => println!("{}", usage),
        }
        print_events(&mut sim);

        if sim.is_game_over() {
            display_detailed_status(&sim.snapshot());
            println!("The run is over.");
            break;
        }
    }

    let state = sim.state();
    println!(
        "\nGoodbye! Day {}, {} credits, {} ticks elapsed.",
        state.day,
        state.ledger.credits(),
        state.game_time
    );
    Ok(())
}

/// Turn one input line into a command, or a usage hint
fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words.next();

    match (verb, arg) {
        ("tick" | "t", None) => Ok(Command::AdvanceTick),
        ("travel", Some(id)) => Ok(Command::StartTravel(LocationId::new(id))),
        ("accept", Some(id)) => id
            .parse::<ContractId>()
            .map(Command::AcceptContract)
            .map_err(|_| format!("Not a contract id: {id}")),
        ("refuel", Some(n)) => n
            .parse::<f64>()
            .map(Command::PurchaseFuel)
            .map_err(|_| "Usage: refuel <units>".to_string()),
        ("repair", None) => Ok(Command::RepairHull),
        ("wait", None) => Ok(Command::Wait),
        _ => Err(
            "Unknown command. Available: tick, run <n>, travel <id>, accept <id>, \
             refuel <n>, repair, wait, status, quit"
                .to_string(),
        ),
    }
}

fn print_events(sim: &mut Simulation) {
    for event in sim.drain_events() {
        println!("  * {}", event.describe());
    }
}

/// Display a brief status line
fn display_status(snap: &Snapshot) {
    let state = &snap.state;
    let whereabouts = match (state.flight_origin(), state.flight_destination()) {
        (Some(from), Some(to)) => format!(
            "{} -> {} ({:.0}%)",
            from,
            to,
            state.flight_progress() * 100.0
        ),
        _ => format!("docked at {}", state.location),
    };
    println!();
    println!(
        "--- Day {} | Tick {} | {} | {} cr | fuel {:.0}/{:.0} | hull {:.0}/{:.0} ---",
        state.day,
        state.game_time,
        whereabouts,
        state.ledger.credits(),
        state.ledger.fuel(),
        state.ledger.max_fuel(),
        state.ledger.hull(),
        state.ledger.max_hull()
    );
    if let Some(contract) = &state.active_contract {
        println!(
            "  Active: {} -> {} ({} cr)",
            contract.title, contract.destination, contract.pay
        );
    }
}

/// Display locations, offers, reputation and the ship log
fn display_detailed_status(snap: &Snapshot) {
    let state = &snap.state;
    println!();
    println!("=== Status (Day {}, Tick {}) ===", state.day, state.game_time);
    println!();

    println!("Locations:");
    for loc in &snap.locations {
        let price = loc
            .fuel_price
            .map(|p| format!("fuel {p:.2}/u"))
            .unwrap_or_else(|| "no services".to_string());
        println!(
            "  {:<10} {:<18} {:?}/{:?} at ({:.0}, {:.0}) - {}",
            loc.id.as_str(),
            loc.name,
            loc.kind,
            loc.faction,
            loc.position.x,
            loc.position.y,
            price
        );
    }

    println!();
    println!("Offers:");
    if snap.offers.is_empty() {
        println!("  (none)");
    }
    for offer in &snap.offers {
        let c = &offer.contract;
        println!(
            "  [{}] {} -> {} | {} cr | {} risk | {:.0} fuel{} | expires tick {}",
            c.id,
            c.title,
            c.destination,
            c.pay,
            c.risk.label(),
            offer.fuel_cost,
            if offer.reachable { "" } else { " (out of range)" },
            c.expires_at
        );
    }

    println!();
    println!("Reputation:");
    let mut standings: Vec<_> = state.reputation.iter().collect();
    standings.sort_by_key(|(faction, _)| format!("{faction:?}"));
    for (faction, rep) in standings {
        println!("  {:?}: {}", faction, rep);
    }

    println!();
    println!("Log:");
    for entry in state.log.entries() {
        println!("  [day {} / {}] {}", entry.day, entry.tick, entry.message);
    }
    println!();
}
