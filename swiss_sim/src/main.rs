//! Swiss tournament simulator.
//!
//! Registers a field of players, pairs each round with the Swiss engine,
//! plays every game with random results and prints the final standings.

mod config;
mod sim;

use anyhow::Error;
use config::SimConfig;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use rand::{SeedableRng, rngs::StdRng};
use sim::{SimReport, Simulation};
use swiss_pairing::PairingEntry;

const HELP: &str = "\
Simulate a Swiss-system tournament

USAGE:
  swiss_sim [OPTIONS]

OPTIONS:
  --players    N           Number of entrants          [default: env SWISS_PLAYERS or 8]
  --rounds     N           Rounds to play              [default: env SWISS_ROUNDS or ceil(log2(players))]
  --seed       N           Random seed                 [default: env SWISS_SEED or random]
  --tie-rate   P           Probability of a tie        [default: env SWISS_TIE_RATE or 0.1]

FLAGS:
  --json                   Print the report as JSON
  -h, --help               Print help information
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let mut config = SimConfig::from_env()?;
    if let Some(players) = pargs.opt_value_from_str("--players")? {
        config.players = players;
    }
    if let Some(rounds) = pargs.opt_value_from_str("--rounds")? {
        config.rounds = Some(rounds);
    }
    if let Some(seed) = pargs.opt_value_from_str("--seed")? {
        config.seed = Some(seed);
    }
    if let Some(tie_rate) = pargs.opt_value_from_str("--tie-rate")? {
        config.tie_rate = tie_rate;
    }
    config.json = pargs.contains("--json");
    config.validate()?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "Simulating {} players over {} rounds (seed {seed})",
        config.players,
        config.rounds()
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut simulation = Simulation::new(config.players)?;
    let report = simulation.run(&config, &mut rng)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&simulation, &report);
    }

    Ok(())
}

fn print_report(simulation: &Simulation, report: &SimReport) {
    for round in &report.rounds {
        println!("Round {}", round.round);
        for entry in &round.pairings {
            match *entry {
                PairingEntry::Pair { first, second } => println!(
                    "  {} vs {}",
                    simulation.name(first),
                    simulation.name(second)
                ),
                PairingEntry::Bye { player } => {
                    println!("  {} has a bye", simulation.name(player));
                }
            }
        }
    }

    if let Some(reason) = &report.stopped_early {
        println!("Stopped early: {reason}");
    }

    println!();
    println!("{:>4}  {:<16} {:>5} {:>7} {:>5}  bye", "rank", "player", "wins", "matches", "omw");
    for (rank, standing) in report.standings.iter().enumerate() {
        println!(
            "{:>4}  {:<16} {:>5} {:>7} {:>5}  {}",
            rank + 1,
            simulation.name(standing.player),
            standing.wins.to_string(),
            standing.matches,
            standing.omw.to_string(),
            if standing.used_bye { "yes" } else { "" }
        );
    }
}
