use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use pit_core::Pos;
use pit_tools::{RunOutcome, init_logging, load_config, run_cycles};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed fed to the arena generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of explore/activate/regenerate cycles to run
    #[arg(short, long, default_value_t = 3)]
    cycles: u32,
    /// Tick budget for each cycle
    #[arg(short, long, default_value_t = 20_000)]
    max_ticks: u64,
    /// Spawn row (grid coordinates, outside the arena)
    #[arg(long, default_value_t = 0)]
    spawn_y: i32,
    /// Spawn column
    #[arg(long, default_value_t = 0)]
    spawn_x: i32,
    /// Optional TOML file with actor tunables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the JSON run report
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let spawn = Pos { y: args.spawn_y, x: args.spawn_x };
    let report = run_cycles(args.seed, spawn, config, args.cycles, args.max_ticks);

    for cycle in &report.cycles {
        println!(
            "Cycle {}: level {} in {} ticks, {} teleports",
            cycle.cycle, cycle.level, cycle.ticks, cycle.teleports
        );
    }
    println!("Total Ticks: {}", report.total_ticks());
    println!("Total Teleports: {}", report.total_teleports());
    println!("Outcome: {:?}", report.outcome);

    if let Some(path) = &args.report {
        report.write_atomic(path)?;
        println!("Report written to {}", path.display());
    }

    match report.outcome {
        RunOutcome::Completed => Ok(()),
        RunOutcome::BudgetExhausted { cycle } => {
            bail!("cycle {cycle} did not finish within {} ticks", args.max_ticks)
        }
        RunOutcome::ActorFailure { cycle, message } => bail!("cycle {cycle} failed: {message}"),
    }
}
