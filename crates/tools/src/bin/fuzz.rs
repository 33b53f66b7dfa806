use anyhow::{Result, bail};
use clap::Parser;
use pit_core::{ActionName, ActorConfig, GOAL_LADDER, Passability, Pos, Simulation, TickOutcome};
use pit_tools::init_logging;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of independent arenas to exercise
    #[arg(short, long, default_value_t = 50)]
    runs: u32,
    #[arg(short, long, default_value_t = 3)]
    cycles: u32,
    /// Tick budget per cycle before the run counts as stalled
    #[arg(short, long, default_value_t = 20_000)]
    max_ticks: u64,
}

/// Random tile on the outer ring of the grid, which never overlaps the arena.
fn random_spawn(rng: &mut ChaCha8Rng) -> Pos {
    let offset = (rng.next_u64() % 11) as i32;
    if rng.next_u64() % 2 == 0 { Pos { y: 0, x: offset } } else { Pos { y: offset, x: 0 } }
}

fn ladder_flags(sim: &Simulation) -> Vec<bool> {
    GOAL_LADDER.iter().map(|rung| sim.hero().cycle().holds(rung.goal)).collect()
}

fn fuzz_run(seed: u64, spawn: Pos, cycles: u32, max_ticks: u64) -> Result<u64> {
    let mut sim = Simulation::generated(seed, spawn, ActorConfig::default());
    let mut total_ticks = 0;

    for cycle in 1..=cycles {
        let mut ticks = 0;
        loop {
            if ticks >= max_ticks {
                bail!("cycle {cycle} stalled after {max_ticks} ticks");
            }
            let before = ladder_flags(&sim);
            let outcome = sim.tick()?;
            ticks += 1;

            // Assert invariants
            let pos = sim.hero().pos();
            if !sim.world().is_passable(pos) {
                bail!("hero inside an obstacle at {pos:?}");
            }
            if outcome == (TickOutcome::Completed { action: ActionName::RegenerateArena }) {
                if ladder_flags(&sim).iter().any(|held| *held) {
                    bail!("cycle {cycle} left ladder flags set after regeneration");
                }
                break;
            }
            let after = ladder_flags(&sim);
            if before.iter().zip(&after).any(|(was, now)| *was && !*now) {
                bail!("cycle {cycle} revoked a ladder flag mid-cycle");
            }
        }
        total_ticks += ticks;
    }

    Ok(total_ticks)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let seed = rng.next_u64();
        let spawn = random_spawn(&mut rng);
        let ticks = fuzz_run(seed, spawn, args.cycles, args.max_ticks).map_err(|err| {
            err.context(format!("run {run}: arena seed {seed}, spawn {spawn:?}"))
        })?;
        println!("Run {run}: {} cycles in {ticks} ticks", args.cycles);
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
