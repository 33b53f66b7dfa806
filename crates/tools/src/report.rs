//! Per-cycle run summaries and their JSON persistence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pit_core::{ActorConfig, AdvanceStopReason, ArenaWorld, Pos, Simulation};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: u32,
    /// Level the arena was generated at when the cycle began.
    pub level: u32,
    pub ticks: u64,
    pub teleports: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    BudgetExhausted { cycle: u32 },
    ActorFailure { cycle: u32, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub seed: u64,
    pub spawn: Pos,
    pub config: ActorConfig,
    pub cycles: Vec<CycleReport>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn total_ticks(&self) -> u64 {
        self.cycles.iter().map(|cycle| cycle.ticks).sum()
    }

    pub fn total_teleports(&self) -> u32 {
        self.cycles.iter().map(|cycle| cycle.teleports).sum()
    }

    /// Writes pretty JSON through a sibling temp file so readers never see a partial report.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run report")?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move report into {}", path.display()))?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| "Failed to deserialize run report JSON")
    }
}

/// Runs up to `cycles` full cycles on a generated arena, each capped at `max_ticks`.
pub fn run_cycles(
    seed: u64,
    spawn: Pos,
    config: ActorConfig,
    cycles: u32,
    max_ticks: u64,
) -> RunReport {
    let mut sim = Simulation::generated(seed, spawn, config.clone());
    let mut reports = Vec::new();
    let mut outcome = RunOutcome::Completed;

    for cycle in 1..=cycles {
        let level = sim.world().level();
        let teleports_before = sim.hero().teleport_count();
        let result = sim.advance(max_ticks);
        match result.stop_reason {
            AdvanceStopReason::CycleCompleted { .. } => {
                let teleports = sim.hero().teleport_count() - teleports_before;
                let ticks = result.simulated_ticks;
                info!(cycle, level, ticks, teleports, "cycle completed");
                reports.push(CycleReport { cycle, level, ticks, teleports });
            }
            AdvanceStopReason::BudgetExhausted => {
                outcome = RunOutcome::BudgetExhausted { cycle };
                break;
            }
            AdvanceStopReason::ActorFailure(err) => {
                outcome = RunOutcome::ActorFailure { cycle, message: err.to_string() };
                break;
            }
        }
    }

    RunReport { seed, spawn, config, cycles: reports, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_runs_report_every_cycle() {
        let report = run_cycles(9, Pos { y: 0, x: 0 }, ActorConfig::default(), 3, 20_000);
        assert_eq!(report.outcome, RunOutcome::Completed);
        let levels: Vec<u32> = report.cycles.iter().map(|cycle| cycle.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert!(report.cycles.iter().all(|cycle| cycle.ticks > 0));
    }

    #[test]
    fn totals_sum_the_cycle_rows() {
        let cycle = |cycle, ticks, teleports| CycleReport { cycle, level: cycle, ticks, teleports };
        let report = RunReport {
            seed: 0,
            spawn: Pos { y: 0, x: 0 },
            config: ActorConfig::default(),
            cycles: vec![cycle(1, 120, 0), cycle(2, 300, 2), cycle(3, 410, 1)],
            outcome: RunOutcome::Completed,
        };
        assert_eq!(report.total_ticks(), 830);
        assert_eq!(report.total_teleports(), 3);
    }

    #[test]
    fn tiny_budget_is_reported_with_its_cycle() {
        let report = run_cycles(9, Pos { y: 0, x: 0 }, ActorConfig::default(), 2, 5);
        assert_eq!(report.outcome, RunOutcome::BudgetExhausted { cycle: 1 });
        assert!(report.cycles.is_empty());
        assert_eq!(report.total_ticks(), 0);
    }

    #[test]
    fn atomic_write_leaves_no_temp_file_and_reads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.json");
        let report = run_cycles(4, Pos { y: 0, x: 3 }, ActorConfig::default(), 1, 20_000);

        report.write_atomic(&path).expect("write report");
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(RunReport::read(&path).expect("read report"), report);
    }

    #[test]
    fn rewriting_replaces_the_previous_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.json");
        run_cycles(1, Pos { y: 0, x: 0 }, ActorConfig::default(), 1, 20_000)
            .write_atomic(&path)
            .expect("first write");

        let second = run_cycles(2, Pos { y: 0, x: 0 }, ActorConfig::default(), 2, 20_000);
        second.write_atomic(&path).expect("second write");
        assert_eq!(RunReport::read(&path).expect("read").seed, 2);
    }
}
