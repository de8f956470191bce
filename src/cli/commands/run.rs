//! The `run` command: pre-run engine check, sweeps, results dump, chart.

use crate::chart;
use crate::cli::RunArgs;
use crate::config::{CliOverrides, EnvOverrides, SweepConfig};
use crate::engine::{self, EngineInvoker};
use crate::error::Result;
use crate::sweep::{SweepController, SweepResult};
use std::collections::BTreeMap;
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the pre-run engine
/// check or build fails, or the chart cannot be rendered. A failed case
/// inside a sweep is not an error here; it ends that sweep and its
/// partial results are still dumped and charted.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = SweepConfig::resolve(&build_overrides(args), &EnvOverrides::from_env()?)?;

    if args.build {
        let engine_dir = args
            .engine_dir
            .clone()
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        engine::build_release(&engine_dir)?;
    }
    EngineInvoker::new(config.engine_path.clone()).ensure_available()?;

    let sweeps = SweepController::new(&config).run_all();
    dump_results(&sweeps)?;

    let series: Vec<(String, SweepResult)> = sweeps
        .into_iter()
        .filter(|(_, result)| !result.is_empty())
        .map(|(step_count, result)| (format!("{step_count} steps"), result))
        .collect();
    if series.is_empty() {
        tracing::warn!("no case completed; skipping chart");
        return Ok(());
    }

    chart::render(&series, &config.chart_path)?;
    println!("Wrote chart to {}", config.chart_path.display());
    Ok(())
}

/// Final structured dump of entity-count-to-duration results. A single
/// sweep prints its map directly; multiple sweeps are keyed by step count.
fn dump_results(sweeps: &[(u64, SweepResult)]) -> Result<()> {
    if let [(_, only)] = sweeps {
        println!("{}", serde_json::to_string_pretty(only)?);
    } else {
        let keyed: BTreeMap<u64, &SweepResult> =
            sweeps.iter().map(|(steps, result)| (*steps, result)).collect();
        println!("{}", serde_json::to_string_pretty(&keyed)?);
    }
    Ok(())
}

fn build_overrides(args: &RunArgs) -> CliOverrides {
    CliOverrides {
        engine: args.engine.clone(),
        seed_entities: args.seed_entities,
        steps: args.steps.clone(),
        max_entities: args.max_entities,
        workspace_root: args.workspace_root.clone(),
        keep_workspaces: args.keep_workspaces,
        chart_path: args.out.clone(),
    }
}
