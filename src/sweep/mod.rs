//! Sweep control: the doubling loop, per-case timing, and result
//! aggregation.
//!
//! One sweep holds the step count fixed and doubles the entity count every
//! iteration, starting from the configured seed; the doubling happens
//! before the case is built, so the first executed case already reflects
//! one doubling. A sweep ends when the configured entity-count ceiling
//! would be exceeded, when the safety iteration cap runs out, or when a
//! case fails. A failed case ends its sweep; samples already recorded stay
//! valid. Nothing is ever retried.

use crate::case::{CaseMaterializer, CaseSpec};
use crate::config::SweepConfig;
use crate::engine::EngineInvoker;
use crate::error::Result;
use crate::workspace::Workspace;
use std::collections::BTreeMap;
use std::time::Instant;

/// Safety ceiling on iterations per sweep. Never a meaningful termination
/// condition; the entity-count ceiling or a failure stops the loop first
/// in practice.
pub const SWEEP_ITERATION_CAP: usize = 999;

/// One timing sample: elapsed wall-clock seconds for one completed case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingResult {
    pub case: CaseSpec,
    pub duration_seconds: f64,
}

/// Entity count → duration in seconds, scoped to one step count.
pub type SweepResult = BTreeMap<u64, f64>;

/// Records one timing sample per successfully completed case.
#[derive(Debug, Default)]
pub struct ResultCollector {
    samples: SweepResult,
}

impl ResultCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample, keyed by entity count. One sample per key; no
    /// smoothing, no retries.
    pub fn record(&mut self, timing: &TimingResult) {
        self.samples
            .insert(timing.case.entity_count, timing.duration_seconds);
    }

    #[must_use]
    pub fn into_result(self) -> SweepResult {
        self.samples
    }
}

/// Drives the outer sweep loop(s): materialize, invoke, time, collect.
#[derive(Debug)]
pub struct SweepController<'a> {
    config: &'a SweepConfig,
    materializer: CaseMaterializer,
    invoker: EngineInvoker,
}

impl<'a> SweepController<'a> {
    #[must_use]
    pub fn new(config: &'a SweepConfig) -> Self {
        Self {
            config,
            materializer: CaseMaterializer::default(),
            invoker: EngineInvoker::new(config.engine_path.clone()),
        }
    }

    /// Run one sweep per configured step count, in order. Each sweep's
    /// partial results survive its own failure, so this never errors.
    #[must_use]
    pub fn run_all(&self) -> Vec<(u64, SweepResult)> {
        self.config
            .step_counts
            .iter()
            .map(|&step_count| (step_count, self.run_sweep(step_count)))
            .collect()
    }

    /// Run one sweep at a fixed step count, doubling the entity count each
    /// iteration. Returns every sample recorded before the sweep ended.
    #[must_use]
    pub fn run_sweep(&self, step_count: u64) -> SweepResult {
        let mut collector = ResultCollector::new();
        let mut entity_count = self.config.seed_entity_count;

        for _ in 0..SWEEP_ITERATION_CAP {
            entity_count = match entity_count.checked_mul(2) {
                Some(doubled) => doubled,
                None => break,
            };
            if let Some(max) = self.config.max_entity_count {
                if entity_count > max {
                    tracing::info!(
                        entities = entity_count,
                        max,
                        "entity-count ceiling reached, ending sweep"
                    );
                    break;
                }
            }

            println!("= = = {entity_count} entities, {step_count} steps = = =");
            let case = CaseSpec::new(entity_count, step_count);
            match self.run_case(&case) {
                Ok(timing) => {
                    tracing::info!(
                        entities = entity_count,
                        steps = step_count,
                        seconds = timing.duration_seconds,
                        "case completed"
                    );
                    collector.record(&timing);
                }
                Err(e) => {
                    // Sweep-level catch: surface the failure, keep what we
                    // have, end the sweep. Not escalated further.
                    tracing::error!(
                        entities = entity_count,
                        steps = step_count,
                        error = %e,
                        "case failed, ending sweep"
                    );
                    break;
                }
            }
        }

        collector.into_result()
    }

    /// Run one case end to end, timing the whole materialize → invoke →
    /// workspace-release pipeline.
    fn run_case(&self, case: &CaseSpec) -> Result<TimingResult> {
        let begin = Instant::now();

        let workspace = Workspace::create(
            &self.config.workspace_root,
            case,
            self.config.keep_workspaces,
        )?;
        let outcome = self.execute_case(case, &workspace);
        // Release on both paths; the preservation toggle is honored
        // identically for success and failure.
        let released = workspace.release();
        outcome?;
        released?;

        Ok(TimingResult {
            case: *case,
            duration_seconds: begin.elapsed().as_secs_f64(),
        })
    }

    fn execute_case(&self, case: &CaseSpec, workspace: &Workspace) -> Result<()> {
        let paths = self.materializer.materialize(case, workspace.path())?;
        self.invoker.invoke(&paths.manifest, case)
    }
}
