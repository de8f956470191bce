//! Engine subprocess contract.
//!
//! The simulation engine is an opaque external program reached only
//! through its command line:
//!
//! ```text
//! <engine> <manifest_path> --num-steps <N> --capture-step-period <M>
//! ```
//!
//! Exit code 0 is success; anything else fails the case. The invocation
//! is fully blocking with no timeout: a hung engine hangs the harness,
//! an acknowledged limitation.

use crate::case::CaseSpec;
use crate::error::{Result, SimscaleError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Capture period passed to the engine. Effectively unreachable, so no
/// intermediate capture output is ever materialized; the harness only
/// needs the final timing.
pub const CAPTURE_STEP_PERIOD: u64 = 999_999_999;

/// Runs the external engine against a materialized case.
#[derive(Debug, Clone)]
pub struct EngineInvoker {
    binary: PathBuf,
}

impl EngineInvoker {
    #[must_use]
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Pre-run check: the release engine binary must exist before any
    /// sweep begins. Failure here is fatal to the entire run.
    ///
    /// # Errors
    ///
    /// Returns [`SimscaleError::EngineMissing`] if the binary is absent.
    pub fn ensure_available(&self) -> Result<()> {
        if self.binary.is_file() {
            Ok(())
        } else {
            Err(SimscaleError::EngineMissing {
                path: self.binary.clone(),
            })
        }
    }

    /// Invoke the engine for one case and block until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`SimscaleError::EngineExit`] on a nonzero exit status, or
    /// an I/O error if the process cannot be spawned.
    pub fn invoke(&self, manifest: &Path, case: &CaseSpec) -> Result<()> {
        tracing::debug!(
            engine = %self.binary.display(),
            manifest = %manifest.display(),
            steps = case.step_count,
            "invoking engine"
        );
        let status = Command::new(&self.binary)
            .arg(manifest)
            .arg("--num-steps")
            .arg(case.step_count.to_string())
            .arg("--capture-step-period")
            .arg(CAPTURE_STEP_PERIOD.to_string())
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(SimscaleError::EngineExit {
                status: status.code().unwrap_or(-1),
                entity_count: case.entity_count,
                step_count: case.step_count,
            })
        }
    }
}

/// One-time pre-run build of the engine (`cargo build --release`),
/// executed in `engine_dir`. A build failure aborts the run before any
/// sweep is attempted.
///
/// # Errors
///
/// Returns [`SimscaleError::EngineBuild`] on a nonzero build status, or
/// an I/O error if cargo cannot be spawned.
pub fn build_release(engine_dir: &Path) -> Result<()> {
    tracing::info!(dir = %engine_dir.display(), "building engine (release)");
    let status = Command::new("cargo")
        .args(["build", "--release"])
        .current_dir(engine_dir)
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(SimscaleError::EngineBuild {
            status: status.code().unwrap_or(-1),
        })
    }
}
