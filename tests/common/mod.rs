#![allow(dead_code)]

//! Shared test helpers: stub engine scripts and sweep config builders.

use simscale::config::SweepConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(simscale::logging::init_test_logging);
}

/// Write an executable stub engine script with the given shell body.
pub fn write_stub_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("engine.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub engine");
    make_executable(&path);
    path
}

/// Stub engine that always succeeds.
pub fn ok_engine(dir: &Path) -> PathBuf {
    write_stub_engine(dir, "exit 0")
}

/// Stub engine that appends its manifest path to `log` and succeeds,
/// recording invocation order.
pub fn recording_engine(dir: &Path, log: &Path) -> PathBuf {
    write_stub_engine(dir, &format!("echo \"$1\" >> '{}'\nexit 0", log.display()))
}

/// Stub engine that exits nonzero for the case with `entity_count`
/// entities (matched on the deterministic workspace name) and succeeds
/// otherwise.
pub fn fail_at_entities(dir: &Path, entity_count: u64) -> PathBuf {
    write_stub_engine(
        dir,
        &format!(
            "case \"$1\" in *sim_{entity_count}_entities_*) exit 3 ;; esac\nexit 0"
        ),
    )
}

fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    }
}

/// Sweep config pointing at a stub engine, with workspaces under
/// `workspace_root` and chart output inside it.
pub fn test_config(
    engine: PathBuf,
    workspace_root: &Path,
    seed: u64,
    steps: Vec<u64>,
    max: Option<u64>,
) -> SweepConfig {
    SweepConfig {
        engine_path: engine,
        seed_entity_count: seed,
        step_counts: steps,
        max_entity_count: max,
        workspace_root: workspace_root.to_path_buf(),
        keep_workspaces: false,
        chart_path: workspace_root.join("chart.svg"),
    }
}

/// Entity counts parsed from a recording-engine log, in invocation order.
pub fn recorded_entity_counts(log: &Path) -> Vec<u64> {
    if !log.exists() {
        return Vec::new();
    }
    fs::read_to_string(log)
        .expect("read invocation log")
        .lines()
        .map(|line| {
            let name = line
                .rsplit('/')
                .nth(1)
                .expect("workspace dir component in manifest path");
            name.strip_prefix("sim_")
                .and_then(|rest| rest.split('_').next())
                .expect("entity count in workspace name")
                .parse()
                .expect("numeric entity count")
        })
        .collect()
}
