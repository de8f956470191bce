//! Sweep configuration.
//!
//! Sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables
//! 3. Defaults
//!
//! Environment controls:
//! - `SIMSCALE_KEEP_WORKSPACES` (or legacy `NO_REMOVE_SIMS`): any set value
//!   suppresses workspace deletion, on success and failure alike
//! - `SIMSCALE_MAX_ENTITIES`: entity-count ceiling for every sweep

use crate::error::{Result, SimscaleError};
use std::env;
use std::path::PathBuf;

/// Relative path at which the release engine build is expected.
pub const DEFAULT_ENGINE_PATH: &str = "target/release/apollon";
/// Seed entity count; doubled before the first case runs.
pub const DEFAULT_SEED_ENTITY_COUNT: u64 = 16;
/// Default step counts (one sweep per value).
pub const DEFAULT_STEP_COUNTS: &[u64] = &[9000];
/// Default chart output path.
pub const DEFAULT_CHART_PATH: &str = "simscale-results.svg";

/// Workspace preservation toggle.
pub const ENV_KEEP_WORKSPACES: &str = "SIMSCALE_KEEP_WORKSPACES";
/// Legacy name for the preservation toggle, still honored.
pub const ENV_KEEP_WORKSPACES_LEGACY: &str = "NO_REMOVE_SIMS";
/// Entity-count ceiling override.
pub const ENV_MAX_ENTITIES: &str = "SIMSCALE_MAX_ENTITIES";

/// Fully resolved configuration for one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub engine_path: PathBuf,
    pub seed_entity_count: u64,
    pub step_counts: Vec<u64>,
    pub max_entity_count: Option<u64>,
    pub workspace_root: PathBuf,
    pub keep_workspaces: bool,
    pub chart_path: PathBuf,
}

/// CLI-provided overrides, all optional.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub engine: Option<PathBuf>,
    pub seed_entities: Option<u64>,
    pub steps: Vec<u64>,
    pub max_entities: Option<u64>,
    pub workspace_root: Option<PathBuf>,
    pub keep_workspaces: bool,
    pub chart_path: Option<PathBuf>,
}

/// Environment-provided overrides, read once per run.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub keep_workspaces: bool,
    pub max_entities: Option<u64>,
}

impl EnvOverrides {
    /// Read the supported environment controls from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `SIMSCALE_MAX_ENTITIES` is set to
    /// something that is not a positive integer.
    pub fn from_env() -> Result<Self> {
        let keep_workspaces =
            env::var_os(ENV_KEEP_WORKSPACES).is_some() || env::var_os(ENV_KEEP_WORKSPACES_LEGACY).is_some();
        let max_entities = match env::var(ENV_MAX_ENTITIES) {
            Ok(raw) => Some(parse_positive(&raw, ENV_MAX_ENTITIES)?),
            Err(_) => None,
        };
        Ok(Self {
            keep_workspaces,
            max_entities,
        })
    }
}

impl SweepConfig {
    /// Resolve the effective configuration from CLI and environment
    /// overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-positive seed, step counts,
    /// or ceiling values.
    pub fn resolve(cli: &CliOverrides, env: &EnvOverrides) -> Result<Self> {
        let seed_entity_count = cli.seed_entities.unwrap_or(DEFAULT_SEED_ENTITY_COUNT);
        if seed_entity_count == 0 {
            return Err(SimscaleError::Config(
                "seed entity count must be positive".to_string(),
            ));
        }

        let step_counts = if cli.steps.is_empty() {
            DEFAULT_STEP_COUNTS.to_vec()
        } else {
            cli.steps.clone()
        };
        if step_counts.iter().any(|&s| s == 0) {
            return Err(SimscaleError::Config(
                "step counts must be positive".to_string(),
            ));
        }

        let max_entity_count = cli.max_entities.or(env.max_entities);
        if max_entity_count == Some(0) {
            return Err(SimscaleError::Config(
                "max entity count must be positive".to_string(),
            ));
        }

        Ok(Self {
            engine_path: cli
                .engine
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE_PATH)),
            seed_entity_count,
            step_counts,
            max_entity_count,
            workspace_root: cli
                .workspace_root
                .clone()
                .unwrap_or_else(env::temp_dir),
            keep_workspaces: cli.keep_workspaces || env.keep_workspaces,
            chart_path: cli
                .chart_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH)),
        })
    }
}

fn parse_positive(raw: &str, name: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(SimscaleError::Config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            SweepConfig::resolve(&CliOverrides::default(), &EnvOverrides::default()).expect("resolve");
        assert_eq!(config.engine_path, PathBuf::from(DEFAULT_ENGINE_PATH));
        assert_eq!(config.seed_entity_count, 16);
        assert_eq!(config.step_counts, vec![9000]);
        assert_eq!(config.max_entity_count, None);
        assert!(!config.keep_workspaces);
    }

    #[test]
    fn test_cli_beats_env_for_ceiling() {
        let cli = CliOverrides {
            max_entities: Some(256),
            ..Default::default()
        };
        let env = EnvOverrides {
            max_entities: Some(1024),
            ..Default::default()
        };
        let config = SweepConfig::resolve(&cli, &env).expect("resolve");
        assert_eq!(config.max_entity_count, Some(256));
    }

    #[test]
    fn test_env_ceiling_applies_without_cli() {
        let env = EnvOverrides {
            max_entities: Some(512),
            ..Default::default()
        };
        let config = SweepConfig::resolve(&CliOverrides::default(), &env).expect("resolve");
        assert_eq!(config.max_entity_count, Some(512));
    }

    #[test]
    fn test_keep_workspaces_from_either_source() {
        let env = EnvOverrides {
            keep_workspaces: true,
            ..Default::default()
        };
        let config = SweepConfig::resolve(&CliOverrides::default(), &env).expect("resolve");
        assert!(config.keep_workspaces);

        let cli = CliOverrides {
            keep_workspaces: true,
            ..Default::default()
        };
        let config = SweepConfig::resolve(&cli, &EnvOverrides::default()).expect("resolve");
        assert!(config.keep_workspaces);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let cli = CliOverrides {
            seed_entities: Some(0),
            ..Default::default()
        };
        assert!(SweepConfig::resolve(&cli, &EnvOverrides::default()).is_err());

        let cli = CliOverrides {
            steps: vec![100, 0],
            ..Default::default()
        };
        assert!(SweepConfig::resolve(&cli, &EnvOverrides::default()).is_err());
    }

    #[test]
    fn test_parse_positive_rejects_garbage() {
        assert!(parse_positive("12", "X").is_ok());
        assert!(parse_positive("0", "X").is_err());
        assert!(parse_positive("-3", "X").is_err());
        assert!(parse_positive("many", "X").is_err());
    }
}
