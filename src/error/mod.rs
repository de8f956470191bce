//! Error types and handling for `simscale`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for wrapped one-off errors
//! - Provides recovery hints for user-facing errors
//! - A failed case is fatal to its sweep; no variant is ever retried

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `simscale` operations.
#[derive(Error, Debug)]
pub enum SimscaleError {
    // === Engine errors ===
    /// The engine binary does not exist at the configured path.
    #[error("Engine binary not found at '{path}'")]
    EngineMissing { path: PathBuf },

    /// The pre-run engine build step failed.
    #[error("Engine build failed with exit status {status}")]
    EngineBuild { status: i32 },

    /// The engine subprocess exited nonzero for one case.
    #[error("Engine exited with status {status} ({entity_count} entities, {step_count} steps)")]
    EngineExit {
        status: i32,
        entity_count: u64,
        step_count: u64,
    },

    // === Configuration errors ===
    /// Sweep configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    // === Rendering errors ===
    /// Chart rendering failed.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    // === I/O and serialization errors ===
    /// File system I/O error (artifact write, directory create/delete).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error (manifest or kernel definition).
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error (results dump).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Wrapped errors ===
    /// Wrapped anyhow error for one-off failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimscaleError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EngineMissing { .. } | Self::EngineBuild { .. } | Self::Config(_)
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::EngineMissing { .. } => {
                Some("Build the engine first (cargo build --release) or pass --engine")
            }
            Self::EngineBuild { .. } => Some("Fix the engine build, then re-run"),
            Self::Config(_) => Some("Check --seed-entities/--steps/--max-entities values"),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type using `SimscaleError`.
pub type Result<T> = std::result::Result<T, SimscaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimscaleError::EngineExit {
            status: 3,
            entity_count: 64,
            step_count: 9000,
        };
        assert_eq!(
            err.to_string(),
            "Engine exited with status 3 (64 entities, 9000 steps)"
        );
    }

    #[test]
    fn test_suggestion() {
        let err = SimscaleError::EngineMissing {
            path: PathBuf::from("target/release/apollon"),
        };
        assert!(err.is_user_recoverable());
        assert_eq!(
            err.suggestion(),
            Some("Build the engine first (cargo build --release) or pass --engine")
        );

        let err = SimscaleError::Config("step counts must be positive".to_string());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_case_failures_not_recoverable() {
        let err = SimscaleError::EngineExit {
            status: 1,
            entity_count: 32,
            step_count: 10,
        };
        assert!(!err.is_user_recoverable());
        assert_eq!(err.exit_code(), 1);
    }
}
