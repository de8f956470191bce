//! simscale: entity-count scaling harness for an external particle
//! simulation engine.
//!
//! The harness answers one question repeatedly: how does wall-clock run
//! time scale as the number of simulated entities (and, secondarily, the
//! number of simulation steps) grows? For each point in a sweep it
//! materializes a self-contained on-disk case (control manifest, entity
//! dataset, compute-kernel definition), invokes the engine as a blocking
//! subprocess, measures elapsed time, and aggregates the samples into one
//! scaling curve per step count.
//!
//! Pipeline per case: materialize → invoke → collect → cleanup, strictly
//! sequential. The engine is opaque; the only contract is its command line
//! and exit status.

pub mod case;
pub mod chart;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod sweep;
pub mod workspace;

pub use error::{Result, SimscaleError};
