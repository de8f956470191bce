//! Subcommand implementations.

pub mod materialize;
pub mod run;
