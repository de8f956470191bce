//! The `materialize` command: write one case's artifacts and leave them
//! on disk for inspection.

use crate::case::{CaseMaterializer, CaseSpec};
use crate::cli::MaterializeArgs;
use crate::error::{Result, SimscaleError};
use std::env;
use std::fs;

/// Execute the materialize command.
///
/// # Errors
///
/// Returns an error for non-positive counts or artifact write failures.
pub fn execute(args: &MaterializeArgs) -> Result<()> {
    if args.entities == 0 || args.steps == 0 {
        return Err(SimscaleError::Config(
            "entity and step counts must be positive".to_string(),
        ));
    }

    let case = CaseSpec::new(args.entities, args.steps);
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| env::temp_dir().join(case.dir_name()));
    fs::create_dir_all(&dir)?;

    let paths = CaseMaterializer::default().materialize(&case, &dir)?;
    println!("Wrote {}", paths.manifest.display());
    println!("Wrote {}", paths.dataset.display());
    println!("Wrote {}", paths.kernels.display());
    Ok(())
}
