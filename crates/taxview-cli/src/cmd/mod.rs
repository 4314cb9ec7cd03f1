//! Subcommand handlers.

pub mod completions;
pub mod cycles;
pub mod diagnose;
pub mod view;

use std::path::Path;

use taxview_core::TaxonomySnapshot;
use tracing::debug;

use crate::output::{CliError, OutputMode, Reported, render_error};

/// Load the snapshot at `path`, or report a single summary line and fail.
pub fn load_taxonomy(path: &Path, output: OutputMode) -> anyhow::Result<TaxonomySnapshot> {
    match TaxonomySnapshot::load(path) {
        Ok(model) => Ok(model),
        Err(err) => {
            debug!(path = %path.display(), code = %err.code(), "taxonomy load failed");
            render_error(
                output,
                &CliError::new(format!("error loading taxonomy: {err}")).with_code(err.code().code()),
            )?;
            Err(Reported.into())
        }
    }
}
