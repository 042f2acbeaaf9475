//! Statistics command implementation.

use crate::cli::args::OutputFormat;
use crate::error::TomatoError;
use crate::features::timer::Engine;
use crate::output::format_stats;

/// Execute stats command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn stats(engine: &Engine, format: OutputFormat) -> Result<String, TomatoError> {
    format_stats(engine.stats(), format)
}
