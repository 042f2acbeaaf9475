//! Settings command implementation.

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::TomatoError;
use crate::features::timer::Engine;
use crate::output::format_settings;

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn settings(
    engine: &mut Engine,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, TomatoError> {
    match cmd {
        None | Some(SettingsCommands::Show) => {}
        Some(SettingsCommands::Set { work, short, long }) => {
            let updated =
                engine
                    .settings()
                    .with_input(work.as_deref(), short.as_deref(), long.as_deref());
            engine.apply_settings(updated);
        }
    }

    format_settings(engine.settings(), format)
}
