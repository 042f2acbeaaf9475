use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tomato::cli::args::{Cli, Commands, OutputFormat, SettingsArgs, TaskArgs};
use tomato::cli::commands;
use tomato::config::{Config, Paths};
use tomato::core::{IntervalTicker, SystemClock};
use tomato::features::alerts::{DesktopNotifier, TerminalBell};
use tomato::features::timer::{Engine, Peripherals, Restored};
use tomato::output::format_completion_pretty;
use tomato::storage::{Database, SqliteStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();

    debug!("tomato started with verbosity level: {verbose}");
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.data_dir {
        Some(root) => Paths::with_root(root),
        None => Paths::new().context("failed to resolve data directory")?,
    };
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("failed to load {}", paths.config_file.display()))?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Completions { shell } => commands::completions(shell)?,
        command => {
            let engine = open_engine(&paths, &config)?;
            if let (Restored::Completed(completion), OutputFormat::Pretty) = (engine.restored(), format) {
                eprintln!("{}", format_completion_pretty(&completion));
            }
            dispatch(command, engine, format)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Build the engine over the on-disk store with real peripherals.
fn open_engine(paths: &Paths, config: &Config) -> Result<Engine> {
    let db = Database::open_with_paths(paths)
        .with_context(|| format!("failed to open database in {}", paths.root.display()))?;

    Ok(Engine::new(
        Box::new(SqliteStore::with_database(db)),
        Peripherals {
            clock: Box::new(SystemClock),
            ticker: Box::new(IntervalTicker::new()),
            notifier: Box::new(DesktopNotifier::from_config(&config.alerts)),
            sound: Box::new(TerminalBell::new(config.alerts.sound)),
        },
    ))
}

fn dispatch(command: Commands, mut engine: Engine, format: OutputFormat) -> Result<String> {
    let output = match command {
        Commands::Start => commands::start(&mut engine, format)?,
        Commands::Pause => commands::pause(&mut engine, format)?,
        Commands::Reset => commands::reset(&mut engine, format)?,
        Commands::Switch { mode } => commands::switch(&mut engine, &mode, format)?,
        Commands::Status { watch } => commands::status(&mut engine, watch, format)?,
        Commands::Run { continuous } => commands::run(&mut engine, continuous, format)?,
        Commands::Stats => commands::stats(&engine, format)?,
        Commands::Settings(SettingsArgs { command }) => commands::settings(&mut engine, command, format)?,
        Commands::Task(TaskArgs { command }) => commands::task(engine.store_mut(), command, format)?,
        Commands::Tui => {
            tomato::tui::run(engine)?;
            String::new()
        }
        Commands::Completions { shell } => commands::completions(shell)?,
    };
    Ok(output)
}
