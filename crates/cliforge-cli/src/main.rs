//! # cliforge CLI
//!
//! CLI scaffold with a typed configuration registry and config-file
//! validation.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Build the option registry from every subcommand provider.
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`].
//! 6. Dispatch to the appropriate command handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                     |
//! |------|---------------------------------------------|
//! |  0   | Success                                     |
//! |  1   | Internal error, or config failed validation |
//! |  2   | User / input error                          |
//! |  3   | Resource not found                          |
//! |  4   | Configuration error                         |

use std::process::ExitCode;

use clap::Parser;
use cliforge_core::application::OptionRegistry;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod bootstrap;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version also arrive here and must exit 0.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let verbose = cli.global.verbose > 0;

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Registry ───────────────────────────────────────────────────────
    let registry = bootstrap::build_registry();
    if let Err(e) = registry.validate() {
        return handle_error(CliError::Core(e), verbose);
    }

    // ── 4. Load configuration ─────────────────────────────────────────────
    let loaded = if cli.command.reads_config_file() {
        AppConfig::load(&registry, cli.global.config.as_deref())
    } else {
        AppConfig::without_file(&registry)
    };
    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose),
    };

    // ── 5. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 6. Dispatch + 7. Error handling ──────────────────────────────────
    match run(cli, &registry, config, output) {
        Ok(()) => {
            info!("cliforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(
    cli: Cli,
    registry: &OptionRegistry,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cli.command {
        Commands::Ping(args) => commands::ping::execute(args, config, output),
        Commands::Config(cmd) => commands::config::execute(cmd, registry, config, output),
        Commands::Init(args) => commands::init::execute(args, registry, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives stdout redirection.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
