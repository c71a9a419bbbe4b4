//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cliforge",
    bin_name = "cliforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "CLI scaffold with a typed configuration registry",
    long_about = "cliforge collects configuration options from every subcommand, \
                  layers defaults, a YAML config file and CLIFORGE_* environment \
                  variables, and validates config files before they are used.",
    after_help = "EXAMPLES:\n\
        \x20 cliforge ping\n\
        \x20 cliforge config validate ./config.yaml\n\
        \x20 cliforge config env\n\
        \x20 cliforge completions bash > /usr/share/bash-completion/completions/cliforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the configured ping message.
    #[command(
        about = "Print the configured ping message",
        after_help = "EXAMPLES:\n\
            \x20 cliforge ping\n\
            \x20 CLIFORGE_APP_PING_MESSAGE=hello cliforge ping"
    )]
    Ping(PingArgs),

    /// Inspect and validate configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cliforge config validate config.yaml\n\
            \x20 cliforge config get app.ping.message\n\
            \x20 cliforge config list"
    )]
    Config(ConfigCommands),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cliforge init                 # default location\n\
            \x20 cliforge init --path ./c.yaml # explicit path\n\
            \x20 cliforge init --force         # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cliforge completions bash > ~/.local/share/bash-completion/completions/cliforge\n\
            \x20 cliforge completions zsh  > ~/.zfunc/_cliforge\n\
            \x20 cliforge completions fish > ~/.config/fish/completions/cliforge.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether the command needs the user's config file layered in.
    ///
    /// Commands that inspect files or the registry itself must keep working
    /// when the user's config file is broken.
    pub fn reads_config_file(&self) -> bool {
        match self {
            Self::Ping(_) => true,
            Self::Config(cmd) => matches!(cmd, ConfigCommands::Get { .. } | ConfigCommands::List),
            Self::Init(_) | Self::Completions(_) => false,
        }
    }
}

// ── ping ──────────────────────────────────────────────────────────────────────

/// Arguments for `cliforge ping`.
#[derive(Debug, Args)]
pub struct PingArgs {
    /// Override the configured message for this run.
    #[arg(short = 'm', long = "message", value_name = "TEXT")]
    pub message: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cliforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write here instead of the default location.
    #[arg(long = "path", value_name = "FILE", help = "Where to write the file")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cliforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cliforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate a config file: permissions, size, syntax, unknown keys and
    /// value limits.
    Validate {
        /// Config file to check.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Report format.
        #[arg(long = "format", value_enum, default_value = "human")]
        format: ReportFormat,
    },
    /// Print the effective value of a configuration key.
    Get {
        /// Dotted key path, e.g. `app.ping.message`.
        key: String,
    },
    /// List every registered option with its type, default and variable.
    List,
    /// Print the environment variable names that override each option.
    Env,
    /// Print the path to the default configuration file.
    Path,
}

/// Report format for `config validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Coloured, human-readable report.
    Human,
    /// The validation result as JSON.
    Json,
}

// ── tests ─────────────────────────────────────────────────────────────────────
