//! Flags shared by every cliforge subcommand.
//!
//! Flattened into [`super::Cli`]; each flag is `global`, so it may appear
//! before or after the subcommand name.

use clap::Args;
use std::path::PathBuf;

/// Flags accepted by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log verbosity on stderr. `RUST_LOG`, when set, takes precedence.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)",
        long_help = "More log output on stderr:
    (none)  - warnings, including ignored unknown config keys
    -v      - info: which config file was validated and loaded
    -vv     - debug: settings layers, env overrides, parse failures
    -vvv    - trace: every value checked against the size limits
RUST_LOG overrides this when set."
    )]
    pub verbose: u8,

    /// Same effect as `app.quiet: true` in the config file.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print results and errors",
        long_help = "Only print results and errors. Same as app.quiet: true \
                     in the config file or CLIFORGE_APP_QUIET=true."
    )]
    pub quiet: bool,

    /// Same effect as `app.no_color: true`; also honours `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable ANSI colours",
        long_help = "Disable ANSI colours. Also enabled by NO_COLOR, by \
                     app.no_color: true in the config file, or by \
                     CLIFORGE_APP_NO_COLOR=true."
    )]
    pub no_color: bool,

    /// YAML config file layered between option defaults and `CLIFORGE_*`
    /// environment variables.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "YAML config file (see `cliforge config path` for the default)",
        long_help = "YAML config file to load. It must exist and pass the same \
                     checks as `cliforge config validate`: no world-writable \
                     permissions, at most 1 MiB, parseable YAML and values \
                     within the size limits. Unknown keys only warn. \
                     CLIFORGE_* environment variables override its values. \
                     Without this flag the file at `cliforge config path` is \
                     used when it exists."
    )]
    pub config: Option<PathBuf>,

    /// Rendering of command results; `json` also switches logs to JSON.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured text with status symbols.
    Human,
    /// Text without colours.
    Plain,
    /// One JSON document per command; logs become JSON lines on stderr.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use crate::cli::Cli;

    #[test]
    fn config_help_names_env_overrides_and_checks() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("CLIFORGE_*"));
        assert!(help.contains("permissions"));
        assert!(help.contains("CLIFORGE_APP_NO_COLOR"));
    }
}
