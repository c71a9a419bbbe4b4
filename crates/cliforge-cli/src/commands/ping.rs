//! `cliforge ping`: print the configured message.
//!
//! Also the reference for how a subcommand contributes options: [`options`]
//! is registered in `bootstrap::build_registry`.

use cliforge_core::domain::ConfigOption;
use owo_colors::AnsiColors;
use serde_json::json;
use tracing::debug;

use crate::{
    cli::{OutputFormat, PingArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Options owned by `ping`.
pub fn options() -> Vec<ConfigOption> {
    vec![
        ConfigOption::string("app.ping.message", "pong")
            .with_description("Message printed by ping")
            .with_example("hello"),
        ConfigOption::string("app.ping.output_color", "green")
            .with_description("Colour of the ping message")
            .with_example("red"),
    ]
}

pub fn execute(args: PingArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let ping = &config.settings.app.ping;
    let message = args.message.unwrap_or_else(|| ping.message.clone());
    let color = parse_color(&ping.output_color)?;
    debug!(message = %message, color = %ping.output_color, "Ping");

    if output.format() == OutputFormat::Json {
        return output.json(&json!({ "message": message }));
    }
    output.print(&output.paint(&message, color))?;
    Ok(())
}

fn parse_color(name: &str) -> CliResult<AnsiColors> {
    let color = match name.trim().to_ascii_lowercase().as_str() {
        "black" => AnsiColors::Black,
        "red" => AnsiColors::Red,
        "green" => AnsiColors::Green,
        "yellow" => AnsiColors::Yellow,
        "blue" => AnsiColors::Blue,
        "magenta" => AnsiColors::Magenta,
        "cyan" => AnsiColors::Cyan,
        "white" => AnsiColors::White,
        "default" | "none" => AnsiColors::Default,
        other => {
            return Err(CliError::ConfigError {
                message: format!("unknown colour '{other}' for app.ping.output_color"),
                source: None,
            });
        }
    };
    Ok(color)
}
