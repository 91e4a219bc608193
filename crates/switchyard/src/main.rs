// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchyard - intent-routing gateway for chat, search and summarisation.
//!
//! This is the binary entry point.

mod serve;

use clap::{Parser, Subcommand};
use switchyard_config::SwitchyardConfig;
use switchyard_router::IntentClassifier;

/// Switchyard - routes free-form queries to chat, search or summarisation.
#[derive(Parser, Debug)]
#[command(name = "switchyard", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway (default).
    Serve,
    /// Classify a query and print the report as JSON.
    Classify {
        /// Query text to classify.
        query: String,
    },
    /// Validate and print the effective configuration, secrets redacted.
    Config {
        /// Print JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Classification needs no configuration.
    if let Some(Commands::Classify { query }) = &cli.command {
        match serde_json::to_string_pretty(&IntentClassifier::new().report(query)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match switchyard_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            switchyard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Config { json } => match render_config(&config, json) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Classify { .. } => {}
    }
}

/// The effective configuration with every API key masked.
fn render_config(config: &SwitchyardConfig, json: bool) -> Result<String, String> {
    let redacted = config.redacted();
    if json {
        serde_json::to_string_pretty(&redacted).map_err(|e| e.to_string())
    } else {
        toml::to_string_pretty(&redacted).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["switchyard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn classify_takes_a_query() {
        let cli = Cli::try_parse_from(["switchyard", "classify", "what is rust"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Classify { ref query }) if query == "what is rust"));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = switchyard_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn rendered_config_masks_keys() {
        let mut config = SwitchyardConfig::default();
        config.openai.api_key = Some("sk-live-secret".into());
        let toml = render_config(&config, false).unwrap();
        assert!(toml.contains("[REDACTED]"));
        assert!(!toml.contains("sk-live-secret"));

        let json = render_config(&config, true).unwrap();
        assert!(!json.contains("sk-live-secret"));
    }
}
