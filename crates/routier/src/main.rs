// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routier - routes free-text queries to weather, math, and generation tools.
//!
//! This is the binary entry point. Running with no subcommand starts the
//! server, matching the behavior most deployments expect.

mod serve;

use clap::{Parser, Subcommand};

/// Routier - routes free-text queries to weather, math, and generation tools.
#[derive(Parser, Debug)]
#[command(name = "routier", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve,
    /// Evaluate a math expression and print the result.
    Calc {
        /// Expression to evaluate, quoted or as separate words.
        expression: Vec<String>,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) | None => run_serve().await,
        Some(Commands::Calc { expression }) => run_calc(&expression),
        Some(Commands::Config) => run_config(),
    }
}

async fn run_serve() {
    let config = match routier_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            routier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Err(err) = serve::run_serve(config).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_calc(parts: &[String]) {
    let expression = parts.join(" ");
    if expression.trim().is_empty() {
        eprintln!("error: no expression given");
        std::process::exit(2);
    }

    match routier_mathexpr::evaluate_strict(&expression) {
        Ok(result) => println!("{result}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run_config() {
    let config = match routier_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            routier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match toml::to_string_pretty(&config) {
        Ok(rendered) => print!("{rendered}"),
        Err(err) => {
            eprintln!("error: could not render configuration: {err}");
            std::process::exit(1);
        }
    }
}
