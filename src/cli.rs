// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for configuration management and a headless star:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --path: Show config file path
// - star <text_id>: Run the star action once without the TUI

use crate::client::StarClient;
use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// stardeck - terminal controls for a texts page
#[derive(Parser)]
#[command(name = "stardeck")]
#[command(version = VERSION)]
#[command(about = "Terminal star and flag controls for a texts site", long_about = None)]
pub struct Cli {
    /// Text identifier to bind (overrides config/STARDECK_TEXT_ID)
    #[arg(long)]
    pub text_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Star a text once and exit (no TUI)
    Star {
        /// Text identifier (defaults to the configured text_id)
        text_id: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

/// What main should do after CLI parsing.
pub enum CliOutcome {
    /// A subcommand ran to completion; exit.
    Handled,
    /// No subcommand; run the interactive UI, optionally rebinding the text.
    Run { text_id: Option<String> },
}

/// Handle CLI commands.
pub async fn handle_cli() -> CliOutcome {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                // No flag provided, show help
                println!("Usage: stardeck config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            CliOutcome::Handled
        }
        Some(Commands::Star { text_id, json }) => {
            handle_star(text_id.or(cli.text_id), json).await;
            CliOutcome::Handled
        }
        None => CliOutcome::Run {
            text_id: cli.text_id,
        },
    }
}

/// Run the star action once, headless. Exits nonzero unless the text starred.
async fn handle_star(text_id: Option<String>, json: bool) {
    let config = Config::from_env();

    let text_id = text_id
        .or_else(|| {
            if config.text_id.is_empty() {
                None
            } else {
                Some(config.text_id.clone())
            }
        })
        .unwrap_or_else(|| {
            eprintln!("Error: no text id (pass one, or set text_id in the config)");
            std::process::exit(2);
        });

    let client = match StarClient::new(&config.base_url, &config.csrf_token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    match client.star(&text_id).await {
        Ok(outcome) => {
            if json {
                let mut value = serde_json::to_value(&outcome).expect("outcome serializes");
                value["text_id"] = serde_json::Value::String(text_id.clone());
                println!("{}", value);
            } else if outcome.is_starred() {
                println!("Starred text {}", text_id);
            } else {
                println!("Text {} was not starred: {:?}", text_id, outcome);
            }
            if !outcome.is_starred() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "text_id": text_id, "outcome": "error", "error": format!("{:#}", e) })
                );
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("base_url = {:?}", config.base_url);
    println!("text_id = {:?}", config.text_id);
    // Never echo the token itself
    println!("csrf_token = {}", if config.csrf_token.is_empty() { "(unset)" } else { "(set)" });
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().unwrap();

        let mut input = String::new();
        std::io::stdin().read_line(&mut input).unwrap();

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Ensure config exists
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status();

    match status {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}
