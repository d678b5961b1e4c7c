// stardeck entry point
//
// Wires the pieces together: CLI dispatch, configuration, tracing setup,
// the star worker, and the TUI event loop.

use anyhow::Result;
use stardeck::cli::{self, CliOutcome};
use stardeck::client::StarClient;
use stardeck::config::{Config, LogRotation};
use stardeck::handler::{run_star_worker, InteractionHandler};
use stardeck::logging::{LogBuffer, TuiLogLayer};
use stardeck::{startup, tui};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config management, one-shot star)
    let text_id_override = match cli::handle_cli().await {
        CliOutcome::Handled => return Ok(()),
        CliOutcome::Run { text_id } => text_id,
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration, applying the CLI text binding if given
    let mut config = Config::from_env();
    if let Some(text_id) = text_id_override {
        config.text_id = text_id;
    }

    // The star control needs a resource identifier to address
    if config.text_id.is_empty() {
        eprintln!("Error: no text id to bind.");
        eprintln!("Pass --text-id, set STARDECK_TEXT_ID, or set text_id in the config file.");
        std::process::exit(2);
    }

    // Without a token the site will reject star requests; demo mode is fine
    if config.csrf_token.is_empty() && !config.demo_mode {
        eprintln!("Warning: no CSRF token configured; star requests will likely be rejected.");
        eprintln!("Set STARDECK_CSRF_TOKEN or csrf_token in the config file.");
    }

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output:
    // In TUI mode logs go to the in-memory buffer (keeps the screen clean),
    // in headless mode to stdout; file logging is layered on top if enabled.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("stardeck={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program so file
    // logs flush on exit
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = if config
        .logging
        .file_enabled
    {
        if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
            eprintln!(
                "Warning: Could not create log directory {:?}: {}",
                config.logging.file_dir, e
            );
            // Fall back to non-file logging
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
            }
            None
        } else {
            let file_appender = match config.logging.file_rotation {
                LogRotation::Hourly => tracing_appender::rolling::hourly(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
                LogRotation::Daily => tracing_appender::rolling::daily(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
                LogRotation::Never => tracing_appender::rolling::never(
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                ),
            };

            // Non-blocking writer: file writes happen on a background thread.
            // The file layer uses JSON format for structured log parsing.
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
            }

            Some(guard)
        }
    } else {
        // No file logging
        if config.enable_tui {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
        None
    };

    // Event channels: clicks flow to the worker, outcomes flow back to the UI
    let (star_tx, star_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // Build the star client and spawn the worker
    let client = StarClient::new(&config.base_url, &config.csrf_token)?;
    let demo_mode = config.demo_mode;
    let worker_handle = tokio::spawn(async move {
        run_star_worker(client, star_rx, ui_tx, demo_mode).await;
    });

    // Bind the page controls once; the handler holds the only references
    let handler = InteractionHandler::new(config.text_id.clone(), star_tx);

    // Print startup banner (and mirror it into the log panel)
    startup::print_startup(&config);
    startup::log_startup(&config);

    if config.enable_tui {
        tracing::info!("Starting TUI");
        let mut app = tui::app::App::new(&config, log_buffer, handler);
        if let Err(e) = tui::run_tui(&mut app, ui_rx).await {
            tracing::error!("TUI error: {:?}", e);
        }
        // Dropping the app drops the handler's click sender, which lets the
        // worker drain and exit
        drop(app);
    } else {
        tracing::info!("TUI disabled, running in headless mode (Ctrl+C to exit)");
        // Headless mode has no input source for clicks; it exists so the
        // startup path and logging can be exercised in scripts
        drop(handler);
        drop(ui_rx);
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutting down...");

    // Wait for the worker to finish any in-flight requests' bookkeeping
    let _ = worker_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
