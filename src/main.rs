//! Soilwatch: terminal dashboard for the plant telemetry server.
//!
//! Loads configuration, initializes logging and the HTTP client, then
//! runs the ratatui event loop. Periodic history fetches, finished fetch
//! outcomes, keyboard input and Unix signals are multiplexed with
//! tokio::select; fetches themselves run as background tasks.

use crossterm::event::EventStream;
use futures_util::StreamExt;
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod error;
mod ui;
mod view;

use api::{HistoryClient, HistoryProvider};
use config::{AppConfig, LoggingConfig};
use error::{ConfigError, Result, UiError};
use ui::{App, FetchOutcome, InputAction};

/// Config file picked up from the working directory when -c is not given
const DEFAULT_CONFIG_PATH: &str = "soilwatch.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse_args();
    let config = load_config(&cli)?;
    init_tracing(&config.logging)?;

    tracing::info!(
        server = %config.api.base_url,
        window_hours = config.dashboard.window_hours,
        refresh_secs = config.dashboard.refresh_secs,
        "starting soilwatch"
    );

    let provider: Arc<dyn HistoryProvider> = Arc::new(HistoryClient::new(&config.api)?);

    let mut terminal = ratatui::try_init()
        .map_err(|e| UiError::InitializationError(e.to_string()))?;
    let result = run(&mut terminal, provider, &config).await;
    ratatui::restore();

    result
}

/// Load configuration, preferring an explicit -c path over the default one.
///
/// An explicitly given file must exist; the default path is optional and
/// falls back to built-in defaults. CLI overrides are applied on top and
/// the combined result is validated.
fn load_config(cli: &cli::Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_PATH).exists() {
                AppConfig::from_file(DEFAULT_CONFIG_PATH)?
            } else {
                AppConfig::default()
            }
        }
    };

    config.apply_cli_overrides(cli);
    config.validate()?;
    Ok(config)
}

/// Initialize the tracing subscriber.
///
/// RUST_LOG wins over the configured level. With a log file configured,
/// entries are written there as JSON lines; otherwise they go to stderr,
/// colored only when it is a terminal.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            message: e.to_string(),
        })?;

    match &logging.file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .json()
                .try_init()
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(logging.colored && atty::is(atty::Stream::Stderr))
                .try_init()
        }
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(())
}

/// Main event loop: draw, then wait for the next tick, fetch outcome,
/// key event or signal.
async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    provider: Arc<dyn HistoryProvider>,
    config: &AppConfig,
) -> Result<()> {
    let mut app = App::new(config.dashboard.window_hours, config.dashboard.point_budget);
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(8);

    let mut signals = Signals::new([SIGTERM, SIGINT, SIGQUIT])?;
    let mut events = EventStream::new();

    let mut ticker = tokio::time::interval(Duration::from_secs(config.dashboard.refresh_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !app.should_quit {
        terminal
            .draw(|frame| ui::draw(frame, &app))
            .map_err(|e| UiError::RenderError(e.to_string()))?;

        tokio::select! {
            // The first tick fires immediately and seeds the initial fetch
            _ = ticker.tick() => {
                app.spawn_refresh(&provider, &tx);
            }
            Some(outcome) = rx.recv() => {
                app.handle_fetch(outcome);
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => match ui::action_for(&event) {
                    InputAction::Quit => app.should_quit = true,
                    InputAction::Refresh => {
                        app.spawn_refresh(&provider, &tx);
                    }
                    InputAction::NextWindow => {
                        if app.next_window() {
                            app.spawn_refresh(&provider, &tx);
                        }
                    }
                    InputAction::PrevWindow => {
                        if app.prev_window() {
                            app.spawn_refresh(&provider, &tx);
                        }
                    }
                    InputAction::ToggleHelp => app.toggle_help(),
                    InputAction::None => {}
                },
                Some(Err(e)) => {
                    return Err(UiError::InputError(e.to_string()).into());
                }
                None => app.should_quit = true,
            },
            Some(signal) = signals.next() => {
                tracing::info!(signal, "received shutdown signal");
                app.should_quit = true;
            }
        }
    }

    tracing::info!("shutting down");
    Ok(())
}
