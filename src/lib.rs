pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod resilience;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::{
    io::{self, Stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::settings::{config_dir, load_preferences, session_orientation, settings_path};
use app::state::{AppMode, AppState};
use chrono::Utc;
use cli::Cli;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::{geoip, nws::NwsClient};
use domain::{chart::ChartOrientation, weather::Location};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let log_file = logging::init(config_dir().as_deref(), cli.log_level.into())?;
    log::info!(
        "skycast {} starting (log file {:?})",
        env!("CARGO_PKG_VERSION"),
        log_file
    );

    if cli.one_shot {
        return run_once(&cli).await;
    }

    let preferences_path = settings_path();
    let preferences = load_preferences(preferences_path.as_deref());
    let orientation = session_orientation(&cli, &preferences);

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli, orientation, preferences_path).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Fetches once and prints the text report to stdout.
async fn run_once(cli: &Cli) -> Result<()> {
    let location = match cli.coordinates() {
        Some((lat, lon)) => Location::from_coords(lat, lon),
        None => geoip::detect_location()
            .await
            .context("Unable to determine your location. Pass --lat and --lon.")?,
    };
    let client = NwsClient::with_base_url(cli.api_url.clone())?;
    let dashboard = client
        .fetch_dashboard(location)
        .await
        .context("Unable to load weather data")?;
    println!("{}", ui::text::report(&dashboard, Utc::now(), cli.icons));
    Ok(())
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: Cli,
    orientation: ChartOrientation,
    preferences_path: Option<PathBuf>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli, orientation, preferences_path)?;

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app, &cli))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    log::info!("skycast exiting");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
