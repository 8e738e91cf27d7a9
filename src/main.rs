//! StreamVault - streaming catalogue browser for the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! streamvault
//!
//! # CLI mode (for automation)
//! streamvault hero --json
//! streamvault admin list --type movie
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use streamvault::app::{Action, App, AppEvent};
use streamvault::cli::{Cli, Command, ExitCode, Output};
use streamvault::commands::{self, Services};
use streamvault::config::{Config, Settings};
use streamvault::logging::{self, LogTarget};
use streamvault::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Longest sleep between loop iterations; background results are picked up
/// at least this often.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let (settings, config_warning) = load_settings(&cli);

    let target = if cli.is_cli_mode() {
        LogTarget::Stderr
    } else {
        LogTarget::File(logging::default_log_path())
    };
    if let Err(e) = logging::init(target, &settings.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    if let Some(message) = config_warning {
        warn!("{}", message);
    }

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        run_cli(cli, settings).await.into()
    } else {
        // TUI mode: launch interactive interface
        match run_tui(settings).await {
            Ok(()) => ExitCode::Success.into(),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::Error.into()
            }
        }
    }
}

/// Config file from `--config` or the default location; an unreadable file
/// falls back to defaults and yields a warning to log.
fn load_settings(cli: &Cli) -> (Settings, Option<String>) {
    let path = cli.config.clone().or_else(Config::path);
    let (config, warning) = match path {
        Some(path) => match Config::load_from(&path) {
            Ok(config) => (config, None),
            Err(e) => (
                Config::default(),
                Some(format!("ignoring config, using defaults: {:#}", e)),
            ),
        },
        None => (Config::default(), None),
    };
    (config.resolve(), warning)
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, settings: Settings) -> ExitCode {
    let output = Output::new(&cli);
    let services = Services::new(settings);

    match cli.command {
        Some(Command::Hero(cmd)) => commands::hero_cmd(cmd, &services, &output).await,

        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, &services, &output).await,

        Some(Command::Items(cmd)) => commands::items_cmd(cmd, &services, &output).await,

        Some(Command::Admin(cmd)) => commands::admin_cmd(cmd.command, &services, &output).await,

        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(settings: Settings) -> Result<()> {
    info!(hero_source = %settings.hero_source, "starting tui");
    let mut app = App::new(settings.auto_rotate_interval);
    let services = Arc::new(Services::new(settings));

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, services).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Hand queued actions to background tasks; their events come back on `tx`.
fn dispatch(actions: Vec<Action>, services: &Arc<Services>, tx: &mpsc::UnboundedSender<AppEvent>) {
    for action in actions {
        let services = Arc::clone(services);
        let tx = tx.clone();
        tokio::spawn(async move {
            for event in services.perform(action).await {
                // The loop has exited when the receiver is gone
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
    }
}

/// Main event loop - handles input, fires deadlines, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, services: Arc<Services>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height), Instant::now());
    app.request_home();

    let mut dirty = true;
    while app.running {
        let now = Instant::now();

        dispatch(app.take_actions(), &services, &tx);
        while let Ok(event) = rx.try_recv() {
            app.apply(event, now);
            dirty = true;
        }
        dirty |= app.tick(now);

        if dirty {
            terminal.draw(|frame| ui::draw(frame, app, now))?;
            dirty = false;
        }

        let timeout = app
            .next_deadline(now)
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, now);
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    dirty |= app.handle_mouse(mouse, now);
                }
                Event::FocusLost => {
                    dirty |= app.focus_lost(now);
                }
                Event::Resize(width, height) => {
                    app.resize(Rect::new(0, 0, width, height), now);
                    dirty = true;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
