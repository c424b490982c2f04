//! todolist - Terminal Todo List
//!
//! Add, complete and delete todos from a terminal form-and-list UI.
//! With `--replay` the binary instead applies a JSON action script and
//! prints the resulting list.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use todolist::application::{App, AppMode};
use todolist::infrastructure::{init_logging, Config, LogConfig, ScriptRunner};
use todolist::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "A terminal todo list")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Apply a JSON array of actions and print the resulting list
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let log_config = LogConfig::default()
        .with_level(config.log_level()?)
        .with_log_file(config.logging.file.clone())
        .with_log_file(cli.log_file.clone())
        .with_verbosity(cli.verbose)
        .with_stderr_fallback(cli.replay.is_some());
    init_logging(&log_config).context("initialising logging")?;

    if let Some(script) = &cli.replay {
        let state = ScriptRunner::run_file(script)?;
        println!("{}", ScriptRunner::render_state(&state)?);
        return Ok(());
    }

    info!("starting terminal UI");
    let mut app = App::new(config.app_options());
    run_tui(&mut app)
}

/// Sets up the terminal, runs the event loop and always restores the
/// terminal before returning.
fn run_tui(app: &mut App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    with_restore(restore_terminal, || {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        run_app(&mut terminal, app)?;
        Ok(())
    })?;
    info!(len = app.store.state().len(), "exiting");
    Ok(())
}

/// Runs `body`, then `restore`, even when `body` fails part-way or panics.
fn with_restore<T>(
    restore: impl FnOnce(),
    body: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let _restore = scopeguard::guard((), |()| restore());
    body()
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!(error = %err, "failed to leave raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!(error = %err, "failed to leave the alternate screen");
    }
}

/// Main event loop: one key press is handled fully before the next is read.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
