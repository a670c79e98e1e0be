//! Quotidian CLI: terminal quote-of-the-moment widget
//!
//! ## Usage
//!
//! ```bash
//! # Full-screen widget
//! quotidian
//!
//! # Print one quote (with the same retry and fallback sequence)
//! quotidian once
//!
//! # Manage favourites
//! quotidian fav list
//! quotidian fav add "Stay hungry." "Steve Jobs"
//! quotidian fav remove "Stay hungry." "Steve Jobs"
//! quotidian fav clear
//! ```

mod clipboard;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::unbounded;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quotidian::fetch::{FetchEvent, FetchTask};
use quotidian::quote::QuoteOrigin;
use quotidian::source::{DummyJsonSource, QuoteSource};
use quotidian_app::app::{AppCommand, AppSnapshot, ControllerOptions, QuoteController};
use quotidian_app::config::data::{FAVOURITES_FILE, LOG_FILE, SETTINGS_FILE};
use quotidian_app::data::{storage, FavouritesStore, FileSlot, KvSlot, Settings};

use crate::clipboard::SystemClipboard;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "quotidian", about = "Terminal quote-of-the-moment widget", version)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding favourites, settings and the log
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Quote endpoint
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Retries after the first failure
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Seconds between a failure and the next attempt
    #[arg(long, global = true)]
    retry_delay: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log file for the full-screen widget
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one quote and print it
    Once,

    /// Manage saved quotes
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
}

#[derive(Subcommand)]
enum FavAction {
    /// List saved quotes, most recent first
    List,
    /// Save a quote
    Add { text: String, author: String },
    /// Remove a saved quote
    Remove { text: String, author: String },
    /// Remove every saved quote
    Clear,
}

impl Cli {
    fn data_dir(&self) -> CliResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(storage::config_dir()?),
        }
    }

    /// Settings from disk, overridden by flags
    fn settings(&self, data_dir: &Path) -> Settings {
        let mut settings = Settings::load_from(&data_dir.join(SETTINGS_FILE)).unwrap_or_else(|e| {
            warn!(error = %e, "settings unreadable, using defaults");
            Settings::default()
        });
        if let Some(url) = &self.api_url {
            settings.api_url = url.clone();
        }
        if let Some(max_retries) = self.max_retries {
            settings.max_retries = max_retries;
        }
        if let Some(delay) = self.retry_delay {
            settings.retry_delay_secs = delay;
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }
        settings
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir()?;

    match &cli.command {
        None => {
            let log_path = cli.log_file.clone().unwrap_or_else(|| data_dir.join(LOG_FILE));
            setup_file_logging(cli.verbose, &log_path)?;
            let settings = cli.settings(&data_dir);
            run_widget(&settings, &data_dir)
        }
        Some(Commands::Once) => {
            setup_logging(cli.verbose);
            let settings = cli.settings(&data_dir);
            run_once(&settings)
        }
        Some(Commands::Fav { action }) => {
            setup_logging(cli.verbose);
            let slot = FileSlot::new(data_dir.join(FAVOURITES_FILE));
            run_fav(action, FavouritesStore::new(slot), &mut io::stdout())
        }
    }
}

fn env_filter(verbosity: u8, default: &str) -> EnvFilter {
    let level = match verbosity {
        0 => default,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Subcommands log to stderr
fn setup_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity, "warn"))
        .with_writer(io::stderr)
        .init();
}

/// The widget owns the terminal, so it logs to a file
fn setup_file_logging(verbosity: u8, path: &Path) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity, "info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_source(settings: &Settings) -> CliResult<Arc<dyn QuoteSource>> {
    let source = DummyJsonSource::with_endpoint(&settings.api_url, settings.request_timeout())?;
    Ok(Arc::new(source))
}

// =============================================================================
// once
// =============================================================================

fn run_once(settings: &Settings) -> CliResult<()> {
    let source = build_source(settings)?;
    let policy = settings.retry_policy();
    let (tx, rx) = unbounded();
    let handle = FetchTask::new(source, policy).spawn(tx)?;

    for update in rx.iter() {
        match update.event {
            FetchEvent::Attempt { attempt } if attempt > 1 => {
                eprintln!("Retrying\u{2026} ({}/{})", attempt - 1, policy.max_retries);
            }
            FetchEvent::RetryScheduled { attempt, max_retries, delay } => {
                eprintln!(
                    "Couldn't reach the server. (Attempt {}/{}) Retrying in {}s\u{2026}",
                    attempt,
                    max_retries,
                    delay.as_secs()
                );
            }
            FetchEvent::Finished(fetched) => {
                if fetched.origin != QuoteOrigin::Remote {
                    eprintln!("No internet connection. Showing a saved quote instead.");
                }
                println!("{}", fetched.quote.to_clipboard_text());
                break;
            }
            _ => {}
        }
    }

    handle.join();
    Ok(())
}

// =============================================================================
// fav
// =============================================================================

fn run_fav<S: KvSlot>(
    action: &FavAction,
    mut store: FavouritesStore<S>,
    out: &mut impl io::Write,
) -> CliResult<()> {
    match action {
        FavAction::List => {
            let favourites = store.list();
            if favourites.is_empty() {
                writeln!(out, "No favourites yet.")?;
            }
            for (i, fav) in favourites.iter().enumerate() {
                writeln!(out, "{:>3}. {}", i + 1, fav.quote().to_clipboard_text())?;
                if let Some(label) = fav.saved_label() {
                    writeln!(out, "     {}", label)?;
                }
            }
        }
        FavAction::Add { text, author } => {
            if store.add(text, author)? {
                writeln!(out, "Saved.")?;
            } else {
                writeln!(out, "Already saved.")?;
            }
        }
        FavAction::Remove { text, author } => {
            if store.remove(text, author)? {
                writeln!(out, "Removed.")?;
            } else {
                writeln!(out, "Not in favourites.")?;
            }
        }
        FavAction::Clear => {
            let count = store.count();
            store.clear()?;
            writeln!(out, "Cleared {} favourite{}.", count, if count == 1 { "" } else { "s" })?;
        }
    }
    Ok(())
}

// =============================================================================
// Full-screen widget
// =============================================================================

/// Frontend-only state
struct View {
    /// Selected drawer entry
    selected: usize,
}

/// Map a key press to a controller command
///
/// While the drawer is open only drawer keys apply. Letter keys ignore case.
fn map_key(view: &mut View, snap: &AppSnapshot, code: KeyCode) -> Option<AppCommand> {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    if snap.drawer_open {
        let len = snap.favourites.len();
        return match code {
            KeyCode::Up => {
                view.selected = view.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if view.selected + 1 < len {
                    view.selected += 1;
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete if len > 0 => {
                Some(AppCommand::RemoveFavourite(view.selected))
            }
            KeyCode::Char('y') | KeyCode::Enter if len > 0 => {
                Some(AppCommand::CopyFavourite(view.selected))
            }
            KeyCode::Char('a') if len > 0 => Some(AppCommand::ClearFavourites),
            KeyCode::Esc | KeyCode::Char('f') => Some(AppCommand::CloseFavourites),
            KeyCode::Char('q') => Some(AppCommand::Shutdown),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('n') | KeyCode::Char(' ') => Some(AppCommand::NewQuote),
        KeyCode::Char('c') => Some(AppCommand::Copy),
        KeyCode::Char('s') => Some(AppCommand::ToggleFavourite),
        KeyCode::Char('f') => {
            view.selected = 0;
            Some(AppCommand::OpenFavourites)
        }
        KeyCode::Char('x') => Some(AppCommand::DismissNotice),
        KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Shutdown),
        _ => None,
    }
}

fn run_widget(settings: &Settings, data_dir: &Path) -> CliResult<()> {
    let source = build_source(settings)?;
    let store = FavouritesStore::new(FileSlot::new(data_dir.join(FAVOURITES_FILE)));
    let options = ControllerOptions {
        policy: settings.retry_policy(),
        ..ControllerOptions::default()
    };
    let mut controller =
        QuoteController::new(source, store, Box::new(SystemClipboard::new()), options);
    info!(api_url = %settings.api_url, "widget started");

    if settings.fetch_on_start {
        controller.handle_command(AppCommand::NewQuote);
    }

    // Enter TUI
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut controller);

    // Restore terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    info!("widget stopped");

    result
}

fn event_loop<B: Backend, S: KvSlot>(
    terminal: &mut Terminal<B>,
    controller: &mut QuoteController<S>,
) -> CliResult<()> {
    let tick_rate = Duration::from_millis(50);
    let mut view = View { selected: 0 };

    loop {
        let now = Instant::now();
        controller.tick(now);

        let snap = controller.snapshot();
        view.selected = view.selected.min(snap.favourites.len().saturating_sub(1));
        terminal.draw(|f| ui::draw_ui(f, snap, view.selected, now))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let cmd = if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
        {
            Some(AppCommand::Shutdown)
        } else {
            map_key(&mut view, controller.snapshot(), key.code)
        };

        if let Some(cmd) = cmd {
            if controller.handle_command(cmd) {
                return Ok(());
            }
        }
    }
}
