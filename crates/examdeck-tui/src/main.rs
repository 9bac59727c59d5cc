mod app;
mod help_popup;
mod keybinds;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use examdeck_core::{
    db,
    seed::Seed,
    session::Session,
    store::HierarchyStore,
    theme::{self, MemoryPreferences, PreferenceStore, SqlitePreferences},
};

use app::App;

#[derive(Parser)]
#[command(
    name = "examdeck",
    version,
    about = "Browse exam preparation folders and rearrange them from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive browser (default)
    Run(RunArgs),
    /// Print the built-in folder table as JSON, a template for --seed
    Seed,
    /// Print the view for a fragment as plain text
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args, Clone, Default)]
struct SourceArgs {
    /// Load folders from this JSON file instead of the built-in table
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
    /// Initial address, e.g. "#CDS"
    #[arg(long, value_name = "FRAG", default_value = "")]
    fragment: String,
}

#[derive(Args, Clone, Default)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Preferences database (defaults to the data directory)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,
    /// Log file (defaults to examdeck.log in the data directory)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Run(args)) => run(args),
        None => run(cli.run),
        Some(Command::Seed) => {
            println!("{}", Seed::builtin().to_json_pretty()?);
            Ok(())
        }
        Some(Command::Show { source }) => {
            let session = Session::new(load_store(source.seed.as_deref())?, &source.fragment);
            print!("{}", session.tree());
            Ok(())
        }
    }
}

fn load_store(seed: Option<&Path>) -> Result<HierarchyStore> {
    let seed = match seed {
        Some(path) => Seed::load(path)
            .with_context(|| format!("Failed to load seed from {}", path.display()))?,
        None => Seed::builtin(),
    };
    Ok(HierarchyStore::from_seed(seed))
}

fn open_log_file(path: Option<PathBuf>) -> Result<File> {
    let path = match path {
        Some(path) => path,
        None => db::data_dir()?.join("examdeck.log"),
    };
    File::create(&path).with_context(|| format!("Failed to create log file at {}", path.display()))
}

/// Send logs to a file; stdout belongs to the terminal UI. Without a
/// usable log file, events are discarded and the UI still starts.
fn init_logging(path: Option<PathBuf>) {
    let filter = EnvFilter::try_from_env("EXAMDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    let installed = match open_log_file(path) {
        Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
        Err(err) => {
            let installed = builder.with_writer(io::sink).try_init();
            eprintln!("Logging disabled: {err:#}");
            installed
        }
    };
    if let Err(err) = installed {
        eprintln!("Failed to install logger: {err}");
    }
}

fn open_preferences(path: Option<&Path>) -> Box<dyn PreferenceStore> {
    let conn = match path {
        Some(path) => db::open_db_at(path),
        None => db::open_db(),
    };
    match conn {
        Ok(conn) => Box::new(SqlitePreferences::new(conn)),
        Err(err) => {
            tracing::warn!(%err, "preferences unavailable, theme will not be saved");
            Box::new(MemoryPreferences::default())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    init_logging(args.log_file);

    let store = load_store(args.source.seed.as_deref())?;
    info!(folders = store.len(), "starting");
    let session = Session::new(store, &args.source.fragment);

    let prefs = open_preferences(args.db.as_deref());
    let platform_dark =
        theme::platform_prefers_dark(std::env::var("COLORFGBG").ok().as_deref());
    let theme = theme::load_theme(prefs.as_ref(), platform_dark)?;
    let mut app = App::new(session, prefs, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    info!("exiting");

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            app.handle_event(ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("examdeck.log");
        open_log_file(Some(path.clone())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("examdeck.log");
        let err = open_log_file(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }

    #[test]
    fn test_init_logging_survives_unwritable_path() {
        let dir = TempDir::new().unwrap();
        init_logging(Some(dir.path().join("missing").join("examdeck.log")));
        info!("logged into the void");
    }
}
