use anyhow::{anyhow, Context, Result};
use jotpad::clipboard::Clipboard;
use jotpad::config::Config;
use jotpad::App;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: jotpad [--config FILE] [--log FILE] [FILE]";

/// Command line arguments
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config needs a file\n{}", USAGE))?;
                parsed.config = Some(value.into());
            }
            "--log" => {
                let value = args.next().ok_or_else(|| anyhow!("--log needs a file\n{}", USAGE))?;
                parsed.log = Some(value.into());
            }
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            _ if arg.starts_with("--") => return Err(anyhow!("Unknown option {}\n{}", arg, USAGE)),
            _ if parsed.file.is_none() => parsed.file = Some(arg.into()),
            _ => return Err(anyhow!("Only one file can be opened\n{}", USAGE)),
        }
    }
    Ok(parsed)
}

/// Log to a file; the terminal belongs to the editor
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    // RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(log_file) = args.log.as_ref().or(config.log.file.as_ref()) {
        init_logging(log_file, &config.log.level)?;
    }
    tracing::info!(file = ?args.file, "Starting jotpad");

    // The document is loaded before the terminal switches to raw mode
    let clipboard = Clipboard::system();
    let mut app = match &args.file {
        Some(path) => App::with_file(&config, clipboard, path)?,
        None => App::new(&config, clipboard),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        ratatui::crossterm::cursor::Show
    )?;

    // Handle any final errors
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Editor failed: {:#}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}
