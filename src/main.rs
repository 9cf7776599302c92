use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use pacer::app::{App, AppEvent};
use pacer::config::AppConfig;
use pacer::input::clipboard::SystemClipboard;
use pacer::reading::SegmentMode;
use pacer::storage::{FileStore, TextStore};
use pacer::ui::TuiManager;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// CLI wrapper for SegmentMode to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    Word,
    Sentence,
}

impl From<CliMode> for SegmentMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Word => SegmentMode::Word,
            CliMode::Sentence => SegmentMode::Sentence,
        }
    }
}

/// CLI wrapper for the log level to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pacer")]
#[command(version)]
#[command(about = "Terminal speed-reading aid that highlights text word by word or sentence by sentence")]
#[command(long_about = "Pacer shows a text and walks a highlight through it, one word or one \
sentence at a time, at a configurable pace.

Inside the reader press ':' for the command deck (:h lists commands).

EXAMPLES:
    pacer notes.md                       # Import a Markdown file and open it
    pacer --mode sentence --delay 1500   # Sentence mode, slower pace
    pacer --log-level debug              # Log engine transitions")]
struct Cli {
    /// File to import at start-up (.txt, .md, .html)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Segmentation mode; also resets the delays to that mode's presets
    #[arg(short, long, value_enum)]
    mode: Option<CliMode>,

    /// Base delay between units in milliseconds
    #[arg(short, long, value_name = "MS")]
    delay: Option<u64>,

    /// Extra delay per word of a sentence in milliseconds
    #[arg(short, long, value_name = "MS")]
    per_word: Option<u64>,

    /// Highlight color, a name or #rrggbb
    #[arg(long)]
    color: Option<String>,

    /// Disable the single-key reader shortcuts
    #[arg(long)]
    no_shortcuts: bool,

    /// Configuration file (default: <config dir>/pacer/config.json)
    #[arg(short, long, env = "PACER_CONFIG")]
    config: Option<PathBuf>,

    /// Log file (default: pacer.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level; RUST_LOG is used when absent
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), cli.log_level);

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;
    info!(
        "starting in {} mode, base {}ms, per word {}ms",
        config.playback.mode, config.playback.base_delay_ms, config.playback.per_word_delay_ms
    );

    let store = open_store();
    let mut app = App::new(config, store, Box::new(SystemClipboard));

    if let Some(file) = &cli.file {
        app.handle_event(AppEvent::LoadFile(file.display().to_string()));
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(mode) = cli.mode {
        config.playback.set_mode(mode.into());
    }
    if let Some(delay) = cli.delay {
        config.playback.set_base_delay(delay)?;
    }
    if let Some(per_word) = cli.per_word {
        config.playback.per_word_delay_ms = per_word;
    }
    if let Some(color) = &cli.color {
        config.playback.highlight_color = color.clone();
    }
    if cli.no_shortcuts {
        config.keyboard_shortcuts = false;
    }
    config.playback.validate()?;
    Ok(())
}

/// Saved text lives in the data directory; without one it only lasts the session.
fn open_store() -> TextStore {
    match FileStore::default_dir() {
        Ok(dir) => TextStore::new(Box::new(FileStore::new(dir))),
        Err(err) => {
            warn!("{}; saved text will not survive this session", err);
            TextStore::in_memory()
        }
    }
}

/// Logs go to a file so they never draw over the alternate screen.
fn init_logging(log_file: Option<&Path>, level: Option<CliLogLevel>) {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => match FileStore::default_dir() {
            Ok(dir) => dir.join("pacer.log"),
            Err(_) => return,
        },
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Cannot open log file {}: {}", path.display(), err);
            return;
        }
    };

    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(level.into());
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")),
    };
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
}
