//! Command parsing for the TUI command deck
//!
//! - `@path` imports a `.txt`, `.md` or `.html` file, `@@` the clipboard
//! - `:start`, `:pause`, `:stop`, `:prev`, `:next` drive playback
//! - `:mode`, `:delay`, `:perword`, `:color`, `:style`, `:shortcuts` change settings
//! - `:export`, `:copy`, `:copymd` write the document out
//! - `:add`, `:clear` edit the saved document
//! - `:h`/`:help`, `:q`/`:quit`

use crate::app::AppEvent;
use crate::document::ExportFormat;
use crate::reading::SegmentMode;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadClipboard,
    Start,
    Pause,
    Stop,
    Previous,
    Next,
    Mode(SegmentMode),
    Delay(u64),
    PerWord(u64),
    Color(String),
    Export(ExportFormat),
    Copy,
    CopyMarkdown,
    Style(bool),
    Shortcuts(bool),
    Add(String),
    Clear,
    /// A known command with a bad argument
    Invalid(String),
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd, ""),
        };
        match name {
            "q" | "quit" => Command::Quit,
            "h" | "help" => Command::Help,
            "start" => Command::Start,
            "pause" => Command::Pause,
            "stop" => Command::Stop,
            "prev" => Command::Previous,
            "next" => Command::Next,
            "mode" => arg
                .parse::<SegmentMode>()
                .map(Command::Mode)
                .unwrap_or_else(Command::Invalid),
            "delay" => parse_millis(arg).map_or_else(Command::Invalid, Command::Delay),
            "perword" => parse_millis(arg).map_or_else(Command::Invalid, Command::PerWord),
            "color" if !arg.is_empty() => Command::Color(arg.to_string()),
            "color" => Command::Invalid("usage: :color <name|#rrggbb>".to_string()),
            "export" => arg
                .parse::<ExportFormat>()
                .map(Command::Export)
                .unwrap_or_else(|err| Command::Invalid(err.to_string())),
            "copy" => Command::Copy,
            "copymd" => Command::CopyMarkdown,
            "style" => parse_switch(arg).map_or_else(Command::Invalid, Command::Style),
            "shortcuts" => parse_switch(arg).map_or_else(Command::Invalid, Command::Shortcuts),
            "add" if !arg.is_empty() => Command::Add(arg.to_string()),
            "add" => Command::Invalid("usage: :add <text>".to_string()),
            "clear" => Command::Clear,
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

fn parse_millis(arg: &str) -> Result<u64, String> {
    arg.parse::<u64>()
        .map_err(|_| format!("expected milliseconds, got '{}'", arg))
}

fn parse_switch(arg: &str) -> Result<bool, String> {
    match arg {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("expected on or off, got '{}'", arg)),
    }
}

/// Convert a parsed command into an AppEvent
///
/// This is the translation layer between command deck input and App core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::Start => AppEvent::Start,
        Command::Pause => AppEvent::TogglePause,
        Command::Stop => AppEvent::Stop,
        Command::Previous => AppEvent::Previous,
        Command::Next => AppEvent::Next,
        Command::Mode(mode) => AppEvent::SetMode(mode),
        Command::Delay(ms) => AppEvent::SetBaseDelay(ms),
        Command::PerWord(ms) => AppEvent::SetPerWordDelay(ms),
        Command::Color(color) => AppEvent::SetColor(color),
        Command::Export(format) => AppEvent::Export(format),
        Command::Copy => AppEvent::CopyPlain,
        Command::CopyMarkdown => AppEvent::CopyMarkdown,
        Command::Style(on) => AppEvent::SetIncludeStyle(on),
        Command::Shortcuts(on) => AppEvent::SetShortcuts(on),
        Command::Add(text) => AppEvent::AddParagraph(text),
        Command::Clear => AppEvent::ClearStorage,
        Command::Invalid(reason) => AppEvent::Warning(reason),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
