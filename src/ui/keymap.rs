use crate::app::mode::AppMode;
use crate::app::AppEvent;
use crate::document::ExportFormat;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translates a key press into an application event.
///
/// `shortcuts` gates the single-key reader shortcuts (Ctrl+C, Ctrl+S, Space,
/// Enter, Esc); opening the deck, quitting, navigation and scrolling always work.
pub fn map_key(key: KeyEvent, mode: AppMode, shortcuts: bool) -> AppEvent {
    if key.kind == KeyEventKind::Release {
        return AppEvent::None;
    }

    match mode {
        AppMode::Command => match key.code {
            KeyCode::Enter => AppEvent::SubmitCommand,
            KeyCode::Esc => AppEvent::CloseOverlay,
            KeyCode::Backspace => AppEvent::InputBackspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                AppEvent::InputChar(c)
            }
            _ => AppEvent::None,
        },
        AppMode::Help => AppEvent::CloseOverlay,
        AppMode::Quit => AppEvent::None,
        AppMode::Reader => map_reader_key(key, shortcuts),
    }
}

fn map_reader_key(key: KeyEvent, shortcuts: bool) -> AppEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char(':') => AppEvent::OpenCommand,
        KeyCode::Char('q') if !ctrl => AppEvent::Quit,
        KeyCode::Left => AppEvent::Previous,
        KeyCode::Right => AppEvent::Next,
        KeyCode::Up => AppEvent::Scroll(-1),
        KeyCode::Down => AppEvent::Scroll(1),
        _ if !shortcuts => AppEvent::None,
        KeyCode::Char('c') if ctrl => AppEvent::CopyPlain,
        KeyCode::Char('s') if ctrl => AppEvent::Export(ExportFormat::Text),
        KeyCode::Char(' ') => AppEvent::TogglePause,
        KeyCode::Enter => AppEvent::Start,
        KeyCode::Esc => AppEvent::Stop,
        _ => AppEvent::None,
    }
}
