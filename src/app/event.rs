use crate::document::ExportFormat;
use crate::reading::SegmentMode;

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    LoadClipboard,
    Quit,
    Help,
    Warning(String),
    InvalidCommand(String),

    Start,
    TogglePause,
    Stop,
    Previous,
    Next,
    Scroll(i16),

    SetMode(SegmentMode),
    SetBaseDelay(u64),
    SetPerWordDelay(u64),
    SetColor(String),
    SetShortcuts(bool),
    SetIncludeStyle(bool),

    Export(ExportFormat),
    CopyPlain,
    CopyMarkdown,
    AddParagraph(String),
    ClearStorage,

    OpenCommand,
    CloseOverlay,
    InputChar(char),
    InputBackspace,
    SubmitCommand,
    None,
}
