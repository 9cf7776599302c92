use super::{LoadError, LoadedDocument};
use crate::document::text;
use arboard::Clipboard;

/// Clipboard access, so the application can run against a fake in tests.
pub trait ClipboardProvider {
    fn get_text(&mut self) -> Result<String, LoadError>;
    fn set_text(&mut self, content: &str) -> Result<(), LoadError>;
}

/// The system clipboard through `arboard`. Opened per call, since a
/// long-lived handle can go stale on some platforms.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String, LoadError> {
        let mut clipboard = Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
        clipboard
            .get_text()
            .map_err(|e| LoadError::Clipboard(e.to_string()))
    }

    fn set_text(&mut self, content: &str) -> Result<(), LoadError> {
        let mut clipboard = Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(content.to_string())
            .map_err(|e| LoadError::Clipboard(e.to_string()))
    }
}

/// Imports clipboard text, split into paragraphs like a `.txt` file.
pub fn load(provider: &mut dyn ClipboardProvider) -> Result<LoadedDocument, LoadError> {
    let content = provider.get_text()?;

    let document = text::parse(&content);
    if document.is_empty() {
        return Err(LoadError::Clipboard("clipboard has no text".to_string()));
    }

    Ok(LoadedDocument {
        document,
        source: "clipboard".to_string(),
    })
}
