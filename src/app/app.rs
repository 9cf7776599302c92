use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::RenderState;
use crate::config::AppConfig;
use crate::document::export::{to_markdown, to_plain_text, write_export};
use crate::document::{Document, ExportFormat};
use crate::error::PacerError;
use crate::input::clipboard::{self, ClipboardProvider};
use crate::input::{self, LoadedDocument};
use crate::reading::timing::milliseconds_to_wpm;
use crate::reading::{PlaybackEngine, PlaybackState};
use crate::storage::TextStore;
use crate::ui::command::{command_to_app_event, parse_command};
use crate::ui::highlight::HighlightState;
use crate::ui::theme::parse_color;
use log::{info, warn};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// The single notification line shown in the command deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct App {
    mode: AppMode,
    config: AppConfig,
    document: Document,
    store: TextStore,
    engine: PlaybackEngine,
    highlight: HighlightState,
    clipboard: Box<dyn ClipboardProvider>,
    notice: Option<Notice>,
    command_input: String,
}

impl App {
    /// Builds the application and restores the saved text, if any.
    pub fn new(config: AppConfig, store: TextStore, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let document = match store.load() {
            Some(paragraphs) => Document::from_paragraphs(&paragraphs),
            None => Document::default(),
        };

        Self {
            mode: AppMode::Reader,
            config,
            document,
            store,
            engine: PlaybackEngine::new(),
            highlight: HighlightState::new(),
            clipboard,
            notice: None,
            command_input: String::new(),
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn highlight_mut(&mut self) -> &mut HighlightState {
        &mut self.highlight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    /// When the host loop must wake up to advance playback.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine.next_deadline()
    }

    /// Advances playback if its pending tick is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.tick(now, &mut self.highlight)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Applies one event; `now` is only read by playback transitions.
    pub fn handle_event_at(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::LoadFile(path) => match input::load_file(&path) {
                Ok(loaded) => self.replace_document(loaded),
                Err(err) => self.report(err.into()),
            },
            AppEvent::LoadClipboard => match clipboard::load(self.clipboard.as_mut()) {
                Ok(loaded) => self.replace_document(loaded),
                Err(err) => self.report(err.into()),
            },
            AppEvent::Quit => {
                self.engine.stop(&mut self.highlight);
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => {
                self.mode = AppMode::Help;
            }
            AppEvent::Warning(message) => {
                self.notice = Some(Notice::error(message));
            }
            AppEvent::InvalidCommand(input) => {
                self.notice = Some(Notice::error(format!("Unknown command: {}", input)));
            }

            AppEvent::Start => self.start(now),
            AppEvent::TogglePause => {
                self.engine.toggle_pause(&self.config.playback, now);
            }
            AppEvent::Stop => self.engine.stop(&mut self.highlight),
            AppEvent::Previous => self.engine.previous(&mut self.highlight),
            AppEvent::Next => self.engine.next(&mut self.highlight),
            AppEvent::Scroll(delta) => {
                if self.engine.state() != PlaybackState::Running {
                    self.highlight.scroll_by(delta);
                }
            }

            AppEvent::SetMode(mode) => {
                self.config.playback.set_mode(mode);
                self.notice = Some(Notice::info(format!(
                    "Mode {}: delay {} ms, per word {} ms",
                    mode, self.config.playback.base_delay_ms, self.config.playback.per_word_delay_ms
                )));
            }
            AppEvent::SetBaseDelay(delay_ms) => {
                match self.config.playback.set_base_delay(delay_ms) {
                    Ok(()) => {
                        self.notice = Some(Notice::info(format!(
                            "Delay {} ms (~{} wpm in word mode)",
                            delay_ms,
                            milliseconds_to_wpm(delay_ms)
                        )));
                    }
                    Err(err) => self.report(err.into()),
                }
            }
            AppEvent::SetPerWordDelay(delay_ms) => {
                self.config.playback.per_word_delay_ms = delay_ms;
                self.notice = Some(Notice::info(format!("Per-word delay {} ms", delay_ms)));
            }
            AppEvent::SetColor(color) => {
                if parse_color(&color).is_some() {
                    self.notice = Some(Notice::info(format!("Highlight color {}", color)));
                    self.config.playback.highlight_color = color;
                } else {
                    self.notice = Some(Notice::error(format!("Unknown color: {}", color)));
                }
            }
            AppEvent::SetShortcuts(enabled) => {
                self.config.keyboard_shortcuts = enabled;
                let state = if enabled { "on" } else { "off" };
                self.notice = Some(Notice::info(format!("Keyboard shortcuts {}", state)));
            }
            AppEvent::SetIncludeStyle(enabled) => {
                self.config.include_style = enabled;
                let state = if enabled { "on" } else { "off" };
                self.notice = Some(Notice::info(format!("HTML export style {}", state)));
            }

            AppEvent::Export(format) => self.export(format),
            AppEvent::CopyPlain => self.copy(to_plain_text(&self.document), "text"),
            AppEvent::CopyMarkdown => self.copy(to_markdown(&self.document), "Markdown"),
            AppEvent::AddParagraph(text) => {
                if text.trim().is_empty() {
                    self.notice = Some(Notice::error("Nothing to add"));
                    return;
                }
                self.engine.reset(&mut self.highlight);
                self.document.push_paragraph(&text);
                self.persist();
            }
            AppEvent::ClearStorage => {
                self.engine.reset(&mut self.highlight);
                self.document = Document::default();
                match self.store.clear() {
                    Ok(()) => self.notice = Some(Notice::info("Saved text cleared")),
                    Err(err) => self.report(err.into()),
                }
            }

            AppEvent::OpenCommand => {
                self.command_input.clear();
                self.mode = AppMode::Command;
            }
            AppEvent::CloseOverlay => {
                self.command_input.clear();
                self.mode = AppMode::Reader;
            }
            AppEvent::InputChar(c) => {
                if self.mode == AppMode::Command {
                    self.command_input.push(c);
                }
            }
            AppEvent::InputBackspace => {
                if self.mode == AppMode::Command {
                    self.command_input.pop();
                }
            }
            AppEvent::SubmitCommand => {
                let input = std::mem::take(&mut self.command_input);
                self.mode = AppMode::Reader;
                let event = command_to_app_event(parse_command(&input));
                self.handle_event_at(event, now);
            }
            AppEvent::None => {}
        }
    }

    pub fn get_render_state(&self) -> RenderState<'_> {
        RenderState {
            mode: self.mode,
            document: &self.document,
            units: self.engine.units(),
            highlight: &self.highlight,
            playback: self.engine.state(),
            position: (self.engine.cursor(), self.engine.total_units()),
            progress_percent: self.engine.progress_percent(),
            segment_mode: self.config.playback.mode,
            command_input: &self.command_input,
            notice: self.notice.as_ref(),
        }
    }

    fn start(&mut self, now: Instant) {
        let paragraphs = self.document.paragraphs();
        self.notice = if paragraphs.is_empty() {
            Some(Notice::error("Nothing to read: import a text first"))
        } else {
            None
        };
        // An empty document still runs through the engine, which finishes at once
        self.engine
            .start(&paragraphs, &self.config.playback, &mut self.highlight, now);
    }

    fn replace_document(&mut self, loaded: LoadedDocument) {
        self.engine.reset(&mut self.highlight);
        self.document = loaded.document;
        info!("document replaced from {}", loaded.source);
        self.notice = Some(Notice::info(format!(
            "Loaded {} paragraphs from {}",
            self.document.paragraphs().len(),
            loaded.source
        )));
        self.persist();
    }

    /// Saves the paragraph list; a failure only costs the saved copy.
    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.document.paragraphs()) {
            self.report(err.into());
        }
    }

    fn export(&mut self, format: ExportFormat) {
        match write_export(
            &self.document,
            format,
            self.config.include_style,
            &self.config.export_dir,
        ) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Exported to {}", path.display())));
            }
            Err(err) => self.report(err.into()),
        }
    }

    fn copy(&mut self, content: String, label: &str) {
        match self.clipboard.set_text(&content) {
            Ok(()) => self.notice = Some(Notice::info(format!("Copied {} to clipboard", label))),
            Err(err) => self.report(err.into()),
        }
    }

    fn report(&mut self, err: PacerError) {
        warn!("{}", err);
        self.notice = Some(Notice::error(err.to_string()));
    }
}
