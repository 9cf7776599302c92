use crate::app::app::Notice;
use crate::app::mode::AppMode;
use crate::document::Document;
use crate::reading::{PlaybackState, SegmentMode, Unit};
use crate::ui::highlight::HighlightState;

/// Everything a frame needs, borrowed from the application.
pub struct RenderState<'a> {
    pub mode: AppMode,
    pub document: &'a Document,
    /// Empty until playback has segmented the document
    pub units: &'a [Unit],
    pub highlight: &'a HighlightState,
    pub playback: PlaybackState,
    /// Cursor and total unit count
    pub position: (usize, usize),
    pub progress_percent: u16,
    pub segment_mode: SegmentMode,
    pub command_input: &'a str,
    pub notice: Option<&'a Notice>,
}

impl RenderState<'_> {
    pub fn is_segmented(&self) -> bool {
        !self.units.is_empty()
    }

    /// Status line text, e.g. `word 12/140 running`.
    pub fn status(&self) -> String {
        let state = match self.playback {
            PlaybackState::Idle => "idle",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "finished",
        };
        let (cursor, total) = self.position;
        let shown = if total == 0 { 0 } else { (cursor + 1).min(total) };
        format!("{} {}/{} {}", self.segment_mode, shown, total, state)
    }
}
