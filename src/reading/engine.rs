//! Timer-driven playback over the flattened unit sequence.
//!
//! The engine never sleeps. A pending tick is a deadline held in
//! `Option<TickHandle>`; the host loop waits until `next_deadline()` and then
//! calls `tick(now, ..)`. Arming a tick always takes the previous handle out
//! first, so at most one tick is ever in flight.

use crate::config::PlaybackConfig;
use crate::reading::navigation::{next_index, previous_index};
use crate::reading::renderer::HighlightRenderer;
use crate::reading::segment::segment_document;
use crate::reading::timing::unit_delay;
use crate::reading::unit::{SegmentMode, Unit};
use log::debug;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Owned handle for the single scheduled tick. Not `Clone`: cancelling
/// consumes it, so a stale handle cannot be cancelled twice.
#[derive(Debug, PartialEq, Eq)]
pub struct TickHandle {
    due: Instant,
}

impl TickHandle {
    pub fn due(&self) -> Instant {
        self.due
    }

    fn cancel(self) {
        debug!("cancelled tick due at {:?}", self.due);
    }
}

pub struct PlaybackEngine {
    units: Vec<Unit>,
    mode: SegmentMode,
    cursor: usize,
    state: PlaybackState,
    config: PlaybackConfig,
    pending: Option<TickHandle>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            mode: SegmentMode::default(),
            cursor: 0,
            state: PlaybackState::Idle,
            config: PlaybackConfig::default(),
            pending: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_units(&self) -> usize {
        self.units.len()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Mode the current units were segmented with.
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Configuration snapshot taken at the last start or resume.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn has_pending_tick(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(TickHandle::due)
    }

    /// Whole percent of units already shown.
    pub fn progress_percent(&self) -> u16 {
        if self.units.is_empty() {
            return 0;
        }
        ((self.cursor * 100) / self.units.len()) as u16
    }

    /// Segments `paragraphs` and starts from the first unit.
    ///
    /// Any running loop is fully stopped first, so two loops never race on
    /// the cursor. The first unit is shown immediately.
    pub fn start<S: AsRef<str>>(
        &mut self,
        paragraphs: &[S],
        config: &PlaybackConfig,
        renderer: &mut dyn HighlightRenderer,
        now: Instant,
    ) {
        self.stop(renderer);

        self.mode = config.mode;
        self.config = config.clone();
        self.units = segment_document(self.mode, paragraphs);
        self.state = PlaybackState::Running;
        debug!(
            "start: {} {} units, base {}ms, per word {}ms",
            self.units.len(),
            self.mode,
            self.config.base_delay_ms,
            self.config.per_word_delay_ms
        );

        self.step(renderer, now);
    }

    /// Toggles between Running and Paused; a no-op in any other state.
    ///
    /// Pausing cancels the pending tick and keeps the cursor. Resuming takes
    /// a fresh copy of delays and color from `config` (the unit mode stays)
    /// and schedules a tick due immediately.
    pub fn toggle_pause(&mut self, config: &PlaybackConfig, now: Instant) {
        match self.state {
            PlaybackState::Running => {
                self.cancel_pending();
                self.state = PlaybackState::Paused;
                debug!("paused at {}/{}", self.cursor, self.units.len());
            }
            PlaybackState::Paused => {
                self.config = PlaybackConfig {
                    mode: self.mode,
                    ..config.clone()
                };
                self.state = PlaybackState::Running;
                self.arm(now, Duration::ZERO);
                debug!("resumed at {}/{}", self.cursor, self.units.len());
            }
            PlaybackState::Idle | PlaybackState::Finished => {}
        }
    }

    /// Cancels the pending tick, clears highlights and rewinds. Always safe.
    pub fn stop(&mut self, renderer: &mut dyn HighlightRenderer) {
        self.cancel_pending();
        renderer.clear_all();
        self.cursor = 0;
        if self.state != PlaybackState::Idle {
            debug!("stopped from {:?}", self.state);
        }
        self.state = PlaybackState::Idle;
    }

    /// Stops and forgets the units, for when the document is replaced.
    pub fn reset(&mut self, renderer: &mut dyn HighlightRenderer) {
        self.stop(renderer);
        self.units.clear();
    }

    /// Runs one step if the pending tick is due. Returns whether it ran.
    pub fn tick(&mut self, now: Instant, renderer: &mut dyn HighlightRenderer) -> bool {
        match self.pending.take() {
            Some(handle) if handle.due <= now => {
                self.step(renderer, now);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Moves to the previous unit and shows it. Ignored at the first unit.
    pub fn previous(&mut self, renderer: &mut dyn HighlightRenderer) {
        if self.cursor == 0 || self.units.is_empty() {
            return;
        }
        self.cursor = previous_index(&self.units, self.cursor, self.mode);
        self.show(self.cursor, renderer);
    }

    /// Moves to the next unit and shows it. Ignored at the last unit.
    pub fn next(&mut self, renderer: &mut dyn HighlightRenderer) {
        if self.units.is_empty() || self.cursor >= self.units.len() - 1 {
            return;
        }
        self.cursor = next_index(&self.units, self.cursor, self.mode);
        self.show(self.cursor, renderer);
    }

    fn step(&mut self, renderer: &mut dyn HighlightRenderer, now: Instant) {
        if self.state == PlaybackState::Paused {
            self.cancel_pending();
            return;
        }
        if self.cursor >= self.units.len() {
            self.cancel_pending();
            self.state = PlaybackState::Finished;
            debug!("finished after {} units", self.units.len());
            return;
        }

        let index = self.cursor;
        self.show(index, renderer);
        self.cursor += 1;

        let delay = unit_delay(
            &self.units[index],
            self.config.base_delay_ms,
            self.config.per_word_delay_ms,
        );
        self.arm(now, delay);
    }

    fn show(&self, index: usize, renderer: &mut dyn HighlightRenderer) {
        renderer.highlight(index, &self.config.highlight_color);
        renderer.scroll_into_view(index);
    }

    fn arm(&mut self, now: Instant, delay: Duration) {
        self.cancel_pending();
        self.pending = Some(TickHandle { due: now + delay });
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}
