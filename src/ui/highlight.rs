use crate::reading::HighlightRenderer;

/// Terminal side of the highlight capability.
///
/// Holds what the engine asked for; the frame renderer turns it into styled
/// spans and a scroll offset.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HighlightState {
    highlighted: Option<(usize, String)>,
    scroll_target: Option<usize>,
    scroll_offset: u16,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<(usize, &str)> {
        self.highlighted
            .as_ref()
            .map(|(index, color)| (*index, color.as_str()))
    }

    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Records the offset actually drawn, so manual scrolling continues
    /// from where the view is.
    pub fn remember_offset(&mut self, offset: u16) {
        self.scroll_offset = offset;
    }

    /// Manual scroll; detaches the view from the highlighted unit.
    pub fn scroll_by(&mut self, delta: i16) {
        self.scroll_target = None;
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }
}

impl HighlightRenderer for HighlightState {
    fn highlight(&mut self, index: usize, color: &str) {
        self.highlighted = Some((index, color.to_string()));
    }

    fn clear_all(&mut self) {
        self.highlighted = None;
        self.scroll_target = None;
    }

    fn scroll_into_view(&mut self, index: usize) {
        self.scroll_target = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_replaces_previous() {
        let mut state = HighlightState::new();
        state.highlight(1, "red");
        state.highlight(4, "blue");
        assert_eq!(state.highlighted(), Some((4, "blue")));
    }

    #[test]
    fn test_clear_all() {
        let mut state = HighlightState::new();
        state.highlight(1, "red");
        state.scroll_into_view(1);
        state.clear_all();
        assert_eq!(state.highlighted(), None);
        assert_eq!(state.scroll_target(), None);
    }

    #[test]
    fn test_manual_scroll_detaches() {
        let mut state = HighlightState::new();
        state.scroll_into_view(3);
        state.remember_offset(5);
        state.scroll_by(-2);
        assert_eq!(state.scroll_target(), None);
        assert_eq!(state.scroll_offset(), 3);
        state.scroll_by(-10);
        assert_eq!(state.scroll_offset(), 0);
    }
}
