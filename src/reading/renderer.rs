//! HighlightRenderer trait for pluggable presentation backends
//!
//! The playback engine only talks to this trait, so it can be driven by the
//! terminal view or by a recording double in tests.

/// Capability the engine uses to mark the unit being read.
pub trait HighlightRenderer {
    /// Mark `index` with `color`, removing any previous mark first.
    ///
    /// `color` is whatever the configuration holds (a name or `#rrggbb`);
    /// backends that cannot interpret it fall back to their own default.
    fn highlight(&mut self, index: usize, color: &str);

    /// Remove every mark.
    fn clear_all(&mut self);

    /// Bring `index` into the visible area.
    fn scroll_into_view(&mut self, index: usize);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::HighlightRenderer;

    #[derive(Debug, Clone, PartialEq)]
    pub enum RenderCall {
        Highlight(usize, String),
        ClearAll,
        Scroll(usize),
    }

    /// Records every call so tests can assert on the exact sequence.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub calls: Vec<RenderCall>,
    }

    impl RecordingRenderer {
        pub fn highlights(&self) -> Vec<usize> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    RenderCall::Highlight(index, _) => Some(*index),
                    _ => None,
                })
                .collect()
        }
    }

    impl HighlightRenderer for RecordingRenderer {
        fn highlight(&mut self, index: usize, color: &str) {
            self.calls.push(RenderCall::Highlight(index, color.to_string()));
        }

        fn clear_all(&mut self) {
            self.calls.push(RenderCall::ClearAll);
        }

        fn scroll_into_view(&mut self, index: usize) {
            self.calls.push(RenderCall::Scroll(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingRenderer, RenderCall};
    use super::*;

    #[test]
    fn test_trait_object_safety() {
        let _renderer: Box<dyn HighlightRenderer> = Box::new(RecordingRenderer::default());
    }

    #[test]
    fn test_recording_renderer_keeps_order() {
        let mut renderer = RecordingRenderer::default();
        renderer.highlight(2, "yellow");
        renderer.scroll_into_view(2);
        renderer.clear_all();
        assert_eq!(
            renderer.calls,
            vec![
                RenderCall::Highlight(2, "yellow".to_string()),
                RenderCall::Scroll(2),
                RenderCall::ClearAll,
            ]
        );
        assert_eq!(renderer.highlights(), vec![2]);
    }
}
