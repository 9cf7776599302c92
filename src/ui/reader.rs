// Reader pane: document view, progress line, command deck and help overlay
pub mod view;
