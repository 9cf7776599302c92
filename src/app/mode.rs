/// Which surface receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Document view; keys act as shortcuts
    Reader,
    /// Command deck has focus; keys edit the input line
    Command,
    /// Help overlay; any key closes it
    Help,
    Quit,
}
