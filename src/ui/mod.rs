pub mod command;
pub mod highlight;
pub mod keymap;
pub mod reader;
pub mod terminal;
pub mod terminal_guard;
pub mod theme;

pub use command::{command_to_app_event, parse_command, Command};
pub use highlight::HighlightState;
pub use keymap::map_key;
pub use terminal::TuiManager;
pub use terminal_guard::TerminalGuard;
