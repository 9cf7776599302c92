pub mod app;
pub mod event;
pub mod mode;
pub mod render_state;

pub use app::{App, Notice, NoticeLevel};
pub use event::AppEvent;
pub use render_state::RenderState;
