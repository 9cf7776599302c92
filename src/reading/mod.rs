pub mod engine;
pub mod navigation;
pub mod renderer;
pub mod segment;
pub mod timing;
pub mod unit;

pub use engine::{PlaybackEngine, PlaybackState};
pub use renderer::HighlightRenderer;
pub use segment::{segment, segment_document};
pub use timing::unit_delay;
pub use unit::{SegmentMode, Unit, UnitKind};
