pub mod debounce;
pub mod editor;
pub mod engine;
pub mod memory;
pub mod scan;

pub use debounce::{DEFAULT_QUIET, Debouncer};
pub use editor::{EditorSurface, MarkerId, Position, WidgetId};
pub use engine::{BlockRenderer, FoldEngine, FoldOptions};
pub use memory::MemoryEditor;
pub use scan::{BlockRange, scan};
