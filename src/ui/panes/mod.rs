//! Panel rendering modules
//!
//! One small, stateless render function per visible panel, plus the tab bar
//! and the status bar. All coordinator state arrives as arguments; panes
//! never mutate session state.

mod util;

pub mod cache;
pub mod editor;
pub mod io;
pub mod memory;
pub mod processor;
pub mod status;
pub mod tabs;

pub use cache::render_cache_pane;
pub use editor::render_editor_pane;
pub use io::render_io_pane;
pub use memory::render_memory_pane;
pub use processor::render_processor_pane;
pub use status::render_status_bar;
pub use tabs::render_tab_bar;
