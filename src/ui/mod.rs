//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, workflow entry points
//! - **[`dialogs`]**: blocking modal prompts implementing the coordinator's
//!   dialog boundary
//! - **[`panes`]**: stateless render functions for each panel, the tab bar,
//!   and the status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with [`App::new`]
//! and call [`App::run`] to start the event loop.
//!
//! [`App::new`]: app::App::new
//! [`App::run`]: app::App::run

pub mod app;
pub mod dialogs;
pub mod panes;
pub mod theme;

pub use app::App;
