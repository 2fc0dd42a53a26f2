//! Scribbly Application
//!
//! Application shell driving a document: input dispatch, keyboard
//! shortcuts, and the fixed-rate render loop.

mod app;
mod shortcuts;

pub use app::{App, AppError, AppResult, Input, LogRenderer};
pub use shortcuts::{Action, Shortcut, ShortcutRegistry};
