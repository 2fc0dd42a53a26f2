//! Scribbly Core Library
//!
//! Platform-agnostic drawing state for Scribbly: the camera transform, the
//! per-gesture pointer session, and the replayable activity history that
//! backs undo and redo.

pub mod activity;
pub mod camera;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod invalidate;
pub mod operation;
pub mod panel;
pub mod session;

pub use activity::Activity;
pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use config::Config;
pub use document::Document;
pub use error::{ConfigError, ConfigResult, OperationError, OperationResult};
pub use history::{ActivityLog, MAX_ACTIVITIES};
pub use invalidate::{DEFAULT_FPS, FrameClock, Renderer, ViewInvalidator};
pub use operation::{DrawingBuffer, Operation};
pub use panel::{DEFAULT_PANEL_SIZE, Panel, PanelRegistry};
pub use session::{GestureState, PointerSession};
