//! Headless application shell: input dispatch and the fixed-rate render loop.

use kurbo::{Point, Vec2};
use scribbly_core::{
    Config, ConfigError, Document, DrawingBuffer, FrameClock, OperationError, Renderer,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

use crate::shortcuts::{Action, ShortcutRegistry};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Script error: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Result type for the application shell.
pub type AppResult<T> = Result<T, AppError>;

/// One input event fed to the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Pan { dx: f64, dy: f64 },
    Zoom { x: f64, y: f64, factor: f64 },
}

/// Renderer that reports each redraw to the log.
#[derive(Debug, Default)]
pub struct LogRenderer {
    /// Number of redraws performed.
    pub frames: usize,
}

impl Renderer for LogRenderer {
    fn clear(&mut self) {
        log::trace!("Clearing surface");
    }

    fn redraw(&mut self, buffer: &DrawingBuffer) {
        self.frames += 1;
        log::debug!(
            "Frame {}: {} segments, {} pending points",
            self.frames,
            buffer.segments().len(),
            buffer.pending().len()
        );
    }
}

/// Document plus the render loop driving it.
pub struct App {
    document: Document,
    clock: FrameClock,
    renderer: LogRenderer,
}

impl App {
    /// Create an app from `config`, rejecting invalid settings.
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            document: Document::with_config(config)?,
            clock: FrameClock::from_fps(config.fps),
            renderer: LogRenderer::default(),
        })
    }

    /// Load a config file, falling back to defaults when no path is given.
    pub fn load_config(path: Option<&Path>) -> AppResult<Config> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let config = Config::from_json(&json)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Load an input script from a JSON array of [`Input`] events.
    pub fn load_script(path: &Path) -> AppResult<Vec<Input>> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Built-in script: two strokes, an undo, a redo, and a cancelled stroke.
    pub fn demo_script() -> Vec<Input> {
        let mut script = Vec::new();
        script.push(Input::PointerDown { x: 10.0, y: 10.0 });
        for i in 1..8 {
            let x = 10.0 + f64::from(i) * 12.0;
            let y = if i % 2 == 0 { 10.0 } else { 30.0 };
            script.push(Input::PointerMove { x, y });
        }
        script.push(Input::PointerUp { x: 110.0, y: 10.0 });
        script.push(Input::Pan { dx: -50.0, dy: 0.0 });
        script.push(Input::PointerDown { x: 20.0, y: 80.0 });
        script.push(Input::PointerMove { x: 60.0, y: 120.0 });
        script.push(Input::PointerUp { x: 100.0, y: 80.0 });
        script.push(Input::Key {
            key: "Z".to_string(),
            ctrl: true,
            shift: false,
        });
        script.push(Input::Key {
            key: "Y".to_string(),
            ctrl: true,
            shift: false,
        });
        script.push(Input::PointerDown { x: 0.0, y: 0.0 });
        script.push(Input::PointerMove { x: 5.0, y: 5.0 });
        script.push(Input::Key {
            key: "Escape".to_string(),
            ctrl: false,
            shift: false,
        });
        script
    }

    /// Apply one input to the document.
    pub fn handle(&mut self, input: &Input) -> AppResult<()> {
        match *input {
            Input::PointerDown { x, y } => {
                self.document.pointer_down(Point::new(x, y))?;
            }
            Input::PointerMove { x, y } => {
                self.document.pointer_move(Point::new(x, y))?;
            }
            Input::PointerUp { x, y } => {
                self.document.pointer_up(Point::new(x, y))?;
            }
            Input::Key {
                ref key,
                ctrl,
                shift,
            } => match ShortcutRegistry::lookup(key, ctrl, shift) {
                Some(action) => self.perform(action),
                None => log::debug!("Unbound key {key}"),
            },
            Input::Pan { dx, dy } => {
                if !self.document.pan(Vec2::new(dx, dy)) {
                    log::warn!("Ignored pan by ({dx}, {dy})");
                }
            }
            Input::Zoom { x, y, factor } => {
                if !self.document.zoom_at(Point::new(x, y), factor) {
                    log::debug!("Zoom by {factor} at ({x}, {y}) left the view unchanged");
                }
            }
        }
        Ok(())
    }

    /// Run a shortcut action.
    pub fn perform(&mut self, action: Action) {
        let doc = &mut self.document;
        match action {
            Action::Undo => {
                if !doc.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            Action::Redo => {
                if !doc.redo() {
                    log::debug!("Nothing to redo");
                }
            }
            Action::Cancel => {
                doc.abort_gesture();
            }
            Action::ResetView => doc.reset_view(),
        }
    }

    /// Redraw if a tick is due at `now` and the view is dirty.
    pub fn frame(&mut self, now: Instant) -> bool {
        self.clock.poll(now) && self.document.render_tick(&mut self.renderer)
    }

    /// Feed every input, ticking the render loop in real time between them.
    pub fn run(&mut self, script: &[Input]) -> AppResult<()> {
        for input in script {
            self.handle(input)?;
            let now = Instant::now();
            std::thread::sleep(self.clock.until_next(now));
            self.frame(Instant::now());
        }
        // Flush the final state
        std::thread::sleep(self.clock.interval());
        self.frame(Instant::now());

        let history = self.document.history();
        log::info!(
            "Session done: {} activities, cursor at {}, {} frames drawn",
            history.len(),
            history.index(),
            self.renderer.frames
        );
        Ok(())
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> usize {
        self.renderer.frames
    }
}
