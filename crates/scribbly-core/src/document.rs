//! A drawing document: owns the camera, history, gesture, and view state.

use crate::camera::Camera;
use crate::config::Config;
use crate::error::{ConfigResult, OperationResult};
use crate::history::ActivityLog;
use crate::invalidate::{Renderer, ViewInvalidator};
use crate::operation::{DrawingBuffer, Operation};
use crate::panel::PanelRegistry;
use crate::session::PointerSession;
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// One drawing with its undo history.
///
/// Pointer handlers feed raw coordinates in; the document transforms them,
/// records the gesture as an activity, and marks the view dirty so the next
/// render tick redraws.
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    camera: Camera,
    log: ActivityLog,
    session: PointerSession,
    buffer: DrawingBuffer,
    invalidator: ViewInvalidator,
    panels: PanelRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::build(&Config::default())
    }

    /// Create an empty document from `config`, rejecting invalid settings.
    pub fn with_config(config: &Config) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &Config) -> Self {
        let mut camera = Camera::with_limits(config.min_zoom, config.max_zoom);
        camera.canvas_offset = config.canvas_offset;
        Self {
            id: Uuid::new_v4().to_string(),
            camera,
            log: ActivityLog::with_capacity(config.max_activities),
            session: PointerSession::new(),
            buffer: DrawingBuffer::new(),
            invalidator: ViewInvalidator::new(),
            panels: PanelRegistry::new(),
        }
    }

    /// Map a raw pointer position into drawing space.
    pub fn transform(&self, raw: Point) -> Point {
        self.camera.transform(raw)
    }

    /// Open a stroke. Returns `Ok(false)` if a stroke is already open.
    pub fn pointer_down(&mut self, raw: Point) -> OperationResult<bool> {
        let point = self.transform(raw);
        let op = Operation::AppendPoint(point);
        op.validate()?;

        if !self.session.begin(point) {
            return Ok(false);
        }
        self.log.start(op, &mut self.buffer)?;
        self.invalidator.mark_dirty();
        Ok(true)
    }

    /// Add a point to the open stroke. Returns `Ok(false)` when idle.
    pub fn pointer_move(&mut self, raw: Point) -> OperationResult<bool> {
        if !self.session.is_active() {
            return Ok(false);
        }
        let point = self.transform(raw);
        let op = Operation::AppendPoint(point);
        op.validate()?;

        self.session.extend(point);
        self.log.extend(op, &mut self.buffer)?;
        self.invalidator.mark_dirty();
        Ok(true)
    }

    /// Close the open stroke at `raw` and commit it. Returns `Ok(false)` when idle.
    pub fn pointer_up(&mut self, raw: Point) -> OperationResult<bool> {
        if !self.session.is_active() {
            return Ok(false);
        }
        let point = self.transform(raw);
        let op = Operation::AppendPoint(point);
        op.validate()?;

        let stroke_len = self.session.end(point).map_or(0, |points| points.len());
        self.log.extend(op, &mut self.buffer)?;
        self.log.finish(Some(Operation::ClearBuffer), &mut self.buffer)?;
        self.invalidator.mark_dirty();
        log::info!(
            "Committed stroke with {} points ({} in history)",
            stroke_len,
            self.log.len()
        );
        Ok(true)
    }

    /// Drop the open stroke without recording it. Returns `false` when idle.
    pub fn abort_gesture(&mut self) -> bool {
        if !self.session.abort() {
            return false;
        }
        self.log.abort(&mut self.buffer);
        self.invalidator.mark_dirty();
        true
    }

    /// Undo the last stroke. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        self.commit_open_gesture();
        let undone = self.log.undo(&mut self.buffer);
        if undone {
            self.invalidator.mark_dirty();
        }
        undone
    }

    /// Redo the last undone stroke. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        self.commit_open_gesture();
        let redone = self.log.redo(&mut self.buffer);
        if redone {
            self.invalidator.mark_dirty();
        }
        redone
    }

    /// Whether [`Document::undo`] would step back.
    ///
    /// An open stroke counts, since undo commits it first.
    pub fn can_undo(&self) -> bool {
        self.log.can_undo() || self.log.is_building()
    }

    /// Whether [`Document::redo`] would step forward.
    ///
    /// Opening a stroke already discarded the redo tail.
    pub fn can_redo(&self) -> bool {
        !self.log.is_building() && self.log.can_redo()
    }

    /// Commit an open stroke as drawn so far.
    fn commit_open_gesture(&mut self) {
        if !self.session.abort() {
            return;
        }
        log::debug!("Committing open stroke before moving the history cursor");
        if let Err(e) = self.log.finish(Some(Operation::ClearBuffer), &mut self.buffer) {
            log::warn!("Dropped open stroke: {e}");
            self.log.abort(&mut self.buffer);
        }
    }

    /// Pan the view by a drawing-space delta.
    ///
    /// Returns `false` and leaves the view alone for a non-finite delta.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        let panned = self.camera.pan(delta);
        if panned {
            self.invalidator.mark_dirty();
        }
        panned
    }

    /// Zoom around a raw pointer position.
    ///
    /// Returns `false` when the zoom was rejected or already at its limit.
    pub fn zoom_at(&mut self, raw: Point, factor: f64) -> bool {
        let zoomed = self.camera.zoom_at(raw, factor);
        if zoomed {
            self.invalidator.mark_dirty();
        }
        zoomed
    }

    /// Return the camera to the origin at 100%.
    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.invalidator.mark_dirty();
    }

    /// Redraw through `renderer` if anything changed since the last tick.
    pub fn render_tick(&mut self, renderer: &mut dyn Renderer) -> bool {
        self.invalidator.tick(renderer, &self.buffer)
    }

    /// Current camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Activity history.
    pub fn history(&self) -> &ActivityLog {
        &self.log
    }

    /// Drawing state as of the history cursor plus any open stroke.
    pub fn buffer(&self) -> &DrawingBuffer {
        &self.buffer
    }

    /// Gesture state.
    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    /// Redraw flag.
    pub fn invalidator(&self) -> &ViewInvalidator {
        &self.invalidator
    }

    /// Mutable redraw flag, for changes the document does not see.
    pub fn invalidator_mut(&mut self) -> &mut ViewInvalidator {
        &mut self.invalidator
    }

    /// Floating panels.
    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    /// Mutable floating panels.
    pub fn panels_mut(&mut self) -> &mut PanelRegistry {
        &mut self.panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{MAX_ZOOM, MIN_ZOOM};
    use crate::error::ConfigError;

    fn draw(doc: &mut Document, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        let (last, middle) = rest.split_last().unwrap();
        assert!(doc.pointer_down(Point::new(first.0, first.1)).unwrap());
        for p in middle {
            assert!(doc.pointer_move(Point::new(p.0, p.1)).unwrap());
        }
        assert!(doc.pointer_up(Point::new(last.0, last.1)).unwrap());
    }

    #[test]
    fn test_stroke_records_activity() {
        let mut doc = Document::new();
        draw(&mut doc, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);

        let history = doc.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 1);
        assert_eq!(
            history.activities()[0].operations(),
            &[
                Operation::AppendPoint(Point::new(0.0, 0.0)),
                Operation::AppendPoint(Point::new(5.0, 5.0)),
                Operation::AppendPoint(Point::new(10.0, 0.0)),
                Operation::ClearBuffer,
            ]
        );
        assert!(doc.buffer().pending().is_empty());
        assert_eq!(doc.buffer().segments().len(), 3);
        assert!(!doc.session().is_active());
        assert!(doc.can_undo());
    }

    #[test]
    fn test_points_are_transformed() {
        let mut doc = Document::new();
        assert!(doc.pan(Vec2::new(10.0, 20.0)));
        assert!(doc.zoom_at(Point::ZERO, 2.0));

        assert!(doc.pointer_down(Point::new(100.0, 50.0)).unwrap());
        assert_eq!(doc.session().points(), &[Point::new(60.0, 45.0)]);
    }

    #[test]
    fn test_undo_redo_restores_buffer() {
        let mut doc = Document::new();
        draw(&mut doc, &[(0.0, 0.0), (5.0, 5.0)]);
        draw(&mut doc, &[(20.0, 0.0), (25.0, 5.0)]);
        let before = doc.buffer().clone();

        assert!(doc.undo());
        assert_eq!(doc.buffer().segments().len(), 2);
        assert!(doc.redo());
        assert_eq!(doc.buffer(), &before);
        assert!(!doc.redo());
    }

    #[test]
    fn test_new_stroke_after_undo_drops_redo() {
        let mut doc = Document::new();
        draw(&mut doc, &[(0.0, 0.0), (5.0, 5.0)]);
        assert!(doc.undo());
        assert!(doc.can_redo());

        doc.pointer_down(Point::new(1.0, 1.0)).unwrap();
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_second_pointer_down_ignored() {
        let mut doc = Document::new();
        assert!(doc.pointer_down(Point::new(0.0, 0.0)).unwrap());
        assert!(!doc.pointer_down(Point::new(9.0, 9.0)).unwrap());
        assert_eq!(doc.session().points().len(), 1);
        assert!(doc.history().is_building());
    }

    #[test]
    fn test_idle_pointer_events() {
        let mut doc = Document::new();
        assert!(!doc.pointer_move(Point::new(1.0, 1.0)).unwrap());
        assert!(!doc.pointer_up(Point::new(1.0, 1.0)).unwrap());
        assert!(!doc.abort_gesture());
        assert!(!doc.undo());
        assert!(doc.buffer().is_empty());
    }

    #[test]
    fn test_abort_gesture() {
        let mut doc = Document::new();
        draw(&mut doc, &[(0.0, 0.0), (5.0, 5.0)]);
        let committed = doc.buffer().clone();

        doc.pointer_down(Point::new(50.0, 50.0)).unwrap();
        doc.pointer_move(Point::new(60.0, 60.0)).unwrap();
        assert!(doc.abort_gesture());

        assert_eq!(doc.buffer(), &committed);
        assert_eq!(doc.history().len(), 1);
        assert!(!doc.session().is_active());
    }

    #[test]
    fn test_undo_commits_open_stroke() {
        let mut doc = Document::new();
        doc.pointer_down(Point::new(0.0, 0.0)).unwrap();
        doc.pointer_move(Point::new(3.0, 3.0)).unwrap();
        assert!(doc.can_undo());
        assert!(!doc.can_redo());

        assert!(doc.undo());
        assert!(!doc.session().is_active());
        assert_eq!(doc.history().len(), 1);
        assert!(doc.buffer().is_empty());

        assert!(doc.redo());
        assert_eq!(doc.buffer().segments().len(), 2);
        assert!(doc.buffer().pending().is_empty());
    }

    #[test]
    fn test_invalid_point_rejected() {
        let mut doc = Document::new();
        assert!(doc.pointer_down(Point::new(f64::NAN, 0.0)).is_err());
        assert!(!doc.session().is_active());
        assert!(!doc.history().is_building());

        doc.pointer_down(Point::new(0.0, 0.0)).unwrap();
        assert!(doc.pointer_move(Point::new(f64::INFINITY, 0.0)).is_err());
        assert_eq!(doc.session().points().len(), 1);
        assert!(doc.pointer_up(Point::new(1.0, 1.0)).unwrap());
    }

    #[test]
    fn test_render_tick_coalesces() {
        struct Recorder(usize);
        impl Renderer for Recorder {
            fn clear(&mut self) {}
            fn redraw(&mut self, _buffer: &DrawingBuffer) {
                self.0 += 1;
            }
        }

        let mut doc = Document::new();
        let mut renderer = Recorder(0);
        draw(&mut doc, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(doc.invalidator().is_dirty());

        assert!(doc.render_tick(&mut renderer));
        assert!(!doc.render_tick(&mut renderer));
        assert_eq!(renderer.0, 1);
    }

    #[test]
    fn test_config_applied() {
        let config = Config {
            max_activities: 3,
            min_zoom: 0.5,
            max_zoom: 2.0,
            canvas_offset: Vec2::new(10.0, 10.0),
            ..Config::default()
        };
        let mut doc = Document::with_config(&config).unwrap();
        assert_eq!(doc.history().capacity(), 3);
        assert_eq!(doc.transform(Point::new(10.0, 10.0)), Point::ZERO);

        doc.zoom_at(Point::ZERO, 100.0);
        assert!((doc.camera().zoom() - 2.0).abs() < f64::EPSILON);

        for i in 0..5 {
            let x = i as f64;
            draw(&mut doc, &[(x, 0.0), (x, 1.0)]);
        }
        assert_eq!(doc.history().len(), 2);
    }

    #[test]
    fn test_can_undo_counts_open_stroke() {
        let mut doc = Document::new();
        draw(&mut doc, &[(0.0, 0.0), (5.0, 5.0)]);
        assert!(doc.undo());
        assert!(doc.can_redo());

        doc.pointer_down(Point::new(1.0, 1.0)).unwrap();
        assert!(doc.can_undo());
        assert!(!doc.can_redo());
        assert!(!doc.redo());
        // Redo still commits the open stroke
        assert_eq!(doc.history().len(), 1);
        assert!(doc.undo());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_non_finite_view_changes_ignored() {
        let mut doc = Document::new();
        doc.invalidator_mut().clear();

        assert!(!doc.zoom_at(Point::ZERO, f64::NAN));
        assert!(!doc.zoom_at(Point::new(f64::NAN, 0.0), 2.0));
        assert!(!doc.pan(Vec2::new(f64::INFINITY, 0.0)));
        assert!(!doc.invalidator().is_dirty());

        let zoom = doc.camera().zoom();
        assert!(zoom.is_finite() && zoom >= MIN_ZOOM && zoom <= MAX_ZOOM);
        assert!(doc.pointer_down(Point::new(4.0, 4.0)).unwrap());
        assert_eq!(doc.session().points(), &[Point::new(4.0, 4.0)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            min_zoom: f64::NAN,
            ..Config::default()
        };
        assert!(matches!(
            Document::with_config(&config),
            Err(ConfigError::Invalid { field: "min_zoom", .. })
        ));

        let config = Config {
            max_activities: 0,
            ..Config::default()
        };
        assert!(Document::with_config(&config).is_err());
    }

    #[test]
    fn test_panels_owned_by_document() {
        let mut doc = Document::new();
        doc.panels_mut().create("brushes", "Brushes", None);
        assert!(doc.panels_mut().open("brushes", Point::new(100.0, 100.0)));
        assert!(doc.panels().is_open("brushes"));
    }
}
