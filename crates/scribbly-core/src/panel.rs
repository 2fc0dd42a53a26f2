//! Floating tool panels: open/close state, placement, and title-bar dragging.
//!
//! Panels are pure data here. Whatever draws them reads [`Panel::position`]
//! and [`Panel::size`] after each change.

use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Size given to panels created or resized without one.
pub const DEFAULT_PANEL_SIZE: Size = Size::new(300.0, 300.0);

/// Suffix identifying a panel's draggable title bar.
pub const BAR_SUFFIX: &str = "-bar";

/// A floating panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: String,
    /// Title shown in the panel bar.
    pub title: String,
    /// Last located point.
    anchor: Point,
    /// Grab offset applied while dragging.
    drag_offset: Vec2,
    size: Size,
    open: bool,
}

impl Panel {
    fn new(id: String, title: String, size: Size) -> Self {
        Self {
            id,
            title,
            anchor: Point::ZERO,
            drag_offset: Vec2::ZERO,
            size,
            open: false,
        }
    }

    /// Panel identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier of the panel's title bar.
    pub fn bar_id(&self) -> String {
        format!("{}{}", self.id, BAR_SUFFIX)
    }

    /// Top-left corner on screen.
    pub fn position(&self) -> Point {
        self.anchor + self.drag_offset
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether the panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn locate(&mut self, point: Option<Point>, viewport_center: Point) {
        self.anchor = point.unwrap_or(viewport_center);
    }
}

/// Owns every panel and the single in-progress drag.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: HashMap<String, Panel>,
    dragging: Option<String>,
}

impl PanelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closed panel, replacing any panel with the same id.
    pub fn create(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        size: Option<Size>,
    ) -> &mut Panel {
        let id = id.into();
        if self.dragging.as_deref() == Some(id.as_str()) {
            self.dragging = None;
        }
        let panel = Panel::new(id.clone(), title.into(), size.unwrap_or(DEFAULT_PANEL_SIZE));
        match self.panels.entry(id) {
            Entry::Occupied(mut entry) => {
                log::debug!("Replaced panel {}", entry.key());
                entry.insert(panel);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(panel),
        }
    }

    /// Look up a panel.
    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    /// Number of registered panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether no panel is registered.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Show a panel centred in the viewport.
    ///
    /// Opening an already open panel re-centres it.
    pub fn open(&mut self, id: &str, viewport_center: Point) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        panel.open = true;
        panel.locate(None, viewport_center);
        true
    }

    /// Hide a panel.
    pub fn close(&mut self, id: &str) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.open = false;
                true
            }
            None => false,
        }
    }

    /// Open a closed panel or close an open one.
    pub fn toggle(&mut self, id: &str, viewport_center: Point) -> bool {
        match self.panels.get(id).map(Panel::is_open) {
            Some(true) => self.close(id),
            Some(false) => self.open(id, viewport_center),
            None => false,
        }
    }

    /// Whether a panel exists and is shown.
    pub fn is_open(&self, id: &str) -> bool {
        self.panels.get(id).is_some_and(Panel::is_open)
    }

    /// Place a panel at `point`, or at the viewport centre when `None`.
    pub fn locate(&mut self, id: &str, point: Option<Point>, viewport_center: Point) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.locate(point, viewport_center);
                true
            }
            None => false,
        }
    }

    /// Resize a panel, falling back to [`DEFAULT_PANEL_SIZE`].
    pub fn resize(&mut self, id: &str, size: Option<Size>) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.size = size.filter(|s| s.is_finite()).unwrap_or(DEFAULT_PANEL_SIZE);
                true
            }
            None => false,
        }
    }

    /// Re-centre every panel, e.g. after the window was resized.
    pub fn relocate_all(&mut self, viewport_center: Point) {
        for panel in self.panels.values_mut() {
            panel.locate(None, viewport_center);
        }
    }

    /// Start dragging the panel whose title bar is `target_id`.
    ///
    /// Ignored while another drag is in progress or when the target is not
    /// a registered panel's bar.
    pub fn begin_drag(&mut self, target_id: &str, pointer: Point) -> bool {
        if self.dragging.is_some() {
            return false;
        }
        let Some(panel_id) = target_id.strip_suffix(BAR_SUFFIX) else {
            return false;
        };
        let Some(panel) = self.panels.get_mut(panel_id) else {
            return false;
        };

        panel.drag_offset = panel.position() - pointer;
        panel.locate(Some(pointer), Point::ZERO);
        self.dragging = Some(panel_id.to_string());
        log::debug!("Dragging panel {panel_id}");
        true
    }

    /// Follow the pointer with the dragged panel.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        match self.dragged_mut() {
            Some(panel) => {
                panel.locate(Some(pointer), Point::ZERO);
                true
            }
            None => false,
        }
    }

    /// Drop the dragged panel at the pointer.
    pub fn end_drag(&mut self, pointer: Point) -> bool {
        let Some(panel) = self.dragged_mut() else {
            return false;
        };
        // Fold the grab offset into the anchor so the panel stays put
        panel.anchor = pointer + panel.drag_offset;
        panel.drag_offset = Vec2::ZERO;
        self.dragging = None;
        true
    }

    /// Id of the panel being dragged.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    fn dragged_mut(&mut self) -> Option<&mut Panel> {
        let id = self.dragging.as_deref()?;
        self.panels.get_mut(id)
    }
}
