//! Per-gesture pointer state.

use kurbo::Point;

/// Whether a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// Collecting points between pointer-down and pointer-up.
    Active,
}

/// Points collected since the last pointer-down.
///
/// At most one gesture is open at a time: a pointer-down while active is
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct PointerSession {
    state: GestureState,
    points: Vec<Point>,
}

impl PointerSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a gesture at `point`. Returns `false` if one is already open.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.state == GestureState::Active {
            return false;
        }
        self.state = GestureState::Active;
        self.points.clear();
        self.points.push(point);
        true
    }

    /// Record a point of the open gesture. Returns `false` when idle.
    pub fn extend(&mut self, point: Point) -> bool {
        if self.state != GestureState::Active {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Close the gesture at `point`, returning the completed stroke.
    pub fn end(&mut self, point: Point) -> Option<Vec<Point>> {
        if self.state != GestureState::Active {
            return None;
        }
        self.points.push(point);
        self.state = GestureState::Idle;
        Some(std::mem::take(&mut self.points))
    }

    /// Drop the open gesture. Returns `false` when idle.
    pub fn abort(&mut self) -> bool {
        if self.state != GestureState::Active {
            return false;
        }
        self.state = GestureState::Idle;
        self.points.clear();
        true
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a gesture is open.
    pub fn is_active(&self) -> bool {
        self.state == GestureState::Active
    }

    /// Points of the open gesture.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Last recorded point of the open gesture.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }
}
