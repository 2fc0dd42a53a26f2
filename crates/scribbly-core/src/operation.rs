//! Replayable drawing operations and the buffer they mutate.

use crate::error::{OperationError, OperationResult};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

/// A single replayable mutation of the drawing buffer.
///
/// Operations carry all of their inputs by value so applying the same
/// sequence to a clean buffer always yields the same result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Ink a segment from the last pending point and record the point.
    AppendPoint(Point),
    /// Drop the pending stroke points. Inked segments stay.
    ClearBuffer,
}

impl Operation {
    /// Check that the operation can be applied.
    pub fn validate(&self) -> OperationResult<()> {
        match self {
            Operation::AppendPoint(point) if !point.is_finite() => {
                Err(OperationError::InvalidOperation(format!(
                    "non-finite point ({}, {})",
                    point.x, point.y
                )))
            }
            _ => Ok(()),
        }
    }

    /// Apply the operation to a buffer.
    pub fn apply(&self, buffer: &mut DrawingBuffer) {
        match *self {
            Operation::AppendPoint(point) => buffer.append_point(point),
            Operation::ClearBuffer => buffer.clear_pending(),
        }
    }
}

/// The observable drawing state rebuilt by replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingBuffer {
    /// Segments inked onto the surface, in drawing order.
    segments: Vec<Line>,
    /// Points of the stroke currently being collected.
    pending: Vec<Point>,
}

impl DrawingBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the clean state replay starts from.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.pending.clear();
    }

    fn append_point(&mut self, point: Point) {
        // A lone point inks a dot
        let from = self.pending.last().copied().unwrap_or(point);
        self.segments.push(Line::new(from, point));
        self.pending.push(point);
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Inked segments.
    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    /// Points of the stroke still being collected.
    pub fn pending(&self) -> &[Point] {
        &self.pending
    }

    /// Whether nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.pending.is_empty()
    }
}
