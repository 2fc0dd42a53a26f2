//! A single undoable unit of drawing work.

use crate::error::OperationResult;
use crate::operation::{DrawingBuffer, Operation};
use serde::{Deserialize, Serialize};

/// An ordered list of operations, replayable from a clean buffer.
///
/// Operations are appended only while the activity is open; once it is
/// committed to an [`ActivityLog`](crate::ActivityLog) nothing mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    operations: Vec<Operation>,
}

impl Activity {
    /// Create an empty activity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` for its immediate effect and record it for future replays.
    ///
    /// An invalid operation is neither run nor recorded.
    pub fn register_and_run(
        &mut self,
        op: Operation,
        buffer: &mut DrawingBuffer,
    ) -> OperationResult<()> {
        op.validate()?;
        op.apply(buffer);
        self.operations.push(op);
        Ok(())
    }

    /// Apply every recorded operation in registration order.
    pub fn replay(&self, buffer: &mut DrawingBuffer) {
        for op in &self.operations {
            op.apply(buffer);
        }
    }

    /// Recorded operations in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
