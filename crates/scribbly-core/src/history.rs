//! Bounded activity history with a replay cursor.
//!
//! Undo and redo never invert operations. They move the cursor and rebuild
//! the drawing buffer from scratch by replaying every applied activity, so
//! their cost grows with the size of the history.

use crate::activity::Activity;
use crate::error::OperationResult;
use crate::operation::{DrawingBuffer, Operation};

/// Maximum number of activities kept in the log.
pub const MAX_ACTIVITIES: usize = 50;

/// Smallest capacity that still leaves one undoable activity after eviction.
const MIN_CAPACITY: usize = 2;

/// Committed activities plus the cursor separating applied from redoable.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    /// Committed activities, oldest first.
    activities: Vec<Activity>,
    /// Number of activities currently applied.
    index: usize,
    /// Activity of the gesture in progress.
    building: Option<Activity>,
    /// Length at which the oldest activity is evicted.
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Create an empty log holding up to [`MAX_ACTIVITIES`].
    pub fn new() -> Self {
        Self::with_capacity(MAX_ACTIVITIES)
    }

    /// Create an empty log with a custom capacity (at least 2).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            activities: Vec::new(),
            index: 0,
            building: None,
            capacity: capacity.max(MIN_CAPACITY),
        }
    }

    /// Open a new activity and run `op` into it.
    ///
    /// An activity that is still open gets committed first, and the redo
    /// tail is discarded. If `op` is invalid nothing changes.
    pub fn start(
        &mut self,
        op: Operation,
        buffer: &mut DrawingBuffer,
    ) -> OperationResult<()> {
        op.validate()?;

        if self.building.is_some() {
            log::debug!("Auto-finishing open activity before start");
            self.commit();
        }

        if self.activities.len() > self.index {
            let dropped = self.activities.len() - self.index;
            log::debug!("Discarding {} redoable activities", dropped);
            self.activities.truncate(self.index);
        }
        self.index = self.activities.len();

        let mut activity = Activity::new();
        activity.register_and_run(op, buffer)?;
        self.building = Some(activity);
        Ok(())
    }

    /// Run `op` into the open activity.
    ///
    /// Returns `Ok(false)` when no activity is open.
    pub fn extend(
        &mut self,
        op: Operation,
        buffer: &mut DrawingBuffer,
    ) -> OperationResult<bool> {
        match self.building.as_mut() {
            Some(activity) => {
                activity.register_and_run(op, buffer)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run a final `op` into the open activity and commit it.
    ///
    /// Returns `Ok(false)` when no activity is open. An invalid `op` leaves
    /// the activity open and uncommitted.
    pub fn finish(
        &mut self,
        op: Option<Operation>,
        buffer: &mut DrawingBuffer,
    ) -> OperationResult<bool> {
        let Some(activity) = self.building.as_mut() else {
            return Ok(false);
        };
        if let Some(op) = op {
            activity.register_and_run(op, buffer)?;
        }
        self.commit();
        Ok(true)
    }

    /// Discard the open activity without committing it.
    ///
    /// The buffer is rebuilt so the discarded operations leave no trace.
    /// Returns `false` when no activity is open.
    pub fn abort(&mut self, buffer: &mut DrawingBuffer) -> bool {
        match self.building.take() {
            Some(activity) => {
                log::debug!("Aborted activity with {} operations", activity.len());
                self.replay_all(buffer);
                true
            }
            None => false,
        }
    }

    /// Step the cursor back one activity and replay.
    ///
    /// An open activity is left open. Returns `false` at the start of
    /// history.
    pub fn undo(&mut self, buffer: &mut DrawingBuffer) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.replay_all(buffer);
        true
    }

    /// Step the cursor forward one activity and replay.
    ///
    /// An open activity is left open. Returns `false` at the end of
    /// history.
    pub fn redo(&mut self, buffer: &mut DrawingBuffer) -> bool {
        if self.index == self.activities.len() {
            return false;
        }
        self.index += 1;
        self.replay_all(buffer);
        true
    }

    /// Whether a committed activity can be undone.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether an undone activity can be redone.
    pub fn can_redo(&self) -> bool {
        self.index < self.activities.len()
    }

    /// Reset `buffer` and replay every applied activity in order.
    ///
    /// Returns the number of operations replayed.
    pub fn replay_all(&self, buffer: &mut DrawingBuffer) -> usize {
        buffer.reset();
        let mut replayed = 0;
        for activity in &self.activities[..self.index] {
            activity.replay(buffer);
            replayed += activity.len();
        }
        log::debug!("Replayed {} activities ({} operations)", self.index, replayed);
        replayed
    }

    /// Move the open activity into the log at the cursor.
    fn commit(&mut self) {
        let Some(activity) = self.building.take() else {
            return;
        };
        self.activities.insert(self.index, activity);
        self.index += 1;

        if self.activities.len() >= self.capacity {
            self.activities.remove(0);
            self.index = self.capacity - 1;
            log::info!("History full, evicted oldest activity");
        }
    }

    /// Number of applied activities.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of committed activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether no activity has been committed.
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Eviction threshold of this log.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether an activity is open.
    pub fn is_building(&self) -> bool {
        self.building.is_some()
    }

    /// Committed activities, oldest first.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }
}
