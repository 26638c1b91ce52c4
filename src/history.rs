use std::sync::Arc;

use egui::Pos2;

use crate::mark::{Mark, MarkRef};

/// Ordered record of committed marks plus the redo buffer.
///
/// Insertion order is draw order. The store never renders; whoever mutates
/// it is responsible for redrawing afterwards.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    /// Marks currently on the canvas, oldest first
    committed: Vec<MarkRef>,
    /// Undone marks; the last element is the next one to redo
    redo_buffer: Vec<MarkRef>,
    /// The newest committed mark is still being drawn
    open: bool,
}

impl HistoryStore {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a mark. Any undone marks are discarded.
    pub fn push(&mut self, mark: impl Into<Mark>) -> MarkRef {
        let mark = mark.into().into_ref();
        self.committed.push(mark.clone());
        self.redo_buffer.clear();
        self.open = false;
        mark
    }

    /// Commit a mark that keeps growing until [`Self::finish_current`].
    pub fn begin(&mut self, mark: impl Into<Mark>) -> MarkRef {
        let mark = self.push(mark);
        self.open = true;
        mark
    }

    /// The mark under construction, if it is still on the canvas
    pub fn current(&self) -> Option<&MarkRef> {
        if self.open { self.committed.last() } else { None }
    }

    /// Append a point to the open stroke. Returns false once the stroke was
    /// finished, undone or cleared.
    pub fn extend_current(&mut self, point: Pos2) -> bool {
        if !self.open {
            return false;
        }
        let Some(last) = self.committed.last_mut() else {
            return false;
        };
        match Arc::make_mut(last) {
            Mark::Stroke(stroke) => {
                stroke.add_point(point);
                true
            }
            Mark::Glyph(_) => false,
        }
    }

    /// Close the open mark, leaving it committed
    pub fn finish_current(&mut self) -> Option<MarkRef> {
        let current = self.current().cloned();
        self.open = false;
        current
    }

    /// Move the newest mark onto the redo buffer. Undoing an open mark
    /// closes it.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(mark) => {
                self.redo_buffer.push(mark);
                self.open = false;
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone mark
    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(mark) => {
                self.committed.push(mark);
                true
            }
            None => false,
        }
    }

    /// Remove every mark. The redo buffer is dropped as well, so a clear can
    /// never be partially redone into a stale canvas.
    pub fn clear(&mut self) -> bool {
        let changed = !self.committed.is_empty() || !self.redo_buffer.is_empty();
        self.committed.clear();
        self.redo_buffer.clear();
        self.open = false;
        changed
    }

    /// Owned copy of the committed sequence, in draw order
    pub fn snapshot(&self) -> Vec<MarkRef> {
        self.committed.clone()
    }

    pub fn marks(&self) -> &[MarkRef] {
        &self.committed
    }

    /// Undone marks, bottom of the stack first
    pub fn redo_marks(&self) -> &[MarkRef] {
        &self.redo_buffer
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Returns true if there are marks that can be undone
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns true if there are marks that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }
}
