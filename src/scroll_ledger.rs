//! The scroll-delta ledger.
//!
//! Blit scrolling copies region pixels and lets the host report back which
//! areas could not be copied and must be repainted. Those damage reports
//! arrive asynchronously, in coordinates that predate any scrolls issued
//! after the copy. Each region keeps a ledger of outstanding scroll deltas;
//! the running offset is the sum of queued deltas, and popping the head as a
//! damage batch begins leaves exactly the displacement applied by later
//! scrolls, which maps the stale damage coordinates into current space.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Classification of one incoming damage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageKind {
    /// One rectangle of a multi-rectangle batch; more follow.
    Partial,
    /// The final rectangle of a batch.
    BatchComplete,
    /// A scroll produced no damage at all. Carries no rectangle to repaint.
    Terminal,
    /// Damage unrelated to scrolling, already in current coordinates.
    /// Routed around the ledger entirely.
    Full,
}

/// One pending scroll's pixel deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollDelta {
    pub dx: i32,
    pub dy: i32,
}

/// Outstanding scroll deltas for one region.
#[derive(Debug, Clone, Default)]
pub struct ScrollLedger {
    queue: VecDeque<ScrollDelta>,
    offset_x: i32,
    offset_y: i32,
    /// True while consuming the remaining rectangles of a batch whose head
    /// has already been popped.
    settling: bool,
}

impl ScrollLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll at the moment its pixel copy is issued. Exactly one
    /// entry per copy; the host's damage reports consume them in order.
    pub fn record_scroll(&mut self, dx: i32, dy: i32) {
        self.queue.push_back(ScrollDelta { dx, dy });
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Pop the oldest delta out of the running offset. The offset always
    /// equals the sum of still-queued deltas, so once the scroll being
    /// settled is removed, what remains is exactly the displacement applied
    /// by scrolls issued after it. Popping an empty queue is a silent no-op;
    /// hosts may deliver damage for copies issued before the ledger existed.
    fn pop(&mut self) {
        if let Some(delta) = self.queue.pop_front() {
            self.offset_x -= delta.dx;
            self.offset_y -= delta.dy;
        }
    }

    /// Process one damage report. Returns the rectangle to repaint, shifted
    /// into current coordinates, or `None` when nothing needs repainting.
    ///
    /// `Full` reports never belong here; callers route them straight to the
    /// redraw dispatcher.
    pub fn handle(&mut self, kind: DamageKind, rect: Rect) -> Option<Rect> {
        match kind {
            DamageKind::Partial => {
                if !self.settling {
                    self.pop();
                    self.settling = true;
                }
                Some(rect.translated(self.offset_x, self.offset_y))
            }
            DamageKind::BatchComplete => {
                if !self.settling {
                    self.pop();
                }
                self.settling = false;
                Some(rect.translated(self.offset_x, self.offset_y))
            }
            DamageKind::Terminal => {
                self.pop();
                self.settling = false;
                None
            }
            DamageKind::Full => Some(rect),
        }
    }

    /// Drop all pending deltas. Called when a relayout repaints everything
    /// anyway, making in-flight damage reports moot.
    pub fn flush(&mut self) {
        self.queue.clear();
        self.offset_x = 0;
        self.offset_y = 0;
        self.settling = false;
    }
}
