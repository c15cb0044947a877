//! Cached cumulative pixel offsets for one axis.
//!
//! This module computes row/column positions once per structural change,
//! enabling O(1) index→pixel reads and O(log n) pixel→index lookups.
//!
//! The offsets array carries one trailing sentinel entry equal to the total
//! extent, so the size of any index is the difference of two neighboring
//! offsets.

use tracing::{debug, warn};

use crate::config::SizeUnit;

/// Convert one size entry to pixels.
///
/// `FontUnits` sizes scale by the font metric and gain a fixed border on each
/// side; `Pixels` sizes are used as-is.
pub fn size_to_pixels(size: i32, unit: SizeUnit, font_metric: i32, border: i32) -> i32 {
    match unit {
        SizeUnit::Pixels => size,
        SizeUnit::FontUnits => size * font_metric + 2 * border,
    }
}

/// Cumulative pixel offsets of every row or column on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisGeometry {
    /// `offsets[i]` is the virtual pixel position of index i's leading edge;
    /// `offsets[len]` is the total extent. Monotonic non-decreasing.
    offsets: Vec<i32>,
}

impl AxisGeometry {
    /// An empty axis: no indices, zero extent.
    pub fn empty() -> Self {
        Self { offsets: vec![0] }
    }

    /// Build the table with a single forward pass over the size array.
    ///
    /// Negative sizes cannot produce a monotonic table; they are treated as
    /// zero and reported on the warning channel.
    pub fn build(sizes: &[i32], unit: SizeUnit, font_metric: i32, border: i32) -> Self {
        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        let mut pos = 0i32;
        for (i, &size) in sizes.iter().enumerate() {
            offsets.push(pos);
            let px = size_to_pixels(size, unit, font_metric, border);
            if px < 0 {
                warn!(index = i, size, "negative axis size treated as zero");
            } else {
                pos += px;
            }
        }
        offsets.push(pos);
        Self { offsets }
    }

    /// Number of indices on this axis.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total pixel extent of the axis.
    pub fn extent(&self) -> i32 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Virtual pixel position of `index`'s leading edge. O(1).
    ///
    /// Out-of-range indices clamp to the sentinel entry; callers may hold
    /// indices computed from stale state during resize races.
    pub fn position_of(&self, index: usize) -> i32 {
        let clamped = index.min(self.len());
        self.offsets.get(clamped).copied().unwrap_or(0)
    }

    /// Pixel size of `index`, from the difference of neighboring offsets.
    pub fn size_of(&self, index: usize) -> i32 {
        self.position_of(index + 1) - self.position_of(index)
    }

    /// Pixel extent of the half-open index range `[start, end)`.
    pub fn span(&self, start: usize, end: usize) -> i32 {
        self.position_of(end) - self.position_of(start)
    }

    /// Find the index whose pixel range contains `pos`, searching only
    /// `[start, end)`. A pixel exactly on a boundary belongs to the index
    /// whose range starts there.
    ///
    /// Out-of-range positions clamp to the first/last index of the range
    /// rather than erroring: callers legitimately pass coordinates computed
    /// from stale state during resize races, and the permissive behavior is
    /// part of the contract.
    pub fn index_at(&self, pos: i32, start: usize, end: usize) -> usize {
        let end = end.min(self.len());
        if start >= end {
            return start;
        }
        if pos < self.position_of(start) {
            debug!(pos, start, end, "position below searched range, clamping");
            return start;
        }
        if pos > self.position_of(end) - 1 {
            debug!(pos, start, end, "position beyond searched range, clamping");
            return end - 1;
        }

        let mut lo = start;
        let mut hi = end;
        loop {
            let mid = (lo + hi) / 2;
            if self.position_of(mid) > pos {
                hi = mid;
            } else if self.position_of(mid + 1) - 1 < pos {
                lo = mid;
            } else {
                return mid;
            }
        }
    }

    /// `index_at` over the whole axis.
    pub fn index_of_pos(&self, pos: i32) -> usize {
        self.index_at(pos, 0, self.len())
    }

    /// Debug-build check that the table still matches the sizes it was built
    /// from. A mismatch is an internal bug, never a user-facing condition.
    #[cfg(debug_assertions)]
    pub fn assert_consistent(&self, sizes: &[i32], unit: SizeUnit, font_metric: i32, border: i32) {
        let fresh = Self::build(sizes, unit, font_metric, border);
        debug_assert_eq!(
            self.offsets, fresh.offsets,
            "geometry table is stale relative to its size array"
        );
    }

    #[cfg(not(debug_assertions))]
    pub fn assert_consistent(&self, _sizes: &[i32], _unit: SizeUnit, _font_metric: i32, _border: i32) {}
}
