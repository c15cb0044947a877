//! Viewport state: scroll origins and the visible extent of the scrollable
//! sub-region.
//!
//! Origins are pixel offsets into the non-frozen part of the virtual grid.
//! `visible_width`/`visible_height` are written only by the relayout engine
//! and by scroll-value-changed notifications.

use serde::{Deserialize, Serialize};

use super::geometry::AxisGeometry;

/// Scroll position and visible extent of the scrollable body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll origin in pixels, 0 = first non-frozen row at the top.
    pub vert_origin: i32,
    /// Horizontal scroll origin in pixels.
    pub horiz_origin: i32,
    /// Pixel width of the scrollable viewport (excludes frozen bands, labels,
    /// scrollbars and borders).
    pub visible_width: i32,
    /// Pixel height of the scrollable viewport.
    pub visible_height: i32,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// First visible non-frozen row.
    pub fn top_row(&self, rows: &AxisGeometry, fixed_rows: usize) -> usize {
        let fixed_height = rows.span(0, fixed_rows);
        rows.index_of_pos(fixed_height + self.vert_origin)
    }

    /// Last visible non-frozen row (inclusive).
    pub fn bottom_row(&self, rows: &AxisGeometry, fixed_rows: usize) -> usize {
        let fixed_height = rows.span(0, fixed_rows);
        rows.index_of_pos(fixed_height + self.vert_origin + self.visible_height - 1)
    }

    /// First visible non-frozen column.
    pub fn left_column(&self, columns: &AxisGeometry, fixed_columns: usize) -> usize {
        let fixed_width = columns.span(0, fixed_columns);
        columns.index_of_pos(fixed_width + self.horiz_origin)
    }

    /// Last visible non-frozen column (inclusive).
    pub fn right_column(&self, columns: &AxisGeometry, fixed_columns: usize) -> usize {
        let fixed_width = columns.span(0, fixed_columns);
        columns.index_of_pos(fixed_width + self.horiz_origin + self.visible_width - 1)
    }

    /// Inclusive range of visible non-frozen rows.
    pub fn visible_rows(&self, rows: &AxisGeometry, fixed_rows: usize) -> (usize, usize) {
        (
            self.top_row(rows, fixed_rows),
            self.bottom_row(rows, fixed_rows),
        )
    }

    /// Inclusive range of visible non-frozen columns.
    pub fn visible_columns(
        &self,
        columns: &AxisGeometry,
        fixed_columns: usize,
    ) -> (usize, usize) {
        (
            self.left_column(columns, fixed_columns),
            self.right_column(columns, fixed_columns),
        )
    }

    /// Clamp an origin so the viewport never scrolls past the end of the
    /// scrollable content, and never below zero.
    pub fn clamp_origin(origin: i32, scrollable_extent: i32, visible_extent: i32) -> i32 {
        origin.clamp(0, (scrollable_extent - visible_extent).max(0))
    }
}
