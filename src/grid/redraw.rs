//! The redraw dispatcher.
//!
//! Damage rectangles arrive in widget coordinates. The dispatcher clips them
//! against a region, classifies the corners on both axes, and replays the
//! covered cells or labels through the host's draw calls. Cells repaint
//! whole; a damage rectangle touching one pixel of a cell repaints all of it.

use crate::host::{CellDrawParams, GridHost, LabelDrawParams};
use crate::layout::{cell_owner, classify, AxisBand, AxisContext, AxisHit};
use crate::rect::Rect;

use super::Grid;

/// The resolved index when a corner landed on a cell.
fn cell_index(hit: AxisHit) -> Option<usize> {
    match hit {
        AxisHit::Cell { index, .. } => Some(index),
        _ => None,
    }
}

impl Grid {
    /// Repaint the part of `damage` inside `region`. Disjoint rectangles and
    /// corners that resolve to nothing are silent no-ops.
    pub(crate) fn redraw_region(&self, host: &mut impl GridHost, damage: Rect, region: Rect) {
        let Some(clip) = damage.intersect(&region) else {
            return;
        };
        let y_ctx = self.y_ctx();
        let x_ctx = self.x_ctx();
        let top = classify(&y_ctx, clip.y);
        let bottom = classify(&y_ctx, clip.bottom() - 1);
        let left = classify(&x_ctx, clip.x);
        let right = classify(&x_ctx, clip.right() - 1);

        match (top, left) {
            (AxisHit::Outside, _) | (_, AxisHit::Outside) => {}
            (AxisHit::Label { .. }, AxisHit::Label { .. }) => {}
            (AxisHit::Label { .. }, AxisHit::Cell { index: start, .. }) => {
                let end = cell_index(right).unwrap_or(start);
                for column in start..=end {
                    self.draw_column_label(host, column);
                }
            }
            (AxisHit::Cell { index: start, .. }, AxisHit::Label { .. }) => {
                let end = cell_index(bottom).unwrap_or(start);
                for row in start..=end {
                    self.draw_row_label(host, row);
                }
            }
            (AxisHit::Cell { index: start_row, .. }, AxisHit::Cell { index: start_col, .. }) => {
                let end_row = cell_index(bottom).unwrap_or(start_row);
                let end_col = cell_index(right).unwrap_or(start_col);
                for row in start_row..=end_row {
                    for column in start_col..=end_col {
                        self.draw_cell_at(host, &y_ctx, &x_ctx, row, column);
                    }
                }
            }
        }
    }

    /// Repaint everything: every mapped region, then the frozen labels and
    /// corner cells that live on the widget frame.
    pub fn redraw_all(&self, host: &mut impl GridHost) {
        let whole = Rect::new(0, 0, self.widget_width, self.widget_height);
        for (_, rect) in self.frame.mapped_regions() {
            self.redraw_region(host, whole, rect);
        }
        self.redraw_labels_and_fixed(host, whole);
    }

    /// Repaint the cells and labels covering an inclusive index range,
    /// wherever they are mapped.
    pub fn redraw_range(
        &self,
        host: &mut impl GridHost,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) {
        let y_ctx = self.y_ctx();
        let x_ctx = self.x_ctx();
        let y1 = clamped_pos(&y_ctx, start_row, false);
        let y2 = clamped_pos(&y_ctx, end_row, true);
        let x1 = clamped_pos(&x_ctx, start_col, false);
        let x2 = clamped_pos(&x_ctx, end_col, true);
        let rect = Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1);
        if rect.is_empty() {
            return;
        }
        for (_, region) in self.frame.mapped_regions() {
            self.redraw_region(host, rect, region);
        }
        self.redraw_labels_and_fixed(host, rect);
    }

    /// Repaint one cell if any part of it is on screen.
    pub(crate) fn redraw_cell(&self, host: &mut impl GridHost, row: usize, column: usize) {
        if !self.is_cell_visible(row, column) {
            return;
        }
        let y_ctx = self.y_ctx();
        let x_ctx = self.x_ctx();
        self.draw_cell_at(host, &y_ctx, &x_ctx, row, column);
    }

    /// Repaint the frame-owned bands: frozen-index labels and the frozen
    /// corner cells. The scrollable label-by-label corner is skipped; it is
    /// the empty square above the row labels.
    pub(crate) fn redraw_labels_and_fixed(&self, host: &mut impl GridHost, damage: Rect) {
        let cfg = &self.cfg;
        let frame = &self.frame;
        let row_bands = [
            (
                cfg.column_label_height > 0,
                frame.horiz_sb_offset,
                cfg.column_label_height,
            ),
            (
                cfg.fixed_rows > 0,
                frame.fixed_row_pos,
                frame.visible_fixed_height,
            ),
            (
                cfg.trailing_fixed_rows > 0,
                frame.trailing_row_pos,
                frame.visible_trailing_height,
            ),
        ];
        let col_bands = [
            (
                cfg.row_label_width > 0,
                frame.vert_sb_offset,
                cfg.row_label_width,
            ),
            (
                cfg.fixed_columns > 0,
                frame.fixed_col_pos,
                frame.visible_fixed_width,
            ),
            (
                cfg.trailing_fixed_columns > 0,
                frame.trailing_col_pos,
                frame.visible_trailing_width,
            ),
        ];
        for (r, &(row_exists, y, height)) in row_bands.iter().enumerate() {
            if !row_exists {
                continue;
            }
            for (c, &(col_exists, x, width)) in col_bands.iter().enumerate() {
                if !col_exists || (r == 0 && c == 0) {
                    continue;
                }
                self.redraw_region(host, damage, Rect::new(x, y, width, height));
            }
        }
    }

    fn draw_cell_at(
        &self,
        host: &mut impl GridHost,
        y_ctx: &AxisContext<'_>,
        x_ctx: &AxisContext<'_>,
        row: usize,
        column: usize,
    ) {
        let rect = Rect::new(
            x_ctx.index_to_widget_pos(column),
            y_ctx.index_to_widget_pos(row),
            self.columns.size_of(column),
            self.rows.size_of(row),
        );
        host.draw_cell(&CellDrawParams {
            owner: cell_owner(y_ctx, x_ctx, row, column),
            row,
            column,
            rect,
            cell: self.store.snapshot(row, column),
        });
    }

    fn draw_row_label(&self, host: &mut impl GridHost, row: usize) {
        let y_ctx = self.y_ctx();
        let rect = Rect::new(
            self.frame.vert_sb_offset,
            y_ctx.index_to_widget_pos(row),
            self.cfg.row_label_width,
            self.rows.size_of(row),
        );
        host.draw_row_label(&LabelDrawParams {
            index: row,
            rect,
            label: self.row_data.label(row),
        });
    }

    fn draw_column_label(&self, host: &mut impl GridHost, column: usize) {
        let x_ctx = self.x_ctx();
        let rect = Rect::new(
            x_ctx.index_to_widget_pos(column),
            self.frame.horiz_sb_offset,
            self.columns.size_of(column),
            self.cfg.column_label_height,
        );
        host.draw_column_label(&LabelDrawParams {
            index: column,
            rect,
            label: self.col_data.label(column),
        });
    }
}

/// Widget position of an index edge, pulled inside the scrollable window
/// when the index is scrollable. Keeps range rectangles from leaking into
/// the frozen bands when part of the range is scrolled out of view.
fn clamped_pos(ctx: &AxisContext<'_>, index: usize, trailing_edge: bool) -> i32 {
    let mut pos = ctx.index_to_widget_pos(index);
    if trailing_edge {
        pos += ctx.geom.size_of(index) - 1;
    }
    if ctx.band_of(index) == AxisBand::Scrollable {
        if pos < ctx.scroll_pos {
            pos = ctx.scroll_pos;
        } else if pos >= ctx.trailing_pos {
            pos = ctx.trailing_pos - 1;
        }
    }
    pos
}
