//! Structural edits: inserting and deleting rows and columns.
//!
//! Every splice runs the same tail: cell store and side arrays change
//! together, the edit position shifts or is abandoned, geometry rebuilds,
//! the layout refreshes, and everything from the splice point on repaints.

use tracing::warn;

use crate::host::GridHost;

use super::Grid;

impl Grid {
    /// Insert `count` rows before `at`, sized by the default row height.
    pub fn insert_rows(&mut self, host: &mut impl GridHost, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        if at > self.rows() {
            warn!(at, rows = self.rows(), "insert_rows position out of range, ignored");
            return;
        }
        if self
            .rows()
            .checked_add(count)
            .and_then(|rows| rows.checked_mul(self.columns().max(1)))
            .is_none()
        {
            warn!(at, count, "insert_rows count overflows, ignored");
            return;
        }
        self.store.insert_rows(at, count);
        self.row_data.insert(at, count, self.cfg.default_row_height);
        self.cfg.rows = self.store.rows();
        self.edit.rows_inserted(at, count);
        self.structure_changed(host, at, 0);
    }

    /// Delete `count` rows starting at `at`. Refused when the range is out
    /// of bounds or the deletion would leave more frozen rows than rows.
    pub fn delete_rows(&mut self, host: &mut impl GridHost, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        if at.checked_add(count).map_or(true, |end| end > self.rows()) {
            warn!(at, count, rows = self.rows(), "delete_rows range out of range, ignored");
            return;
        }
        if let Err(err) = self.cfg.validate_counts(self.rows() - count, self.columns()) {
            warn!(%err, "delete_rows would break the frozen bands, ignored");
            return;
        }
        if self.edit.rows_deleted(at, count) {
            self.abandon_edit_of_deleted_cell(host);
        }
        self.store.delete_rows(at, count);
        self.row_data.delete(at, count);
        self.cfg.rows = self.store.rows();
        self.structure_changed(host, at, 0);
    }

    /// Insert `count` columns before `at`, sized by the default column width.
    pub fn insert_columns(&mut self, host: &mut impl GridHost, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        if at > self.columns() {
            warn!(
                at,
                columns = self.columns(),
                "insert_columns position out of range, ignored"
            );
            return;
        }
        if self
            .columns()
            .checked_add(count)
            .and_then(|columns| columns.checked_mul(self.rows().max(1)))
            .is_none()
        {
            warn!(at, count, "insert_columns count overflows, ignored");
            return;
        }
        self.store.insert_columns(at, count);
        self.col_data.insert(at, count, self.cfg.default_column_width);
        self.cfg.columns = self.store.columns();
        self.edit.columns_inserted(at, count);
        self.structure_changed(host, 0, at);
    }

    /// Delete `count` columns starting at `at`. Same refusals as
    /// [`Self::delete_rows`].
    pub fn delete_columns(&mut self, host: &mut impl GridHost, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        if at.checked_add(count).map_or(true, |end| end > self.columns()) {
            warn!(
                at,
                count,
                columns = self.columns(),
                "delete_columns range out of range, ignored"
            );
            return;
        }
        if let Err(err) = self.cfg.validate_counts(self.rows(), self.columns() - count) {
            warn!(%err, "delete_columns would break the frozen bands, ignored");
            return;
        }
        if self.edit.columns_deleted(at, count) {
            self.abandon_edit_of_deleted_cell(host);
        }
        self.store.delete_columns(at, count);
        self.col_data.delete(at, count);
        self.cfg.columns = self.store.columns();
        self.structure_changed(host, 0, at);
    }

    /// Common tail of every splice: rebuild, relayout, repaint from the
    /// splice point through the end of the grid.
    fn structure_changed(&mut self, host: &mut impl GridHost, from_row: usize, from_col: usize) {
        self.rebuild_geometry();
        self.refresh_layout(host);
        let (rows, columns) = (self.rows(), self.columns());
        if rows == 0 || columns == 0 {
            self.redraw_all(host);
            return;
        }
        self.redraw_range(
            host,
            from_row.min(rows - 1),
            from_col.min(columns - 1),
            rows - 1,
            columns - 1,
        );
    }
}
