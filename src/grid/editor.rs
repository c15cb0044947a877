//! The single cell-edit overlay.
//!
//! At most one cell is ever being edited. The host owns the editor widget;
//! the grid decides when it maps, where it sits, what it is loaded with, and
//! whether a commit is allowed to take effect.

use tracing::warn;

use crate::host::GridHost;

use super::Grid;

/// Edit-overlay state: the current cell, whether the editor is mapped over
/// it, and a guard against commits re-entered from the leave-cell decision.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    current: Option<(usize, usize)>,
    mapped: bool,
    committing: bool,
}

impl EditState {
    /// The current cell. Stays set after a committed or cancelled edit; it
    /// is the traversal position, not the editing flag.
    pub fn current_cell(&self) -> Option<(usize, usize)> {
        self.current
    }

    pub fn is_editing(&self) -> bool {
        self.mapped
    }

    /// The cell under the mapped editor, if any.
    pub(crate) fn editing_cell(&self) -> Option<(usize, usize)> {
        self.mapped.then_some(self.current).flatten()
    }

    pub(crate) fn rows_inserted(&mut self, at: usize, count: usize) {
        if let Some((row, _)) = &mut self.current {
            if *row >= at {
                *row += count;
            }
        }
    }

    pub(crate) fn columns_inserted(&mut self, at: usize, count: usize) {
        if let Some((_, column)) = &mut self.current {
            if *column >= at {
                *column += count;
            }
        }
    }

    /// Track a row deletion. True when the current cell itself was removed.
    pub(crate) fn rows_deleted(&mut self, at: usize, count: usize) -> bool {
        match &mut self.current {
            Some((row, _)) if *row >= at && *row < at + count => true,
            Some((row, _)) if *row >= at + count => {
                *row -= count;
                false
            }
            _ => false,
        }
    }

    /// Track a column deletion. True when the current cell itself was removed.
    pub(crate) fn columns_deleted(&mut self, at: usize, count: usize) -> bool {
        match &mut self.current {
            Some((_, column)) if *column >= at && *column < at + count => true,
            Some((_, column)) if *column >= at + count => {
                *column -= count;
                false
            }
            _ => false,
        }
    }
}

impl Grid {
    pub fn current_cell(&self) -> Option<(usize, usize)> {
        self.edit.current_cell()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    /// Start editing a cell.
    ///
    /// Any previous edit commits first; a veto of that commit keeps the old
    /// edit in place and the new one never starts. A cell with an embedded
    /// host widget takes focus itself instead of mapping the editor.
    pub fn begin_edit(&mut self, host: &mut impl GridHost, row: usize, column: usize) {
        if row >= self.rows() || column >= self.columns() {
            warn!(row, column, "begin_edit out of range, ignored");
            return;
        }
        if self.edit.committing {
            warn!(row, column, "begin_edit during commit, ignored");
            return;
        }
        if self.edit.editing_cell() == Some((row, column)) {
            host.focus_editor();
            return;
        }
        if !self.commit_edit(host, true) {
            return;
        }

        self.edit.current = Some((row, column));
        if let Some(widget) = self.store.cell(row, column).and_then(|c| c.user_widget) {
            self.edit.mapped = false;
            host.focus_cell_widget(widget);
            return;
        }
        let Some((owner, rect)) = self.cell_rect(row, column) else {
            return;
        };
        self.edit.mapped = true;
        host.show_editor(owner, rect, self.store.value(row, column));
        host.focus_editor();
    }

    /// Commit the in-progress edit.
    ///
    /// The host's leave-cell decision may veto (the editor stays mapped,
    /// scrolled into view and focused, and the store is untouched) or
    /// replace the committed value. With nothing being edited this is a
    /// successful no-op. Returns false only on veto.
    pub fn commit_edit(&mut self, host: &mut impl GridHost, unmap: bool) -> bool {
        let Some((row, column)) = self.edit.editing_cell() else {
            return true;
        };
        if self.edit.committing {
            warn!(row, column, "nested commit_edit, refused");
            return false;
        }
        self.edit.committing = true;
        let typed = host.editor_value();
        let decision = host.on_leave_cell(row, column, &typed);
        if decision.veto {
            self.edit.committing = false;
            self.make_cell_visible(host, row, column);
            host.focus_editor();
            return false;
        }
        let value = decision.value.unwrap_or(typed);
        self.store.set_value(row, column, value);
        self.redraw_cell(host, row, column);
        if unmap {
            self.edit.mapped = false;
            host.hide_editor();
        }
        self.edit.committing = false;
        true
    }

    /// Abandon the in-progress edit. With `unmap` the editor hides and the
    /// store keeps its old value; without it the editor stays mapped and its
    /// text reloads from the store.
    pub fn cancel_edit(&mut self, host: &mut impl GridHost, unmap: bool) {
        let Some((row, column)) = self.edit.editing_cell() else {
            return;
        };
        if unmap {
            self.edit.mapped = false;
            host.hide_editor();
        } else {
            host.set_editor_value(self.store.value(row, column));
        }
    }

    /// Keep the mapped editor glued to its cell across scrolls and layout
    /// changes.
    pub(crate) fn reposition_editor(&mut self, host: &mut impl GridHost) {
        let Some((row, column)) = self.edit.editing_cell() else {
            return;
        };
        if let Some((owner, rect)) = self.cell_rect(row, column) {
            host.move_editor(owner, rect);
        }
    }

    /// Drop edit state for a cell removed by a structural change. The editor
    /// hides without committing; there is no cell left to commit into.
    pub(crate) fn abandon_edit_of_deleted_cell(&mut self, host: &mut impl GridHost) {
        if self.edit.mapped {
            self.edit.mapped = false;
            host.hide_editor();
        }
        self.edit.current = None;
    }
}
