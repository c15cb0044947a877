//! The host abstraction.
//!
//! The grid computes geometry and decides what to paint; the host owns the
//! actual windows, pixels, scrollbars, the editor widget and any embedded
//! per-cell widgets. Drawing methods are required; notification and editor
//! methods default to no-ops so a minimal host implements only what it
//! renders.

use crate::layout::{CellOwner, Region, ScrollbarState};
use crate::rect::Rect;
use crate::store::CellSnapshot;

/// Everything a host needs to paint one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellDrawParams<'a> {
    /// Surface the cell lives on.
    pub owner: CellOwner,
    pub row: usize,
    pub column: usize,
    /// Widget-relative pixel rectangle of the cell.
    pub rect: Rect,
    pub cell: CellSnapshot<'a>,
}

/// Everything a host needs to paint one row or column label.
#[derive(Debug, Clone, Copy)]
pub struct LabelDrawParams<'a> {
    pub index: usize,
    pub rect: Rect,
    pub label: &'a str,
}

/// The host's verdict when focus is about to leave the edited cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveCellDecision {
    /// True refuses the commit and keeps the edit in place.
    pub veto: bool,
    /// Replacement for the value being committed, when the host rewrites it.
    pub value: Option<String>,
}

impl LeaveCellDecision {
    /// Accept the value as typed.
    pub fn accept() -> Self {
        Self::default()
    }

    /// Accept, but commit `value` instead of what was typed.
    pub fn replace(value: impl Into<String>) -> Self {
        Self {
            veto: false,
            value: Some(value.into()),
        }
    }

    /// Refuse the commit and keep editing.
    pub fn veto() -> Self {
        Self {
            veto: true,
            value: None,
        }
    }
}

/// What the grid asks of its embedding.
///
/// One mutable borrow of the host is threaded through every grid operation
/// that can draw, scroll, or touch the editor.
pub trait GridHost {
    /// Blit-copy the pixels of `rect` within `region` by `(dx, dy)`.
    /// The host must later report the uncovered areas through
    /// [`Grid::on_damage`](crate::Grid::on_damage), one report per copy.
    fn scroll_region(&mut self, region: Region, rect: Rect, dx: i32, dy: i32);

    fn draw_cell(&mut self, params: &CellDrawParams<'_>);

    fn draw_row_label(&mut self, params: &LabelDrawParams<'_>);

    fn draw_column_label(&mut self, params: &LabelDrawParams<'_>);

    /// Called before a commit takes effect. The default accepts as typed.
    fn on_leave_cell(&mut self, row: usize, column: usize, value: &str) -> LeaveCellDecision {
        let _ = (row, column, value);
        LeaveCellDecision::accept()
    }

    /// Map the editor over a cell, loaded with `value`.
    fn show_editor(&mut self, owner: CellOwner, rect: Rect, value: &str) {
        let _ = (owner, rect, value);
    }

    /// Reposition the mapped editor after scroll or relayout.
    fn move_editor(&mut self, owner: CellOwner, rect: Rect) {
        let _ = (owner, rect);
    }

    fn hide_editor(&mut self) {}

    /// Current text of the editor widget.
    fn editor_value(&self) -> String {
        String::new()
    }

    fn set_editor_value(&mut self, value: &str) {
        let _ = value;
    }

    fn focus_editor(&mut self) {}

    /// Give keyboard focus to an embedded per-cell widget.
    fn focus_cell_widget(&mut self, widget: u64) {
        let _ = widget;
    }

    /// Reposition an embedded per-cell widget after scroll or relayout.
    fn position_cell_widget(&mut self, widget: u64, owner: CellOwner, rect: Rect) {
        let _ = (widget, owner, rect);
    }

    /// Scrollbar geometry or range changed; `None` means hidden.
    fn scrollbars_changed(&mut self, hsb: Option<&ScrollbarState>, vsb: Option<&ScrollbarState>) {
        let _ = (hsb, vsb);
    }
}
