//! Shared test host and grid builders.

#![allow(dead_code)]

use gridview::{
    CellDrawParams, CellOwner, Grid, GridConfig, GridHost, LabelDrawParams, LeaveCellDecision,
    Rect, Region, ScrollbarState,
};

/// Every primitive call the grid issued, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Scroll {
        region: Region,
        rect: Rect,
        dx: i32,
        dy: i32,
    },
    DrawCell {
        row: usize,
        column: usize,
        owner: CellOwner,
        rect: Rect,
    },
    DrawRowLabel {
        index: usize,
    },
    DrawColumnLabel {
        index: usize,
    },
    ShowEditor {
        rect: Rect,
        value: String,
    },
    MoveEditor {
        rect: Rect,
    },
    HideEditor,
    FocusEditor,
    FocusWidget(u64),
    PositionWidget {
        widget: u64,
        rect: Rect,
    },
    Scrollbars {
        hsb: Option<ScrollbarState>,
        vsb: Option<ScrollbarState>,
    },
}

/// Host double that records every call and plays back a scripted editor
/// value and leave-cell decision.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub editor_text: String,
    pub leave_decision: LeaveCellDecision,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn scrolls(&self) -> Vec<&HostCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Scroll { .. }))
            .collect()
    }

    pub fn drawn_cells(&self) -> Vec<(usize, usize)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::DrawCell { row, column, .. } => Some((*row, *column)),
                _ => None,
            })
            .collect()
    }

    pub fn has_call(&self, wanted: &HostCall) -> bool {
        self.calls.iter().any(|c| c == wanted)
    }
}

impl GridHost for RecordingHost {
    fn scroll_region(&mut self, region: Region, rect: Rect, dx: i32, dy: i32) {
        self.calls.push(HostCall::Scroll {
            region,
            rect,
            dx,
            dy,
        });
    }

    fn draw_cell(&mut self, params: &CellDrawParams<'_>) {
        self.calls.push(HostCall::DrawCell {
            row: params.row,
            column: params.column,
            owner: params.owner,
            rect: params.rect,
        });
    }

    fn draw_row_label(&mut self, params: &LabelDrawParams<'_>) {
        self.calls.push(HostCall::DrawRowLabel {
            index: params.index,
        });
    }

    fn draw_column_label(&mut self, params: &LabelDrawParams<'_>) {
        self.calls.push(HostCall::DrawColumnLabel {
            index: params.index,
        });
    }

    fn on_leave_cell(&mut self, _row: usize, _column: usize, _value: &str) -> LeaveCellDecision {
        self.leave_decision.clone()
    }

    fn show_editor(&mut self, _owner: CellOwner, rect: Rect, value: &str) {
        self.editor_text = value.to_owned();
        self.calls.push(HostCall::ShowEditor {
            rect,
            value: value.to_owned(),
        });
    }

    fn move_editor(&mut self, _owner: CellOwner, rect: Rect) {
        self.calls.push(HostCall::MoveEditor { rect });
    }

    fn hide_editor(&mut self) {
        self.calls.push(HostCall::HideEditor);
    }

    fn editor_value(&self) -> String {
        self.editor_text.clone()
    }

    fn set_editor_value(&mut self, value: &str) {
        self.editor_text = value.to_owned();
    }

    fn focus_editor(&mut self) {
        self.calls.push(HostCall::FocusEditor);
    }

    fn focus_cell_widget(&mut self, widget: u64) {
        self.calls.push(HostCall::FocusWidget(widget));
    }

    fn position_cell_widget(&mut self, widget: u64, _owner: CellOwner, rect: Rect) {
        self.calls.push(HostCall::PositionWidget { widget, rect });
    }

    fn scrollbars_changed(
        &mut self,
        hsb: Option<&ScrollbarState>,
        vsb: Option<&ScrollbarState>,
    ) {
        self.calls.push(HostCall::Scrollbars {
            hsb: hsb.copied(),
            vsb: vsb.copied(),
        });
    }
}

/// 10x10 grid of 20px cells, no frozen bands, no labels, no scrollbars.
pub fn plain_config() -> GridConfig {
    GridConfig {
        rows: 10,
        columns: 10,
        default_row_height: 20,
        default_column_width: 20,
        hsb_policy: gridview::ScrollbarPolicy::Never,
        vsb_policy: gridview::ScrollbarPolicy::Never,
        ..GridConfig::default()
    }
}

/// Frozen-band variant: 2 leading rows/columns frozen, 1 trailing of each,
/// labels on both axes.
pub fn banded_config() -> GridConfig {
    GridConfig {
        fixed_rows: 2,
        fixed_columns: 2,
        trailing_fixed_rows: 1,
        trailing_fixed_columns: 1,
        row_label_width: 30,
        column_label_height: 16,
        ..plain_config()
    }
}

/// Route the warning channel through the test harness's output capture.
/// Safe to call from every test; only the first registration wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Build and resize a grid so a layout frame exists.
pub fn realized(cfg: GridConfig, width: i32, height: i32) -> (Grid, RecordingHost) {
    init_tracing();
    let mut host = RecordingHost::new();
    #[allow(clippy::unwrap_used)]
    let mut grid = Grid::new(cfg).unwrap();
    grid.resize(&mut host, width, height);
    host.clear();
    (grid, host)
}
