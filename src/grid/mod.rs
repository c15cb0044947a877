//! The grid engine.
//!
//! `Grid` owns the cell store, the axis geometry tables, the viewport, the
//! layout frame and the per-region scroll ledgers. It never draws a pixel
//! itself: every operation that can paint, blit or touch the editor takes a
//! mutable [`GridHost`] and issues the primitive calls the host renders.

mod editor;
mod mutation;
mod redraw;

use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::Result;
use crate::host::GridHost;
use crate::layout::{
    cell_owner, classify, relayout, AxisBand, AxisContext, AxisGeometry, AxisHit, CellOwner,
    LayoutFrame, Region, Viewport,
};
use crate::rect::Rect;
use crate::scroll_ledger::{DamageKind, ScrollLedger};
use crate::store::{AxisData, Cell, CellSnapshot, CellStore};

pub use editor::EditState;

/// What lives under a widget-relative point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHit {
    Cell { row: usize, column: usize },
    RowLabel { row: usize },
    ColumnLabel { column: usize },
    Outside,
}

/// A virtualized 2-D grid with frozen bands, blit scrolling and a single
/// in-place cell editor.
#[derive(Debug)]
pub struct Grid {
    cfg: GridConfig,
    store: CellStore,
    row_data: AxisData,
    col_data: AxisData,
    rows: AxisGeometry,
    columns: AxisGeometry,
    vp: Viewport,
    frame: LayoutFrame,
    widget_width: i32,
    widget_height: i32,
    ledgers: [ScrollLedger; 7],
    edit: EditState,
}

impl Grid {
    /// Build a grid with default row heights and column widths.
    pub fn new(cfg: GridConfig) -> Result<Self> {
        Self::with_sizes(cfg, None, None)
    }

    /// Build a grid with explicit size arrays. Short arrays back-fill with
    /// the configured defaults.
    pub fn with_sizes(
        cfg: GridConfig,
        row_heights: Option<&[i32]>,
        column_widths: Option<&[i32]>,
    ) -> Result<Self> {
        cfg.validate()?;
        let row_data = AxisData::new(cfg.rows, row_heights, cfg.default_row_height);
        let col_data = AxisData::new(cfg.columns, column_widths, cfg.default_column_width);
        let store = CellStore::new(cfg.rows, cfg.columns);
        let mut grid = Self {
            rows: AxisGeometry::empty(),
            columns: AxisGeometry::empty(),
            store,
            row_data,
            col_data,
            cfg,
            vp: Viewport::new(),
            frame: LayoutFrame::default(),
            widget_width: 0,
            widget_height: 0,
            ledgers: std::array::from_fn(|_| ScrollLedger::new()),
            edit: EditState::default(),
        };
        grid.rebuild_geometry();
        Ok(grid)
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.vp
    }

    pub fn frame(&self) -> &LayoutFrame {
        &self.frame
    }

    /// Rebuild both geometry tables from the size arrays.
    fn rebuild_geometry(&mut self) {
        self.rows = AxisGeometry::build(
            self.row_data.sizes(),
            self.cfg.row_height_unit,
            self.cfg.row_font_metric(),
            self.cfg.cell_border_height,
        );
        self.columns = AxisGeometry::build(
            self.col_data.sizes(),
            self.cfg.column_width_unit,
            self.cfg.column_font_metric(),
            self.cfg.cell_border_width,
        );
    }

    fn x_ctx(&self) -> AxisContext<'_> {
        self.frame.x_context(&self.cfg, &self.columns, &self.vp)
    }

    fn y_ctx(&self) -> AxisContext<'_> {
        self.frame.y_context(&self.cfg, &self.rows, &self.vp)
    }

    // ------------------------------------------------------------------
    // Layout

    /// Adopt a new widget size and recompute the layout.
    pub fn resize(&mut self, host: &mut impl GridHost, width: i32, height: i32) {
        self.widget_width = width;
        self.widget_height = height;
        self.refresh_layout(host);
    }

    /// Re-run the relayout engine against the current widget size.
    ///
    /// All pending scroll deltas are dropped: damage still in flight refers
    /// to a layout that no longer exists, and the follow-up expose repaints
    /// everything anyway.
    pub(crate) fn refresh_layout(&mut self, host: &mut impl GridHost) {
        self.frame = relayout(
            &self.cfg,
            &self.rows,
            &self.columns,
            &mut self.vp,
            self.widget_width,
            self.widget_height,
        );
        for ledger in &mut self.ledgers {
            ledger.flush();
        }
        host.scrollbars_changed(self.frame.hsb.as_ref(), self.frame.vsb.as_ref());
        self.reposition_editor(host);
        self.reposition_cell_widgets(host);
    }

    // ------------------------------------------------------------------
    // Scrolling

    /// Set the vertical scroll origin, blitting every vertically scrolling
    /// region and repainting the uncovered strips.
    pub fn set_vert_origin(&mut self, host: &mut impl GridHost, value: i32) {
        let scrollable = self.scrollable_height();
        let value = Viewport::clamp_origin(value, scrollable, self.vp.visible_height);
        let delta = self.vp.vert_origin - value;
        if delta == 0 {
            return;
        }
        debug!(value, delta, "vertical scroll");
        self.vp.vert_origin = value;
        if let Some(vsb) = self.frame.vsb.as_mut() {
            vsb.value = value;
        }
        host.scrollbars_changed(self.frame.hsb.as_ref(), self.frame.vsb.as_ref());
        self.reposition_editor(host);
        self.reposition_cell_widgets(host);
        for region in Region::ALL {
            if region.scrolls_vertically() {
                self.scroll_region_by(host, region, 0, delta);
            }
        }
    }

    /// Set the horizontal scroll origin. Mirror of [`Self::set_vert_origin`].
    pub fn set_horiz_origin(&mut self, host: &mut impl GridHost, value: i32) {
        let scrollable = self.scrollable_width();
        let value = Viewport::clamp_origin(value, scrollable, self.vp.visible_width);
        let delta = self.vp.horiz_origin - value;
        if delta == 0 {
            return;
        }
        debug!(value, delta, "horizontal scroll");
        self.vp.horiz_origin = value;
        if let Some(hsb) = self.frame.hsb.as_mut() {
            hsb.value = value;
        }
        host.scrollbars_changed(self.frame.hsb.as_ref(), self.frame.vsb.as_ref());
        self.reposition_editor(host);
        self.reposition_cell_widgets(host);
        for region in Region::ALL {
            if region.scrolls_horizontally() {
                self.scroll_region_by(host, region, delta, 0);
            }
        }
    }

    /// Blit one region by `(dx, dy)`. A delta at least as large as the
    /// region leaves nothing to copy; the whole region repaints instead and
    /// no ledger entry is recorded.
    fn scroll_region_by(&mut self, host: &mut impl GridHost, region: Region, dx: i32, dy: i32) {
        let Some(rect) = self.frame.region_rect(region) else {
            return;
        };
        let copy_extent = if dy != 0 {
            rect.height - dy.abs()
        } else {
            rect.width - dx.abs()
        };
        if copy_extent <= 0 {
            self.redraw_region(host, rect, rect);
            return;
        }
        if let Some(ledger) = self.ledgers.get_mut(region.index()) {
            ledger.record_scroll(dx, dy);
        }
        host.scroll_region(region, rect, dx, dy);

        let strip = if dy > 0 {
            Rect::new(rect.x, rect.y, rect.width, dy)
        } else if dy < 0 {
            Rect::new(rect.x, rect.bottom() + dy, rect.width, -dy)
        } else if dx > 0 {
            Rect::new(rect.x, rect.y, dx, rect.height)
        } else {
            Rect::new(rect.right() + dx, rect.y, -dx, rect.height)
        };
        self.redraw_region(host, strip, rect);
    }

    /// Route one host damage report for `region`.
    ///
    /// Blit damage passes through the region's ledger for coordinate
    /// correction; `Full` damage is already current and goes straight to the
    /// dispatcher.
    pub fn on_damage(&mut self, host: &mut impl GridHost, region: Region, kind: DamageKind, rect: Rect) {
        let corrected = match kind {
            DamageKind::Full => Some(rect),
            _ => self
                .ledgers
                .get_mut(region.index())
                .and_then(|ledger| ledger.handle(kind, rect)),
        };
        let (Some(damage), Some(region_rect)) = (corrected, self.frame.region_rect(region)) else {
            return;
        };
        self.redraw_region(host, damage, region_rect);
    }

    /// Repaint frame-level damage: labels of frozen indices and the cells in
    /// frozen corners, which live outside every scrolling region.
    pub fn expose(&mut self, host: &mut impl GridHost, rect: Rect) {
        self.redraw_labels_and_fixed(host, rect);
    }

    /// Pixel extent of the scrollable (non-frozen) rows.
    fn scrollable_height(&self) -> i32 {
        let trailing_origin = self.rows.len().saturating_sub(self.cfg.trailing_fixed_rows);
        self.rows.extent()
            - self.rows.span(0, self.cfg.fixed_rows)
            - self.rows.span(trailing_origin, self.rows.len())
    }

    /// Pixel extent of the scrollable (non-frozen) columns.
    fn scrollable_width(&self) -> i32 {
        let trailing_origin = self
            .columns
            .len()
            .saturating_sub(self.cfg.trailing_fixed_columns);
        self.columns.extent()
            - self.columns.span(0, self.cfg.fixed_columns)
            - self.columns.span(trailing_origin, self.columns.len())
    }

    // ------------------------------------------------------------------
    // Queries

    /// Map a widget-relative point to a cell, a label, or nothing.
    pub fn hit_test(&self, x: i32, y: i32) -> GridHit {
        let row_hit = classify(&self.y_ctx(), y);
        let col_hit = classify(&self.x_ctx(), x);
        match (row_hit, col_hit) {
            (AxisHit::Cell { index: row, .. }, AxisHit::Cell { index: column, .. }) => {
                GridHit::Cell { row, column }
            }
            (AxisHit::Cell { index: row, .. }, AxisHit::Label { .. }) => GridHit::RowLabel { row },
            (AxisHit::Label { .. }, AxisHit::Cell { index: column, .. }) => {
                GridHit::ColumnLabel { column }
            }
            _ => GridHit::Outside,
        }
    }

    /// The cell under a point, if any.
    pub fn cell_at_point(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        match self.hit_test(x, y) {
            GridHit::Cell { row, column } => Some((row, column)),
            _ => None,
        }
    }

    /// Widget-relative rectangle of a cell and the surface it draws on.
    /// `None` for out-of-range coordinates.
    pub fn cell_rect(&self, row: usize, column: usize) -> Option<(CellOwner, Rect)> {
        if row >= self.rows.len() || column >= self.columns.len() {
            return None;
        }
        let y_ctx = self.y_ctx();
        let x_ctx = self.x_ctx();
        let rect = Rect::new(
            x_ctx.index_to_widget_pos(column),
            y_ctx.index_to_widget_pos(row),
            self.columns.size_of(column),
            self.rows.size_of(row),
        );
        Some((cell_owner(&y_ctx, &x_ctx, row, column), rect))
    }

    /// Inclusive range of visible non-frozen rows.
    pub fn visible_rows(&self) -> (usize, usize) {
        self.vp.visible_rows(&self.rows, self.cfg.fixed_rows)
    }

    /// Inclusive range of visible non-frozen columns.
    pub fn visible_columns(&self) -> (usize, usize) {
        self.vp.visible_columns(&self.columns, self.cfg.fixed_columns)
    }

    /// True when the row is frozen or inside the visible scrollable window.
    pub fn is_row_visible(&self, row: usize) -> bool {
        if row >= self.rows.len() {
            return false;
        }
        if row < self.cfg.fixed_rows
            || row >= self.rows.len().saturating_sub(self.cfg.trailing_fixed_rows)
        {
            return true;
        }
        let (top, bottom) = self.visible_rows();
        row >= top && row <= bottom
    }

    /// True when the column is frozen or inside the visible scrollable window.
    pub fn is_column_visible(&self, column: usize) -> bool {
        if column >= self.columns.len() {
            return false;
        }
        if column < self.cfg.fixed_columns
            || column
                >= self
                    .columns
                    .len()
                    .saturating_sub(self.cfg.trailing_fixed_columns)
        {
            return true;
        }
        let (left, right) = self.visible_columns();
        column >= left && column <= right
    }

    pub fn is_cell_visible(&self, row: usize, column: usize) -> bool {
        self.is_row_visible(row) && self.is_column_visible(column)
    }

    /// Scroll the minimum distance that brings the cell fully into view.
    /// Frozen bands are always in view; only scrollable indices move.
    pub fn make_cell_visible(&mut self, host: &mut impl GridHost, row: usize, column: usize) {
        if row >= self.rows.len() || column >= self.columns.len() {
            warn!(row, column, "make_cell_visible out of range, ignored");
            return;
        }
        let y_ctx = self.y_ctx();
        if y_ctx.band_of(row) == AxisBand::Scrollable {
            let pos = self.rows.position_of(row) - self.rows.span(0, self.cfg.fixed_rows);
            let size = self.rows.size_of(row);
            let origin = if pos < self.vp.vert_origin {
                pos
            } else if pos + size > self.vp.vert_origin + self.vp.visible_height {
                pos + size - self.vp.visible_height
            } else {
                self.vp.vert_origin
            };
            self.set_vert_origin(host, origin);
        }
        let x_ctx = self.x_ctx();
        if x_ctx.band_of(column) == AxisBand::Scrollable {
            let pos = self.columns.position_of(column) - self.columns.span(0, self.cfg.fixed_columns);
            let size = self.columns.size_of(column);
            let origin = if pos < self.vp.horiz_origin {
                pos
            } else if pos + size > self.vp.horiz_origin + self.vp.visible_width {
                pos + size - self.vp.visible_width
            } else {
                self.vp.horiz_origin
            };
            self.set_horiz_origin(host, origin);
        }
    }

    // ------------------------------------------------------------------
    // Content

    /// Cell text; empty for unallocated cells.
    pub fn cell_value(&self, row: usize, column: usize) -> &str {
        self.store.value(row, column)
    }

    pub fn cell_snapshot(&self, row: usize, column: usize) -> CellSnapshot<'_> {
        self.store.snapshot(row, column)
    }

    /// Bulk-load values without repainting. Callers repaint via `expose` or
    /// damage reports once the widget is on screen.
    pub fn load_values(&mut self, values: &[Vec<String>]) {
        self.store.load(values);
    }

    /// Mutate one cell and repaint it if visible. Out-of-range coordinates
    /// warn and do nothing.
    pub fn update_cell(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        f: impl FnOnce(&mut Cell),
    ) {
        let Some(cell) = self.store.cell_mut(row, column) else {
            return;
        };
        f(cell);
        self.redraw_cell(host, row, column);
    }

    pub fn set_cell_value(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        value: impl Into<String>,
    ) {
        let value = value.into();
        self.update_cell(host, row, column, |cell| cell.value = value);
        // The editor shows the store's text; keep it in sync when the edited
        // cell is rewritten underneath it.
        if self.edit.editing_cell() == Some((row, column)) {
            host.set_editor_value(self.store.value(row, column));
        }
    }

    pub fn set_cell_selected(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        selected: bool,
    ) {
        self.update_cell(host, row, column, |cell| cell.selected = selected);
    }

    pub fn set_cell_highlighted(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        highlighted: bool,
    ) {
        self.update_cell(host, row, column, |cell| cell.highlighted = highlighted);
    }

    pub fn set_cell_colors(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        foreground: Option<u32>,
        background: Option<u32>,
    ) {
        self.update_cell(host, row, column, |cell| {
            cell.foreground = foreground;
            cell.background = background;
        });
    }

    /// Fill a whole row with one color pair.
    pub fn set_row_colors(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        foreground: Option<u32>,
        background: Option<u32>,
    ) {
        if row >= self.rows() {
            warn!(row, rows = self.rows(), "set_row_colors out of range, ignored");
            return;
        }
        for column in 0..self.columns() {
            self.set_cell_colors(host, row, column, foreground, background);
        }
    }

    /// Fill a whole column with one color pair.
    pub fn set_column_colors(
        &mut self,
        host: &mut impl GridHost,
        column: usize,
        foreground: Option<u32>,
        background: Option<u32>,
    ) {
        if column >= self.columns() {
            warn!(
                column,
                columns = self.columns(),
                "set_column_colors out of range, ignored"
            );
            return;
        }
        for row in 0..self.rows() {
            self.set_cell_colors(host, row, column, foreground, background);
        }
    }

    /// Attach or detach an embedded host widget, then place it.
    pub fn set_cell_widget(
        &mut self,
        host: &mut impl GridHost,
        row: usize,
        column: usize,
        widget: Option<u64>,
    ) {
        self.update_cell(host, row, column, |cell| cell.user_widget = widget);
        if let (Some(widget), Some((owner, rect))) = (widget, self.cell_rect(row, column)) {
            host.position_cell_widget(widget, owner, rect);
        }
    }

    // ------------------------------------------------------------------
    // Axis data

    pub fn row_label(&self, row: usize) -> &str {
        self.row_data.label(row)
    }

    pub fn column_label(&self, column: usize) -> &str {
        self.col_data.label(column)
    }

    pub fn set_row_labels(&mut self, host: &mut impl GridHost, labels: &[String]) {
        self.row_data.set_labels(labels);
        self.redraw_all(host);
    }

    pub fn set_column_labels(&mut self, host: &mut impl GridHost, labels: &[String]) {
        self.col_data.set_labels(labels);
        self.redraw_all(host);
    }

    pub fn row_height(&self, row: usize) -> i32 {
        self.rows.size_of(row)
    }

    pub fn column_width(&self, column: usize) -> i32 {
        self.columns.size_of(column)
    }

    /// Replace every row height and relayout.
    pub fn set_row_heights(&mut self, host: &mut impl GridHost, heights: &[i32]) {
        self.row_data.set_sizes(heights, self.cfg.default_row_height);
        self.geometry_changed(host);
    }

    /// Replace every column width and relayout.
    pub fn set_column_widths(&mut self, host: &mut impl GridHost, widths: &[i32]) {
        self.col_data.set_sizes(widths, self.cfg.default_column_width);
        self.geometry_changed(host);
    }

    pub fn set_row_height(&mut self, host: &mut impl GridHost, row: usize, height: i32) {
        self.row_data.set_size(row, height);
        self.geometry_changed(host);
    }

    pub fn set_column_width(&mut self, host: &mut impl GridHost, column: usize, width: i32) {
        self.col_data.set_size(column, width);
        self.geometry_changed(host);
    }

    /// Adopt new font metrics. Axes sized in font units change extent;
    /// pixel-sized axes are unaffected but the layout still refreshes.
    pub fn set_font_metrics(&mut self, host: &mut impl GridHost, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            warn!(width, height, "non-positive font metrics, ignored");
            return;
        }
        self.cfg.font_width = width;
        self.cfg.font_height = height;
        self.geometry_changed(host);
    }

    /// Rebuild geometry after a size change, refresh the layout and repaint.
    fn geometry_changed(&mut self, host: &mut impl GridHost) {
        self.rebuild_geometry();
        self.refresh_layout(host);
        self.redraw_all(host);
    }

    /// Place every visible embedded widget after a scroll or relayout.
    fn reposition_cell_widgets(&mut self, host: &mut impl GridHost) {
        let row_range: Vec<usize> = self.visible_row_indices().collect();
        let col_range: Vec<usize> = self.visible_column_indices().collect();
        for &row in &row_range {
            for &column in &col_range {
                let Some(widget) = self.store.cell(row, column).and_then(|c| c.user_widget) else {
                    continue;
                };
                if let Some((owner, rect)) = self.cell_rect(row, column) {
                    host.position_cell_widget(widget, owner, rect);
                }
            }
        }
    }

    /// Frozen indices plus the visible scrollable window, in order.
    fn visible_row_indices(&self) -> impl Iterator<Item = usize> {
        let (top, bottom) = self.visible_rows();
        let trailing_origin = self.rows.len().saturating_sub(self.cfg.trailing_fixed_rows);
        let len = self.rows.len();
        (0..self.cfg.fixed_rows.min(len))
            .chain(top..(bottom + 1).min(trailing_origin))
            .chain(trailing_origin..len)
    }

    fn visible_column_indices(&self) -> impl Iterator<Item = usize> {
        let (left, right) = self.visible_columns();
        let trailing_origin = self
            .columns
            .len()
            .saturating_sub(self.cfg.trailing_fixed_columns);
        let len = self.columns.len();
        (0..self.cfg.fixed_columns.min(len))
            .chain(left..(right + 1).min(trailing_origin))
            .chain(trailing_origin..len)
    }
}
