//! The grid's seven display regions and the pixel→cell classifier.
//!
//! A widget-relative coordinate is first assigned to a band (label band,
//! leading frozen, scrollable, trailing frozen), translated into the virtual
//! coordinate space of the geometry table, stripped of any fill extent, and
//! only then resolved to an index.

use serde::{Deserialize, Serialize};

use super::geometry::AxisGeometry;

/// The seven rectangular display areas of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Scrollable cell body.
    Body,
    /// Frozen rows along the top edge.
    TopBand,
    /// Frozen columns along the left edge.
    LeftBand,
    /// Frozen columns along the right edge.
    RightBand,
    /// Frozen rows along the bottom edge.
    BottomBand,
    /// Row-label band (scrolls vertically with the body).
    RowLabels,
    /// Column-label band (scrolls horizontally with the body).
    ColumnLabels,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Body,
        Region::TopBand,
        Region::LeftBand,
        Region::RightBand,
        Region::BottomBand,
        Region::RowLabels,
        Region::ColumnLabels,
    ];

    /// Stable index into per-region arrays.
    pub fn index(self) -> usize {
        match self {
            Region::Body => 0,
            Region::TopBand => 1,
            Region::LeftBand => 2,
            Region::RightBand => 3,
            Region::BottomBand => 4,
            Region::RowLabels => 5,
            Region::ColumnLabels => 6,
        }
    }

    /// True if a vertical scroll moves this region's pixels.
    pub fn scrolls_vertically(self) -> bool {
        matches!(
            self,
            Region::Body | Region::LeftBand | Region::RightBand | Region::RowLabels
        )
    }

    /// True if a horizontal scroll moves this region's pixels.
    pub fn scrolls_horizontally(self) -> bool {
        matches!(
            self,
            Region::Body | Region::TopBand | Region::BottomBand | Region::ColumnLabels
        )
    }
}

/// Who owns the surface a given cell is drawn on. Cells in the corner
/// intersections of frozen rows and frozen columns (and all labels of frozen
/// indices) live on the widget frame itself rather than on a clip region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOwner {
    Region(Region),
    Frame,
}

/// Per-axis classification of a cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBand {
    LeadingFixed,
    Scrollable,
    TrailingFixed,
}

/// Result of classifying one widget-relative coordinate on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisHit {
    /// Inside the label band; `local` is relative to the band edge.
    Label { local: i32 },
    /// Inside a cell band; `local` is relative to the resolved index.
    Cell {
        band: AxisBand,
        index: usize,
        local: i32,
    },
    /// Outside every band on this axis.
    Outside,
}

impl AxisHit {
    pub fn is_outside(&self) -> bool {
        matches!(self, AxisHit::Outside)
    }
}

/// Everything the classifier needs to know about one axis of the current
/// layout. Built by `LayoutFrame` accessors; plain data otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AxisContext<'a> {
    pub geom: &'a AxisGeometry,
    /// Leading frozen index count.
    pub fixed: usize,
    /// Trailing frozen index count.
    pub trailing: usize,
    /// Scroll origin of the scrollable band.
    pub origin: i32,
    /// Extent of the label band (0 = no labels).
    pub label_extent: i32,
    /// Space consumed by a leading-edge scrollbar.
    pub sb_offset: i32,
    /// Widget-relative position of the leading frozen band.
    pub fixed_pos: i32,
    /// Widget-relative position of the scrollable band.
    pub scroll_pos: i32,
    /// Widget-relative position of the trailing frozen band.
    pub trailing_pos: i32,
    /// Visible extents, after fill distribution.
    pub visible_fixed: i32,
    pub visible_scroll: i32,
    pub visible_trailing: i32,
}

impl<'a> AxisContext<'a> {
    /// First index of the trailing frozen band.
    pub fn trailing_origin(&self) -> usize {
        self.geom.len().saturating_sub(self.trailing)
    }

    /// Band classification of an index (independent of pixel coordinates).
    pub fn band_of(&self, index: usize) -> AxisBand {
        if index < self.fixed {
            AxisBand::LeadingFixed
        } else if index >= self.trailing_origin() {
            AxisBand::TrailingFixed
        } else {
            AxisBand::Scrollable
        }
    }

    /// Widget-relative pixel position of an index's leading edge.
    pub fn index_to_widget_pos(&self, index: usize) -> i32 {
        let geom = self.geom;
        if index < self.fixed {
            self.fixed_pos + geom.position_of(index)
        } else if index >= self.trailing_origin() {
            self.trailing_pos + geom.position_of(index) - geom.position_of(self.trailing_origin())
        } else {
            self.scroll_pos + geom.position_of(index) - geom.span(0, self.fixed) - self.origin
        }
    }
}

/// Map a widget-relative coordinate to a label, a cell index, or nothing.
///
/// Fill extent (visible band space beyond the last real index) resolves to
/// the band's last index, matching the leniency of `index_at`.
pub fn classify(ctx: &AxisContext<'_>, coord: i32) -> AxisHit {
    let geom = ctx.geom;

    if ctx.label_extent > 0
        && coord >= ctx.sb_offset
        && coord < ctx.sb_offset + ctx.label_extent
    {
        return AxisHit::Label {
            local: coord - ctx.sb_offset,
        };
    }

    if geom.is_empty() {
        return AxisHit::Outside;
    }

    let (band, virtual_coord) = if coord >= ctx.fixed_pos
        && coord < ctx.fixed_pos + ctx.visible_fixed
    {
        let vc = coord - ctx.fixed_pos;
        // Fill space past the last fixed index clamps to that index.
        if vc >= geom.position_of(ctx.fixed) {
            let index = ctx.fixed.saturating_sub(1);
            return AxisHit::Cell {
                band: AxisBand::LeadingFixed,
                index,
                local: vc - geom.position_of(index),
            };
        }
        (AxisBand::LeadingFixed, vc)
    } else if coord >= ctx.trailing_pos && coord < ctx.trailing_pos + ctx.visible_trailing {
        let vc = coord - (ctx.trailing_pos - geom.position_of(ctx.trailing_origin()));
        if vc >= geom.extent() {
            let index = geom.len() - 1;
            return AxisHit::Cell {
                band: AxisBand::TrailingFixed,
                index,
                local: vc - geom.position_of(index),
            };
        }
        (AxisBand::TrailingFixed, vc)
    } else if coord >= ctx.scroll_pos && coord < ctx.scroll_pos + ctx.visible_scroll {
        let vc = coord - (ctx.scroll_pos - ctx.origin - geom.span(0, ctx.fixed));
        if vc >= geom.position_of(ctx.trailing_origin()) {
            let index = ctx.trailing_origin().saturating_sub(1);
            return AxisHit::Cell {
                band: AxisBand::Scrollable,
                index,
                local: vc - geom.position_of(index),
            };
        }
        (AxisBand::Scrollable, vc)
    } else {
        return AxisHit::Outside;
    };

    let index = geom.index_of_pos(virtual_coord);
    AxisHit::Cell {
        band,
        index,
        local: virtual_coord - geom.position_of(index),
    }
}

/// Which surface draws the cell at (row, column).
pub fn cell_owner(
    row_ctx: &AxisContext<'_>,
    col_ctx: &AxisContext<'_>,
    row: usize,
    column: usize,
) -> CellOwner {
    use AxisBand::{LeadingFixed, Scrollable, TrailingFixed};
    match (row_ctx.band_of(row), col_ctx.band_of(column)) {
        (Scrollable, Scrollable) => CellOwner::Region(Region::Body),
        (Scrollable, LeadingFixed) => CellOwner::Region(Region::LeftBand),
        (Scrollable, TrailingFixed) => CellOwner::Region(Region::RightBand),
        (LeadingFixed, Scrollable) => CellOwner::Region(Region::TopBand),
        (TrailingFixed, Scrollable) => CellOwner::Region(Region::BottomBand),
        // Fixed/fixed corners are drawn on the widget frame.
        _ => CellOwner::Frame,
    }
}
