//! The relayout engine.
//!
//! Re-entered on every structural change, size-policy change, explicit
//! resize, or font/metric change. Produces a `LayoutFrame`: scrollbar
//! visibility and geometry, the visible extent of every band, and the pixel
//! rectangle of each of the seven display regions. A region that degenerates
//! to zero width or height is unmapped (`None`) rather than drawn with a
//! negative size.

use serde::{Deserialize, Serialize};

use crate::config::{GridConfig, ScrollbarPolicy};
use crate::rect::Rect;

use super::geometry::AxisGeometry;
use super::regions::{AxisContext, Region};
use super::viewport::Viewport;

/// Range, page and position of one scrollbar, plus its pixel rectangle.
/// The host renders the scrollbar; the grid only computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollbarState {
    pub rect: Rect,
    /// Total scrollable extent in pixels (minimum 1).
    pub maximum: i32,
    /// Visible extent in pixels (minimum 1).
    pub slider_size: i32,
    pub page_increment: i32,
    /// Current scroll origin.
    pub value: i32,
}

/// The output of one relayout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutFrame {
    /// Scrollbar states; `None` when hidden/unmapped.
    pub hsb: Option<ScrollbarState>,
    pub vsb: Option<ScrollbarState>,

    /// Visible band extents after fill distribution.
    pub visible_fixed_width: i32,
    pub visible_fixed_height: i32,
    pub visible_trailing_width: i32,
    pub visible_trailing_height: i32,
    pub visible_scroll_width: i32,
    pub visible_scroll_height: i32,

    /// Widget-relative positions of the three row bands.
    pub fixed_row_pos: i32,
    pub scroll_row_pos: i32,
    pub trailing_row_pos: i32,
    /// Widget-relative positions of the three column bands.
    pub fixed_col_pos: i32,
    pub scroll_col_pos: i32,
    pub trailing_col_pos: i32,

    /// Space consumed by a top-placed horizontal scrollbar.
    pub horiz_sb_offset: i32,
    /// Space consumed by a left-placed vertical scrollbar.
    pub vert_sb_offset: i32,

    regions: [Option<Rect>; 7],
}

impl LayoutFrame {
    /// Pixel rectangle of a region, or `None` when it is unmapped.
    pub fn region_rect(&self, region: Region) -> Option<Rect> {
        self.regions.get(region.index()).copied().flatten()
    }

    /// Iterate over the mapped regions and their rectangles.
    pub fn mapped_regions(&self) -> impl Iterator<Item = (Region, Rect)> + '_ {
        Region::ALL
            .iter()
            .filter_map(|&r| self.region_rect(r).map(|rect| (r, rect)))
    }

    /// Column-axis classifier context for the current layout.
    pub fn x_context<'a>(
        &self,
        cfg: &GridConfig,
        columns: &'a AxisGeometry,
        vp: &Viewport,
    ) -> AxisContext<'a> {
        AxisContext {
            geom: columns,
            fixed: cfg.fixed_columns,
            trailing: cfg.trailing_fixed_columns,
            origin: vp.horiz_origin,
            label_extent: cfg.row_label_width,
            sb_offset: self.vert_sb_offset,
            fixed_pos: self.fixed_col_pos,
            scroll_pos: self.scroll_col_pos,
            trailing_pos: self.trailing_col_pos,
            visible_fixed: self.visible_fixed_width,
            visible_scroll: self.visible_scroll_width,
            visible_trailing: self.visible_trailing_width,
        }
    }

    /// Row-axis classifier context for the current layout.
    pub fn y_context<'a>(
        &self,
        cfg: &GridConfig,
        rows: &'a AxisGeometry,
        vp: &Viewport,
    ) -> AxisContext<'a> {
        AxisContext {
            geom: rows,
            fixed: cfg.fixed_rows,
            trailing: cfg.trailing_fixed_rows,
            origin: vp.vert_origin,
            label_extent: cfg.column_label_height,
            sb_offset: self.horiz_sb_offset,
            fixed_pos: self.fixed_row_pos,
            scroll_pos: self.scroll_row_pos,
            trailing_pos: self.trailing_row_pos,
            visible_fixed: self.visible_fixed_height,
            visible_scroll: self.visible_scroll_height,
            visible_trailing: self.visible_trailing_height,
        }
    }
}

/// Decide scrollbar visibility for one axis.
fn wants_scrollbar(
    policy: ScrollbarPolicy,
    scrollable_indices: usize,
    available: i32,
    full: i32,
) -> bool {
    match policy {
        ScrollbarPolicy::Never => false,
        _ if scrollable_indices == 0 => false,
        ScrollbarPolicy::Always => true,
        ScrollbarPolicy::AsNeeded => available < full,
    }
}

/// Recompute the whole layout for the given widget size.
///
/// Mutates the viewport: visible extents are rewritten and scroll origins
/// clamped so previously-visible content stays as visible as possible.
pub fn relayout(
    cfg: &GridConfig,
    rows: &AxisGeometry,
    columns: &AxisGeometry,
    vp: &mut Viewport,
    widget_width: i32,
    widget_height: i32,
) -> LayoutFrame {
    let shadow = cfg.shadow_thickness;
    let trailing_row_origin = rows.len().saturating_sub(cfg.trailing_fixed_rows);
    let trailing_col_origin = columns.len().saturating_sub(cfg.trailing_fixed_columns);
    let scrollable_rows = trailing_row_origin.saturating_sub(cfg.fixed_rows);
    let scrollable_cols = trailing_col_origin.saturating_sub(cfg.fixed_columns);

    let fixed_width = columns.span(0, cfg.fixed_columns);
    let fixed_height = rows.span(0, cfg.fixed_rows);
    let trailing_width = columns.span(trailing_col_origin, columns.len());
    let trailing_height = rows.span(trailing_row_origin, rows.len());
    let non_fixed_width = columns.extent() - fixed_width - trailing_width;
    let non_fixed_height = rows.extent() - fixed_height - trailing_height;

    let full_width = columns.extent() + cfg.row_label_width + 2 * shadow;
    let full_height = rows.extent() + cfg.column_label_height + 2 * shadow;

    // Scrollbar visibility: decide the horizontal one first, then the
    // vertical with the reduced height, then recheck the horizontal because
    // the vertical bar may have consumed the width that made it fit. One
    // extra pass is enough; committing a bar never gives space back.
    let mut width = widget_width;
    let mut height = widget_height;

    let mut has_hsb = wants_scrollbar(cfg.hsb_policy, scrollable_cols, width, full_width);
    if has_hsb {
        height -= cfg.hsb_thickness;
    }
    let has_vsb = wants_scrollbar(cfg.vsb_policy, scrollable_rows, height, full_height);
    if has_vsb {
        width -= cfg.vsb_thickness;
        if !has_hsb && wants_scrollbar(cfg.hsb_policy, scrollable_cols, width, full_width) {
            has_hsb = true;
            height -= cfg.hsb_thickness;
        }
    }

    let mut frame = LayoutFrame {
        visible_fixed_width: fixed_width,
        visible_fixed_height: fixed_height,
        visible_trailing_width: trailing_width,
        visible_trailing_height: trailing_height,
        ..LayoutFrame::default()
    };

    // Visible extent of the scrollable columns, plus origin clamping.
    if width < full_width {
        let visible =
            width - (fixed_width + trailing_width + cfg.row_label_width + 2 * shadow);
        if visible <= 0 {
            frame.visible_scroll_width = 0;
            vp.horiz_origin = 0;
        } else {
            frame.visible_scroll_width = visible;
            vp.horiz_origin = Viewport::clamp_origin(vp.horiz_origin, non_fixed_width, visible);
        }
    } else {
        frame.visible_scroll_width = non_fixed_width.max(0);
        if cfg.fill {
            let empty = width - full_width;
            if cfg.trailing_fixed_columns == 0 {
                frame.visible_scroll_width += empty;
            } else {
                frame.visible_trailing_width += empty;
            }
        }
        vp.horiz_origin = 0;
    }

    // Same for the rows.
    if height < full_height {
        let visible =
            height - (fixed_height + trailing_height + cfg.column_label_height + 2 * shadow);
        if visible <= 0 {
            frame.visible_scroll_height = 0;
            vp.vert_origin = 0;
        } else {
            frame.visible_scroll_height = visible;
            vp.vert_origin = Viewport::clamp_origin(vp.vert_origin, non_fixed_height, visible);
        }
    } else {
        frame.visible_scroll_height = non_fixed_height.max(0);
        if cfg.fill {
            let empty = height - full_height;
            if cfg.trailing_fixed_rows == 0 {
                frame.visible_scroll_height += empty;
            } else {
                frame.visible_trailing_height += empty;
            }
        }
        vp.vert_origin = 0;
    }

    vp.visible_width = frame.visible_scroll_width;
    vp.visible_height = frame.visible_scroll_height;

    // Horizontal scrollbar geometry.
    if has_hsb {
        let extent = if cfg.fill {
            frame.visible_scroll_width
        } else {
            non_fixed_width.min(frame.visible_scroll_width)
        };
        if extent > 0 {
            let mut x = cfg.row_label_width;
            if has_vsb && cfg.scrollbar_left {
                x += cfg.vsb_thickness;
            }
            if cfg.fixed_columns > 0 {
                x += frame.visible_fixed_width + shadow;
            }
            let y = if cfg.scrollbar_top {
                0
            } else if height < full_height || cfg.fill {
                widget_height - cfg.hsb_thickness
            } else {
                full_height + cfg.space
            };
            let mut bar_width = extent;
            bar_width += shadow
                * (i32::from(cfg.fixed_columns == 0) + i32::from(cfg.trailing_fixed_columns == 0));
            let slider = non_fixed_width.min(frame.visible_scroll_width).max(1);
            frame.hsb = Some(ScrollbarState {
                rect: Rect::new(x, y, bar_width, cfg.hsb_thickness),
                maximum: non_fixed_width.max(1),
                slider_size: slider,
                page_increment: slider,
                value: vp.horiz_origin,
            });
        }
    }

    // Vertical scrollbar geometry.
    if has_vsb {
        let extent = if cfg.fill {
            frame.visible_scroll_height
        } else {
            non_fixed_height.min(frame.visible_scroll_height)
        };
        if extent > 0 {
            let mut y = cfg.column_label_height;
            if has_hsb && cfg.scrollbar_top {
                y += cfg.hsb_thickness;
            }
            if cfg.fixed_rows > 0 {
                y += frame.visible_fixed_height + shadow;
            }
            let x = if cfg.scrollbar_left {
                0
            } else if width < full_width || cfg.fill {
                widget_width - cfg.vsb_thickness
            } else {
                full_width + cfg.space
            };
            let mut bar_height = extent;
            bar_height += shadow
                * (i32::from(cfg.fixed_rows == 0) + i32::from(cfg.trailing_fixed_rows == 0));
            let slider = non_fixed_height.min(frame.visible_scroll_height).max(1);
            frame.vsb = Some(ScrollbarState {
                rect: Rect::new(x, y, cfg.vsb_thickness, bar_height),
                maximum: non_fixed_height.max(1),
                slider_size: slider,
                page_increment: slider,
                value: vp.vert_origin,
            });
        }
    }

    frame.horiz_sb_offset = if frame.hsb.is_some() && cfg.scrollbar_top {
        cfg.hsb_thickness
    } else {
        0
    };
    frame.vert_sb_offset = if frame.vsb.is_some() && cfg.scrollbar_left {
        cfg.vsb_thickness
    } else {
        0
    };

    // Band positions follow from the extents.
    frame.fixed_row_pos = frame.horiz_sb_offset + cfg.column_label_height + shadow;
    frame.scroll_row_pos = frame.fixed_row_pos + frame.visible_fixed_height;
    frame.trailing_row_pos = frame.scroll_row_pos + frame.visible_scroll_height;
    frame.fixed_col_pos = frame.vert_sb_offset + cfg.row_label_width + shadow;
    frame.scroll_col_pos = frame.fixed_col_pos + frame.visible_fixed_width;
    frame.trailing_col_pos = frame.scroll_col_pos + frame.visible_scroll_width;

    // The seven region rectangles; zero-size regions stay unmapped.
    let mut set = |region: Region, rect: Rect| {
        if let Some(slot) = frame.regions.get_mut(region.index()) {
            *slot = (!rect.is_empty()).then_some(rect);
        }
    };

    set(
        Region::Body,
        Rect::new(
            frame.scroll_col_pos,
            frame.scroll_row_pos,
            frame.visible_scroll_width,
            frame.visible_scroll_height,
        ),
    );
    set(
        Region::TopBand,
        Rect::new(
            frame.scroll_col_pos,
            frame.fixed_row_pos,
            frame.visible_scroll_width,
            frame.visible_fixed_height,
        ),
    );
    set(
        Region::LeftBand,
        Rect::new(
            frame.fixed_col_pos,
            frame.scroll_row_pos,
            frame.visible_fixed_width,
            frame.visible_scroll_height,
        ),
    );
    set(
        Region::RightBand,
        Rect::new(
            frame.trailing_col_pos,
            frame.scroll_row_pos,
            frame.visible_trailing_width,
            frame.visible_scroll_height,
        ),
    );
    set(
        Region::BottomBand,
        Rect::new(
            frame.scroll_col_pos,
            frame.trailing_row_pos,
            frame.visible_scroll_width,
            frame.visible_trailing_height,
        ),
    );
    set(
        Region::RowLabels,
        Rect::new(
            frame.vert_sb_offset,
            frame.scroll_row_pos,
            cfg.row_label_width,
            frame.visible_scroll_height,
        ),
    );
    set(
        Region::ColumnLabels,
        Rect::new(
            frame.scroll_col_pos,
            frame.horiz_sb_offset,
            frame.visible_scroll_width,
            cfg.column_label_height,
        ),
    );

    frame
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::SizeUnit;

    fn geom(n: usize, size: i32) -> AxisGeometry {
        AxisGeometry::build(&vec![size; n], SizeUnit::Pixels, 1, 0)
    }

    fn base_cfg() -> GridConfig {
        GridConfig {
            rows: 10,
            columns: 10,
            hsb_thickness: 10,
            vsb_thickness: 10,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_no_scrollbars_when_content_fits() {
        let cfg = base_cfg();
        let rows = geom(10, 20); // 200px
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 300, 300);
        assert!(frame.hsb.is_none());
        assert!(frame.vsb.is_none());
        assert_eq!(frame.visible_scroll_width, 200);
        assert_eq!(frame.visible_scroll_height, 200);
    }

    #[test]
    fn test_as_needed_scrollbars_appear() {
        let cfg = base_cfg();
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 120, 120);
        let hsb = frame.hsb.unwrap();
        let vsb = frame.vsb.unwrap();
        // available 120 - vsb 10 = 110 visible
        assert_eq!(frame.visible_scroll_width, 110);
        assert_eq!(frame.visible_scroll_height, 110);
        assert_eq!(hsb.maximum, 200);
        assert_eq!(vsb.slider_size, 110);
    }

    #[test]
    fn test_cross_axis_second_pass() {
        // Content fits the width exactly, but the vertical scrollbar steals
        // enough to force the horizontal one as well.
        let cfg = base_cfg();
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 200, 120);
        assert!(frame.vsb.is_some());
        assert!(frame.hsb.is_some(), "vsb must trigger hsb on second pass");
    }

    #[test]
    fn test_relayout_idempotent() {
        let cfg = GridConfig {
            fixed_rows: 1,
            fixed_columns: 1,
            trailing_fixed_rows: 1,
            row_label_width: 25,
            column_label_height: 15,
            ..base_cfg()
        };
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let first = relayout(&cfg, &rows, &cols, &mut vp, 150, 140);
        let second = relayout(&cfg, &rows, &cols, &mut vp, 150, 140);
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_region_unmapped() {
        let cfg = GridConfig {
            fixed_rows: 2,
            ..base_cfg()
        };
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        // Height fits only the frozen band; the body degenerates.
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 300, 40);
        assert!(frame.region_rect(Region::Body).is_none());
        assert!(frame.region_rect(Region::TopBand).is_some());
        assert_eq!(vp.vert_origin, 0);
    }

    #[test]
    fn test_origin_pulled_back_when_viewport_grows() {
        let cfg = base_cfg();
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        relayout(&cfg, &rows, &cols, &mut vp, 120, 120);
        vp.vert_origin = 90; // maximum for a 110px viewport over 200px
        relayout(&cfg, &rows, &cols, &mut vp, 120, 160);
        // 160 - hsb 10 = 150 visible; max origin is 50
        assert_eq!(vp.vert_origin, 50);
    }

    #[test]
    fn test_fill_extends_scrollable_band() {
        let cfg = GridConfig {
            fill: true,
            ..base_cfg()
        };
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 300, 300);
        assert_eq!(frame.visible_scroll_width, 300);
        assert_eq!(frame.visible_scroll_height, 300);
    }

    #[test]
    fn test_fill_extends_trailing_band() {
        let cfg = GridConfig {
            fill: true,
            trailing_fixed_columns: 2,
            ..base_cfg()
        };
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 300, 200);
        assert_eq!(frame.visible_trailing_width, 40 + 100);
        assert_eq!(frame.visible_scroll_width, 160);
    }

    #[test]
    fn test_label_bands_positioned() {
        let cfg = GridConfig {
            row_label_width: 30,
            column_label_height: 16,
            ..base_cfg()
        };
        let rows = geom(10, 20);
        let cols = geom(10, 20);
        let mut vp = Viewport::new();
        let frame = relayout(&cfg, &rows, &cols, &mut vp, 400, 400);
        let row_labels = frame.region_rect(Region::RowLabels).unwrap();
        assert_eq!(row_labels.x, 0);
        assert_eq!(row_labels.y, 16);
        assert_eq!(row_labels.width, 30);
        let col_labels = frame.region_rect(Region::ColumnLabels).unwrap();
        assert_eq!(col_labels.x, 30);
        assert_eq!(col_labels.y, 0);
        assert_eq!(col_labels.height, 16);
    }
}
