//! Grid configuration.
//!
//! `GridConfig` collects the construction-time knobs: initial dimensions,
//! frozen-band counts, label-band sizes, font metrics for unit-sized axes,
//! and scrollbar policy. Everything here is plain data; the grid validates
//! it once at construction and on each reconfiguration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default column width in pixels.
pub const DEFAULT_COL_WIDTH: i32 = 64;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: i32 = 20;

/// How sizes in an axis's size array are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    /// Sizes are pixel counts, used as-is.
    Pixels,
    /// Sizes are multiples of a font metric, plus a fixed border on each side:
    /// `px = size * font_metric + 2 * border`.
    FontUnits,
}

/// Scrollbar display policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollbarPolicy {
    /// Never show the scrollbar.
    Never,
    /// Always show the scrollbar.
    Always,
    /// Show the scrollbar only when content exceeds the available extent.
    AsNeeded,
}

/// Construction-time grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Initial row count.
    pub rows: usize,
    /// Initial column count.
    pub columns: usize,

    /// Rows pinned to the top edge.
    pub fixed_rows: usize,
    /// Columns pinned to the left edge.
    pub fixed_columns: usize,
    /// Rows pinned to the bottom edge.
    pub trailing_fixed_rows: usize,
    /// Columns pinned to the right edge.
    pub trailing_fixed_columns: usize,

    /// Unit of the row-height array.
    pub row_height_unit: SizeUnit,
    /// Unit of the column-width array.
    pub column_width_unit: SizeUnit,
    /// Character cell width, used when `column_width_unit` is `FontUnits`.
    pub font_width: i32,
    /// Text line height, used when `row_height_unit` is `FontUnits`.
    pub font_height: i32,
    /// Horizontal border added around unit-sized columns.
    pub cell_border_width: i32,
    /// Vertical border added around unit-sized rows.
    pub cell_border_height: i32,

    /// Default row height (in `row_height_unit`) for rows without an explicit size.
    pub default_row_height: i32,
    /// Default column width (in `column_width_unit`) for columns without an explicit size.
    pub default_column_width: i32,

    /// Width of the row-label band; 0 hides row labels.
    pub row_label_width: i32,
    /// Height of the column-label band; 0 hides column labels.
    pub column_label_height: i32,

    /// Shadow drawn around the cell area by the host.
    pub shadow_thickness: i32,
    /// Gap between the cell area and a scrollbar when the widget is larger
    /// than its content.
    pub space: i32,

    pub hsb_policy: ScrollbarPolicy,
    pub vsb_policy: ScrollbarPolicy,
    /// Height of the horizontal scrollbar when visible.
    pub hsb_thickness: i32,
    /// Width of the vertical scrollbar when visible.
    pub vsb_thickness: i32,
    /// Place the horizontal scrollbar above the cells instead of below.
    pub scrollbar_top: bool,
    /// Place the vertical scrollbar left of the cells instead of right.
    pub scrollbar_left: bool,

    /// Merge unused trailing space into a neighboring band instead of leaving
    /// it blank. The merged-in space is not part of any cell.
    pub fill: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            fixed_rows: 0,
            fixed_columns: 0,
            trailing_fixed_rows: 0,
            trailing_fixed_columns: 0,
            row_height_unit: SizeUnit::Pixels,
            column_width_unit: SizeUnit::Pixels,
            font_width: 8,
            font_height: 16,
            cell_border_width: 2,
            cell_border_height: 2,
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_column_width: DEFAULT_COL_WIDTH,
            row_label_width: 0,
            column_label_height: 0,
            shadow_thickness: 0,
            space: 0,
            hsb_policy: ScrollbarPolicy::AsNeeded,
            vsb_policy: ScrollbarPolicy::AsNeeded,
            hsb_thickness: 14,
            vsb_thickness: 14,
            scrollbar_top: false,
            scrollbar_left: false,
            fill: false,
        }
    }
}

impl GridConfig {
    /// Check the invariants that cannot be repaired by clamping.
    pub fn validate(&self) -> Result<()> {
        self.validate_counts(self.rows, self.columns)
    }

    /// Validate the frozen-band invariant against explicit axis counts.
    /// Used after structural edits, when live counts differ from `self.rows`.
    pub fn validate_counts(&self, rows: usize, columns: usize) -> Result<()> {
        if self.fixed_rows + self.trailing_fixed_rows > rows {
            return Err(GridError::Config(format!(
                "fixed rows {} + trailing fixed rows {} exceed row count {rows}",
                self.fixed_rows, self.trailing_fixed_rows
            )));
        }
        if self.fixed_columns + self.trailing_fixed_columns > columns {
            return Err(GridError::Config(format!(
                "fixed columns {} + trailing fixed columns {} exceed column count {columns}",
                self.fixed_columns, self.trailing_fixed_columns
            )));
        }
        if self.font_width <= 0 || self.font_height <= 0 {
            return Err(GridError::Config("font metrics must be positive".into()));
        }
        if self.cell_border_width < 0 || self.cell_border_height < 0 {
            return Err(GridError::Config("cell borders must be non-negative".into()));
        }
        Ok(())
    }

    /// Font metric for the row axis in the configured unit.
    pub fn row_font_metric(&self) -> i32 {
        self.font_height
    }

    /// Font metric for the column axis in the configured unit.
    pub fn column_font_metric(&self) -> i32 {
        self.font_width
    }
}
