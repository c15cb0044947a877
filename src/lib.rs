//! gridview - virtualized 2-D grid display engine
//!
//! The display core of a spreadsheet-style widget, decoupled from any
//! windowing system:
//! - Frozen leading/trailing row and column bands plus label bands
//! - Cached cumulative geometry: O(1) index→pixel, O(log n) pixel→index
//! - Blit scrolling with a per-region ledger that reconciles asynchronous
//!   damage reports against in-flight scrolls
//! - A relayout engine for scrollbar policy, fill distribution and region
//!   placement
//! - A single in-place cell editor with commit/cancel/veto semantics
//!
//! The embedding implements [`GridHost`] and forwards its resize, expose and
//! scroll events; the grid calls back with primitive draw, blit and editor
//! operations.
//!
//! # Usage
//!
//! ```no_run
//! use gridview::{Grid, GridConfig, GridHost};
//!
//! # struct MyHost;
//! # impl GridHost for MyHost {
//! #     fn scroll_region(&mut self, _: gridview::Region, _: gridview::Rect, _: i32, _: i32) {}
//! #     fn draw_cell(&mut self, _: &gridview::CellDrawParams<'_>) {}
//! #     fn draw_row_label(&mut self, _: &gridview::LabelDrawParams<'_>) {}
//! #     fn draw_column_label(&mut self, _: &gridview::LabelDrawParams<'_>) {}
//! # }
//! # fn main() -> Result<(), gridview::GridError> {
//! let mut host = MyHost;
//! let mut grid = Grid::new(GridConfig {
//!     rows: 100,
//!     columns: 20,
//!     fixed_rows: 1,
//!     ..GridConfig::default()
//! })?;
//! grid.resize(&mut host, 800, 600);
//! grid.set_vert_origin(&mut host, 120);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod layout;
pub mod rect;
pub mod scroll_ledger;
pub mod store;

pub use config::{GridConfig, ScrollbarPolicy, SizeUnit};
pub use error::{GridError, Result};
pub use grid::{Grid, GridHit};
pub use host::{CellDrawParams, GridHost, LabelDrawParams, LeaveCellDecision};
pub use layout::{CellOwner, Region, ScrollbarState};
pub use rect::Rect;
pub use scroll_ledger::DamageKind;
pub use store::{Cell, CellSnapshot, ShadowStyle};

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
