//! Layout: axis geometry tables, viewport math, region classification, and
//! the relayout engine.

pub mod geometry;
pub mod regions;
pub mod relayout;
pub mod viewport;

pub use geometry::{size_to_pixels, AxisGeometry};
pub use regions::{cell_owner, classify, AxisBand, AxisContext, AxisHit, CellOwner, Region};
pub use relayout::{relayout, LayoutFrame, ScrollbarState};
pub use viewport::Viewport;
