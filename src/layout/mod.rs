//! Measurement and placement: everything that turns sizes into coordinates
//! before anything is drawn.
//!
//! - [`wrap_lines`](crate::layout::wrap_lines) / [`count_wrapped_lines`](crate::layout::count_wrapped_lines)
//!   break text into the lines it occupies in a column, which drives row heights
//! - [`centered_placement`](crate::layout::centered_placement) and
//!   [`anchored_placement`](crate::layout::anchored_placement) fit an asset into a
//!   grid cell while keeping its aspect ratio
//!
//! # Example
//!
//! ```
//! use pdf_grid::{Cell, Pt};
//! use pdf_grid::layout::centered_placement;
//!
//! let cell = Cell::new(Pt(72.0), Pt(100.0), Pt(200.0), Pt(100.0));
//! let placement = centered_placement(400.0, 100.0, &cell, 100.0);
//! assert_eq!(placement.width, Pt(200.0));
//! assert_eq!(placement.height, Pt(50.0));
//! ```

mod geometry;
mod margins;
mod text;

pub use geometry::*;
pub use margins::*;
pub use text::*;
