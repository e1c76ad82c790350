mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod grid;
pub use grid::*;

mod image;
pub use self::image::*;

/// Geometry, margins and text wrapping used to lay things out inside cells
pub mod layout;
pub use layout::{Margins, TextMeasure};

mod page;
pub use page::*;

pub mod pagesize;

pub mod placer;

mod props;
pub use props::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod table;
pub use table::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
