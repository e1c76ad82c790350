use crate::units::*;

/// A rectangle in PDF space, specified by two opposite corners. The origin is
/// the bottom-left corner of the page.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// Convert a box measured from the top-left corner of a page of height
    /// `page_height` into PDF space
    pub fn from_top_left(x: Pt, y: Pt, width: Pt, height: Pt, page_height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: page_height - y - height,
            x2: x + width,
            y2: page_height - y,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

/// Position and size of a grid slot, measured from the top-left corner of the
/// page. Cells are produced by the grid for the duration of a column body.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Cell {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Cell {
    pub fn new(x: Pt, y: Pt, width: Pt, height: Pt) -> Cell {
        Cell {
            x,
            y,
            width,
            height,
        }
    }
}

/// The rectangle an asset is drawn into, measured from the top-left corner of
/// the page (or of the cell, for the vertical component of a freshly computed
/// placement)
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Placement {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Placement {
    /// Shift the placement down by `dy`
    pub fn offset_y(self, dy: Pt) -> Placement {
        Placement {
            y: self.y + dy,
            ..self
        }
    }
}
