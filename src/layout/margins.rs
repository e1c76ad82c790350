use crate::units::Pt;

/// Page margins. The grid starts laying out rows at the top-left margin
/// corner and breaks to a new page when a row would cross the bottom margin.
/// Column widths are fractions of the space between the left and right margins.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Width left for content on a page `page_width` wide
    pub fn useful_width(&self, page_width: Pt) -> Pt {
        (page_width - self.left - self.right).max(Pt(0.0))
    }

    /// Height left for content on a page `page_height` tall
    pub fn useful_height(&self, page_height: Pt) -> Pt {
        (page_height - self.top - self.bottom).max(Pt(0.0))
    }
}
