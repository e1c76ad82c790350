//! The grid system: rows stacked down the page, each split into columns that
//! are sized as a fraction of [GRID_SUM].
//!
//! Nesting is enforced by the types: [GridHost::row] hands its body a
//! [RowHost], which is the only way to create columns, and a column body
//! receives the [CellHost] for that column, which is the only way to draw text
//! and images.
//!
//! ```
//! use pdf_grid::{Grid, GridHost, RowHost, CellHost, TextProps, Margins, Pt, TextMeasure, TextStyle};
//! use pdf_grid::pagesize;
//!
//! struct Mono;
//! impl TextMeasure for Mono {
//!     fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
//!         style.size * (0.6 * text.chars().count() as f32)
//!     }
//! }
//!
//! let mut grid = Grid::new(pagesize::A4, Margins::all(Pt(36.0)), Mono, "mono");
//! grid.row(Pt(20.0), &mut |row: &mut dyn RowHost| {
//!     row.col(4, &mut |cell: &mut dyn CellHost| cell.text("left", &TextProps::default()));
//!     row.col_space(4);
//!     row.col(4, &mut |cell: &mut dyn CellHost| cell.text("right", &TextProps::default()));
//! });
//! assert_eq!(grid.offset_y(), Pt(20.0));
//! ```

use crate::canvas::{Canvas, PdfCanvas};
use crate::colour::Colour;
use crate::document::Document;
use crate::font::{FontBook, FontStyle, TextStyle};
use crate::image::Extension;
use crate::layout::{count_wrapped_lines, wrap_lines, Margins, TextMeasure};
use crate::pagesize::PageSize;
use crate::placer;
use crate::props::{Align, LineStyle, RectProps, TextProps};
use crate::rect::Cell;
use crate::units::Pt;
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Column sizes in a row are expressed as parts of this total
pub const GRID_SUM: f32 = 12.0;

/// Lays out rows down the page
pub trait GridHost {
    /// Add a row of `height`; columns are created inside `body`
    fn row(&mut self, height: Pt, body: &mut dyn FnMut(&mut dyn RowHost));

    /// A horizontal rule across the content width, centered in `space_height`
    fn line(&mut self, space_height: Pt, style: &LineStyle);

    /// Colour cells are filled with from now on. White means no fill.
    fn set_background_colour(&mut self, colour: Colour);

    /// 0-based index of the page rows are currently added to
    fn current_page_index(&self) -> usize;

    fn page_size(&self) -> PageSize;

    fn page_margins(&self) -> Margins;
}

/// Splits a row into columns
pub trait RowHost {
    /// Add a column `grid_size` parts of [GRID_SUM] wide; contents are drawn inside `body`
    fn col(&mut self, grid_size: u32, body: &mut dyn FnMut(&mut dyn CellHost));

    /// Skip `grid_size` parts of the row, leaving them empty
    fn col_space(&mut self, grid_size: u32);

    fn set_background_colour(&mut self, colour: Colour);
}

/// Draws inside a single column
pub trait CellHost {
    /// Where this column sits on the page
    fn cell(&self) -> Cell;

    /// Draw text, wrapped to the width of the cell
    fn text(&mut self, text: &str, props: &TextProps);

    fn image_from_file(&mut self, path: &Path, props: &RectProps) -> Result<()>;

    /// Draw a base64-encoded image whose decoded bytes are in `extension` format
    fn image_from_encoded(&mut self, payload: &str, extension: Extension, props: &RectProps) -> Result<()>;
}

/// Access to the font text is currently being set in
pub trait FontMetrics {
    fn current_font(&self) -> TextStyle;

    /// Font sizes divided by this give line heights in page units
    fn scale_factor(&self) -> f32;
}

/// Counts how many lines text needs in a column. Counting selects the font
/// described by `props`, which then becomes the [FontMetrics::current_font].
pub trait LineCounter {
    fn lines_quantity(&mut self, text: &str, props: &TextProps, column_width: Pt) -> usize;
}

/// The grid over a [PdfCanvas]. Rows that do not fit in the space left on the
/// current page start a new page.
pub struct Grid<M: TextMeasure> {
    canvas: PdfCanvas,
    measure: M,
    /// distance from the top margin to where the next row starts
    offset_y: Pt,
    default_family: String,
    current_font: TextStyle,
    scale_factor: f32,
}

impl<M: TextMeasure> Grid<M> {
    /// Create a grid on a fresh single-page document. Text without an explicit
    /// family is set in `default_family`.
    pub fn new<S: ToString>(page_size: PageSize, margins: Margins, measure: M, default_family: S) -> Grid<M> {
        let default_family = default_family.to_string();
        Grid {
            canvas: PdfCanvas::new(page_size, margins),
            measure,
            offset_y: Pt(0.0),
            current_font: TextStyle::new(&default_family, FontStyle::Normal, Pt(10.0)),
            default_family,
            scale_factor: 1.0,
        }
    }

    /// Set the ratio between font sizes and line heights, modifying `self`
    pub fn set_scale_factor(&mut self, scale_factor: f32) -> &mut Self {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
        self
    }

    /// Set the font used until text selects another one, modifying `self`
    pub fn default_font(&mut self, style: FontStyle, size: Pt) -> &mut Self {
        self.current_font = TextStyle::new(&self.default_family, style, size);
        self
    }

    pub fn offset_y(&self) -> Pt {
        self.offset_y
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn canvas(&self) -> &PdfCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PdfCanvas {
        &mut self.canvas
    }

    pub fn document(&self) -> &Document {
        self.canvas.document()
    }

    /// Start a new page; following rows are laid out from its top margin
    pub fn add_page(&mut self) {
        self.canvas.add_page();
        self.offset_y = Pt(0.0);
    }

    pub fn into_parts(self) -> (Document, M) {
        (self.canvas.into_document(), self.measure)
    }

    fn useful_width(&self) -> Pt {
        self.canvas.page_margins().useful_width(self.canvas.page_dimensions().0)
    }

    /// Break to a new page if `height` does not fit in what is left of this one.
    /// A page that is still empty is kept even if the row overflows it.
    fn reserve(&mut self, height: Pt) {
        let available = self
            .canvas
            .page_margins()
            .useful_height(self.canvas.page_dimensions().1);
        if self.offset_y > Pt(0.0) && self.offset_y + height > available {
            log::debug!(
                "{height} does not fit below {} on page {}",
                self.offset_y,
                self.canvas.current_page_index() + 1
            );
            self.add_page();
        }
    }

    fn draw_text(&mut self, cell: Cell, text: &str, props: &TextProps) {
        let style = props.text_style(&self.default_family);
        let width = props.text_width(cell.width);
        let lines = if props.extrapolate {
            vec![text.to_string()]
        } else {
            wrap_lines(&self.measure, text, &style, width)
        };

        let line_height = style.size / self.scale_factor;
        for (i, line) in lines.iter().enumerate() {
            let line_width = self.measure.width_of_text(line, &style);
            let x = match props.align {
                Align::Left => cell.x + props.left,
                Align::Center => cell.x + props.left + (width - line_width) / 2.0,
                Align::Right => cell.x + cell.width - props.right - line_width,
            };
            let baseline = cell.y + props.top + line_height * (i + 1) as f32;
            self.canvas.draw_text(line, (x, baseline), &style, props.colour);
        }
        self.current_font = style;
    }
}

impl Grid<FontBook> {
    /// Write the finished document, embedding the grid's fonts
    pub fn write<W: Write>(self, w: W) -> Result<()> {
        let (document, fonts) = self.into_parts();
        document.write(&fonts, w)
    }
}

impl<M: TextMeasure> GridHost for Grid<M> {
    fn row(&mut self, height: Pt, body: &mut dyn FnMut(&mut dyn RowHost)) {
        let height = height.max(Pt(0.0));
        self.reserve(height);
        let margins = self.canvas.page_margins();
        let y = margins.top + self.offset_y;
        log::trace!("row of {height} at {y}");

        let mut row = GridRow {
            x: margins.left,
            y,
            height,
            grid: self,
        };
        body(&mut row);

        self.offset_y += height;
    }

    fn line(&mut self, space_height: Pt, style: &LineStyle) {
        let space_height = space_height.max(Pt(0.0));
        self.reserve(space_height);
        let margins = self.canvas.page_margins();
        let (page_width, _) = self.canvas.page_dimensions();
        let y = margins.top + self.offset_y + space_height / 2.0;
        self.canvas
            .draw_line((margins.left, y), (page_width - margins.right, y), style);
        self.offset_y += space_height;
    }

    fn set_background_colour(&mut self, colour: Colour) {
        self.canvas.set_background_colour(colour);
    }

    fn current_page_index(&self) -> usize {
        self.canvas.current_page_index()
    }

    fn page_size(&self) -> PageSize {
        self.canvas.page_dimensions()
    }

    fn page_margins(&self) -> Margins {
        self.canvas.page_margins()
    }
}

impl<M: TextMeasure> FontMetrics for Grid<M> {
    fn current_font(&self) -> TextStyle {
        self.current_font.clone()
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

impl<M: TextMeasure> LineCounter for Grid<M> {
    fn lines_quantity(&mut self, text: &str, props: &TextProps, column_width: Pt) -> usize {
        let style = props.text_style(&self.default_family);
        let lines = if props.extrapolate {
            1
        } else {
            count_wrapped_lines(&self.measure, text, &style, props.text_width(column_width))
        };
        self.current_font = style;
        lines
    }
}

struct GridRow<'g, M: TextMeasure> {
    grid: &'g mut Grid<M>,
    /// left edge of the next column
    x: Pt,
    y: Pt,
    height: Pt,
}

impl<M: TextMeasure> GridRow<'_, M> {
    fn column_width(&self, grid_size: u32) -> Pt {
        self.grid.useful_width() * (grid_size as f32 / GRID_SUM)
    }
}

impl<M: TextMeasure> RowHost for GridRow<'_, M> {
    fn col(&mut self, grid_size: u32, body: &mut dyn FnMut(&mut dyn CellHost)) {
        let cell = Cell::new(self.x, self.y, self.column_width(grid_size), self.height);
        self.x += cell.width;

        let background = self.grid.canvas.background_colour();
        if !background.is_white() {
            self.grid.canvas.fill_rect(cell, background);
        }

        let mut cell = GridCell {
            grid: &mut *self.grid,
            cell,
        };
        body(&mut cell);
    }

    fn col_space(&mut self, grid_size: u32) {
        self.x += self.column_width(grid_size);
    }

    fn set_background_colour(&mut self, colour: Colour) {
        self.grid.canvas.set_background_colour(colour);
    }
}

struct GridCell<'g, M: TextMeasure> {
    grid: &'g mut Grid<M>,
    cell: Cell,
}

impl<M: TextMeasure> CellHost for GridCell<'_, M> {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn text(&mut self, text: &str, props: &TextProps) {
        self.grid.draw_text(self.cell, text, props);
    }

    fn image_from_file(&mut self, path: &Path, props: &RectProps) -> Result<()> {
        placer::add_from_file(&mut self.grid.canvas, path, &self.cell, props)
    }

    fn image_from_encoded(&mut self, payload: &str, extension: Extension, props: &RectProps) -> Result<()> {
        placer::add_from_encoded(&mut self.grid.canvas, payload, &self.cell, props, extension)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::colours;
    use crate::page::PageContents;

    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
            style.size * (0.5 * text.chars().count() as f32)
        }
    }

    // 120pt of useful width makes every grid part 10pt wide
    fn grid() -> Grid<HalfEm> {
        Grid::new((Pt(140.0), Pt(100.0)), Margins::all(Pt(10.0)), HalfEm, "mono")
    }

    #[test]
    fn columns_are_fractions_of_the_useful_width() {
        let mut grid = grid();
        let mut cells = Vec::new();
        grid.row(Pt(15.0), &mut |row: &mut dyn RowHost| {
            row.col(3, &mut |cell: &mut dyn CellHost| cells.push(cell.cell()));
            row.col_space(3);
            row.col(6, &mut |cell: &mut dyn CellHost| cells.push(cell.cell()));
        });
        assert_eq!(cells[0], Cell::new(Pt(10.0), Pt(10.0), Pt(30.0), Pt(15.0)));
        assert_eq!(cells[1], Cell::new(Pt(70.0), Pt(10.0), Pt(60.0), Pt(15.0)));
        assert_eq!(grid.offset_y(), Pt(15.0));
    }

    #[test]
    fn rows_that_do_not_fit_start_a_new_page() {
        let mut grid = grid();
        for _ in 0..3 {
            grid.row(Pt(30.0), &mut |_row: &mut dyn RowHost| {});
        }
        assert_eq!(grid.current_page_index(), 1);
        assert_eq!(grid.offset_y(), Pt(30.0));
    }

    #[test]
    fn negative_heights_never_move_back_up_the_page() {
        let mut grid = grid();
        grid.row(Pt(20.0), &mut |_row: &mut dyn RowHost| {});
        let mut cells = Vec::new();
        grid.row(Pt(-15.0), &mut |row: &mut dyn RowHost| {
            row.col(12, &mut |cell: &mut dyn CellHost| cells.push(cell.cell()));
        });
        assert_eq!(cells, vec![Cell::new(Pt(10.0), Pt(30.0), Pt(120.0), Pt(0.0))]);
        assert_eq!(grid.offset_y(), Pt(20.0));

        grid.line(Pt(-4.0), &LineStyle::default());
        assert_eq!(grid.offset_y(), Pt(20.0));
        grid.row(Pt(10.0), &mut |_row: &mut dyn RowHost| {});
        assert_eq!(grid.offset_y(), Pt(30.0));
    }

    #[test]
    fn oversized_rows_do_not_loop_on_empty_pages() {
        let mut grid = grid();
        grid.row(Pt(500.0), &mut |_row: &mut dyn RowHost| {});
        assert_eq!(grid.current_page_index(), 0);
    }

    #[test]
    fn background_fills_cells() {
        let mut grid = grid();
        grid.set_background_colour(colours::LIGHT_GREY);
        grid.row(Pt(10.0), &mut |row: &mut dyn RowHost| {
            row.col(12, &mut |_cell: &mut dyn CellHost| {});
        });
        grid.set_background_colour(colours::WHITE);
        grid.row(Pt(10.0), &mut |row: &mut dyn RowHost| {
            row.col(12, &mut |_cell: &mut dyn CellHost| {});
        });
        let page = grid.document().page(0).expect("first page");
        let fills = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Fill(..)))
            .count();
        assert_eq!(fills, 1);
    }

    #[test]
    fn drawn_lines_match_counted_lines() {
        let mut grid = grid();
        let props = TextProps::default();
        let text = "aaaa bbbb cccc dddd eeee";
        let counted = grid.lines_quantity(text, &props, Pt(60.0));
        grid.row(Pt(40.0), &mut |row: &mut dyn RowHost| {
            row.col(6, &mut |cell: &mut dyn CellHost| cell.text(text, &props));
        });
        let page = grid.document().page(0).expect("first page");
        let spans = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Text(_)))
            .count();
        assert_eq!(counted, 3);
        assert_eq!(spans, counted);
    }

    #[test]
    fn counting_selects_the_current_font() {
        let mut grid = grid();
        let props = TextProps {
            size: Pt(14.0),
            style: FontStyle::Bold,
            ..TextProps::default()
        };
        grid.lines_quantity("x", &props, Pt(100.0));
        let font = grid.current_font();
        assert_eq!(font.size, Pt(14.0));
        assert_eq!(font.style, FontStyle::Bold);
        assert_eq!(font.family, "mono");
    }

    #[test]
    fn right_aligned_text_ends_at_the_cell_edge() {
        let mut grid = grid();
        let props = TextProps {
            align: Align::Right,
            ..TextProps::default()
        };
        grid.row(Pt(20.0), &mut |row: &mut dyn RowHost| {
            row.col(12, &mut |cell: &mut dyn CellHost| cell.text("abcd", &props));
        });
        let page = grid.document().page(0).expect("first page");
        match &page.contents[0] {
            PageContents::Text(span) => {
                // 4 chars at 5pt each, flush against x = 130
                assert_eq!(span.coords.0, Pt(110.0));
                // baseline one line below the top of the row, flipped
                assert_eq!(span.coords.1, Pt(100.0 - 20.0));
            }
            other => panic!("unexpected contents {other:?}"),
        }
    }
}
