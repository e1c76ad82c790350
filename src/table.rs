//! Tables with a header row and any number of content rows, laid out through a
//! [GridHost]. Row heights are reserved from how many lines each cell wraps
//! into, so long content grows its row instead of overflowing it.
//!
//! ```
//! use pdf_grid::{Grid, TableList, TableRenderOptions, Margins, Pt, TextMeasure, TextStyle};
//! use pdf_grid::{colours, pagesize};
//!
//! struct Mono;
//! impl TextMeasure for Mono {
//!     fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
//!         style.size * (0.6 * text.chars().count() as f32)
//!     }
//! }
//!
//! let mut grid = Grid::new(pagesize::A4, Margins::all(Pt(36.0)), Mono, "mono");
//! let options = TableRenderOptions {
//!     alternated_background: Some(colours::LIGHT_GREY),
//!     line: true,
//!     ..TableRenderOptions::default()
//! };
//! TableList::default()
//!     .create(
//!         &mut grid,
//!         &["Item", "Qty"],
//!         &[vec!["Apples", "3"], vec!["Pears", "12"]],
//!         "mono",
//!         options,
//!     )
//!     .expect("grid sizes line up");
//! ```

use crate::colour::{colours, Colour};
use crate::font::FontStyle;
use crate::grid::{CellHost, FontMetrics, GridHost, LineCounter, RowHost, GRID_SUM};
use crate::props::{Align, LineStyle, TextProps};
use crate::units::Pt;
use crate::{Error, Result};
use std::fmt;

/// Height of the row a separator line is drawn in
const LINE_HEIGHT: Pt = Pt(1.0);
const DEFAULT_FONT_SIZE: Pt = Pt(10.0);
const DEFAULT_HEADER_CONTENT_SPACE: Pt = Pt(4.0);

/// Redraws the table header on a fresh page
pub type HeaderAction = Box<dyn FnMut(&mut dyn GridHost)>;

/// Text options for one section (header or content) of a table.
/// Unset values are filled in by [TableRenderOptions::make_valid].
#[derive(Debug, Clone, PartialEq)]
pub struct TableTextOptions {
    pub family: Option<String>,
    pub style: Option<FontStyle>,
    pub size: Option<Pt>,
    pub colour: Colour,
    /// Width of each column in parts of [GRID_SUM]; empty splits the row evenly
    pub grid_sizes: Vec<u32>,
    /// Extra lines reserved per row. Non-zero values replace the line count
    /// with the last cell's count plus this spacing.
    pub spacing: f32,
}

impl Default for TableTextOptions {
    fn default() -> Self {
        TableTextOptions {
            family: None,
            style: None,
            size: None,
            colour: colours::BLACK,
            grid_sizes: Vec::new(),
            spacing: 0.0,
        }
    }
}

/// Everything [TableList::create] can be told about a table
#[derive(Default)]
pub struct TableRenderOptions {
    pub header: TableTextOptions,
    pub content: TableTextOptions,
    pub align: Align,
    /// Fill behind each header cell
    pub header_background: Option<Colour>,
    /// Fill behind every other content row, starting with the first
    pub alternated_background: Option<Colour>,
    /// Added to the height the header text needs
    pub header_height: Option<Pt>,
    /// Gap between the header and the first content row; 4pt when unset
    pub header_content_space: Option<Pt>,
    /// Added to every content row; text is pushed down by half of it
    pub vertical_content_padding: Pt,
    /// Left padding of the text in every header and content cell
    pub left: Pt,
    /// Draw a separator line after every content row
    pub line: bool,
    pub line_style: LineStyle,
    pub disable_header: bool,
    pub disable_content: bool,
    /// Called before the first content row drawn on each new page
    pub show_header_on_new_page: Option<HeaderAction>,
}

impl fmt::Debug for TableRenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRenderOptions")
            .field("header", &self.header)
            .field("content", &self.content)
            .field("align", &self.align)
            .field("header_background", &self.header_background)
            .field("alternated_background", &self.alternated_background)
            .field("header_height", &self.header_height)
            .field("header_content_space", &self.header_content_space)
            .field("vertical_content_padding", &self.vertical_content_padding)
            .field("left", &self.left)
            .field("line", &self.line)
            .field("line_style", &self.line_style)
            .field("disable_header", &self.disable_header)
            .field("disable_content", &self.disable_content)
            .field("show_header_on_new_page", &self.show_header_on_new_page.is_some())
            .finish()
    }
}

/// Resolved text options for one section of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableTextLayout {
    pub family: String,
    pub style: FontStyle,
    pub size: Pt,
    pub colour: Colour,
    pub grid_sizes: Vec<u32>,
    pub spacing: f32,
    /// Left padding inside each cell, subtracted from the width text wraps in
    pub left: Pt,
}

impl TableTextLayout {
    fn resolve(
        options: TableTextOptions,
        columns: usize,
        default_family: &str,
        default_style: FontStyle,
        left: Pt,
    ) -> Self {
        let grid_sizes = if options.grid_sizes.is_empty() {
            vec![GRID_SUM as u32 / columns.max(1) as u32; columns]
        } else {
            options.grid_sizes
        };
        TableTextLayout {
            family: options.family.unwrap_or_else(|| default_family.to_string()),
            style: options.style.unwrap_or(default_style),
            size: options.size.filter(|s| **s > 0.0).unwrap_or(DEFAULT_FONT_SIZE),
            colour: options.colour,
            grid_sizes,
            spacing: options.spacing,
            left,
        }
    }

    pub fn to_text_props(&self, align: Align, top: Pt) -> TextProps {
        TextProps {
            top,
            left: self.left,
            family: Some(self.family.clone()),
            style: self.style,
            size: self.size,
            align,
            colour: self.colour,
            ..TextProps::default()
        }
    }
}

/// [TableRenderOptions] with every default applied and grid sizes checked
pub struct TableLayout {
    pub header: TableTextLayout,
    pub content: TableTextLayout,
    pub align: Align,
    pub header_background: Option<Colour>,
    pub alternated_background: Option<Colour>,
    pub header_height: Option<Pt>,
    pub header_content_space: Pt,
    pub vertical_content_padding: Pt,
    /// Style of the separator line, if lines are drawn
    pub line: Option<LineStyle>,
    pub disable_header: bool,
    pub disable_content: bool,
    pub show_header_on_new_page: Option<HeaderAction>,
}

impl TableRenderOptions {
    /// Set the action that redraws the header when the table continues on a
    /// new page
    pub fn with_header_on_new_page<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut dyn GridHost) + 'static,
    {
        self.show_header_on_new_page = Some(Box::new(action));
        self
    }

    /// Fill in defaults for everything left unset and check that the grid
    /// sizes describe the header and every content row.
    ///
    /// Defaults: `default_family` for both sections, bold 10pt header, normal
    /// 10pt content, columns splitting [GRID_SUM] evenly across the header's
    /// column count, 4pt between header and content. Negative heights,
    /// padding and spacing between rows are treated as zero.
    pub fn make_valid<S, T>(
        self,
        header: &[S],
        contents: &[Vec<T>],
        default_family: &str,
    ) -> Result<TableLayout> {
        let columns = header.len();
        let left = self.left.max(Pt(0.0));
        let header_layout = TableTextLayout::resolve(self.header, columns, default_family, FontStyle::Bold, left);
        let content_layout =
            TableTextLayout::resolve(self.content, columns, default_family, FontStyle::Normal, left);

        if header_layout.grid_sizes.len() != columns {
            return Err(Error::InvalidConfiguration(format!(
                "header has {columns} columns but {} grid sizes",
                header_layout.grid_sizes.len()
            )));
        }
        if let Some((i, row)) = contents
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != content_layout.grid_sizes.len())
        {
            return Err(Error::InvalidConfiguration(format!(
                "content row {i} has {} columns but {} grid sizes",
                row.len(),
                content_layout.grid_sizes.len()
            )));
        }

        Ok(TableLayout {
            header: header_layout,
            content: content_layout,
            align: self.align,
            header_background: self.header_background,
            alternated_background: self.alternated_background,
            header_height: self.header_height.map(|extra| extra.max(Pt(0.0))),
            header_content_space: self
                .header_content_space
                .unwrap_or(DEFAULT_HEADER_CONTENT_SPACE)
                .max(Pt(0.0)),
            vertical_content_padding: self.vertical_content_padding.max(Pt(0.0)),
            line: self.line.then_some(self.line_style),
            disable_header: self.disable_header,
            disable_content: self.disable_content,
            show_header_on_new_page: self.show_header_on_new_page,
        })
    }
}

/// Height a row of `texts` needs: the most lines any cell wraps into, times
/// the current font's line height.
///
/// A non-zero `spacing` overrides the running maximum with the current cell's
/// lines plus the spacing, so only the last cell's spacing takes effect. The
/// result is never less than one line.
pub fn calc_lines_height<H, S>(host: &mut H, texts: &[S], options: &TableTextLayout, align: Align) -> Pt
where
    H: GridHost + FontMetrics + LineCounter + ?Sized,
    S: AsRef<str>,
{
    let (page_width, _) = host.page_size();
    let margins = host.page_margins();
    let useful_width = page_width - margins.left - margins.right;
    let props = options.to_text_props(align, Pt(0.0));

    let mut max_lines: f32 = 1.0;
    for (text, &grid_size) in texts.iter().zip(options.grid_sizes.iter()) {
        let column_width = useful_width * (grid_size as f32 / GRID_SUM);
        let lines = host.lines_quantity(text.as_ref(), &props, column_width) as f32;
        log::trace!("{lines} line(s) for {:?} in {column_width}", text.as_ref());
        if lines > max_lines {
            max_lines = lines;
        }
        if options.spacing != 0.0 {
            max_lines = lines + options.spacing;
        }
    }
    let max_lines = max_lines.max(1.0);

    let font = host.current_font();
    font.size / host.scale_factor() * max_lines
}

/// Draws tables, remembering which page the last row landed on so a header
/// can be repeated when a table crosses a page break
#[derive(Debug, Default)]
pub struct TableList {
    last_page_index: usize,
}

impl TableList {
    pub fn last_page_index(&self) -> usize {
        self.last_page_index
    }

    /// Draw a header row and one row per entry in `contents`.
    ///
    /// Nothing is drawn when either `header` or `contents` is empty. Grid sizes
    /// that don't match the number of columns are reported before anything is
    /// drawn.
    pub fn create<H, S, T>(
        &mut self,
        host: &mut H,
        header: &[S],
        contents: &[Vec<T>],
        default_family: &str,
        options: TableRenderOptions,
    ) -> Result<()>
    where
        H: GridHost + FontMetrics + LineCounter,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if header.is_empty() || contents.is_empty() {
            log::trace!("empty table, nothing to draw");
            return Ok(());
        }

        let mut table = options.make_valid(header, contents, default_family)?;
        if table.show_header_on_new_page.is_some() {
            self.last_page_index = host.current_page_index();
        }

        let mut header_height = calc_lines_height(host, header, &table.header, table.align);
        if let Some(extra) = table.header_height {
            header_height += extra;
        }

        if !table.disable_header {
            let props = table.header.to_text_props(table.align, Pt(0.0));
            let background = table.header_background;
            let sizes = &table.header.grid_sizes;
            host.row(header_height + Pt(0.5), &mut |row: &mut dyn RowHost| {
                for (label, &size) in header.iter().zip(sizes.iter()) {
                    if let Some(colour) = background {
                        row.set_background_colour(colour);
                    }
                    row.col(size, &mut |cell: &mut dyn CellHost| cell.text(label.as_ref(), &props));
                    if background.is_some() {
                        row.set_background_colour(colours::WHITE);
                    }
                }
            });
        }

        host.row(table.header_content_space, &mut |row: &mut dyn RowHost| {
            row.col_space(GRID_SUM as u32);
        });

        if table.disable_content {
            return Ok(());
        }

        log::debug!("drawing {} table rows", contents.len());
        let props = table
            .content
            .to_text_props(table.align, table.vertical_content_padding / 2.0);
        for (index, texts) in contents.iter().enumerate() {
            if let Some(action) = table.show_header_on_new_page.as_mut() {
                let current = host.current_page_index();
                if current != self.last_page_index {
                    log::debug!("table continues on page {}, repeating header", current + 1);
                    action(&mut *host);
                    self.last_page_index = current;
                }
            }

            let height = calc_lines_height(host, texts, &table.content, table.align)
                + table.vertical_content_padding;

            let background = table.alternated_background.filter(|_| index % 2 == 0);
            if let Some(colour) = background {
                host.set_background_colour(colour);
            }

            let sizes = &table.content.grid_sizes;
            host.row(height + Pt(1.0), &mut |row: &mut dyn RowHost| {
                for (text, &size) in texts.iter().zip(sizes.iter()) {
                    row.col(size, &mut |cell: &mut dyn CellHost| cell.text(text.as_ref(), &props));
                }
            });

            if background.is_some() {
                host.set_background_colour(colours::WHITE);
            }

            if let Some(style) = &table.line {
                host.line(LINE_HEIGHT, style);
            }
        }

        Ok(())
    }
}
