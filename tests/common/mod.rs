#![allow(dead_code)]

use pdf_grid::layout::count_wrapped_lines;
use pdf_grid::{
    CellHost, Colour, Extension, FontMetrics, GridHost, LineCounter, LineStyle, Margins, Pt, RectProps, RowHost,
    TextMeasure, TextProps, TextStyle,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Every character is half an em wide
pub struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
        style.size * (0.5 * text.chars().count() as f32)
    }
}

/// Something a [RecordingHost] was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Row { height: Pt, page: usize },
    Col { grid_size: u32 },
    ColSpace { grid_size: u32 },
    Text { text: String, top: Pt, left: Pt },
    Image { path: String },
    Line { height: Pt },
    /// `in_row` is set for backgrounds changed from inside a row
    Background { colour: Colour, in_row: bool },
}

/// A [GridHost] that remembers every call instead of drawing.
///
/// With `rows_per_page` set, the row that would exceed that many rows on the
/// current page lands on the next page instead.
pub struct RecordingHost {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub page: usize,
    pub rows_on_page: usize,
    pub rows_per_page: Option<usize>,
    pub page_size: (Pt, Pt),
    pub margins: Margins,
    pub scale_factor: f32,
    pub current_font: TextStyle,
}

impl Default for RecordingHost {
    fn default() -> Self {
        RecordingHost {
            calls: Rc::new(RefCell::new(Vec::new())),
            page: 0,
            rows_on_page: 0,
            rows_per_page: None,
            page_size: (Pt(140.0), Pt(100.0)),
            margins: Margins::all(Pt(10.0)),
            scale_factor: 1.0,
            current_font: TextStyle::new("stub", Default::default(), Pt(10.0)),
        }
    }
}

impl RecordingHost {
    pub fn paged(rows_per_page: usize) -> Self {
        RecordingHost {
            rows_per_page: Some(rows_per_page),
            ..RecordingHost::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn rows(&self) -> Vec<Pt> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Row { height, .. } => Some(height),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }
}

struct RecordingRow {
    calls: Rc<RefCell<Vec<Call>>>,
}

struct RecordingCell {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl GridHost for RecordingHost {
    fn row(&mut self, height: Pt, body: &mut dyn FnMut(&mut dyn RowHost)) {
        if let Some(limit) = self.rows_per_page {
            if self.rows_on_page == limit {
                self.page += 1;
                self.rows_on_page = 0;
            }
        }
        self.rows_on_page += 1;
        self.calls.borrow_mut().push(Call::Row {
            height,
            page: self.page,
        });
        let mut row = RecordingRow {
            calls: Rc::clone(&self.calls),
        };
        body(&mut row);
    }

    fn line(&mut self, space_height: Pt, _style: &LineStyle) {
        self.calls.borrow_mut().push(Call::Line { height: space_height });
    }

    fn set_background_colour(&mut self, colour: Colour) {
        self.calls
            .borrow_mut()
            .push(Call::Background { colour, in_row: false });
    }

    fn current_page_index(&self) -> usize {
        self.page
    }

    fn page_size(&self) -> (Pt, Pt) {
        self.page_size
    }

    fn page_margins(&self) -> Margins {
        self.margins
    }
}

impl FontMetrics for RecordingHost {
    fn current_font(&self) -> TextStyle {
        self.current_font.clone()
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

impl LineCounter for RecordingHost {
    fn lines_quantity(&mut self, text: &str, props: &TextProps, column_width: Pt) -> usize {
        let style = props.text_style("stub");
        let lines = count_wrapped_lines(&FixedAdvance, text, &style, props.text_width(column_width));
        self.current_font = style;
        lines
    }
}

impl RowHost for RecordingRow {
    fn col(&mut self, grid_size: u32, body: &mut dyn FnMut(&mut dyn CellHost)) {
        self.calls.borrow_mut().push(Call::Col { grid_size });
        let mut cell = RecordingCell {
            calls: Rc::clone(&self.calls),
        };
        body(&mut cell);
    }

    fn col_space(&mut self, grid_size: u32) {
        self.calls.borrow_mut().push(Call::ColSpace { grid_size });
    }

    fn set_background_colour(&mut self, colour: Colour) {
        self.calls
            .borrow_mut()
            .push(Call::Background { colour, in_row: true });
    }
}

impl CellHost for RecordingCell {
    fn cell(&self) -> pdf_grid::Cell {
        pdf_grid::Cell::default()
    }

    fn text(&mut self, text: &str, props: &TextProps) {
        self.calls.borrow_mut().push(Call::Text {
            text: text.to_string(),
            top: props.top,
            left: props.left,
        });
    }

    fn image_from_file(&mut self, path: &Path, _props: &RectProps) -> pdf_grid::Result<()> {
        self.calls.borrow_mut().push(Call::Image {
            path: path.display().to_string(),
        });
        Ok(())
    }

    fn image_from_encoded(&mut self, _payload: &str, extension: Extension, _props: &RectProps) -> pdf_grid::Result<()> {
        self.calls.borrow_mut().push(Call::Image {
            path: format!("<encoded {}>", extension.as_str()),
        });
        Ok(())
    }
}
