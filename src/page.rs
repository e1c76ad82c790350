use crate::colour::Colour;
use crate::font::TextStyle;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::props::LineStyle;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// A single line of text, positioned at its baseline in PDF space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub style: TextStyle,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image drawn into a rectangle in PDF space
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A straight stroked line between two points in PDF space
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub style: LineStyle,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Image(ImageLayout),
    /// A filled rectangle, used for cell backgrounds
    Fill(Rect, Colour),
    Line(LineLayout),
}

/// A page in the document, with its contents in drawing order. Later contents
/// paint over earlier ones.
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Margins) -> Page {
        let (width, height) = size;
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_fill(&mut self, rect: Rect, colour: Colour) {
        self.contents.push(PageContents::Fill(rect, colour));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }
}
