//! The drawing backend: something that keeps track of pages and paints text,
//! images, fills and lines onto them.
//!
//! Coordinates handed to a [Canvas] are measured in points from the top-left
//! corner of the current page. [PdfCanvas] flips them into PDF space as it
//! records page contents.

use crate::colour::Colour;
use crate::document::Document;
use crate::font::TextStyle;
use crate::image::{AssetHandle, Extension, Image};
use crate::layout::Margins;
use crate::page::{ImageLayout, LineLayout, Page, SpanLayout};
use crate::pagesize::PageSize;
use crate::props::LineStyle;
use crate::rect::{Cell, Placement, Rect};
use crate::units::Pt;
use crate::{Error, Result};
use id_arena::Id;
use std::path::Path;

pub trait Canvas {
    /// Read and register the image at `path`, identified by the path itself.
    /// Registering a path twice returns the first registration.
    fn register_asset(&mut self, path: &Path) -> Result<AssetHandle, image::ImageError>;

    /// Register an in-memory image under `id`. Registering an `id` that is
    /// already known returns the first registration without decoding `bytes`.
    fn register_asset_from_bytes(
        &mut self,
        id: &str,
        extension: Extension,
        bytes: &[u8],
    ) -> Result<AssetHandle, image::ImageError>;

    /// Draw a registered image into `placement` on the current page
    fn draw_asset(&mut self, id: &str, placement: Placement) -> Result<()>;

    /// Draw a single line of text with its baseline at `baseline`
    fn draw_text(&mut self, text: &str, baseline: (Pt, Pt), style: &TextStyle, colour: Colour);

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), style: &LineStyle);

    fn fill_rect(&mut self, area: Cell, colour: Colour);

    /// Colour that grid cells are filled with while they are drawn
    fn set_background_colour(&mut self, colour: Colour);

    fn background_colour(&self) -> Colour;

    /// Start a new page and make it current
    fn add_page(&mut self);

    /// 0-based index of the page being drawn on
    fn current_page_index(&self) -> usize;

    fn page_dimensions(&self) -> PageSize;

    fn page_margins(&self) -> Margins;
}

/// A [Canvas] that records everything into a [Document]
pub struct PdfCanvas {
    document: Document,
    page_size: PageSize,
    margins: Margins,
    current: Id<Page>,
    background: Colour,
}

impl PdfCanvas {
    /// Create a canvas holding a single empty page
    pub fn new(page_size: PageSize, margins: Margins) -> PdfCanvas {
        let mut document = Document::default();
        let current = document.add_page(Page::new(page_size, margins));
        PdfCanvas {
            document,
            page_size,
            margins,
            current,
            background: Colour::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    fn page(&mut self) -> &mut Page {
        &mut self.document.pages[self.current]
    }

    /// y measured from the top of the page => y measured from the bottom
    fn flip(&self, point: (Pt, Pt)) -> (Pt, Pt) {
        (point.0, self.page_size.1 - point.1)
    }
}

impl Canvas for PdfCanvas {
    fn register_asset(&mut self, path: &Path) -> Result<AssetHandle, image::ImageError> {
        let id = path.display().to_string();
        if let Some(handle) = self.document.image_handle(&id) {
            return Ok(handle);
        }
        let image = Image::new_from_disk(path)?;
        log::debug!("registered image `{id}` ({}x{})", image.width, image.height);
        Ok(self.document.add_image(id, image))
    }

    fn register_asset_from_bytes(
        &mut self,
        id: &str,
        extension: Extension,
        bytes: &[u8],
    ) -> Result<AssetHandle, image::ImageError> {
        if let Some(handle) = self.document.image_handle(id) {
            log::trace!("image `{id}` already registered");
            return Ok(handle);
        }
        let image = Image::new_from_bytes(bytes.to_vec(), Some(extension))?;
        log::debug!(
            "registered {} image `{id}` ({}x{})",
            extension.as_str(),
            image.width,
            image.height
        );
        Ok(self.document.add_image(id, image))
    }

    fn draw_asset(&mut self, id: &str, placement: Placement) -> Result<()> {
        let image_id = self
            .document
            .image_id(id)
            .ok_or_else(|| Error::AssetMissing(id.to_string()))?;
        let position = Rect::from_top_left(
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            self.page_size.1,
        );
        self.page().add_image(ImageLayout { image_id, position });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, baseline: (Pt, Pt), style: &TextStyle, colour: Colour) {
        let coords = self.flip(baseline);
        self.page().add_span(SpanLayout {
            text: text.to_string(),
            style: style.clone(),
            colour,
            coords,
        });
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), style: &LineStyle) {
        let (from, to) = (self.flip(from), self.flip(to));
        self.page().add_line(LineLayout {
            from,
            to,
            style: *style,
        });
    }

    fn fill_rect(&mut self, area: Cell, colour: Colour) {
        let rect = Rect::from_top_left(area.x, area.y, area.width, area.height, self.page_size.1);
        self.page().add_fill(rect, colour);
    }

    fn set_background_colour(&mut self, colour: Colour) {
        self.background = colour;
    }

    fn background_colour(&self) -> Colour {
        self.background
    }

    fn add_page(&mut self) {
        self.current = self.document.add_page(Page::new(self.page_size, self.margins));
        log::debug!("started page {}", self.document.page_count());
    }

    fn current_page_index(&self) -> usize {
        self.document.page_count().saturating_sub(1)
    }

    fn page_dimensions(&self) -> PageSize {
        self.page_size
    }

    fn page_margins(&self) -> Margins {
        self.margins
    }
}
