use crate::{
    content::render_contents,
    font::FontBook,
    image::{AssetHandle, Image},
    page::Page,
    refs::{ObjectReferences, RefType},
    Error,
};
use id_arena::{Arena, Id};
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::{collections::HashMap, io::Write};

/// A document stores the pages and images of the PDF being built, then renders
/// everything out with a call to [Document::write]
#[derive(Default)]
pub struct Document {
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub images: Arena<Image>,
    /// Registered images by identifier, so the same asset is embedded once
    image_ids: HashMap<String, Id<Image>>,
}

impl Document {
    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at a 0-based position in the document
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.page_order.get(index).and_then(|&id| self.pages.get(id))
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        let id = *self.page_order.get(index)?;
        self.pages.get_mut(id)
    }

    /// Register an image under `id`. Registering an identifier that is already
    /// known returns the existing image without touching the new one.
    pub fn add_image<S: ToString>(&mut self, id: S, image: Image) -> AssetHandle {
        let id = id.to_string();
        if let Some(handle) = self.image_handle(&id) {
            return handle;
        }
        let handle = AssetHandle::new(&id, image.width, image.height);
        let image_id = self.images.alloc(image);
        self.image_ids.insert(id, image_id);
        handle
    }

    /// Handle of a previously registered image
    pub fn image_handle(&self, id: &str) -> Option<AssetHandle> {
        let image_id = *self.image_ids.get(id)?;
        let image = self.images.get(image_id)?;
        Some(AssetHandle::new(id, image.width, image.height))
    }

    pub(crate) fn image_id(&self, id: &str) -> Option<Id<Image>> {
        self.image_ids.get(id).copied()
    }

    /// Write the entire document to the writer, embedding every font in `fonts`.
    /// The document is rendered in memory before being written out.
    pub fn write<W: Write>(self, fonts: &FontBook, mut w: W) -> Result<(), Error> {
        let Document {
            pages,
            page_order,
            images,
            ..
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<_> = (0..page_order.len()).map(|i| refs.gen(RefType::Page(i))).collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (id, font) in fonts.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }
        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(Error::PageMissing)?;
            let rendered = render_contents(&page.contents, fonts)?;
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                &rendered,
                miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
            );

            let content_id = refs.gen(RefType::ContentForPage(page_index));
            let page_ref = page_refs[page_index];

            let mut pdf_page = writer.page(page_ref);
            pdf_page.media_box(page.media_box.into());
            pdf_page.art_box(page.content_box.into());
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);

            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for (font_id, _) in fonts.fonts.iter() {
                if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                    resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
                }
            }
            resource_fonts.finish();
            let mut resource_xobjects = resources.x_objects();
            for (image_id, _) in images.iter() {
                if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                    resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
                }
            }
            resource_xobjects.finish();
            resources.finish();
            pdf_page.finish();

            writer.stream(content_id, &compressed).filter(Filter::FlateDecode);
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{layout::Margins, pagesize, Pt};

    #[test]
    fn empty_pages_write_a_pdf() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::A4, Margins::all(Pt(20.0))));
        doc.add_page(Page::new(pagesize::A4, Margins::all(Pt(20.0))));
        assert_eq!(doc.page_count(), 2);

        let mut out = Vec::new();
        doc.write(&FontBook::default(), &mut out).expect("can write");
        assert!(out.starts_with(b"%PDF-"));
    }
}
