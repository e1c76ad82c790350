use crate::{
    layout::TextMeasure,
    refs::{ObjectReferences, RefType},
    Error, Pt,
};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, HashMap};

/// Weight and slant variants a family can be registered under
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

/// Everything needed to pick a font face and size for a run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub style: FontStyle,
    pub size: Pt,
}

impl TextStyle {
    pub fn new<S: ToString>(family: S, style: FontStyle, size: Pt) -> TextStyle {
        TextStyle {
            family: family.to_string(),
            style,
            size,
        }
    }
}

/// A parsed TrueType / OpenType font. Fonts are embedded in their entirety in
/// the generated PDF.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Full name of the font, if the font carries one
    pub fn name(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Family name of the font, if the font carries one
    pub fn family(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
    }

    fn name_record(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Distance from the baseline to the top of the font for the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font. Usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Glyph for `ch`, falling back to the replacement character and then '?'
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|g| g.0)
    }

    /// Width of a string of text set at `size`. Newlines are not special.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_id(ch))
            .map(|gid| scaling * self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32)
            .sum()
    }

    /// glyph id => the first unicode character mapping to it
    fn char_map(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data.len() as i32);
        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let data_id = self.write_font_data(refs, font_index, writer);
        let face = self.face();
        let per_mille = 1000.0 / face.units_per_em() as f32;

        let advances: Vec<u16> = self
            .char_map()
            .keys()
            .filter_map(|&gid| face.glyph_hor_advance(GlyphId(gid)))
            .collect();
        let max_width = advances.iter().copied().max().unwrap_or_default() as f32 * per_mille;
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.iter().map(|&a| a as f32).sum::<f32>() / advances.len() as f32 * per_mille
        };

        let bbox = face.global_bounding_box();
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * per_mille,
            bbox.y_min as f32 * per_mille,
            bbox.x_max as f32 * per_mille,
            bbox.y_max as f32 * per_mille,
        ));
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * per_mille);
        descriptor.descent(face.descender() as f32 * per_mille);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * per_mille)
                .unwrap_or(face.ascender() as f32 * per_mille),
        );
        // ttf fonts don't record a stem width
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let face = self.face();
        let per_mille = 1000.0 / face.units_per_em() as f32;

        let widths: Vec<(u16, f32)> = self
            .char_map()
            .keys()
            .map(|&gid| {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default();
                (gid, advance as f32 * per_mille)
            })
            .collect();

        let id = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(0.0);

        // consecutive glyph ids share a single widths entry
        let mut w = cid_font.widths();
        let mut run: Vec<f32> = Vec::new();
        let mut run_start: u16 = 0;
        for (gid, width) in widths {
            if !run.is_empty() && gid as usize != run_start as usize + run.len() {
                w.consecutive(run_start, run.drain(..));
            }
            if run.is_empty() {
                run_start = gid;
            }
            run.push(width);
        }
        if !run.is_empty() {
            w.consecutive(run_start, run);
        }
        w.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks are limited to 100 entries each
        let entries: Vec<(u16, char)> = self.char_map().into_iter().collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch.encode_utf16(&mut units).iter().map(|u| format!("{u:04x}")).collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(id, compressed.as_slice()).filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

/// The fonts available to a document, indexed by family name and style.
///
/// ```no_run
/// use pdf_grid::{Font, FontBook, FontStyle};
///
/// let mut fonts = FontBook::default();
/// let regular = Font::load(std::fs::read("Arial.ttf").unwrap()).unwrap();
/// fonts.add("arial", FontStyle::Normal, regular);
/// ```
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
    families: HashMap<(String, FontStyle), Id<Font>>,
}

impl FontBook {
    /// Register a font under a family name and style. Registering the same
    /// family and style twice replaces the earlier entry for future lookups.
    pub fn add<S: ToString>(&mut self, family: S, style: FontStyle, font: Font) -> Id<Font> {
        let id = self.fonts.alloc(font);
        self.families.insert((family.to_string(), style), id);
        id
    }

    /// Find the font for a family and style. Styled lookups fall back to the
    /// family's normal face.
    pub fn lookup(&self, family: &str, style: FontStyle) -> Option<Id<Font>> {
        self.families
            .get(&(family.to_string(), style))
            .or_else(|| self.families.get(&(family.to_string(), FontStyle::Normal)))
            .copied()
    }

    pub fn get(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl TextMeasure for FontBook {
    fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
        match self.lookup(&style.family, style.style).and_then(|id| self.get(id)) {
            Some(font) => font.width_of_text(text, style.size),
            None => {
                log::warn!(
                    "no font registered for `{}` ({:?}); measuring as zero width",
                    style.family,
                    style.style
                );
                Pt(0.0)
            }
        }
    }
}
