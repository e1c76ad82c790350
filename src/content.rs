//! Turns page contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::FontBook;
use crate::page::{LineLayout, PageContents, SpanLayout};
use crate::props::LineDash;
use crate::Error;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents], fonts: &FontBook) -> Result<Vec<u8>, Error> {
    let mut content: Vec<u8> = Vec::default();

    for item in contents.iter() {
        match item {
            PageContents::Text(span) => render_span(&mut content, span, fonts)?,
            PageContents::Image(image) => {
                let p = &image.position;
                write!(&mut content, "q\n")?;
                write!(&mut content, "{} 0 0 {} {} {} cm\n", *p.width(), *p.height(), *p.x1, *p.y1)?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Fill(rect, colour) => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, *colour, false)?;
                write!(
                    &mut content,
                    "{} {} {} {} re f\n",
                    *rect.x1,
                    *rect.y1,
                    *rect.width(),
                    *rect.height()
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(content: &mut Vec<u8>, span: &SpanLayout, fonts: &FontBook) -> Result<(), Error> {
    if span.text.is_empty() {
        return Ok(());
    }

    let missing = || Error::FontMissing {
        family: span.style.family.clone(),
        style: span.style.style,
    };
    let id = fonts.lookup(&span.style.family, span.style.style).ok_or_else(missing)?;
    let font = fonts.get(id).ok_or_else(missing)?;

    write!(content, "q\n")?;
    write_colour(content, span.colour, false)?;
    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", id.index(), *span.style.size)?;
    write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
    write!(content, "<")?;
    for gid in span.text.chars().filter_map(|ch| font.glyph_id(ch)) {
        write!(content, "{gid:04x}")?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), Error> {
    let width = *line.style.width;
    write!(content, "q\n")?;
    write_colour(content, line.style.colour, true)?;
    write!(content, "{width} w\n")?;
    match line.style.dash {
        LineDash::Solid => {}
        LineDash::Dashed => write!(content, "[{} {}] 0 d\n", width * 6.0, width * 3.0)?,
        LineDash::Dotted => write!(content, "1 J [0 {}] 0 d\n", width * 2.0)?,
    }
    write!(content, "{} {} m\n", *line.from.0, *line.from.1)?;
    write!(content, "{} {} l\n", *line.to.0, *line.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

/// Lowercase operators set the fill colour, uppercase the stroke colour
#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour, stroke: bool) -> Result<(), std::io::Error> {
    match (colour, stroke) {
        (Colour::RGB { r, g, b }, false) => write!(content, "{r} {g} {b} rg\n"),
        (Colour::RGB { r, g, b }, true) => write!(content, "{r} {g} {b} RG\n"),
        (Colour::CMYK { c, m, y, k }, false) => write!(content, "{c} {m} {y} {k} k\n"),
        (Colour::CMYK { c, m, y, k }, true) => write!(content, "{c} {m} {y} {k} K\n"),
        (Colour::Grey { g }, false) => write!(content, "{g} g\n"),
        (Colour::Grey { g }, true) => write!(content, "{g} G\n"),
    }
}
