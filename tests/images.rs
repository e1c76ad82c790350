mod common;

use base64::Engine;
use common::FixedAdvance;
use image::{DynamicImage, ImageFormat, RgbImage};
use pdf_grid::placer::{add_from_encoded, add_from_file, asset_id};
use pdf_grid::{
    Canvas, Cell, CellHost, Error, Extension, Grid, GridHost, Margins, PageContents, PdfCanvas, Pt, Rect, RectProps,
    RowHost,
};
use std::io::Cursor;
use std::path::PathBuf;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("can encode png");
    bytes
}

fn encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn temp_png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pdf-grid-{}-{name}.png", std::process::id()));
    std::fs::write(&path, png(width, height)).expect("can write temp file");
    path
}

fn canvas() -> PdfCanvas {
    PdfCanvas::new((Pt(200.0), Pt(200.0)), Margins::all(Pt(10.0)))
}

fn cell() -> Cell {
    Cell::new(Pt(10.0), Pt(20.0), Pt(100.0), Pt(100.0))
}

fn image_positions(canvas: &PdfCanvas) -> Vec<Rect> {
    canvas
        .document()
        .page(0)
        .expect("first page")
        .contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Image(image) => Some(image.position),
            _ => None,
        })
        .collect()
}

#[test]
fn encoded_and_file_images_land_in_the_same_place() {
    let props = RectProps {
        center: true,
        ..RectProps::default()
    };

    let mut from_bytes = canvas();
    add_from_encoded(&mut from_bytes, &encode(&png(40, 20)), &cell(), &props, Extension::Png)
        .expect("valid png");

    let path = temp_png("centered", 40, 20);
    let mut from_file = canvas();
    add_from_file(&mut from_file, &path, &cell(), &props).expect("valid png");
    let _ = std::fs::remove_file(&path);

    let encoded = image_positions(&from_bytes);
    assert_eq!(encoded, image_positions(&from_file));
    // 100 wide, 50 tall, centered vertically in the cell at y = 20
    assert_eq!(encoded, vec![Rect::from_top_left(Pt(10.0), Pt(45.0), Pt(100.0), Pt(50.0), Pt(200.0))]);
}

#[test]
fn anchored_images_respect_padding() {
    let props = RectProps {
        left: Pt(10.0),
        top: Pt(5.0),
        ..RectProps::default()
    };
    let mut canvas = canvas();
    add_from_encoded(&mut canvas, &encode(&png(90, 45)), &cell(), &props, Extension::Png).expect("valid png");
    assert_eq!(
        image_positions(&canvas),
        vec![Rect::from_top_left(Pt(20.0), Pt(25.0), Pt(90.0), Pt(45.0), Pt(200.0))]
    );
}

#[test]
fn identical_payloads_are_embedded_once() {
    let payload = encode(&png(8, 8));
    let mut canvas = canvas();
    for _ in 0..3 {
        add_from_encoded(&mut canvas, &payload, &cell(), &RectProps::default(), Extension::Png).expect("valid png");
    }
    assert_eq!(canvas.document().images.len(), 1);
    assert_eq!(image_positions(&canvas).len(), 3);

    let handle = canvas
        .document()
        .image_handle(&asset_id(&png(8, 8)))
        .expect("registered under its content hash");
    assert_eq!((handle.width(), handle.height()), (8.0, 8.0));
}

#[test]
fn malformed_payloads_are_decode_errors() {
    let mut canvas = canvas();
    let result = add_from_encoded(&mut canvas, "not base64 at all!", &cell(), &RectProps::default(), Extension::Png);
    assert!(matches!(result, Err(Error::Decode(_))));
    assert!(image_positions(&canvas).is_empty());
}

#[test]
fn undecodable_images_fail_registration() {
    let mut canvas = canvas();
    let result = add_from_encoded(
        &mut canvas,
        &encode(b"these bytes are not a png"),
        &cell(),
        &RectProps::default(),
        Extension::Png,
    );
    assert!(matches!(result, Err(Error::AssetRegistration { .. })));

    let result = add_from_file(&mut canvas, "/no/such/image.png", &cell(), &RectProps::default());
    match result {
        Err(Error::AssetRegistration { id, .. }) => assert_eq!(id, "/no/such/image.png"),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(image_positions(&canvas).is_empty());
    assert_eq!(canvas.current_page_index(), 0);
}

#[test]
fn cells_place_images_below_earlier_rows() {
    let mut grid = Grid::new((Pt(140.0), Pt(200.0)), Margins::all(Pt(10.0)), FixedAdvance, "mono");
    let payload = encode(&png(20, 10));
    let mut result = Ok(());

    grid.row(Pt(30.0), &mut |_row: &mut dyn RowHost| {});
    grid.row(Pt(60.0), &mut |row: &mut dyn RowHost| {
        row.col_space(6);
        row.col(6, &mut |cell: &mut dyn CellHost| {
            let props = RectProps {
                center: true,
                ..RectProps::default()
            };
            result = cell.image_from_encoded(&payload, Extension::Png, &props);
        });
    });
    result.expect("valid png");

    // 60x30 centered in the 60x60 cell starting 40pt below the top
    let positions: Vec<Rect> = grid
        .document()
        .page(0)
        .expect("first page")
        .contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Image(image) => Some(image.position),
            _ => None,
        })
        .collect();
    assert_eq!(
        positions,
        vec![Rect::from_top_left(Pt(70.0), Pt(55.0), Pt(60.0), Pt(30.0), Pt(200.0))]
    );
}
