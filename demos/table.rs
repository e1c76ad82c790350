use pdf_grid::pagesize;
use pdf_grid::{colours, Align, CellHost, Font, FontBook, FontStyle, Grid, GridHost, Margins, RowHost, TextProps};
use pdf_grid::{In, Pt, TableList, TableRenderOptions, TableTextOptions};

fn main() {
    // fonts aren't discovered, so point the demo at a TrueType font on disk
    let Some(font_path) = std::env::args().nth(1) else {
        eprintln!("usage: cargo run --example table -- path/to/font.ttf");
        std::process::exit(1);
    };
    let font = Font::load(std::fs::read(&font_path).expect("can read font")).expect("can load font");

    // register the font as the only face of the "body" family;
    // bold lookups fall back to the normal face
    let mut fonts = FontBook::default();
    fonts.add("body", FontStyle::Normal, font);

    // a letter sized grid with half an inch of margin all around
    let mut grid = Grid::new(pagesize::LETTER, Margins::all(In(0.5)), fonts, "body");

    // a title row above the table
    grid.row(Pt(30.0), &mut |row: &mut dyn RowHost| {
        row.col(12, &mut |cell: &mut dyn CellHost| {
            cell.text(
                "Squares and cubes",
                &TextProps {
                    size: Pt(18.0),
                    align: Align::Center,
                    ..TextProps::default()
                },
            )
        });
    });

    let header = ["n", "n squared", "n cubed", "notes"];
    let contents: Vec<Vec<String>> = (1..=80)
        .map(|n: u64| {
            let note = if n % 10 == 0 {
                lipsum::lipsum(12)
            } else {
                String::new()
            };
            vec![n.to_string(), (n * n).to_string(), (n * n * n).to_string(), note]
        })
        .collect();

    // re-draw the header whenever the table spills onto a new page
    let repeated = header.map(str::to_string);
    let options = TableRenderOptions {
        header: TableTextOptions {
            grid_sizes: vec![2, 3, 3, 4],
            ..TableTextOptions::default()
        },
        content: TableTextOptions {
            grid_sizes: vec![2, 3, 3, 4],
            ..TableTextOptions::default()
        },
        header_background: Some(colours::LIGHT_GREY),
        alternated_background: Some(pdf_grid::Colour::new_grey_bytes(245)),
        vertical_content_padding: Pt(4.0),
        left: Pt(2.0),
        line: true,
        ..TableRenderOptions::default()
    }
    .with_header_on_new_page(move |grid: &mut dyn GridHost| {
        grid.row(Pt(14.0), &mut |row: &mut dyn RowHost| {
            for (label, size) in repeated.iter().zip([2, 3, 3, 4]) {
                row.col(size, &mut |cell: &mut dyn CellHost| {
                    cell.text(
                        label,
                        &TextProps {
                            style: FontStyle::Bold,
                            left: Pt(2.0),
                            ..TextProps::default()
                        },
                    )
                });
            }
        });
    });

    TableList::default()
        .create(&mut grid, &header, &contents, "body", options)
        .expect("grid sizes match the columns");

    // write the finished document, embedding the font
    let out = std::fs::File::create("table.pdf").expect("can create table.pdf");
    grid.write(out).expect("can write pdf");
}
