use crate::font::TextStyle;
use crate::units::Pt;

/// Anything that can tell how wide a run of text is when set in a given style.
/// [FontBook](crate::FontBook) measures with real glyph advances.
pub trait TextMeasure {
    fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
        (**self).width_of_text(text, style)
    }
}

/// Breaks text into the lines it occupies inside a column `width` wide.
///
/// Hard line breaks (`\n`, `\r\n`, `\r`) always start a new line. Within a
/// paragraph, words are packed greedily: a word (plus its trailing space) is
/// appended while the line stays strictly narrower than `width`, otherwise it
/// starts the next line. A word wider than the column gets a line to itself
/// rather than being split. A paragraph that fits, or that holds a single
/// word, is never broken.
///
/// The grid draws text with exactly these lines, so row heights reserved from
/// [count_wrapped_lines] always match what ends up on the page.
pub fn wrap_lines<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    style: &TextStyle,
    width: Pt,
) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(measure, paragraph, style, width, &mut lines);
    }
    lines
}

fn wrap_paragraph<M: TextMeasure + ?Sized>(
    measure: &M,
    paragraph: &str,
    style: &TextStyle,
    width: Pt,
    lines: &mut Vec<String>,
) {
    if measure.width_of_text(paragraph, style) < width {
        lines.push(paragraph.to_string());
        return;
    }

    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.len() <= 1 {
        lines.push(paragraph.trim().to_string());
        return;
    }

    let mut line = String::new();
    let mut line_width = Pt(0.0);
    for word in words {
        let word_width = measure.width_of_text(&format!("{word} "), style);
        if line.is_empty() || line_width + word_width < width {
            line.push_str(word);
            line.push(' ');
            line_width += word_width;
        } else {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
            line_width = word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line.trim_end().to_string());
    }
}

/// How many lines `text` wraps into inside a column `width` wide. Always at least 1.
pub fn count_wrapped_lines<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    style: &TextStyle,
    width: Pt,
) -> usize {
    wrap_lines(measure, text, style, width).len().max(1)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::FontStyle;

    /// every character is half an em wide
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn width_of_text(&self, text: &str, style: &TextStyle) -> Pt {
            style.size * (0.5 * text.chars().count() as f32)
        }
    }

    fn style() -> TextStyle {
        TextStyle::new("mono", FontStyle::Normal, Pt(10.0))
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_lines(&HalfEm, "hello", &style(), Pt(100.0)), vec!["hello"]);
        assert_eq!(count_wrapped_lines(&HalfEm, "", &style(), Pt(100.0)), 1);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // "aaaa " is 25pt wide, so two words fit in 55pt
        let lines = wrap_lines(&HalfEm, "aaaa bbbb cccc dddd", &style(), Pt(55.0));
        assert_eq!(lines, vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn single_long_word_is_never_split() {
        let lines = wrap_lines(&HalfEm, "supercalifragilistic", &style(), Pt(20.0));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_lines(&HalfEm, "a enormousword b", &style(), Pt(30.0));
        assert_eq!(lines, vec!["a", "enormousword", "b"]);
    }

    #[test]
    fn hard_breaks_start_new_lines() {
        let lines = wrap_lines(&HalfEm, "one\r\ntwo\nthree", &style(), Pt(500.0));
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn narrower_columns_never_need_fewer_lines() {
        let text = lipsum::lipsum(60);
        let mut previous = 0;
        for width in (20..400).rev().step_by(7) {
            let lines = count_wrapped_lines(&HalfEm, &text, &style(), Pt(width as f32));
            assert!(lines >= previous, "width {width}: {lines} < {previous}");
            previous = lines;
        }
    }
}
