//! Word wrapping for styled lines.
//!
//! Cards are wrapped here rather than by `Paragraph::wrap` so the measured
//! row count and the rendered row count are the same number by construction.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Split text into alternating runs of whitespace and non-whitespace.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != space)
            .map_or(rest.len(), |(i, _)| i);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

/// Accumulates wrapped output rows.
struct Wrapper {
    width: usize,
    line_style: Style,
    rows: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
}

impl Wrapper {
    fn push(&mut self, text: &str, style: Style, text_width: usize) {
        match self.current.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(text),
            _ => self.current.push(Span::styled(text.to_string(), style)),
        }
        self.current_width += text_width;
    }

    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.rows.push(Line::from(spans).style(self.line_style));
        self.current_width = 0;
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let word_width = word.width();
        if self.current_width + word_width <= self.width {
            self.push(word, style, word_width);
            return;
        }
        if self.current_width > 0 && word_width <= self.width {
            self.flush();
            self.push(word, style, word_width);
            return;
        }
        // Longer than a whole row: break between chars.
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if self.current_width + w > self.width && self.current_width > 0 {
                self.flush();
            }
            let mut buf = [0u8; 4];
            self.push(ch.encode_utf8(&mut buf), style, w);
        }
    }

    fn push_space(&mut self, space: &str, style: Style) {
        // Whitespace never starts a continuation row.
        if self.current_width == 0 && !self.rows.is_empty() {
            return;
        }
        let w = space.width();
        if self.current_width + w > self.width {
            self.flush();
            return;
        }
        self.push(space, style, w);
    }
}

/// Wrap `line` to rows of at most `width` cells.
///
/// Always returns at least one row. Leading whitespace of the first row is
/// kept (code indentation); continuation rows start at the next word.
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    let mut wrapper = Wrapper {
        width: width.max(1),
        line_style: line.style,
        rows: Vec::new(),
        current: Vec::new(),
        current_width: 0,
    };

    for span in &line.spans {
        for token in tokens(&span.content) {
            if token.starts_with(char::is_whitespace) {
                wrapper.push_space(token, span.style);
            } else {
                wrapper.push_word(token, span.style);
            }
        }
    }

    if !wrapper.current.is_empty() || wrapper.rows.is_empty() {
        wrapper.flush();
    }
    wrapper.rows
}

/// Wrap every line in `lines`.
pub fn wrap_lines<'a, I>(lines: I, width: usize) -> Vec<Line<'static>>
where
    I: IntoIterator<Item = &'a Line<'a>>,
{
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}
