//! Card widget: bordered body plus a one-row footer.
//!
//! Cards are stacked in content rows and may start above the viewport or end
//! below it. [`render_clipped`] draws the whole card offscreen and copies only
//! the rows that land inside the clip area.

use crate::view_state::card::CARD_CHROME_ROWS;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Widget},
};

/// One card, ready to draw.
pub struct CardView<'a> {
    body: &'a [Line<'static>],
    footer: Line<'static>,
    border_style: Style,
}

impl<'a> CardView<'a> {
    /// A card showing `body` above `footer`.
    pub fn new(body: &'a [Line<'static>], footer: Line<'static>, border_style: Style) -> Self {
        Self {
            body,
            footer,
            border_style,
        }
    }

    /// Rows the card needs: body plus borders and footer.
    pub fn height(&self) -> usize {
        self.body.len() + CARD_CHROME_ROWS
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let body_rows = inner.height - 1;
        for (row, line) in self.body.iter().take(usize::from(body_rows)).enumerate() {
            buf.set_line(inner.x, inner.y + row as u16, line, inner.width);
        }
        buf.set_line(inner.x, inner.bottom() - 1, &self.footer, inner.width);
    }
}

/// Draw `card` at content row `top` relative to the viewport, keeping only the
/// rows inside `clip`.
///
/// `top` is negative when the card starts above the viewport.
pub fn render_clipped(card: CardView<'_>, x: u16, width: u16, top: isize, clip: Rect, buf: &mut Buffer) {
    let height = card.height().min(usize::from(u16::MAX)) as u16;
    if width == 0 || height == 0 {
        return;
    }

    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    card.render(scratch.area, &mut scratch);

    for row in 0..height {
        let screen_y = clip.y as isize + top + row as isize;
        if screen_y < clip.y as isize || screen_y >= clip.bottom() as isize {
            continue;
        }
        for col in 0..width {
            if let Some(cell) = buf.cell_mut((x + col, screen_y as u16)) {
                *cell = scratch[(col, row)].clone();
            }
        }
    }
}
