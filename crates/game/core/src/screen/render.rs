//! Render sink and input event model shared with the outer shell.

use crate::glyph::Glyph;
use crate::types::Dimensions;

/// Drawing surface the core renders into.
///
/// Implementations decide how glyphs and styled text reach the user. The core
/// never inspects the `%c{..}`/`%b{..}` style markup it puts in text.
pub trait RenderSink {
    /// Draws one cell at screen-local coordinates.
    fn draw_cell(&mut self, x: u32, y: u32, glyph: Glyph);

    /// Draws a line of (possibly styled) text starting at screen-local coordinates.
    fn draw_text(&mut self, x: u32, y: u32, text: &str);
}

/// Keys the screens react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Char(char),
}

impl Key {
    /// Movement offset for arrow keys.
    pub fn direction(self) -> Option<(i32, i32)> {
        match self {
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            _ => None,
        }
    }
}

/// Discrete input delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(Key),
}

/// Removes `%c{...}` and `%b{...}` style directives, keeping the plain text.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('%') {
        plain.push_str(&rest[..start]);
        let directive = &rest[start..];
        let is_style = directive.starts_with("%c{") || directive.starts_with("%b{");
        match directive.find('}') {
            Some(end) if is_style => rest = &directive[end + 1..],
            _ => {
                plain.push('%');
                rest = &directive[1..];
            }
        }
    }

    plain.push_str(rest);
    plain
}

/// In-memory grid sink. Text is stored without style markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBuffer {
    size: Dimensions,
    cells: Vec<Glyph>,
}

impl CellBuffer {
    pub fn new(size: Dimensions) -> Self {
        Self {
            size,
            cells: vec![Glyph::default(); size.area()],
        }
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn clear(&mut self) {
        self.cells.fill(Glyph::default());
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }

    pub fn glyph(&self, x: u32, y: u32) -> Option<Glyph> {
        self.index(x, y).map(|index| self.cells[index])
    }

    /// Characters of one row, including trailing blanks.
    pub fn row(&self, y: u32) -> String {
        (0..self.size.width)
            .filter_map(|x| self.glyph(x, y))
            .map(|glyph| glyph.ch)
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.size.height).map(|y| self.row(y))
    }
}

impl RenderSink for CellBuffer {
    fn draw_cell(&mut self, x: u32, y: u32, glyph: Glyph) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = glyph;
        }
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str) {
        for (offset, ch) in strip_markup(text).chars().enumerate() {
            self.draw_cell(x + offset as u32, y, Glyph::plain(ch));
        }
    }
}
