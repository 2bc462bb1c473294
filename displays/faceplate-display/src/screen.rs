//! Screen buffer types
//!
//! Provides a double-buffered character screen for text-mode displays.
//! Pages draw into the back buffer; `swap_buffers_and_transmit` publishes
//! it as the front buffer a driver reads from.

use faceplate_core::traits::{Display, DisplayError, DisplayKind, TextCanvas};

/// Replacement for characters the screen cannot show
const UNPRINTABLE: u8 = b'?';

#[derive(Clone, Copy)]
struct Frame<const ROWS: usize, const COLS: usize> {
    cells: [[u8; COLS]; ROWS],
    /// Inverted region per row (start_col, end_col exclusive)
    highlights: [Option<(u8, u8)>; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Frame<ROWS, COLS> {
    const fn blank() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            highlights: [None; ROWS],
        }
    }
}

/// Double-buffered `ROWS` x `COLS` character screen
pub struct TextScreen<const ROWS: usize, const COLS: usize> {
    id: u8,
    update_period: u32,
    back: Frame<ROWS, COLS>,
    front: Frame<ROWS, COLS>,
    frames: u32,
}

impl<const ROWS: usize, const COLS: usize> TextScreen<ROWS, COLS> {
    /// Canvas coordinates are `u8`
    const FITS_CANVAS: () = assert!(
        ROWS <= u8::MAX as usize && COLS <= u8::MAX as usize,
        "TextScreen dimensions must fit in u8"
    );

    /// Create a blank screen redrawn at most every `update_period` ticks
    pub const fn new(id: u8, update_period: u32) -> Self {
        let () = Self::FITS_CANVAS;
        Self {
            id,
            update_period,
            back: Frame::blank(),
            front: Frame::blank(),
            frames: 0,
        }
    }

    /// Published content of `row`
    pub fn line(&self, row: usize) -> Option<&str> {
        self.front
            .cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
    }

    /// Published inverted region of `row`
    pub fn highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.front.highlights.get(row).copied().flatten()
    }

    /// Published lines, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..ROWS).filter_map(|row| self.line(row))
    }

    /// Number of frames published so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn set_update_period(&mut self, ticks: u32) {
        self.update_period = ticks;
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        COLS
    }
}

impl<const ROWS: usize, const COLS: usize> TextCanvas for TextScreen<ROWS, COLS> {
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let Some(cells) = self.back.cells.get_mut(row as usize) else {
            return Err(DisplayError::InvalidCoordinates);
        };
        let start = col as usize;
        if start >= COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        for (cell, ch) in cells[start..].iter_mut().zip(text.chars()) {
            *cell = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                UNPRINTABLE
            };
        }
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let Some(highlight) = self.back.highlights.get_mut(row as usize) else {
            return Err(DisplayError::InvalidCoordinates);
        };
        let end_col = end_col.min(COLS as u8);
        if start_col >= end_col {
            return Err(DisplayError::InvalidCoordinates);
        }
        *highlight = Some((start_col, end_col));
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS as u8, ROWS as u8)
    }
}

impl<const ROWS: usize, const COLS: usize> Display for TextScreen<ROWS, COLS> {
    fn id(&self) -> u8 {
        self.id
    }

    fn kind(&self) -> DisplayKind {
        DisplayKind::Character
    }

    fn update_period(&self) -> u32 {
        self.update_period
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.back = Frame::blank();
        Ok(())
    }

    fn swap_buffers_and_transmit(&mut self) -> Result<(), DisplayError> {
        self.front = self.back;
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }

    fn text_canvas(&mut self) -> Option<&mut dyn TextCanvas> {
        Some(self)
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize> defmt::Format for TextScreen<ROWS, COLS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextScreen[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line);
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceplate_core::traits::TextCanvasExt;

    #[test]
    fn test_new_screen_is_blank() {
        let screen: TextScreen<2, 8> = TextScreen::new(1, 20);
        assert_eq!(screen.line(0), Some("        "));
        assert_eq!(screen.line(2), None);
        assert_eq!(screen.frames(), 0);
        assert_eq!(screen.kind(), DisplayKind::Character);
        assert_eq!(screen.dimensions(), (8, 2));
    }

    #[test]
    fn test_drawing_is_invisible_until_swap() {
        let mut screen: TextScreen<2, 8> = TextScreen::new(0, 20);
        screen.draw_text(1, 2, "Hi").unwrap();
        screen.invert_region(1, 0, 4).unwrap();
        assert_eq!(screen.line(1), Some("        "));
        assert_eq!(screen.highlight(1), None);

        screen.swap_buffers_and_transmit().unwrap();
        assert_eq!(screen.line(1), Some("  Hi    "));
        assert_eq!(screen.highlight(1), Some((0, 4)));
        assert_eq!(screen.frames(), 1);
    }

    #[test]
    fn test_clear_only_touches_back_buffer() {
        let mut screen: TextScreen<1, 4> = TextScreen::new(0, 20);
        screen.draw_text(0, 0, "abcd").unwrap();
        screen.swap_buffers_and_transmit().unwrap();
        screen.clear().unwrap();
        assert_eq!(screen.line(0), Some("abcd"));

        screen.swap_buffers_and_transmit().unwrap();
        assert_eq!(screen.line(0), Some("    "));
    }

    #[test]
    fn test_text_is_clipped() {
        let mut screen: TextScreen<1, 6> = TextScreen::new(0, 20);
        screen.draw_text(0, 3, "Volume").unwrap();
        screen.swap_buffers_and_transmit().unwrap();
        assert_eq!(screen.line(0), Some("   Vol"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let mut screen: TextScreen<2, 6> = TextScreen::new(0, 20);
        assert_eq!(screen.draw_text(2, 0, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.draw_text(0, 6, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.invert_region(0, 4, 4), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.invert_region(0, 4, 200), Ok(()));
    }

    #[test]
    fn test_unprintable_characters() {
        let mut screen: TextScreen<1, 4> = TextScreen::new(0, 20);
        screen.draw_text(0, 0, "a±\tb").unwrap();
        screen.swap_buffers_and_transmit().unwrap();
        assert_eq!(screen.line(0), Some("a??b"));
    }

    #[test]
    fn test_widest_screen() {
        let mut screen: TextScreen<1, 255> = TextScreen::new(0, 20);
        assert_eq!(screen.dimensions(), (255, 1));
        screen.draw_text(0, 254, "xy").unwrap();
        screen.invert_region(0, 250, 255).unwrap();
        assert_eq!(screen.draw_text(0, 255, "x"), Err(DisplayError::InvalidCoordinates));
        screen.swap_buffers_and_transmit().unwrap();
        assert!(screen.line(0).unwrap().ends_with(" x"));
        assert_eq!(screen.highlight(0), Some((250, 255)));
    }

    #[test]
    fn test_canvas_helpers() {
        let mut screen: TextScreen<2, 10> = TextScreen::new(0, 20);
        let canvas = screen.text_canvas().unwrap();
        canvas.draw_menu_item(0, "Tempo", true).unwrap();
        canvas.draw_field(1, "Gain", "-3").unwrap();
        screen.swap_buffers_and_transmit().unwrap();

        let lines: [&str; 2] = [screen.line(0).unwrap(), screen.line(1).unwrap()];
        assert_eq!(lines, ["> Tempo   ", "Gain    -3"]);
        assert_eq!(screen.highlight(0), Some((0, 10)));
    }
}
