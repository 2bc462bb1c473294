//! Display traits
//!
//! The dispatcher only needs to clear a display, hand it to the open pages
//! and push the finished frame out. What a page can draw depends on the
//! display, which it discovers through [`Display::kind`] and the optional
//! capability accessors such as [`Display::text_canvas`].

/// Errors that can occur while drawing or transmitting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Broad display category, used by pages to pick a drawing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayKind {
    /// Individual LEDs or LED rings
    Led,
    /// Character display (text grid)
    Character,
    /// Pixel display
    Graphics,
    #[default]
    Other,
}

/// A display registered with the [`Ui`](crate::ui::Ui)
pub trait Display {
    /// Application-defined identifier
    fn id(&self) -> u8;

    fn kind(&self) -> DisplayKind {
        DisplayKind::Other
    }

    /// Minimum number of ticks between two redraws
    fn update_period(&self) -> u32;

    /// Clear the back buffer before the pages draw
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Publish the finished frame
    fn swap_buffers_and_transmit(&mut self) -> Result<(), DisplayError>;

    /// Text drawing surface, if this display has one
    fn text_canvas(&mut self) -> Option<&mut dyn TextCanvas> {
        None
    }
}

/// Character-cell drawing surface
pub trait TextCanvas {
    /// Draw text at the specified row and column
    ///
    /// Text running past the right edge is clipped.
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row (for selection highlighting)
    ///
    /// `end_col` is exclusive.
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}

/// Width of the selection marker drawn by [`TextCanvasExt::draw_menu_item`]
pub const MARKER_WIDTH: u8 = 2;

/// Helpers for drawing common UI elements
pub trait TextCanvasExt: TextCanvas {
    /// Draw a list row with an optional selection marker
    ///
    /// The selected row gets a `>` marker and is inverted across the full
    /// width.
    fn draw_menu_item(&mut self, row: u8, text: &str, selected: bool) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        self.draw_text(row, 0, if selected { "> " } else { "  " })?;
        self.draw_text(row, MARKER_WIDTH, text)?;
        if selected {
            self.invert_region(row, 0, cols)?;
        }
        Ok(())
    }

    /// Draw a label at the left edge and a value right-aligned
    ///
    /// The value wins when both do not fit.
    fn draw_field(&mut self, row: u8, label: &str, value: &str) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        let value_len = value.chars().count().min(cols as usize) as u8;
        let value_start = cols - value_len;

        self.draw_text(row, 0, truncate(label, value_start.saturating_sub(1)))?;
        if value_len > 0 {
            self.draw_text(row, value_start, truncate(value, value_len))?;
        }
        Ok(())
    }
}

impl<T: TextCanvas + ?Sized> TextCanvasExt for T {}

/// Longest prefix of `text` with at most `max_chars` characters
pub fn truncate(text: &str, max_chars: u8) -> &str {
    match text.char_indices().nth(max_chars as usize) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Volume", 3), "Vol");
        assert_eq!(truncate("Vol", 8), "Vol");
        assert_eq!(truncate("Vol", 0), "");
        assert_eq!(truncate("Gain ±", 6), "Gain ±");
    }

    struct Row {
        cells: [u8; 10],
        inverted: bool,
    }

    impl TextCanvas for Row {
        fn draw_text(&mut self, _row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            for (offset, byte) in text.bytes().enumerate() {
                let col = col as usize + offset;
                if col < self.cells.len() {
                    self.cells[col] = byte;
                }
            }
            Ok(())
        }

        fn invert_region(&mut self, _row: u8, _start: u8, _end: u8) -> Result<(), DisplayError> {
            self.inverted = true;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (10, 1)
        }
    }

    fn blank() -> Row {
        Row {
            cells: [b' '; 10],
            inverted: false,
        }
    }

    #[test]
    fn test_draw_menu_item() {
        let mut row = blank();
        row.draw_menu_item(0, "Tempo", true).unwrap();
        assert_eq!(&row.cells, b"> Tempo   ");
        assert!(row.inverted);

        let mut row = blank();
        row.draw_menu_item(0, "Tempo", false).unwrap();
        assert_eq!(&row.cells, b"  Tempo   ");
        assert!(!row.inverted);
    }

    #[test]
    fn test_draw_field() {
        let mut row = blank();
        row.draw_field(0, "Tempo", "120").unwrap();
        assert_eq!(&row.cells, b"Tempo  120");

        let mut row = blank();
        row.draw_field(0, "Resonance", "0.75").unwrap();
        assert_eq!(&row.cells, b"Reson 0.75");
    }
}
