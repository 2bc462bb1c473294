//! Text list menu renderer
//!
//! Draws a [`Menu`] as one item per row: a selection marker, the label and
//! the item's value right-aligned. The list scrolls to keep the selected
//! item visible. While editing, the marker changes from `>` to `*`.

use heapless::String;

use faceplate_core::menu::{Menu, MenuRenderer};
use faceplate_core::traits::display::truncate;
use faceplate_core::traits::{Display, DisplayError, TextCanvas, TextCanvasExt};

/// Longest value text shown next to a label
pub const VALUE_LEN: usize = 16;

/// Renders menus onto displays with a text canvas
///
/// Displays without one are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextListRenderer {
    first_visible: usize,
}

impl TextListRenderer {
    pub const fn new() -> Self {
        Self { first_visible: 0 }
    }

    /// Index of the item shown on the top row
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    fn scroll(&mut self, selected: Option<usize>, item_count: usize, rows: usize) {
        self.first_visible = self.first_visible.min(item_count.saturating_sub(1));
        let Some(selected) = selected else {
            return;
        };
        if selected < self.first_visible {
            self.first_visible = selected;
        } else if selected >= self.first_visible + rows {
            self.first_visible = selected + 1 - rows;
        }
    }
}

impl MenuRenderer for TextListRenderer {
    fn draw(&mut self, menu: &Menu<'_>, display: &mut dyn Display) -> Result<(), DisplayError> {
        let Some(canvas) = display.text_canvas() else {
            return Ok(());
        };
        let (cols, rows) = canvas.dimensions();
        if rows == 0 || cols == 0 {
            return Ok(());
        }

        let selected = menu.selected_item_idx();
        self.scroll(selected, menu.item_count(), rows as usize);

        let visible = menu
            .items()
            .iter()
            .enumerate()
            .skip(self.first_visible)
            .take(rows as usize);

        for (row, (index, item)) in visible.enumerate() {
            let row = row as u8;
            let is_selected = selected == Some(index);

            canvas.draw_menu_item(row, item.label, is_selected)?;
            if is_selected && menu.is_editing() {
                canvas.draw_text(row, 0, "*")?;
            }

            let mut value: String<VALUE_LEN> = String::new();
            if item.write_value(&mut value).is_err() {
                // Overlong values are dropped rather than shown cut off
                value.clear();
            }
            let len = value.chars().count().min(cols as usize) as u8;
            if len > 0 {
                canvas.draw_text(row, cols - len, truncate(&value, len))?;
            }
        }
        Ok(())
    }
}
