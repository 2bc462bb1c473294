//! Navigable menus
//!
//! [`Menu`] is the selection/edit state machine shared by every menu page.
//! It is in one of two states:
//!
//! - **Browsing**: the "select" arrow pair and the menu encoder move the
//!   selection, okay enters the selected item
//! - **Editing**: the selected item is being modified; the select pair and
//!   the menu encoder modify it too, okay returns to browsing
//!
//! The "modify" arrow pair and the value encoder modify the selected item
//! in both states. [`MenuPage`] wraps a `Menu` and a [`MenuRenderer`] into a
//! [`Page`](crate::ui::Page).

pub mod item;
pub mod page;

pub use item::{MenuItem, MenuItemKind};
pub use page::{MenuPage, MenuRenderer};

use crate::event::ControlId;
use crate::ui::{Arrow, SpecialControls, UiContext};

/// Which arrow pair selects and which modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Left/right select, up/down modify
    LeftRightSelectUpDownModify,
    /// Up/down select, left/right modify
    #[default]
    UpDownSelectLeftRightModify,
}

impl Orientation {
    /// Check if `arrow` belongs to the select pair
    pub fn is_select_arrow(self, arrow: Arrow) -> bool {
        match self {
            Orientation::LeftRightSelectUpDownModify => matches!(arrow, Arrow::Left | Arrow::Right),
            Orientation::UpDownSelectLeftRightModify => matches!(arrow, Arrow::Up | Arrow::Down),
        }
    }
}

/// Selection movement for an arrow: up and left go to the previous item
fn select_step(arrow: Arrow) -> i32 {
    match arrow {
        Arrow::Left | Arrow::Up => -1,
        Arrow::Right | Arrow::Down => 1,
    }
}

/// Value change for an arrow: up and right increase
fn modify_step(arrow: Arrow) -> i16 {
    match arrow {
        Arrow::Left | Arrow::Down => -1,
        Arrow::Right | Arrow::Up => 1,
    }
}

/// Selection and editing state of a list of menu items
///
/// The selected index is always valid while the menu has items, and
/// editing is only ever set on a modifiable item.
#[derive(Clone, Copy)]
pub struct Menu<'a> {
    items: &'a [MenuItem<'a>],
    orientation: Orientation,
    allow_entering: bool,
    selected: Option<usize>,
    editing: bool,
    function_down: bool,
}

impl Default for Menu<'_> {
    fn default() -> Self {
        Self {
            items: &[],
            orientation: Orientation::default(),
            allow_entering: true,
            selected: None,
            editing: false,
            function_down: false,
        }
    }
}

impl<'a> Menu<'a> {
    pub fn new(orientation: Orientation, items: &'a [MenuItem<'a>], allow_entering: bool) -> Self {
        let mut menu = Self::default();
        menu.init(orientation, items, allow_entering);
        menu
    }

    /// Replace the items and reset to browsing the first one
    pub fn init(&mut self, orientation: Orientation, items: &'a [MenuItem<'a>], allow_entering: bool) {
        self.items = items;
        self.orientation = orientation;
        self.allow_entering = allow_entering;
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.editing = false;
        self.function_down = false;
    }

    /// Select item `index` and leave editing; out-of-range indices are ignored
    pub fn select_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = Some(index);
            self.editing = false;
        }
    }

    pub fn selected_item_idx(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&'a MenuItem<'a>> {
        let items = self.items;
        self.selected.and_then(|index| items.get(index))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, index: usize) -> Option<&'a MenuItem<'a>> {
        let items = self.items;
        items.get(index)
    }

    pub fn items(&self) -> &'a [MenuItem<'a>] {
        self.items
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn allows_entering(&self) -> bool {
        self.allow_entering
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_function_down(&self) -> bool {
        self.function_down
    }

    /// Reset to browsing the first item
    pub fn on_show(&mut self) {
        self.editing = false;
        self.function_down = false;
        self.selected = if self.items.is_empty() { None } else { Some(0) };
    }

    pub fn on_okay(&mut self, ctx: &mut UiContext<'_, 'a>, presses: u8) -> bool {
        if presses == 0 {
            return true;
        }
        let Some(item) = self.selected_item() else {
            return true;
        };

        if self.allow_entering && item.can_be_modified() {
            self.editing = !self.editing;
        } else {
            self.editing = false;
            item.enter(ctx);
        }
        true
    }

    pub fn on_cancel(&mut self, ctx: &mut UiContext<'_, 'a>, presses: u8) -> bool {
        if presses > 0 {
            ctx.close_page();
        }
        true
    }

    pub fn on_arrow(&mut self, arrow: Arrow, presses: u8) -> bool {
        if presses == 0 {
            return true;
        }

        if self.orientation.is_select_arrow(arrow) && !self.editing {
            self.move_selection(select_step(arrow));
        } else {
            self.modify_selected(modify_step(arrow), 0);
        }
        true
    }

    /// Track the function modifier; a release clears it
    pub fn on_function(&mut self, presses: u8) -> bool {
        self.function_down = presses > 0;
        true
    }

    pub fn on_encoder(
        &mut self,
        controls: &SpecialControls,
        id: ControlId,
        increments: i16,
        steps_per_rev: u16,
    ) -> bool {
        if controls.is_menu_encoder(id) {
            if self.editing {
                self.modify_selected(increments, steps_per_rev);
            } else {
                self.move_selection(i32::from(increments));
            }
        }
        // Checked independently: one encoder may hold both roles
        if controls.is_value_encoder(id) {
            self.modify_selected(increments, steps_per_rev);
        }
        true
    }

    pub fn on_pot(&mut self, controls: &SpecialControls, id: ControlId, position: f32) -> bool {
        if controls.is_value_pot(id) && self.editing {
            if let Some(item) = self.selected_item() {
                item.modify_to(position, self.function_down);
            }
        }
        true
    }

    fn move_selection(&mut self, delta: i32) {
        let Some(current) = self.selected else {
            return;
        };
        let last = self.items.len() as i32 - 1;
        let target = (current as i32).saturating_add(delta).clamp(0, last);
        self.selected = Some(target as usize);
    }

    fn modify_selected(&self, increments: i16, steps_per_rev: u16) {
        if let Some(item) = self.selected_item() {
            item.modify_by(increments, steps_per_rev, self.function_down);
        }
    }
}
