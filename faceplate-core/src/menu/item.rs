//! Menu items
//!
//! An item is a label plus one of a closed set of behaviours. Items borrow
//! the state they act on; the menu itself stores nothing but the slice.

use core::cell::{Cell, RefCell};
use core::fmt;

use crate::traits::{CustomItem, MappedValue};
use crate::ui::{PageRef, UiContext};

/// What a menu item does when modified or entered
#[derive(Clone, Copy)]
pub enum MenuItemKind<'a> {
    /// Calls the function on enter
    Callback(&'a dyn Fn()),
    /// Toggles on enter, forced on or off by modify input
    Checkbox(&'a Cell<bool>),
    /// Edited in place through the value's own mapping
    EditableValue(&'a RefCell<dyn MappedValue + 'a>),
    /// Opens another page on enter
    OpenSubmenu(PageRef<'a>),
    /// Closes the menu on enter
    CloseMenu,
    /// Application-defined behaviour
    Custom(&'a RefCell<dyn CustomItem + 'a>),
}

/// A labelled menu entry
#[derive(Clone, Copy)]
pub struct MenuItem<'a> {
    pub label: &'a str,
    pub kind: MenuItemKind<'a>,
}

impl<'a> MenuItem<'a> {
    pub fn new(label: &'a str, kind: MenuItemKind<'a>) -> Self {
        Self { label, kind }
    }

    pub fn callback(label: &'a str, function: &'a dyn Fn()) -> Self {
        Self::new(label, MenuItemKind::Callback(function))
    }

    pub fn checkbox(label: &'a str, checked: &'a Cell<bool>) -> Self {
        Self::new(label, MenuItemKind::Checkbox(checked))
    }

    pub fn value(label: &'a str, value: &'a RefCell<dyn MappedValue + 'a>) -> Self {
        Self::new(label, MenuItemKind::EditableValue(value))
    }

    pub fn submenu(label: &'a str, page: PageRef<'a>) -> Self {
        Self::new(label, MenuItemKind::OpenSubmenu(page))
    }

    pub fn close(label: &'a str) -> Self {
        Self::new(label, MenuItemKind::CloseMenu)
    }

    pub fn custom(label: &'a str, item: &'a RefCell<dyn CustomItem + 'a>) -> Self {
        Self::new(label, MenuItemKind::Custom(item))
    }

    /// Check if the item has an editing mode
    ///
    /// Checkboxes toggle directly and are not modifiable in this sense.
    pub fn can_be_modified(&self) -> bool {
        match self.kind {
            MenuItemKind::EditableValue(_) => true,
            MenuItemKind::Custom(item) => item.try_borrow().is_ok_and(|item| item.can_be_modified()),
            MenuItemKind::Callback(_)
            | MenuItemKind::Checkbox(_)
            | MenuItemKind::OpenSubmenu(_)
            | MenuItemKind::CloseMenu => false,
        }
    }

    /// Apply relative input from an encoder or arrow button
    pub fn modify_by(&self, increments: i16, steps_per_rev: u16, function_down: bool) {
        match self.kind {
            MenuItemKind::Checkbox(checked) => checked.set(increments > 0),
            MenuItemKind::EditableValue(value) => match value.try_borrow_mut() {
                Ok(mut value) => value.step(increments, function_down),
                Err(_) => warn!("menu value busy, modify dropped"),
            },
            MenuItemKind::Custom(item) => match item.try_borrow_mut() {
                Ok(mut item) => item.modify_by_increments(increments, steps_per_rev, function_down),
                Err(_) => warn!("custom item busy, modify dropped"),
            },
            MenuItemKind::Callback(_) | MenuItemKind::OpenSubmenu(_) | MenuItemKind::CloseMenu => {}
        }
    }

    /// Apply an absolute position from a pot
    pub fn modify_to(&self, position: f32, function_down: bool) {
        match self.kind {
            MenuItemKind::Checkbox(checked) => checked.set(position > 0.5),
            MenuItemKind::EditableValue(value) => match value.try_borrow_mut() {
                Ok(mut value) => value.set_from_unit_interval(position),
                Err(_) => warn!("menu value busy, modify dropped"),
            },
            MenuItemKind::Custom(item) => match item.try_borrow_mut() {
                Ok(mut item) => item.modify_to_position(position, function_down),
                Err(_) => warn!("custom item busy, modify dropped"),
            },
            MenuItemKind::Callback(_) | MenuItemKind::OpenSubmenu(_) | MenuItemKind::CloseMenu => {}
        }
    }

    /// Run the item's enter action
    pub fn enter(&self, ctx: &mut UiContext<'_, 'a>) {
        match self.kind {
            MenuItemKind::Callback(function) => function(),
            MenuItemKind::Checkbox(checked) => checked.set(!checked.get()),
            MenuItemKind::OpenSubmenu(page) => ctx.open(page),
            MenuItemKind::CloseMenu => ctx.close_page(),
            MenuItemKind::EditableValue(_) => {}
            MenuItemKind::Custom(item) => match item.try_borrow_mut() {
                Ok(mut item) => item.on_enter(),
                Err(_) => warn!("custom item busy, enter dropped"),
            },
        }
    }

    /// Write the value text shown next to the label
    ///
    /// Checkboxes render as `[x]` or `[ ]`, submenus as `>`.
    pub fn write_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self.kind {
            MenuItemKind::Checkbox(checked) => out.write_str(if checked.get() { "[x]" } else { "[ ]" }),
            MenuItemKind::EditableValue(value) => match value.try_borrow() {
                Ok(value) => value.append_display_string(out),
                Err(_) => Ok(()),
            },
            MenuItemKind::Custom(item) => match item.try_borrow() {
                Ok(item) => item.append_display_string(out),
                Err(_) => Ok(()),
            },
            MenuItemKind::OpenSubmenu(_) => out.write_str(">"),
            MenuItemKind::Callback(_) | MenuItemKind::CloseMenu => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;
    use heapless::String;

    struct Level(i32);

    impl MappedValue for Level {
        fn step(&mut self, increments: i16, accelerated: bool) {
            let scale = if accelerated { 10 } else { 1 };
            self.0 += i32::from(increments) * scale;
        }

        fn set_from_unit_interval(&mut self, position: f32) {
            self.0 = (position * 100.0) as i32;
        }

        fn append_display_string(&self, out: &mut dyn fmt::Write) -> fmt::Result {
            write!(out, "{}", self.0)
        }
    }

    struct Toggle {
        editable: bool,
        entered: u8,
        last: i16,
    }

    impl CustomItem for Toggle {
        fn can_be_modified(&self) -> bool {
            self.editable
        }

        fn modify_by_increments(&mut self, increments: i16, _steps_per_rev: u16, _function_down: bool) {
            self.last = increments;
        }

        fn on_enter(&mut self) {
            self.entered += 1;
        }
    }

    #[test]
    fn test_checkbox_modify_forces_state() {
        let checked = Cell::new(true);
        let item = MenuItem::checkbox("Sync", &checked);

        item.modify_by(-3, 0, false);
        assert!(!checked.get());
        item.modify_by(1, 0, true);
        assert!(checked.get());
        item.modify_by(1, 0, false);
        assert!(checked.get());

        item.modify_to(0.4, false);
        assert!(!checked.get());
        item.modify_to(0.6, false);
        assert!(checked.get());
        assert!(!item.can_be_modified());
    }

    #[test]
    fn test_value_modify() {
        let level = RefCell::new(Level(5));
        let item = MenuItem::value("Level", &level);
        assert!(item.can_be_modified());

        item.modify_by(2, 24, false);
        assert_eq!(level.borrow().0, 7);
        item.modify_by(-1, 24, true);
        assert_eq!(level.borrow().0, -3);
        item.modify_to(0.5, false);
        assert_eq!(level.borrow().0, 50);

        let mut text: String<8> = String::new();
        item.write_value(&mut text).unwrap();
        assert_eq!(text.as_str(), "50");
    }

    #[test]
    fn test_custom_item() {
        let toggle = RefCell::new(Toggle {
            editable: false,
            entered: 0,
            last: 0,
        });
        let item = MenuItem::custom("Mode", &toggle);
        assert!(!item.can_be_modified());

        toggle.borrow_mut().editable = true;
        assert!(item.can_be_modified());

        item.modify_by(-4, 24, false);
        assert_eq!(toggle.borrow().last, -4);

        // Busy items are left alone
        let held = toggle.borrow_mut();
        item.modify_by(9, 24, false);
        drop(held);
        assert_eq!(toggle.borrow().last, -4);
    }

    #[test]
    fn test_inert_items() {
        let called = Cell::new(false);
        let on_call = || called.set(true);
        let callback = MenuItem::callback("Run", &on_call);
        let close = MenuItem::close("Back");

        for item in [callback, close] {
            assert!(!item.can_be_modified());
            item.modify_by(1, 0, false);
            item.modify_to(1.0, false);
            let mut text: String<4> = String::new();
            item.write_value(&mut text).unwrap();
            assert!(text.is_empty());
        }
        assert!(!called.get());
    }

    #[test]
    fn test_checkbox_text() {
        let checked = Cell::new(false);
        let item = MenuItem::checkbox("Sync", &checked);
        let mut text: String<4> = String::new();
        item.write_value(&mut text).unwrap();
        assert_eq!(text.as_str(), "[ ]");
    }
}
