//! Values and custom items edited through menus

use core::fmt;

/// A value with an application-defined range and mapping
///
/// Menus never see the underlying representation. They step the value by
/// encoder or arrow increments, jump it to an absolute pot position and
/// ask it for display text.
pub trait MappedValue {
    /// Move by `increments` steps; `accelerated` requests coarse steps
    fn step(&mut self, increments: i16, accelerated: bool);

    /// Set from a position in `0.0 ..= 1.0`
    fn set_from_unit_interval(&mut self, position: f32);

    /// Write the human-readable value
    fn append_display_string(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Application-defined menu entry
///
/// Every method has a no-op default, so an item only implements what it
/// supports. An item is editable only if `can_be_modified` returns true.
pub trait CustomItem {
    fn can_be_modified(&self) -> bool {
        false
    }

    /// Modify by encoder or arrow increments
    fn modify_by_increments(&mut self, _increments: i16, _steps_per_rev: u16, _function_down: bool) {}

    /// Modify to an absolute pot position
    fn modify_to_position(&mut self, _position: f32, _function_down: bool) {}

    /// Called when the item is entered while not editable
    fn on_enter(&mut self) {}

    /// Write the value text shown next to the label
    fn append_display_string(&self, _out: &mut dyn fmt::Write) -> fmt::Result {
        Ok(())
    }
}
