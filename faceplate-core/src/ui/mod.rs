//! Page stack and event routing
//!
//! A [`Ui`] owns an ordered stack of [`Page`]s and a set of displays. Every
//! main-loop iteration [`Ui::process`] drains the event channel, routes
//! each event from the top page downward until one consumes it, and then
//! redraws every display whose refresh period has elapsed.
//!
//! Pages are not owned by the `Ui`. The application keeps them in
//! `RefCell`s that outlive the dispatcher and hands out [`PageRef`]s; the
//! `Ui` borrows a page only for the duration of one handler or draw call.

pub mod context;
pub mod dispatcher;
pub mod page;

pub use context::UiContext;
pub use dispatcher::{DisplayRef, Ui};
pub use page::{Page, PageLink, PageRef, UiId};

use crate::event::{ControlId, INVALID_CONTROL_ID};

/// Errors returned by page and display management
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// The page is already open on some `Ui`
    PageAlreadyActive,
    /// No free slot in the page stack
    PageStackFull,
    /// The page is not open on this `Ui`
    PageNotActive,
    /// The page is currently borrowed elsewhere
    PageBusy,
    /// No free display slot
    DisplaysFull,
}

/// Direction buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

impl Arrow {
    /// All arrows in routing priority order
    pub const ALL: [Arrow; 4] = [Arrow::Left, Arrow::Right, Arrow::Up, Arrow::Down];
}

/// Button bound to a UI role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonRole {
    Okay,
    Cancel,
    Function,
    Arrow(Arrow),
}

/// Button role bindings; unbound roles hold [`INVALID_CONTROL_ID`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonRoles {
    pub okay: ControlId,
    pub cancel: ControlId,
    pub function: ControlId,
    pub left: ControlId,
    pub right: ControlId,
    pub up: ControlId,
    pub down: ControlId,
}

impl Default for ButtonRoles {
    fn default() -> Self {
        Self {
            okay: INVALID_CONTROL_ID,
            cancel: INVALID_CONTROL_ID,
            function: INVALID_CONTROL_ID,
            left: INVALID_CONTROL_ID,
            right: INVALID_CONTROL_ID,
            up: INVALID_CONTROL_ID,
            down: INVALID_CONTROL_ID,
        }
    }
}

impl ButtonRoles {
    pub fn arrow(&self, arrow: Arrow) -> ControlId {
        match arrow {
            Arrow::Left => self.left,
            Arrow::Right => self.right,
            Arrow::Up => self.up,
            Arrow::Down => self.down,
        }
    }

    fn arrow_mut(&mut self, arrow: Arrow) -> &mut ControlId {
        match arrow {
            Arrow::Left => &mut self.left,
            Arrow::Right => &mut self.right,
            Arrow::Up => &mut self.up,
            Arrow::Down => &mut self.down,
        }
    }

    /// Role of button `id`, checked in routing priority order
    pub fn role_of(&self, id: ControlId) -> Option<ButtonRole> {
        if id == INVALID_CONTROL_ID {
            None
        } else if id == self.okay {
            Some(ButtonRole::Okay)
        } else if id == self.cancel {
            Some(ButtonRole::Cancel)
        } else if id == self.function {
            Some(ButtonRole::Function)
        } else {
            Arrow::ALL
                .into_iter()
                .find(|&arrow| self.arrow(arrow) == id)
                .map(ButtonRole::Arrow)
        }
    }
}

/// Encoders and pots with a UI meaning
///
/// Menus scroll with the menu encoder and edit values with the value
/// encoder or the value pot. Unbound entries hold [`INVALID_CONTROL_ID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpecialControls {
    pub menu_encoder: ControlId,
    pub value_encoder: ControlId,
    pub value_pot: ControlId,
}

impl Default for SpecialControls {
    fn default() -> Self {
        Self {
            menu_encoder: INVALID_CONTROL_ID,
            value_encoder: INVALID_CONTROL_ID,
            value_pot: INVALID_CONTROL_ID,
        }
    }
}

impl SpecialControls {
    pub fn is_menu_encoder(&self, id: ControlId) -> bool {
        id != INVALID_CONTROL_ID && id == self.menu_encoder
    }

    pub fn is_value_encoder(&self, id: ControlId) -> bool {
        id != INVALID_CONTROL_ID && id == self.value_encoder
    }

    pub fn is_value_pot(&self, id: ControlId) -> bool {
        id != INVALID_CONTROL_ID && id == self.value_pot
    }
}
