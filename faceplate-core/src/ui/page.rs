//! Page contract
//!
//! A page is one layer of the user interface: a menu, a value editor, a
//! status overlay. Pages receive input through the `on_*` handlers and draw
//! themselves onto every display the [`Ui`](super::Ui) redraws.
//!
//! Every input handler returns `true` when it consumed the event, which
//! stops routing; `false` passes the event to the page below. The default
//! implementations consume everything, so a page on top blocks the pages
//! below it unless it opts out.

use core::cell::{Cell, RefCell};

use super::{Arrow, UiContext};
use crate::event::ControlId;
use crate::traits::{Display, DisplayError};

/// Identifies one [`Ui`](super::Ui) instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiId(u16);

impl UiId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Shared handle to a page
///
/// The page must outlive the `Ui` it is opened on.
pub type PageRef<'a> = &'a RefCell<dyn Page<'a> + 'a>;

/// Back-reference from a page to the `Ui` hosting it
///
/// Embedded in every page and managed by the `Ui`: set when the page is
/// pushed, cleared when it is removed.
#[derive(Debug, Default)]
pub struct PageLink {
    host: Cell<Option<UiId>>,
}

impl PageLink {
    pub const fn new() -> Self {
        Self {
            host: Cell::new(None),
        }
    }

    /// The `Ui` this page is open on
    pub fn host(&self) -> Option<UiId> {
        self.host.get()
    }

    pub fn is_active(&self) -> bool {
        self.host.get().is_some()
    }

    pub(crate) fn attach(&self, ui: UiId) {
        self.host.set(Some(ui));
    }

    pub(crate) fn detach(&self) {
        self.host.set(None);
    }
}

/// One layer of the user interface
///
/// Button handlers receive `presses == 0` when the button was released.
pub trait Page<'a> {
    /// Link slot managed by the hosting `Ui`
    fn link(&self) -> &PageLink;

    /// Check if the page is currently open on a `Ui`
    fn is_active(&self) -> bool {
        self.link().is_active()
    }

    fn on_okay(&mut self, _ctx: &mut UiContext<'_, 'a>, _presses: u8) -> bool {
        true
    }

    fn on_cancel(&mut self, _ctx: &mut UiContext<'_, 'a>, _presses: u8) -> bool {
        true
    }

    fn on_arrow(&mut self, _ctx: &mut UiContext<'_, 'a>, _arrow: Arrow, _presses: u8) -> bool {
        true
    }

    fn on_function(&mut self, _ctx: &mut UiContext<'_, 'a>, _presses: u8) -> bool {
        true
    }

    /// A button without a UI role
    fn on_other_button(&mut self, _ctx: &mut UiContext<'_, 'a>, _id: ControlId, _presses: u8) -> bool {
        true
    }

    fn on_encoder(
        &mut self,
        _ctx: &mut UiContext<'_, 'a>,
        _id: ControlId,
        _increments: i16,
        _steps_per_rev: u16,
    ) -> bool {
        true
    }

    fn on_encoder_activity(&mut self, _ctx: &mut UiContext<'_, 'a>, _id: ControlId, _active: bool) -> bool {
        true
    }

    fn on_pot(&mut self, _ctx: &mut UiContext<'_, 'a>, _id: ControlId, _position: f32) -> bool {
        true
    }

    fn on_pot_activity(&mut self, _ctx: &mut UiContext<'_, 'a>, _id: ControlId, _active: bool) -> bool {
        true
    }

    /// Called after the page was pushed onto the stack
    fn on_show(&mut self) {}

    /// Called after the page was removed from the stack
    fn on_hide(&mut self) {}

    /// Draw onto `display`
    fn draw(&mut self, display: &mut dyn Display) -> Result<(), DisplayError>;

    /// Check if this page completely covers `display`
    ///
    /// Pages below the topmost opaque page are not drawn.
    fn is_opaque(&self, _display: &dyn Display) -> bool {
        true
    }
}

/// Check if two handles refer to the same page
pub fn same_page<'a>(a: PageRef<'a>, b: PageRef<'a>) -> bool {
    core::ptr::addr_eq::<RefCell<dyn Page<'a> + 'a>, RefCell<dyn Page<'a> + 'a>>(a, b)
}
