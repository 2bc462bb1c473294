//! Menu page

use super::{Menu, MenuItem, Orientation};
use crate::event::ControlId;
use crate::traits::{Display, DisplayError};
use crate::ui::{Arrow, Page, PageLink, UiContext};

/// Draws a menu onto a display
///
/// The state machine in [`Menu`] is display-agnostic; a renderer decides
/// how the items, the selection and the editing state look.
pub trait MenuRenderer {
    fn draw(&mut self, menu: &Menu<'_>, display: &mut dyn Display) -> Result<(), DisplayError>;

    fn is_opaque(&self, _display: &dyn Display) -> bool {
        true
    }
}

/// A [`Page`] presenting a [`Menu`]
pub struct MenuPage<'a, R> {
    link: PageLink,
    menu: Menu<'a>,
    renderer: R,
}

impl<'a, R: MenuRenderer> MenuPage<'a, R> {
    pub fn new(orientation: Orientation, items: &'a [MenuItem<'a>], allow_entering: bool, renderer: R) -> Self {
        Self {
            link: PageLink::new(),
            menu: Menu::new(orientation, items, allow_entering),
            renderer,
        }
    }

    pub fn menu(&self) -> &Menu<'a> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu<'a> {
        &mut self.menu
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<'a, R: MenuRenderer + 'a> Page<'a> for MenuPage<'a, R> {
    fn link(&self) -> &PageLink {
        &self.link
    }

    fn on_okay(&mut self, ctx: &mut UiContext<'_, 'a>, presses: u8) -> bool {
        self.menu.on_okay(ctx, presses)
    }

    fn on_cancel(&mut self, ctx: &mut UiContext<'_, 'a>, presses: u8) -> bool {
        self.menu.on_cancel(ctx, presses)
    }

    fn on_arrow(&mut self, _ctx: &mut UiContext<'_, 'a>, arrow: Arrow, presses: u8) -> bool {
        self.menu.on_arrow(arrow, presses)
    }

    fn on_function(&mut self, _ctx: &mut UiContext<'_, 'a>, presses: u8) -> bool {
        self.menu.on_function(presses)
    }

    fn on_encoder(
        &mut self,
        ctx: &mut UiContext<'_, 'a>,
        id: ControlId,
        increments: i16,
        steps_per_rev: u16,
    ) -> bool {
        self.menu.on_encoder(ctx.controls(), id, increments, steps_per_rev)
    }

    fn on_pot(&mut self, ctx: &mut UiContext<'_, 'a>, id: ControlId, position: f32) -> bool {
        self.menu.on_pot(ctx.controls(), id, position)
    }

    fn on_show(&mut self) {
        self.menu.on_show();
    }

    fn draw(&mut self, display: &mut dyn Display) -> Result<(), DisplayError> {
        self.renderer.draw(&self.menu, display)
    }

    fn is_opaque(&self, display: &dyn Display) -> bool {
        self.renderer.is_opaque(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::EventChannel;
    use crate::traits::MappedValue;
    use crate::ui::{Ui, UiId};
    use core::cell::{Cell, RefCell};
    use core::fmt;

    const OKAY: ControlId = 0;
    const CANCEL: ControlId = 1;
    const LEFT: ControlId = 2;
    const RIGHT: ControlId = 3;
    const UP: ControlId = 4;
    const DOWN: ControlId = 5;
    const FUNCTION: ControlId = 6;
    const ENCODER: ControlId = 0;

    struct Plain;

    impl MenuRenderer for Plain {
        fn draw(&mut self, _menu: &Menu<'_>, _display: &mut dyn Display) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    /// Integer in 0 ..= 10
    struct Stepped(u8);

    impl MappedValue for Stepped {
        fn step(&mut self, increments: i16, _accelerated: bool) {
            self.0 = (i16::from(self.0) + increments).clamp(0, 10) as u8;
        }

        fn set_from_unit_interval(&mut self, position: f32) {
            self.0 = (position * 10.0 + 0.5) as u8;
        }

        fn append_display_string(&self, out: &mut dyn fmt::Write) -> fmt::Result {
            out.write_fmt(format_args!("{}", self.0))
        }
    }

    fn click(channel: &EventChannel, id: ControlId) {
        channel.enqueue_button_pressed(id, 1);
        channel.enqueue_button_released(id);
    }

    fn bind(ui: &mut Ui<'_>) {
        ui.set_okay_button(OKAY);
        ui.set_cancel_button(CANCEL);
        ui.set_function_button(FUNCTION);
        ui.set_arrow_buttons(LEFT, RIGHT, UP, DOWN);
        ui.set_menu_encoder(ENCODER);
    }

    #[test]
    fn test_edit_value_and_close() {
        let checked = Cell::new(false);
        let level = RefCell::new(Stepped(4));
        let items = [
            MenuItem::checkbox("Sync", &checked),
            MenuItem::value("Level", &level),
            MenuItem::close("Back"),
        ];
        let page = RefCell::new(MenuPage::new(
            Orientation::UpDownSelectLeftRightModify,
            &items,
            true,
            Plain,
        ));
        let channel = EventChannel::new();
        let mut states = [false; 7];
        let mut ui = Ui::new(UiId::new(0), &channel, &mut states);
        bind(&mut ui);
        ui.open(&page).unwrap();

        page.borrow_mut().menu_mut().select_item(1);

        click(&channel, OKAY);
        ui.process(0);
        assert!(page.borrow().menu().is_editing());

        click(&channel, RIGHT);
        ui.process(1);
        assert_eq!(level.borrow().0, 5);

        click(&channel, OKAY);
        ui.process(2);
        assert!(!page.borrow().menu().is_editing());

        click(&channel, DOWN);
        ui.process(3);
        assert_eq!(page.borrow().menu().selected_item_idx(), Some(2));

        click(&channel, OKAY);
        ui.process(4);

        assert!(!page.borrow().is_active());
        assert_eq!(ui.page_count(), 0);
        assert_eq!(level.borrow().0, 5);
        assert!(!checked.get());
    }

    #[test]
    fn test_submenu_opens_and_cancels() {
        let back = [MenuItem::close("Back")];
        let submenu = RefCell::new(MenuPage::new(Orientation::default(), &back, true, Plain));
        let items = [MenuItem::submenu("More", &submenu)];
        let main = RefCell::new(MenuPage::new(Orientation::default(), &items, true, Plain));
        let channel = EventChannel::new();
        let mut states = [false; 7];
        let mut ui = Ui::new(UiId::new(0), &channel, &mut states);
        bind(&mut ui);
        ui.open(&main).unwrap();

        click(&channel, OKAY);
        ui.process(0);
        assert!(submenu.borrow().is_active());
        assert_eq!(ui.page_count(), 2);

        click(&channel, CANCEL);
        ui.process(1);
        assert!(!submenu.borrow().is_active());
        assert!(main.borrow().is_active());

        click(&channel, CANCEL);
        ui.process(2);
        assert_eq!(ui.page_count(), 0);
    }

    #[test]
    fn test_reopened_menu_starts_browsing_first_item() {
        let level = RefCell::new(Stepped(0));
        let items = [MenuItem::close("Back"), MenuItem::value("Level", &level)];
        let page = RefCell::new(MenuPage::new(Orientation::default(), &items, true, Plain));
        let channel = EventChannel::new();
        let mut states = [false; 7];
        let mut ui = Ui::new(UiId::new(0), &channel, &mut states);
        bind(&mut ui);

        ui.open(&page).unwrap();
        channel.enqueue_encoder_turned(ENCODER, 1, 24);
        click(&channel, OKAY);
        ui.process(0);
        assert!(page.borrow().menu().is_editing());

        ui.close(&page).unwrap();
        ui.open(&page).unwrap();
        let page = page.borrow();
        assert!(!page.menu().is_editing());
        assert_eq!(page.menu().selected_item_idx(), Some(0));
    }

    #[test]
    fn test_function_button_through_ui() {
        let level = RefCell::new(Stepped(0));
        let items = [MenuItem::value("Level", &level)];
        let page = RefCell::new(MenuPage::new(Orientation::default(), &items, true, Plain));
        let channel = EventChannel::new();
        let mut states = [false; 7];
        let mut ui = Ui::new(UiId::new(0), &channel, &mut states);
        bind(&mut ui);
        ui.open(&page).unwrap();

        channel.enqueue_button_pressed(FUNCTION, 1);
        ui.process(0);
        assert!(page.borrow().menu().is_function_down());
        assert!(ui.is_function_button_down());

        channel.enqueue_button_released(FUNCTION);
        ui.process(1);
        assert!(!page.borrow().menu().is_function_down());
    }
}
