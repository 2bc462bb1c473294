//! Page-stack dispatcher

use core::cell::RefCell;

use heapless::Vec;

use super::context::{PageRequest, RequestQueue};
use super::page::same_page;
use super::{Arrow, ButtonRole, ButtonRoles, PageRef, SpecialControls, UiContext, UiError, UiId};
use crate::channel::EventChannel;
use crate::config::{MAX_DISPLAYS, MAX_PAGES};
use crate::event::{ControlId, Event, INVALID_CONTROL_ID};
use crate::traits::{Display, DisplayError};
use crate::ui::Page;

/// Shared handle to a display
pub type DisplayRef<'a> = &'a RefCell<dyn Display + 'a>;

struct DisplaySlot<'a> {
    display: DisplayRef<'a>,
    last_redraw: u32,
}

/// Routes events to a stack of pages and redraws the displays
///
/// Dropping the `Ui` closes every page still open on it, topmost first.
pub struct Ui<'a> {
    id: UiId,
    channel: &'a EventChannel,
    pages: Vec<PageRef<'a>, MAX_PAGES>,
    displays: Vec<DisplaySlot<'a>, MAX_DISPLAYS>,
    roles: ButtonRoles,
    controls: SpecialControls,
    button_states: &'a mut [bool],
    muted: bool,
    queue_while_muted: bool,
}

impl<'a> Ui<'a> {
    /// Create a dispatcher reading from `channel`
    ///
    /// `id` tags the pages opened here; applications running several
    /// dispatchers give each a distinct id. `button_states` holds one "is
    /// down" flag per button; its length is the number of buttons the role
    /// setters accept.
    pub fn new(id: UiId, channel: &'a EventChannel, button_states: &'a mut [bool]) -> Self {
        button_states.fill(false);
        Self {
            id,
            channel,
            pages: Vec::new(),
            displays: Vec::new(),
            roles: ButtonRoles::default(),
            controls: SpecialControls::default(),
            button_states,
            muted: false,
            queue_while_muted: false,
        }
    }

    pub fn id(&self) -> UiId {
        self.id
    }

    pub fn num_buttons(&self) -> usize {
        self.button_states.len()
    }

    fn checked_button(&self, id: ControlId) -> ControlId {
        if (id as usize) < self.button_states.len() {
            id
        } else {
            INVALID_CONTROL_ID
        }
    }

    // Button roles

    pub fn set_okay_button(&mut self, id: ControlId) {
        self.roles.okay = self.checked_button(id);
    }

    pub fn set_cancel_button(&mut self, id: ControlId) {
        self.roles.cancel = self.checked_button(id);
    }

    pub fn set_function_button(&mut self, id: ControlId) {
        self.roles.function = self.checked_button(id);
    }

    pub fn set_arrow_button(&mut self, arrow: Arrow, id: ControlId) {
        *self.roles.arrow_mut(arrow) = self.checked_button(id);
    }

    pub fn set_arrow_buttons(&mut self, left: ControlId, right: ControlId, up: ControlId, down: ControlId) {
        self.set_arrow_button(Arrow::Left, left);
        self.set_arrow_button(Arrow::Right, right);
        self.set_arrow_button(Arrow::Up, up);
        self.set_arrow_button(Arrow::Down, down);
    }

    pub fn roles(&self) -> &ButtonRoles {
        &self.roles
    }

    // Special controls

    pub fn set_menu_encoder(&mut self, id: ControlId) {
        self.controls.menu_encoder = id;
    }

    pub fn set_value_encoder(&mut self, id: ControlId) {
        self.controls.value_encoder = id;
    }

    pub fn set_value_pot(&mut self, id: ControlId) {
        self.controls.value_pot = id;
    }

    pub fn controls(&self) -> &SpecialControls {
        &self.controls
    }

    // Button state

    /// Settled state of button `id`; false for ids out of range
    pub fn is_button_down(&self, id: ControlId) -> bool {
        self.button_states.get(id as usize).copied().unwrap_or(false)
    }

    pub fn is_function_button_down(&self) -> bool {
        self.is_button_down(self.roles.function)
    }

    // Displays

    /// Register a display; it is first redrawn once its period has elapsed
    pub fn add_display(&mut self, display: DisplayRef<'a>) -> Result<(), UiError> {
        self.displays
            .push(DisplaySlot {
                display,
                last_redraw: 0,
            })
            .map_err(|_| UiError::DisplaysFull)
    }

    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    // Pages

    /// Push `page` onto the stack and show it
    pub fn open(&mut self, page: PageRef<'a>) -> Result<(), UiError> {
        let mut guard = page.try_borrow_mut().map_err(|_| UiError::PageBusy)?;
        if guard.is_active() {
            debug!("open rejected, page already active");
            return Err(UiError::PageAlreadyActive);
        }
        if self.pages.push(page).is_err() {
            warn!("open rejected, page stack full");
            return Err(UiError::PageStackFull);
        }

        guard.link().attach(self.id);
        guard.on_show();
        debug!("page opened, {=usize} on stack", self.pages.len());
        Ok(())
    }

    /// Remove `page` from the stack and hide it
    ///
    /// Pages above it move down one slot, keeping their order.
    pub fn close(&mut self, page: PageRef<'a>) -> Result<(), UiError> {
        let mut guard = page.try_borrow_mut().map_err(|_| UiError::PageBusy)?;
        if guard.link().host() != Some(self.id) {
            return Err(UiError::PageNotActive);
        }
        let index = self.position_of(page).ok_or(UiError::PageNotActive)?;

        self.pages.remove(index);
        guard.on_hide();
        guard.link().detach();
        debug!("page closed, {=usize} on stack", self.pages.len());
        Ok(())
    }

    fn position_of(&self, page: PageRef<'a>) -> Option<usize> {
        self.pages.iter().rposition(|&open| same_page(open, page))
    }

    /// Check if `page` is open on this `Ui`
    pub fn is_page_open(&self, page: PageRef<'a>) -> bool {
        self.position_of(page).is_some()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn top_page(&self) -> Option<PageRef<'a>> {
        self.pages.last().copied()
    }

    // Muting

    /// Stop routing events
    ///
    /// While muted, events stay in the channel if `queue_events` is set and
    /// are discarded otherwise. Displays keep redrawing.
    pub fn mute(&mut self, muted: bool, queue_events: bool) {
        self.muted = muted;
        self.queue_while_muted = queue_events;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // Main loop

    /// Route pending events and redraw due displays
    ///
    /// Events posted while this call runs are handled by the next one.
    pub fn process(&mut self, now: u32) {
        let pending = self.channel.len();
        if !self.muted {
            for _ in 0..pending {
                let Some(event) = self.channel.dequeue() else {
                    break;
                };
                self.dispatch(event);
            }
        } else if !self.queue_while_muted {
            for _ in 0..pending {
                if self.channel.dequeue().is_none() {
                    break;
                }
            }
        }

        for index in 0..self.displays.len() {
            let slot = &self.displays[index];
            let Ok(period) = slot.display.try_borrow().map(|display| display.update_period()) else {
                continue;
            };
            if now.wrapping_sub(slot.last_redraw) > period {
                self.redraw(index, now);
            }
        }
    }

    fn redraw(&mut self, index: usize, now: u32) {
        let slot = &mut self.displays[index];
        slot.last_redraw = now;
        let handle = slot.display;

        let Ok(mut display) = handle.try_borrow_mut() else {
            warn!("display busy, redraw skipped");
            return;
        };

        let start = self
            .pages
            .iter()
            .rposition(|page| {
                page.try_borrow()
                    .is_ok_and(|page| page.is_opaque(&*display))
            })
            .unwrap_or(0);

        if let Err(error) = paint(&mut *display, &self.pages[start..]) {
            warn!("redraw of display {=u8} failed: {:?}", display.id(), error);
        }
    }

    fn dispatch(&mut self, event: Event) {
        trace!("dispatch {:?}", event);
        match event {
            Event::ButtonPressed { id, presses } => {
                self.set_button_down(id, true);
                self.route_button(id, presses);
            }
            Event::ButtonReleased { id } => {
                self.set_button_down(id, false);
                self.route_button(id, 0);
            }
            Event::EncoderTurned {
                id,
                increments,
                steps_per_rev,
            } => self.route(|page, ctx| page.on_encoder(ctx, id, increments, steps_per_rev)),
            Event::EncoderActivityChanged { id, active } => {
                self.route(|page, ctx| page.on_encoder_activity(ctx, id, active))
            }
            Event::PotMoved { id, position } => self.route(|page, ctx| page.on_pot(ctx, id, position)),
            Event::PotActivityChanged { id, active } => {
                self.route(|page, ctx| page.on_pot_activity(ctx, id, active))
            }
        }
    }

    fn set_button_down(&mut self, id: ControlId, down: bool) {
        if let Some(state) = self.button_states.get_mut(id as usize) {
            *state = down;
        }
    }

    fn route_button(&mut self, id: ControlId, presses: u8) {
        match self.roles.role_of(id) {
            Some(ButtonRole::Okay) => self.route(|page, ctx| page.on_okay(ctx, presses)),
            Some(ButtonRole::Cancel) => self.route(|page, ctx| page.on_cancel(ctx, presses)),
            Some(ButtonRole::Function) => self.route(|page, ctx| page.on_function(ctx, presses)),
            Some(ButtonRole::Arrow(arrow)) => self.route(|page, ctx| page.on_arrow(ctx, arrow, presses)),
            None => self.route(|page, ctx| page.on_other_button(ctx, id, presses)),
        }
    }

    /// Offer an event to each page from the top down until one consumes it
    fn route<F>(&mut self, mut handler: F)
    where
        F: FnMut(&mut (dyn Page<'a> + 'a), &mut UiContext<'_, 'a>) -> bool,
    {
        let mut requests = RequestQueue::new();

        for &page in self.pages.iter().rev() {
            let Ok(mut guard) = page.try_borrow_mut() else {
                warn!("page busy, skipped while routing");
                continue;
            };
            let mut ctx = UiContext::new(
                page,
                &self.controls,
                self.roles.function,
                &*self.button_states,
                &mut requests,
            );
            if handler(&mut *guard, &mut ctx) {
                break;
            }
        }

        self.apply(requests);
    }

    fn apply(&mut self, requests: RequestQueue<'a>) {
        for request in requests {
            let result = match request {
                PageRequest::Open(page) => self.open(page),
                PageRequest::Close(page) => self.close(page),
            };
            if let Err(error) = result {
                debug!("page request failed: {:?}", error);
            }
        }
    }
}

fn paint<'a>(display: &mut (dyn Display + 'a), pages: &[PageRef<'a>]) -> Result<(), DisplayError> {
    display.clear()?;
    for page in pages {
        match page.try_borrow_mut() {
            Ok(mut page) => {
                if let Err(error) = page.draw(&mut *display) {
                    warn!("page draw failed: {:?}", error);
                }
            }
            Err(_) => warn!("page busy, skipped while drawing"),
        }
    }
    display.swap_buffers_and_transmit()
}

impl Drop for Ui<'_> {
    fn drop(&mut self) {
        while let Some(page) = self.pages.pop() {
            if let Ok(mut page) = page.try_borrow_mut() {
                page.on_hide();
                page.link().detach();
            } else if let Ok(page) = page.try_borrow() {
                warn!("page busy on drop, detached without on_hide");
                page.link().detach();
            } else {
                warn!("page mutably borrowed on drop, link left set");
            }
        }
    }
}
