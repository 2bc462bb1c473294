//! Handler context
//!
//! Handlers cannot touch the page stack while the `Ui` is walking it, so
//! page changes requested from inside a handler are queued here and applied
//! once the current event has finished routing.

use heapless::Vec;

use super::{PageRef, SpecialControls};
use crate::config::MAX_PENDING_REQUESTS;
use crate::event::ControlId;

/// Page change requested during routing
#[derive(Clone, Copy)]
pub(crate) enum PageRequest<'a> {
    Open(PageRef<'a>),
    Close(PageRef<'a>),
}

pub(crate) type RequestQueue<'a> = Vec<PageRequest<'a>, MAX_PENDING_REQUESTS>;

/// View of the hosting `Ui` passed to every page handler
pub struct UiContext<'c, 'a> {
    current: PageRef<'a>,
    controls: &'c SpecialControls,
    function_button: ControlId,
    button_states: &'c [bool],
    requests: &'c mut RequestQueue<'a>,
}

impl<'c, 'a> UiContext<'c, 'a> {
    pub(crate) fn new(
        current: PageRef<'a>,
        controls: &'c SpecialControls,
        function_button: ControlId,
        button_states: &'c [bool],
        requests: &'c mut RequestQueue<'a>,
    ) -> Self {
        Self {
            current,
            controls,
            function_button,
            button_states,
            requests,
        }
    }

    fn request(&mut self, request: PageRequest<'a>) {
        if self.requests.push(request).is_err() {
            warn!("page request dropped, too many requests from one event");
        }
    }

    /// Close the page handling the current event
    pub fn close_page(&mut self) {
        self.request(PageRequest::Close(self.current));
    }

    /// Open `page` on top of the stack
    pub fn open(&mut self, page: PageRef<'a>) {
        self.request(PageRequest::Open(page));
    }

    /// Close `page`, wherever it is in the stack
    pub fn close(&mut self, page: PageRef<'a>) {
        self.request(PageRequest::Close(page));
    }

    /// The page handling the current event
    pub fn current_page(&self) -> PageRef<'a> {
        self.current
    }

    pub fn controls(&self) -> &SpecialControls {
        self.controls
    }

    /// Settled state of button `id` as seen by the `Ui`
    pub fn is_button_down(&self, id: ControlId) -> bool {
        self.button_states.get(id as usize).copied().unwrap_or(false)
    }

    pub fn is_function_button_down(&self) -> bool {
        self.is_button_down(self.function_button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Display, DisplayError};
    use crate::ui::{Page, PageLink};
    use core::cell::RefCell;

    struct Blank(PageLink);

    impl<'a> Page<'a> for Blank {
        fn link(&self) -> &PageLink {
            &self.0
        }

        fn draw(&mut self, _display: &mut dyn Display) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    #[test]
    fn test_requests_are_queued_in_order() {
        let page = RefCell::new(Blank(PageLink::new()));
        let other = RefCell::new(Blank(PageLink::new()));
        let controls = SpecialControls::default();
        let states = [false, true];
        let mut requests = RequestQueue::new();

        let mut ctx = UiContext::new(&page, &controls, 1, &states, &mut requests);
        assert!(ctx.is_function_button_down());
        assert!(!ctx.is_button_down(0));
        assert!(!ctx.is_button_down(9));
        ctx.open(&other);
        ctx.close_page();

        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], PageRequest::Open(_)));
        assert!(matches!(requests[1], PageRequest::Close(p) if crate::ui::page::same_page(p, &page)));
    }

    #[test]
    fn test_request_overflow_is_dropped() {
        let page = RefCell::new(Blank(PageLink::new()));
        let controls = SpecialControls::default();
        let mut requests = RequestQueue::new();

        let mut ctx = UiContext::new(&page, &controls, 0, &[], &mut requests);
        for _ in 0..MAX_PENDING_REQUESTS + 2 {
            ctx.close_page();
        }
        assert!(!ctx.is_function_button_down());
        assert_eq!(requests.len(), MAX_PENDING_REQUESTS);
    }
}
