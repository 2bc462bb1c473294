//! Interrupt-safe event channel
//!
//! A fixed-capacity FIFO between the control monitors (any context) and
//! the dispatcher (main loop). Producers never block and never fail: when
//! the queue is full the oldest unread event is discarded. Each operation
//! holds the critical section for a constant amount of work.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;
use portable_atomic::{AtomicU32, Ordering};

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::event::{ControlId, Event};

/// Multi-producer, single-consumer event queue
///
/// Meant to live in a `static` (or any location that outlives both the
/// monitors and the [`Ui`](crate::ui::Ui)):
///
/// ```ignore
/// static EVENTS: EventChannel = EventChannel::new();
/// ```
pub struct EventChannel<const N: usize = EVENT_QUEUE_CAPACITY> {
    events: Mutex<CriticalSectionRawMutex, RefCell<Deque<Event, N>>>,
    dropped: AtomicU32,
}

impl<const N: usize> EventChannel<N> {
    /// Create an empty channel
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(RefCell::new(Deque::new())),
            dropped: AtomicU32::new(0),
        }
    }

    /// Append an event, discarding the oldest one if the queue is full
    pub fn enqueue(&self, event: Event) {
        let overflowed = self.events.lock(|events| {
            let mut events = events.borrow_mut();
            let overflowed = events.is_full();
            if overflowed {
                events.pop_front();
            }
            // Cannot fail, a slot was freed above if needed
            let _ = events.push_back(event);
            overflowed
        });

        if overflowed {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            trace!("event channel full, oldest event dropped");
        }
    }

    pub fn enqueue_button_pressed(&self, id: ControlId, presses: u8) {
        self.enqueue(Event::ButtonPressed { id, presses });
    }

    pub fn enqueue_button_released(&self, id: ControlId) {
        self.enqueue(Event::ButtonReleased { id });
    }

    pub fn enqueue_encoder_turned(&self, id: ControlId, increments: i16, steps_per_rev: u16) {
        self.enqueue(Event::EncoderTurned {
            id,
            increments,
            steps_per_rev,
        });
    }

    pub fn enqueue_encoder_activity(&self, id: ControlId, active: bool) {
        self.enqueue(Event::EncoderActivityChanged { id, active });
    }

    pub fn enqueue_pot_moved(&self, id: ControlId, position: f32) {
        self.enqueue(Event::PotMoved { id, position });
    }

    pub fn enqueue_pot_activity(&self, id: ControlId, active: bool) {
        self.enqueue(Event::PotActivityChanged { id, active });
    }

    /// Take the oldest event, or `None` if the queue is empty
    ///
    /// Only the single consumer (normally the dispatcher) may call this.
    pub fn dequeue(&self) -> Option<Event> {
        self.events.lock(|events| events.borrow_mut().pop_front())
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock(|events| events.borrow().is_empty())
    }

    /// Number of unread events
    pub fn len(&self) -> usize {
        self.events.lock(|events| events.borrow().len())
    }

    /// Maximum number of unread events
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard all unread events
    pub fn clear(&self) {
        self.events.lock(|events| events.borrow_mut().clear());
    }

    /// Number of events overwritten because the queue was full
    ///
    /// Readable without entering the critical section; wraps on overflow.
    pub fn dropped_events(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for EventChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}
