//! Configuration
//!
//! Compile-time limits shared by the dispatcher and the event channel, and
//! the runtime tuning structs taken by the control monitors.

pub mod types;

pub use types::*;

/// Maximum number of pages open on one dispatcher
pub const MAX_PAGES: usize = 32;

/// Maximum number of displays registered with one dispatcher
pub const MAX_DISPLAYS: usize = 8;

/// Capacity of the event channel
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// Page open/close requests a single event may issue through its context
pub const MAX_PENDING_REQUESTS: usize = 4;

/// Default button debounce time in ticks
pub const DEFAULT_DEBOUNCE_TIMEOUT: u16 = 50;

/// Default window for counting successive presses, in ticks
pub const DEFAULT_DOUBLE_CLICK_TIMEOUT: u32 = 300;

/// Default time a pot must stay still before it is reported idle, in ticks
pub const DEFAULT_POT_IDLE_TIMEOUT: u32 = 500;

/// Default time without detents before an encoder is reported inactive
pub const DEFAULT_ENCODER_ACTIVITY_TIMEOUT: u32 = 500;

/// Default detents per encoder revolution
pub const DEFAULT_STEPS_PER_REVOLUTION: u16 = 24;
