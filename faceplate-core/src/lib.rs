//! Board-agnostic core of the Faceplate UI toolkit
//!
//! This crate contains everything between the raw control backends and the
//! display drivers:
//!
//! - Event model and the interrupt-safe event channel
//! - Control monitors (buttons, pots, encoders) producing events
//! - Page contract and the page-stack dispatcher ([`ui::Ui`])
//! - Navigable menu state machine and menu page
//! - Display and value traits implemented by the application
//! - Compile-time limits and monitor configuration
//!
//! # Data flow
//!
//! ```text
//!  interrupt / timer context          main loop
//! ┌──────────────────────────┐      ┌───────────────────────────────┐
//! │ ButtonMonitor::process() │      │ Ui::process(now)              │
//! │ PotMonitor::process()    │─────►│   dequeue → route top-down    │
//! │ EncoderMonitor::process()│ Event│   redraw due displays         │
//! └──────────────────────────┘Channel└───────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must stay first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod channel;
pub mod config;
pub mod event;
pub mod menu;
pub mod monitor;
pub mod traits;
pub mod ui;

pub use channel::EventChannel;
pub use event::{ControlId, Event, INVALID_CONTROL_ID};
pub use menu::{Menu, MenuItem, MenuItemKind, MenuPage, MenuRenderer, Orientation};
pub use ui::{Arrow, Page, PageLink, PageRef, Ui, UiContext, UiError, UiId};
