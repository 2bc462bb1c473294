//! Faceplate control backends
//!
//! This crate defines the traits through which the control monitors in
//! `faceplate-core` sample the hardware. Boards implement them directly,
//! or wrap `embedded-hal` input pins with the adapters in [`gpio`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  faceplate-core monitors (process())    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  faceplate-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ board-specific│
//! │  pin adapters │       │  ADC / matrix │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`input::ButtonBackend`] - momentary buttons and switches
//! - [`input::PotBackend`] - potentiometers and sliders
//! - [`input::EncoderBackend`] - quadrature rotary encoders

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod input;

// Re-export key traits at crate root for convenience
pub use gpio::{PinButtons, PinEncoders, Polarity};
pub use input::{ButtonBackend, EncoderBackend, PotBackend};
