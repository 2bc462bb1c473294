//! Text-mode display support for Faceplate
//!
//! This crate provides:
//! - [`TextScreen`], a double-buffered character screen implementing the
//!   core `Display` and `TextCanvas` traits
//! - [`TextListRenderer`], a menu renderer drawing a scrolling item list
//!   onto any display with a text canvas
//!
//! # Architecture
//!
//! `TextScreen` keeps the frame in memory. A board driver (character LCD,
//! OLED with a font, serial terminal) wraps it or copies the front buffer
//! out after each `swap_buffers_and_transmit`. Pages never see the driver,
//! only the `TextCanvas`.

#![no_std]
#![deny(unsafe_code)]

pub mod render;
pub mod screen;

use faceplate_core::menu::MenuPage;

// Re-export key types
pub use render::TextListRenderer;
pub use screen::TextScreen;

/// Menu page drawn as a text list
pub type TextMenuPage<'a> = MenuPage<'a, TextListRenderer>;
