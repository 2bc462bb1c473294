//! Application-facing traits
//!
//! These traits define the interface between the UI logic and the
//! application: display drivers on one side, the values and custom items
//! edited through menus on the other.

pub mod display;
pub mod value;

pub use display::{Display, DisplayError, DisplayKind, TextCanvas, TextCanvasExt};
pub use value::{CustomItem, MappedValue};
