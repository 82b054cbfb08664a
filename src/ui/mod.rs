//! Terminal front end: event loop, layout, key handling and widgets.

pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

pub use tui::run;
