//! Reusable UI components

mod button;

pub use button::{render_button, render_menu_button, BUTTON_HEIGHT};
