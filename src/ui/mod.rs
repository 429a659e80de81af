//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod picker;
mod success;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Picker => picker::draw(frame, main_area, app),
        View::Form => forms::draw_form(frame, main_area, app),
        View::Success => success::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);
}
