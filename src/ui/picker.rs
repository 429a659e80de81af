//! Form picker view

use super::components::{render_menu_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::FormId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const PICKER_WIDTH: u16 = 40;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Formdesk ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Center the buttons
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PICKER_WIDTH),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(FormId::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    for (idx, form) in FormId::ALL.iter().enumerate() {
        render_menu_button(
            frame,
            rows[idx + 1],
            &(idx + 1).to_string(),
            form.label(),
            app.state.picker_index == idx,
        );
    }
}
