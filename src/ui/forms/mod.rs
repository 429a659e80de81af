//! Form rendering module
//!
//! Fields are stacked vertically in layout order, followed by any survey
//! follow-up questions and the submit button. The view scrolls to keep the
//! focused element visible.

mod field_renderer;

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{FieldSpec, Focus, FormSession};
use field_renderer::{draw_error, draw_field, draw_question, field_height};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const QUESTION_HEIGHT: u16 = 3;
const SUBMIT_WIDTH: u16 = 14;

/// One vertically stacked element of the form view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Field(&'static FieldSpec),
    QuestionsHeading,
    Question(usize),
    Submit,
}

impl Row {
    fn height(self, session: &FormSession) -> u16 {
        match self {
            Row::Field(spec) => {
                let error_line = u16::from(session.store.error(spec.name).is_some());
                field_height(spec) + error_line
            }
            Row::QuestionsHeading => 1,
            Row::Question(_) => QUESTION_HEIGHT,
            Row::Submit => BUTTON_HEIGHT,
        }
    }

    fn is_focused(self, focus: Focus) -> bool {
        match (self, focus) {
            (Row::Field(a), Focus::Field(b)) => a.name == b.name,
            (Row::Question(a), Focus::Question(b)) => a == b,
            (Row::Submit, Focus::Submit) => true,
            _ => false,
        }
    }
}

fn rows(session: &FormSession) -> Vec<Row> {
    let mut rows: Vec<Row> = session
        .schema()
        .layout(session.store.values())
        .into_iter()
        .map(Row::Field)
        .collect();
    if !session.additional_questions.is_empty() {
        rows.push(Row::QuestionsHeading);
        rows.extend((0..session.additional_questions.len()).map(Row::Question));
    }
    rows.push(Row::Submit);
    rows
}

/// First visible row offset (in terminal rows) that keeps the focused row on screen
fn scroll_offset(heights: &[u16], focused: usize, viewport: u16) -> u16 {
    let top: u16 = heights[..focused].iter().sum();
    let bottom = top + heights[focused];
    bottom.saturating_sub(viewport)
}

/// Draw the open form
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.state.session else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", session.schema().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = rows(session);
    let heights: Vec<u16> = rows.iter().map(|r| r.height(session)).collect();
    let focus = session.focus();
    let focused = rows.iter().position(|r| r.is_focused(focus)).unwrap_or(0);
    let offset = scroll_offset(&heights, focused, inner.height);

    let mut y: u16 = 0;
    for (row, height) in rows.iter().zip(&heights) {
        let top = y;
        y += height;
        if top < offset {
            continue;
        }
        let visible_top = top - offset;
        if visible_top + height > inner.height {
            break;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + visible_top,
            width: inner.width,
            height: *height,
        };
        draw_row(frame, row_area, *row, session, row.is_focused(focus));
    }
}

fn draw_row(frame: &mut Frame, area: Rect, row: Row, session: &FormSession, is_active: bool) {
    match row {
        Row::Field(spec) => {
            let error = session.store.error(spec.name);
            let box_area = Rect {
                height: field_height(spec),
                ..area
            };
            draw_field(
                frame,
                box_area,
                spec,
                session.store.values().get(spec.name),
                is_active,
                error.is_some(),
                session.option_cursor,
            );
            if let Some(message) = error {
                let error_area = Rect {
                    y: area.y + box_area.height,
                    height: 1,
                    ..area
                };
                draw_error(frame, error_area, message);
            }
        }
        Row::QuestionsHeading => {
            let heading = Line::from(Span::styled(
                " Additional Questions [Optional]",
                Style::default().add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(heading), area);
        }
        Row::Question(index) => {
            if let Some(question) = session.additional_questions.get(index) {
                draw_question(frame, area, question, is_active);
            }
        }
        Row::Submit => {
            let button_area = Rect {
                width: SUBMIT_WIDTH.min(area.width),
                ..area
            };
            render_button(
                frame,
                button_area,
                "Submit",
                is_active,
                session.can_submit(),
                Some(Color::Green),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_bank::AdditionalQuestion;
    use crate::state::FormId;

    #[test]
    fn test_scroll_offset_keeps_focus_visible() {
        let heights = [3, 3, 3, 3];
        assert_eq!(scroll_offset(&heights, 0, 6), 0);
        assert_eq!(scroll_offset(&heights, 1, 6), 0);
        assert_eq!(scroll_offset(&heights, 3, 6), 6);
    }

    #[test]
    fn test_rows_end_with_submit() {
        let session = FormSession::new(FormId::EventRegistration);
        let rows = rows(&session);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.last(), Some(&Row::Submit));
    }

    #[test]
    fn test_rows_include_questions_heading() {
        let mut session = FormSession::new(FormId::Survey);
        session.additional_questions = vec![AdditionalQuestion {
            question: "Question 1: ?".to_string(),
            answer: String::new(),
        }];
        let rows = rows(&session);
        let heading = rows
            .iter()
            .position(|r| *r == Row::QuestionsHeading)
            .unwrap();
        assert_eq!(rows[heading + 1], Row::Question(0));
    }

    #[test]
    fn test_error_adds_a_line() {
        let mut session = FormSession::new(FormId::EventRegistration);
        let Row::Field(name) = rows(&session)[0] else {
            panic!("first row should be a field");
        };
        assert_eq!(Row::Field(name).height(&session), 3);
        session.store.validate_one_field(name.name);
        assert_eq!(Row::Field(name).height(&session), 4);
    }
}
