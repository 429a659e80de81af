//! Field rendering utilities for forms

use crate::question_bank::AdditionalQuestion;
use crate::state::{FieldKind, FieldSpec, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Box height of a multi-line text field
const MULTILINE_HEIGHT: u16 = 6;
const FIELD_HEIGHT: u16 = 3;

/// Rows a field box takes, without its error line
pub fn field_height(spec: &FieldSpec) -> u16 {
    if spec.is_multiline() {
        MULTILINE_HEIGHT
    } else {
        FIELD_HEIGHT
    }
}

fn cursor_span() -> Span<'static> {
    Span::styled("▌", Style::default().fg(Color::Cyan))
}

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a form field box with the value rendered for its widget kind.
/// `option_cursor` is the highlighted option of an active multi-select.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: Option<&FieldValue>,
    is_active: bool,
    has_error: bool,
    option_cursor: usize,
) {
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let placeholder = Style::default().fg(Color::DarkGray);

    let content = match spec.kind {
        FieldKind::Text | FieldKind::Multiline => {
            let text = value.map(FieldValue::as_text).unwrap_or("");
            let mut lines: Vec<Line> = if text.is_empty() && !is_active {
                vec![Line::from(Span::styled("(empty)", placeholder))]
            } else {
                text.lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
                    .collect()
            };
            if is_active {
                match lines.last_mut() {
                    Some(last) => last.spans.push(cursor_span()),
                    None => lines.push(Line::from(cursor_span())),
                }
            }
            Paragraph::new(lines)
        }
        FieldKind::Toggle => {
            let checked = value.is_some_and(FieldValue::as_flag);
            let mark = if checked { "[x] Yes" } else { "[ ] No" };
            let mut spans = vec![Span::styled(mark, value_style)];
            if is_active {
                spans.push(Span::styled("  space to toggle", placeholder));
            }
            Paragraph::new(Line::from(spans))
        }
        FieldKind::Select(_) => {
            let selected = value.map(FieldValue::as_text).unwrap_or("");
            let line = match (selected.is_empty(), is_active) {
                (true, true) => {
                    Line::from(Span::styled("\u{2190} choose \u{2192}", placeholder))
                }
                (true, false) => Line::from(Span::styled("(none)", placeholder)),
                (false, true) => Line::from(vec![
                    Span::styled("\u{2190} ", placeholder),
                    Span::styled(selected.to_string(), value_style),
                    Span::styled(" \u{2192}", placeholder),
                ]),
                (false, false) => Line::from(selected.to_string()),
            };
            Paragraph::new(line)
        }
        FieldKind::MultiSelect(options) => {
            let chosen = value.map(FieldValue::as_choices).unwrap_or(&[]);
            let mut spans = Vec::with_capacity(options.len() * 2);
            for (idx, option) in options.iter().enumerate() {
                let mark = if chosen.iter().any(|c| c == option) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if is_active && idx == option_cursor {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("{mark} {option}"), style));
                spans.push(Span::raw("  "));
            }
            Paragraph::new(Line::from(spans))
        }
    };

    let title = if spec.required {
        format!(" {} * ", spec.label)
    } else {
        format!(" {} ", spec.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, has_error));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw the validation message under a field
pub fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(Span::styled(
        format!(" {message}"),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw an optional follow-up question with its free-text answer
pub fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &AdditionalQuestion,
    is_active: bool,
) {
    let mut spans = if question.answer.is_empty() && !is_active {
        vec![Span::styled("(optional)", Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::raw(question.answer.clone())]
    };
    if is_active {
        spans.push(cursor_span());
    }

    let block = Block::default()
        .title(format!(" {} ", question.question))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, false));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
