//! Confirmation shown after an accepted submission

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(receipt) = &app.state.receipt else {
        return;
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            receipt.title,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Reference: ", label_style),
            Span::raw(receipt.reference.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Submitted: ", label_style),
            Span::raw(
                receipt
                    .submitted_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string(),
            ),
        ]),
        Line::from(""),
    ];

    for line in &receipt.lines {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", line.label), label_style),
            Span::raw(line.value.clone()),
        ]));
    }

    if !receipt.additional_questions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Additional Questions [Optional]",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for question in &receipt.additional_questions {
            lines.push(Line::from(question.question.clone()));
            let answer = if question.answer.is_empty() {
                Span::styled("  (no answer)", label_style)
            } else {
                Span::raw(format!("  {}", question.answer))
            };
            lines.push(Line::from(answer));
        }
    }

    let block = Block::default()
        .title(" Submitted ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
