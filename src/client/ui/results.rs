//! Results screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::client::state::{ClientApp, ClientState};
use crate::quiz::AnswerResult;

const QUESTION_PREVIEW_LENGTH: usize = 45;

/// Render the results screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Results { result, scroll } = &app.state else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6), // Score summary
        Constraint::Min(8),    // Answers breakdown
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], result.score, result.total, result.percentage);
    render_answers(frame, chunks[1], &result.results, *scroll);
    render_controls(frame, chunks[2]);
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: usize, total: usize, percentage: f64) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.2}%)", score, total, percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_answers(frame: &mut Frame, area: Rect, answers: &[AnswerResult], scroll: usize) {
    let lines: Vec<Line> = answers
        .iter()
        .enumerate()
        .flat_map(|(index, answer)| {
            let (symbol, color) = if answer.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&answer.question_text),
                    Style::default().fg(Color::Gray),
                ),
            ])];

            lines.push(Line::from(vec![
                Span::raw("       "),
                Span::styled("you: ", Style::default().fg(Color::DarkGray)),
                Span::styled(answer.your_answer_text.clone(), Style::default().fg(color)),
            ]));
            if !answer.is_correct {
                lines.push(Line::from(vec![
                    Span::raw("       "),
                    Span::styled("answer: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        answer.correct_answer_text.clone(),
                        Style::default().fg(Color::Green),
                    ),
                ]));
            }
            lines
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Your Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
