//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState};

use super::{quiz, results};

/// Render the client UI based on current state.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        ClientState::Connecting => render_status(
            frame,
            area,
            app,
            &format!("Connecting to {}...", app.server_addr()),
        ),
        ClientState::Waiting { message } => render_status(frame, area, app, message),
        ClientState::Quiz { .. } => quiz::render(frame, area, app),
        ClientState::Results { .. } => results::render(frame, area, app),
        ClientState::Failed { message } => {
            render_error(frame, area, message, "Press [R] to retry · [Q] to exit")
        }
        ClientState::Disconnected { message } => {
            render_error(frame, area, message, "Press [Q] to exit")
        }
    }
}

fn title(app: &ClientApp) -> String {
    format!("{} QUIZ", app.language.to_uppercase())
}

fn render_status(frame: &mut Frame, area: Rect, app: &ClientApp, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            title(app),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, hint: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(12),
        Constraint::Percentage(30),
    ])
    .split(area);

    let mut content = vec![Line::from("")];
    content.extend(message.lines().map(|line| {
        Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Red).bold(),
        ))
    }));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}
