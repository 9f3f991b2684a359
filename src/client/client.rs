//! WebSocket client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::terminal::TerminalSession;

use super::state::{ClientApp, ClientState};
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Run the quiz client.
pub async fn run(host: String, port: u16, language: String) -> Result<(), Box<dyn std::error::Error>> {
    let app = Arc::new(Mutex::new(ClientApp::new(host.clone(), port, language)));

    // Connect to server
    let url = format!("ws://{}:{}/ws", host, port);
    println!("Connecting to {}...", url);

    let (ws_stream, _) = match tokio_tungstenite::connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(format!("Failed to connect to server: {}", e).into());
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    // Spawn task to send messages
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(_) => continue,
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn task to receive messages
    let app_clone = Arc::clone(&app);
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect("Connection closed by server".to_string());
                    break;
                }
                Err(e) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect(format!("Connection error: {}", e));
                    break;
                }
                _ => continue,
            };

            let server_msg: ServerMessage = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(_) => continue,
            };

            handle_server_message(&app_clone, server_msg).await;
        }
    });

    // Ask for the first round
    {
        let mut app = app.lock().await;
        let _ = tx.send(app.request_quiz());
    }

    // Run TUI
    run_tui(app, tx).await?;

    // Clean up
    recv_task.abort();

    Ok(())
}

/// Handle a message from the server.
async fn handle_server_message(app: &SharedApp, msg: ServerMessage) {
    let mut app = app.lock().await;

    match msg {
        ServerMessage::Quiz {
            language,
            questions,
        } => {
            app.enter_quiz(language, questions);
        }
        ServerMessage::Results(result) => {
            app.enter_results(result);
        }
        ServerMessage::Error {
            message,
            available_languages,
            ..
        } => {
            app.fail(message, &available_languages);
        }
    }
}

/// Run the client TUI.
async fn run_tui(
    app: SharedApp,
    tx: mpsc::UnboundedSender<ClientMessage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = TerminalSession::start()?;

    loop {
        // Check if should quit
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
        }

        // Render UI
        {
            let app = app.lock().await;
            session.terminal().draw(|frame| ui::render(frame, &app))?;
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let should_quit = handle_input(&app, &tx, key.code).await;
                if should_quit {
                    break;
                }
            }
        }
    }

    session.finish()?;
    Ok(())
}

/// Handle keyboard input.
async fn handle_input(
    app: &SharedApp,
    tx: &mpsc::UnboundedSender<ClientMessage>,
    key: KeyCode,
) -> bool {
    let mut app = app.lock().await;

    match &app.state {
        ClientState::Connecting | ClientState::Waiting { .. } => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.should_quit = true;
                return true;
            }
        }
        ClientState::Quiz { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_option();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_option();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(msg) = app.submit_answer() {
                    let _ = tx.send(msg);
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                app.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientState::Results { .. } => match key {
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_results_down();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_results_up();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = tx.send(app.request_quiz());
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                app.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientState::Failed { .. } => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = tx.send(app.request_quiz());
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                app.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientState::Disconnected { .. } => {
            if matches!(
                key,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
            ) {
                app.should_quit = true;
                return true;
            }
        }
    }

    false
}
