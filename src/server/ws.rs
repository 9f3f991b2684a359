//! WebSocket endpoint.
//!
//! Each text frame carries one [`ClientMessage`] and is answered with one
//! [`ServerMessage`]. Frames that do not decode get an `invalid_request`
//! error. Nothing is kept between frames.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::models::normalize_language;
use crate::protocol::{ClientMessage, ServerMessage};

use super::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let connection_id = Uuid::new_v4();
    ws.on_upgrade(move |socket| {
        handle_socket(socket, state).instrument(info_span!("ws", %connection_id))
    })
}

async fn handle_socket(stream: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = stream.split();
    info!("client connected");

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Err(e) => {
                debug!(error = %e, "websocket receive failed");
                break;
            }
            _ => continue,
        };

        let reply = match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(client_msg) => handle_client_message(client_msg, &state).await,
            Err(e) => {
                debug!(error = %e, "rejected malformed frame");
                ServerMessage::invalid_request(e.to_string())
            }
        };
        let json = match serde_json::to_string(&reply) {
            Ok(j) => j,
            Err(_) => continue,
        };
        if sender.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }

    info!("client disconnected");
}

/// Answer a single client message.
async fn handle_client_message(msg: ClientMessage, state: &AppState) -> ServerMessage {
    match msg {
        ClientMessage::GetQuiz { language } => {
            let language = normalize_language(&language);
            match state.quiz(&language).await {
                Ok(questions) => {
                    info!(%language, count = questions.len(), "served quiz");
                    ServerMessage::Quiz {
                        language,
                        questions,
                    }
                }
                Err(err) => {
                    debug!(kind = err.kind(), error = %err, "quiz request failed");
                    ServerMessage::from(&err)
                }
            }
        }
        ClientMessage::CheckAnswers { language, answers } => {
            let language = normalize_language(&language);
            match state.check(&language, &answers).await {
                Ok(result) => {
                    info!(%language, score = result.score, total = result.total, "checked answers");
                    ServerMessage::Results(result)
                }
                Err(err) => {
                    debug!(kind = err.kind(), error = %err, "check request failed");
                    ServerMessage::from(&err)
                }
            }
        }
    }
}
