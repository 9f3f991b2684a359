//! Protocol messages for client-server communication.
//!
//! The HTTP endpoints exchange the request/response structs below as JSON
//! bodies. The WebSocket endpoint carries [`ClientMessage`] and
//! [`ServerMessage`] as JSON text frames.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::models::QuizQuestion;
use crate::quiz::{ScoringResult, Submission};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Error kind for requests that could not be decoded.
pub const INVALID_REQUEST: &str = "invalid_request";

/// Query string of `GET /api/quiz`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizQuery {
    #[serde(default)]
    pub language: String,
}

/// Body of a successful `GET /api/quiz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub language: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizResponse {
    pub fn new(language: String, questions: Vec<QuizQuestion>) -> Self {
        Self {
            success: true,
            language,
            questions,
        }
    }
}

/// Body of `POST /api/quiz/check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub answers: Submission,
}

/// Body of a successful `POST /api/quiz/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: ScoringResult,
}

impl From<ScoringResult> for CheckResponse {
    fn from(result: ScoringResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Body of any failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
}

impl From<&QuizError> for ErrorResponse {
    fn from(err: &QuizError) -> Self {
        Self {
            success: false,
            error: err.kind().to_string(),
            message: err.to_string(),
            available_languages: err.available_languages().map(<[String]>::to_vec),
        }
    }
}

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Ask for a fresh set of questions.
    GetQuiz { language: String },

    /// Submit answers for scoring.
    CheckAnswers {
        language: String,
        answers: Submission,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Questions for a quiz round.
    Quiz {
        language: String,
        questions: Vec<QuizQuestion>,
    },

    /// Scored answers.
    Results(ScoringResult),

    /// A request could not be served.
    Error {
        kind: String,
        message: String,
        #[serde(default)]
        available_languages: Vec<String>,
    },
}

impl ServerMessage {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            kind: INVALID_REQUEST.to_string(),
            message: message.into(),
            available_languages: Vec::new(),
        }
    }
}

impl From<&QuizError> for ServerMessage {
    fn from(err: &QuizError) -> Self {
        ServerMessage::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
            available_languages: err
                .available_languages()
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        }
    }
}
