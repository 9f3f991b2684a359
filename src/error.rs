//! Error types shared by the loader, the quiz operations and the service.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to produce a question store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("question {index} for '{language}' is invalid: {reason}")]
    InvalidQuestion {
        language: String,
        index: usize,
        reason: &'static str,
    },

    #[error("loading questions took longer than {0:?}")]
    Timeout(Duration),

    #[error("question loader stopped unexpectedly: {0}")]
    Interrupted(String),
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question store could not be loaded.
    #[error("error loading questions: {0}")]
    StoreUnavailable(#[from] LoadError),

    /// The requested language has no entry in the store.
    #[error("invalid language '{requested}'. Available languages: {}", .available.join(", "))]
    UnknownLanguage {
        requested: String,
        available: Vec<String>,
    },

    /// A submitted question id is not a valid position in the question list.
    #[error("invalid question id '{question_id}': expected an index below {available}")]
    InvalidQuestionIndex {
        question_id: String,
        available: usize,
    },

    /// A submitted option index does not exist for its question.
    #[error("invalid option {option} for question '{question_id}': expected an index below {available}")]
    InvalidOptionIndex {
        question_id: String,
        option: i128,
        available: usize,
    },
}

impl QuizError {
    /// Stable identifier for the error kind, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::StoreUnavailable(_) => "store_unavailable",
            QuizError::UnknownLanguage { .. } => "unknown_language",
            QuizError::InvalidQuestionIndex { .. } => "invalid_question_index",
            QuizError::InvalidOptionIndex { .. } => "invalid_option_index",
        }
    }

    /// Whether the caller caused the error (as opposed to the server).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, QuizError::StoreUnavailable(_))
    }

    /// Valid languages, when the error is about an unknown one.
    pub fn available_languages(&self) -> Option<&[String]> {
        match self {
            QuizError::UnknownLanguage { available, .. } => Some(available),
            _ => None,
        }
    }
}
