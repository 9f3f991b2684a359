//! Shared service state.
//!
//! The state only holds the question source; every request loads its own
//! store, so handlers never share mutable data.

use std::sync::Arc;
use std::time::Duration;

use crate::data::{load_with_timeout, QuestionSource};
use crate::error::QuizError;
use crate::models::{QuestionStore, QuizQuestion};
use crate::quiz::{score_answers, select_quiz, ScoringResult, Submission};

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn QuestionSource>,
    load_timeout: Duration,
}

impl AppState {
    pub fn new(source: Arc<dyn QuestionSource>, load_timeout: Duration) -> Self {
        Self {
            source,
            load_timeout,
        }
    }

    /// Load the question store for one request.
    pub async fn store(&self) -> Result<Arc<QuestionStore>, QuizError> {
        Ok(load_with_timeout(Arc::clone(&self.source), self.load_timeout).await?)
    }

    /// Pick a quiz round for `language`.
    pub async fn quiz(&self, language: &str) -> Result<Vec<QuizQuestion>, QuizError> {
        let store = self.store().await?;
        select_quiz(&store, language, &mut rand::thread_rng())
    }

    /// Score a submission for `language`.
    pub async fn check(
        &self,
        language: &str,
        answers: &Submission,
    ) -> Result<ScoringResult, QuizError> {
        let store = self.store().await?;
        score_answers(&store, language, answers)
    }
}
