//! Quiz operations: picking a question set and scoring a submission.
//!
//! Both operations are pure functions over a borrowed [`QuestionStore`].

mod scorer;
mod selector;
mod submission;

pub use scorer::{score_answers, AnswerResult, ScoringResult};
pub use selector::{select_questions, select_quiz, SelectedQuestion, QUIZ_SIZE};
pub use submission::{SubmittedAnswer, Submission};

use crate::error::QuizError;
use crate::models::{normalize_language, Question, QuestionStore};

/// Resolve a language name to its question list.
fn questions_for<'a>(store: &'a QuestionStore, language: &str) -> Result<&'a [Question], QuizError> {
    store
        .get(language)
        .ok_or_else(|| QuizError::UnknownLanguage {
            requested: normalize_language(language),
            available: store.languages(),
        })
}
