use rand::seq::index;
use rand::Rng;

use crate::error::QuizError;
use crate::models::{Question, QuestionStore, QuizQuestion};

use super::questions_for;

/// Maximum number of questions in one quiz round.
pub const QUIZ_SIZE: usize = 4;

/// A question picked for a quiz, with its position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedQuestion<'a> {
    pub question_id: usize,
    pub question: &'a Question,
}

/// Pick up to [`QUIZ_SIZE`] distinct questions for `language`, uniformly at
/// random and in random order.
pub fn select_questions<'a, R: Rng + ?Sized>(
    store: &'a QuestionStore,
    language: &str,
    rng: &mut R,
) -> Result<Vec<SelectedQuestion<'a>>, QuizError> {
    let questions = questions_for(store, language)?;
    let amount = QUIZ_SIZE.min(questions.len());

    Ok(index::sample(rng, questions.len(), amount)
        .into_iter()
        .map(|question_id| SelectedQuestion {
            question_id,
            question: &questions[question_id],
        })
        .collect())
}

/// Like [`select_questions`], but returns the caller-facing view.
pub fn select_quiz<R: Rng + ?Sized>(
    store: &QuestionStore,
    language: &str,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    Ok(select_questions(store, language, rng)?
        .into_iter()
        .map(|selected| selected.question.to_public(selected.question_id))
        .collect())
}
