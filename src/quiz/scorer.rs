use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::models::QuestionStore;

use super::{questions_for, Submission};

/// Result for a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub question_id: usize,
    pub question_text: String,
    pub your_answer_text: String,
    pub correct_answer_text: String,
    pub is_correct: bool,
}

/// Outcome of checking a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: usize,
    pub total: usize,
    /// Share of correct answers in percent, rounded to two decimals.
    pub percentage: f64,
    pub results: Vec<AnswerResult>,
}

/// Score a submission against the full question list for `language`.
///
/// Question ids index into the language's full list. The first malformed
/// entry aborts the whole call; no partial result is returned.
pub fn score_answers(
    store: &QuestionStore,
    language: &str,
    submission: &Submission,
) -> Result<ScoringResult, QuizError> {
    let questions = questions_for(store, language)?;
    let mut results = Vec::with_capacity(submission.len());

    for answer in submission.iter() {
        let question = parse_question_id(&answer.question_id)
            .and_then(|id| questions.get(id).map(|q| (id, q)));
        let Some((question_id, question)) = question else {
            return Err(QuizError::InvalidQuestionIndex {
                question_id: answer.question_id.clone(),
                available: questions.len(),
            });
        };

        let chosen = usize::try_from(answer.option)
            .ok()
            .and_then(|index| question.option(index).map(|text| (index, text)));
        let (Some((chosen, your_answer_text)), Some(correct_answer_text)) =
            (chosen, question.correct_option())
        else {
            return Err(QuizError::InvalidOptionIndex {
                question_id: answer.question_id.clone(),
                option: answer.option,
                available: question.options.len(),
            });
        };

        results.push(AnswerResult {
            question_id,
            question_text: question.text.clone(),
            your_answer_text: your_answer_text.to_string(),
            correct_answer_text: correct_answer_text.to_string(),
            is_correct: chosen == question.correct_index,
        });
    }

    let score = results.iter().filter(|r| r.is_correct).count();
    let total = results.len();

    Ok(ScoringResult {
        score,
        total,
        percentage: calculate_percentage(score, total),
        results,
    })
}

/// Normalise a submitted id to a list position. Only plain non-negative
/// integers are accepted.
fn parse_question_id(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        let percentage = (score as f64 / total as f64) * 100.0;
        (percentage * 100.0).round() / 100.0
    } else {
        0.0
    }
}
