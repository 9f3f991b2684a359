use serde::{Deserialize, Serialize};

/// A multiple-choice question as stored in the question file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_index: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_index,
        }
    }

    /// Text of the option at `index`, if it exists.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> Option<&str> {
        self.option(self.correct_index)
    }

    /// Check the structural invariants a loaded question must hold.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.options.len() < 2 {
            return Err("a question needs at least two options");
        }

        if self.correct_index >= self.options.len() {
            return Err("correct answer index is out of range");
        }

        Ok(())
    }

    /// The caller-facing view, without the correct answer.
    pub fn to_public(&self, question_id: usize) -> QuizQuestion {
        QuizQuestion {
            question_id,
            question_text: self.text.clone(),
            options: self.options.clone(),
        }
    }
}

/// A question as handed out to quiz takers.
///
/// `question_id` is the position in the language's full question list and
/// is what the caller echoes back when submitting answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_id: usize,
    pub question_text: String,
    pub options: Vec<String>,
}
