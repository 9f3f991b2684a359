mod question;
mod store;

pub use question::{Question, QuizQuestion};
pub use store::{normalize_language, QuestionStore};
