//! # lang-quiz
//!
//! Multiple-choice programming quizzes per language: pick a random round of
//! questions and score submitted answers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lang_quiz::{load_questions_from_json, score_answers, select_quiz, Submission};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = load_questions_from_json("questions.json")?;
//!
//!     let quiz = select_quiz(&store, "python", &mut rand::thread_rng())?;
//!     let answers: Submission = quiz.iter().map(|q| (q.question_id, 0)).collect();
//!
//!     let result = score_answers(&store, "python", &answers)?;
//!     println!("{} / {} ({}%)", result.score, result.total, result.percentage);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod protocol;
pub mod quiz;
pub mod server;
pub mod terminal;

pub use config::ServerConfig;
pub use data::{load_questions_from_json, QuestionSource};
pub use error::{LoadError, QuizError};
pub use models::{Question, QuestionStore, QuizQuestion};
pub use quiz::{score_answers, select_questions, select_quiz, ScoringResult, Submission};
