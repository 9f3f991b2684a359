mod loader;
mod source;

pub use loader::{load_questions_from_json, parse_questions, DEFAULT_QUESTIONS_PATH};
pub use source::{load_with_timeout, CachedFileSource, JsonFileSource, QuestionSource, StaticSource};
