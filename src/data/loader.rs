use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::models::QuestionStore;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

/// Read and validate a question store from a JSON file.
///
/// The file maps language names to lists of
/// `{"question": ..., "options": [...], "correct": n}` records.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionStore, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(&json_content, path)
}

/// Parse and validate question JSON. `origin` is only used in error messages.
pub fn parse_questions(json: &str, origin: &Path) -> Result<QuestionStore, LoadError> {
    let store: QuestionStore = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    for (language, questions) in store.iter() {
        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| LoadError::InvalidQuestion {
                    language: language.to_string(),
                    index,
                    reason,
                })?;
        }
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<QuestionStore, LoadError> {
        parse_questions(json, Path::new("test.json"))
    }

    #[test]
    fn test_parse_valid_store() {
        let store = parse(
            r#"{
                "Python": [{"question": "2+2?", "options": ["3", "4"], "correct": 1}],
                "rust": []
            }"#,
        )
        .unwrap();

        assert_eq!(store.languages(), vec!["python", "rust"]);
        assert_eq!(store.get("rust").map(|q| q.len()), Some(0));
    }

    #[test]
    fn test_rejects_out_of_range_correct_index() {
        let err = parse(r#"{"python": [{"question": "q", "options": ["a", "b"], "correct": 2}]}"#)
            .unwrap_err();

        assert!(matches!(
            err,
            LoadError::InvalidQuestion { ref language, index: 0, .. } if language == "python"
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse(r#"{"python": [{"question": "q"}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_questions_from_json("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
