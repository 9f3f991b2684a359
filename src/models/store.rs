use std::collections::BTreeMap;

use serde::Deserialize;

use super::Question;

/// Questions grouped by language.
///
/// Keys are lowercased on construction, so lookups only need to normalise
/// the requested name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<Question>>")]
pub struct QuestionStore {
    languages: BTreeMap<String, Vec<Question>>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add questions for a language, appending to any already present.
    pub fn insert(&mut self, language: &str, questions: Vec<Question>) {
        self.languages
            .entry(normalize_language(language))
            .or_default()
            .extend(questions);
    }

    /// Questions for a language, matched case-insensitively.
    pub fn get(&self, language: &str) -> Option<&[Question]> {
        self.languages
            .get(&normalize_language(language))
            .map(Vec::as_slice)
    }

    /// All language keys in sorted order.
    pub fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Question])> {
        self.languages
            .iter()
            .map(|(language, questions)| (language.as_str(), questions.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Total number of questions across all languages.
    pub fn question_count(&self) -> usize {
        self.languages.values().map(Vec::len).sum()
    }
}

impl From<BTreeMap<String, Vec<Question>>> for QuestionStore {
    fn from(map: BTreeMap<String, Vec<Question>>) -> Self {
        let mut store = Self::new();
        for (language, questions) in map {
            store.insert(&language, questions);
        }
        store
    }
}

/// Canonical form of a language name: trimmed and lowercased.
pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}
