use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One submitted answer: a question id and the chosen option index.
///
/// Both halves are untrusted. The id is kept as received so scoring can
/// report exactly what was wrong with it. The option is wide enough to hold
/// any JSON integer up to `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub option: i128,
}

/// An ordered set of answers, as sent in a check request.
///
/// On the wire this is a JSON object mapping question ids to option
/// indices. Entry order is preserved, and a repeated id keeps its first
/// position but takes the last option given for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    answers: Vec<SubmittedAnswer>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Answering the same id again replaces the option.
    pub fn push(&mut self, question_id: impl ToString, option: impl Into<i128>) {
        let question_id = question_id.to_string();
        let option = option.into();

        match self.answers.iter_mut().find(|a| a.question_id == question_id) {
            Some(existing) => existing.option = option,
            None => self.answers.push(SubmittedAnswer {
                question_id,
                option,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubmittedAnswer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: ToString> FromIterator<(K, i64)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut submission = Submission::new();
        for (question_id, option) in iter {
            submission.push(question_id, option);
        }
        submission
    }
}

impl Serialize for Submission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.answers.len()))?;
        for answer in &self.answers {
            map.serialize_entry(&answer.question_id, &answer.option)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Submission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SubmissionVisitor)
    }
}

struct SubmissionVisitor;

impl<'de> Visitor<'de> for SubmissionVisitor {
    type Value = Submission;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of question ids to option indices")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Submission, A::Error> {
        let mut submission = Submission::new();
        while let Some(QuestionKey(question_id)) = map.next_key()? {
            let OptionIndex(option) = map.next_value()?;
            submission.push(question_id, option);
        }
        Ok(submission)
    }
}

/// A map key that may arrive as a string or an integer.
struct QuestionKey(String);

impl<'de> Deserialize<'de> for QuestionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = QuestionKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a question id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<QuestionKey, E> {
                Ok(QuestionKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<QuestionKey, E> {
                Ok(QuestionKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<QuestionKey, E> {
                Ok(QuestionKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// An option index that may fall outside `i64`.
///
/// Any integer is accepted here so out-of-range values reach scoring and
/// are reported as bad options rather than as undecodable requests.
struct OptionIndex(i128);

impl<'de> Deserialize<'de> for OptionIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl Visitor<'_> for IndexVisitor {
            type Value = OptionIndex;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer option index")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<OptionIndex, E> {
                Ok(OptionIndex(v.into()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<OptionIndex, E> {
                Ok(OptionIndex(v.into()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<OptionIndex, E> {
                Ok(OptionIndex(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<OptionIndex, E> {
                Ok(OptionIndex(i128::try_from(v).unwrap_or(i128::MAX)))
            }
        }

        deserializer.deserialize_any(IndexVisitor)
    }
}
