use serde::{Deserialize, Serialize};

/// One recorded question/answer pair.
///
/// Entries are created once a question has been answered (or has failed) and
/// are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    question: String,
    answer: String,
}

impl QaEntry {
    /// Create a new entry.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The trimmed question as the user submitted it.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer text, or `Error: ...` when the request failed.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}
