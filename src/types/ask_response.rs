use serde::{Deserialize, Serialize};

/// Text recorded when the backend replies without an `answer` or `error`.
pub const MISSING_ANSWER: &str = "(no answer)";

/// Response body for `POST /ask-question`.
///
/// The backend normally sends `{"answer": ...}`.  When it rejects a request it
/// sends `{"error": ...}` instead, usually alongside a 400 status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// The generated answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Application-level error reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    /// A response carrying an answer.
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            error: None,
        }
    }

    /// A response carrying an application-level error.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            answer: None,
            error: Some(error.into()),
        }
    }

    /// The text to record in history for this response.
    ///
    /// An answer wins over an error; a body with neither degrades to
    /// [`MISSING_ANSWER`].
    pub fn into_answer_text(self) -> String {
        match (self.answer, self.error) {
            (Some(answer), _) => answer,
            (None, Some(error)) => format!("Error: {error}"),
            (None, None) => MISSING_ANSWER.to_string(),
        }
    }
}
