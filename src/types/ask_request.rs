use serde::{Deserialize, Serialize};

/// Request body for `POST /ask-question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question text, already trimmed.
    pub query: String,
}

impl AskRequest {
    /// Create a new request for the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn ask_request_serialization() {
        let request = AskRequest::new("Is gold a hedge?");
        assert_eq!(to_value(request).unwrap(), json!({"query": "Is gold a hedge?"}));
    }
}
