//! Blocking user dialogs.

/// Blocking dialogs the controller needs from its host.
///
/// A browser would use `alert` and `confirm`; the terminal front end reads a
/// line from the editor instead.
pub trait Prompter {
    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.  Returns true only on an affirmative answer.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Interprets a typed answer to a yes/no question.
///
/// Anything other than an explicit yes is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}
