//! Configuration types for the terminal front end.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration used to build the client and the controller.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

/// Default title for the session banner and HTML exports.
const DEFAULT_TITLE: &str = "Financial Assistant";

/// Command-line arguments for the finsight tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ConsoleArgs {
    /// Base URL of the assistant backend.
    #[arrrg(optional, "Backend base URL (default: $FINSIGHT_BASE_URL or http://127.0.0.1:5000/)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.  Zero or absent means no timeout.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// File to rewrite with the transcript after every answer.
    #[arrrg(optional, "Auto-save the transcript to this file", "FILE")]
    pub transcript: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved configuration for a console session.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Backend base URL; `None` defers to the environment and the default.
    pub base_url: Option<String>,

    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Path to persist the transcript automatically after each answer.
    pub transcript_path: Option<PathBuf>,

    /// Title for the banner and HTML exports.
    pub title: String,
}

impl ConsoleConfig {
    /// Creates a new ConsoleConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: from the environment, else http://127.0.0.1:5000/
    /// - Timeout: none
    /// - Color: enabled
    /// - Transcript: disabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            use_color: true,
            transcript_path: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the transcript auto-save path.
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        self.transcript_path = path;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ConsoleArgs> for ConsoleConfig {
    fn from(args: ConsoleArgs) -> Self {
        ConsoleConfig {
            base_url: args.base_url,
            timeout: args
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            use_color: !args.no_color,
            transcript_path: args.transcript.map(PathBuf::from),
            ..ConsoleConfig::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ConsoleConfig::new();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert!(config.use_color);
        assert!(config.transcript_path.is_none());
        assert_eq!(config.title, "Financial Assistant");
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ConsoleConfig::from(ConsoleArgs::default());
        assert_eq!(config, ConsoleConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ConsoleArgs {
            base_url: Some("http://backend:5000".to_string()),
            timeout_secs: Some(15),
            transcript: Some("chat.json".to_string()),
            no_color: true,
        };
        let config = ConsoleConfig::from(args);
        assert_eq!(config.base_url.as_deref(), Some("http://backend:5000"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.transcript_path, Some(PathBuf::from("chat.json")));
        assert!(!config.use_color);
    }

    #[test]
    fn zero_timeout_means_none() {
        let args = ConsoleArgs {
            timeout_secs: Some(0),
            ..ConsoleArgs::default()
        };
        assert!(ConsoleConfig::from(args).timeout.is_none());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ConsoleConfig::new()
            .with_base_url("https://example.com/api/")
            .with_timeout(Some(Duration::from_secs(5)))
            .without_color()
            .with_transcript_path(Some(PathBuf::from("t.json")))
            .with_title("Desk");
        assert_eq!(config.base_url.as_deref(), Some("https://example.com/api/"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(!config.use_color);
        assert_eq!(config.transcript_path, Some(PathBuf::from("t.json")));
        assert_eq!(config.title, "Desk");
    }
}
