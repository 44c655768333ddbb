// Public modules
pub mod ask_request;
pub mod ask_response;
pub mod news_article;
pub mod news_response;
pub mod qa_entry;

// Re-exports
pub use ask_request::AskRequest;
pub use ask_response::{AskResponse, MISSING_ANSWER};
pub use news_article::{DEFAULT_SENTIMENT, NewsArticle};
pub use news_response::NewsResponse;
pub use qa_entry::QaEntry;
