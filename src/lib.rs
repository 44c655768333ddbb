// Public modules
pub mod backend;
pub mod client;
pub mod console;
pub mod error;
pub mod history;
pub mod markup;
pub mod observability;
pub mod page;
pub mod render;
pub mod types;

// Re-exports
pub use backend::Backend;
pub use client::AssistantClient;
pub use error::{Error, Result};
pub use history::ConversationHistory;
pub use markup::{Element, Markup};
pub use observability::register_biometrics;
pub use types::*;
