//! The seam between the conversation controller and the network.

use std::sync::Arc;

use crate::client::AssistantClient;
use crate::error::Result;
use crate::types::{AskResponse, NewsResponse};

/// The two calls the front end makes against the assistant backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `POST /ask-question` with `{"query": query}`.
    async fn ask_question(&self, query: &str) -> Result<AskResponse>;

    /// `GET /get_news`.
    async fn get_news(&self) -> Result<NewsResponse>;
}

#[async_trait::async_trait]
impl Backend for AssistantClient {
    async fn ask_question(&self, query: &str) -> Result<AskResponse> {
        AssistantClient::ask_question(self, query).await
    }

    async fn get_news(&self) -> Result<NewsResponse> {
        AssistantClient::get_news(self).await
    }
}

#[async_trait::async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn ask_question(&self, query: &str) -> Result<AskResponse> {
        self.as_ref().ask_question(query).await
    }

    async fn get_news(&self) -> Result<NewsResponse> {
        self.as_ref().get_news().await
    }
}
