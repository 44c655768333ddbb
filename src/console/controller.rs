//! The conversation view controller.
//!
//! [`ConversationController`] owns the session's [`ConversationHistory`] and
//! the response panel.  Both network operations are split in three steps so
//! that several calls can be in flight at once:
//!
//! 1. `begin_*` validates input and updates the panel (placeholder or loading
//!    indicator).
//! 2. `dispatch_*` returns a `'static` future that performs the call without
//!    borrowing the controller.
//! 3. [`ConversationController::apply`] folds the finished call back into the
//!    state.  Completions are applied in the order they arrive, which need not
//!    match the order they were begun.
//!
//! `submit_question` and `fetch_news` run the three steps back to back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::backend::Backend;
use crate::console::prompt::Prompter;
use crate::error::Result;
use crate::history::ConversationHistory;
use crate::markup::Markup;
use crate::observability::{
    HISTORY_CLEARS, NEWS_ARTICLES, NEWS_FAILURES, NEWS_FETCHES, QUESTIONS_ANSWERED,
    QUESTIONS_FAILED, QUESTIONS_REJECTED, QUESTIONS_SUBMITTED,
};
use crate::render::{
    LOADING_PLACEHOLDER, SCROLL_SETTLE_DELAY, Surface, error_markup, history_markup, news_markup,
    placeholder_markup,
};
use crate::types::{AskResponse, NewsResponse, QaEntry};

/// Alert shown when the user submits an empty question.
pub const EMPTY_QUESTION_ALERT: &str = "Please enter a question.";

/// Confirmation asked before clearing the history.
pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the chat history?";

/// A question that has been accepted and is waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    question: String,
    sequence: u64,
}

impl PendingQuestion {
    /// The trimmed question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Submission order within the session, starting at zero.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// A news fetch that is waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNews {
    sequence: u64,
}

impl PendingNews {
    /// Fetch order within the session, starting at zero.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// A finished network call, ready to be applied to the controller.
#[derive(Debug)]
pub enum Completion {
    /// An ask-question call finished.
    Question(PendingQuestion, Result<AskResponse>),
    /// A get-news call finished.
    News(PendingNews, Result<NewsResponse>),
}

/// Counters describing the session so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Entries currently in history.
    pub history_len: usize,
    /// Questions accepted since start.
    pub questions_submitted: u64,
    /// Questions whose answer is an error.
    pub questions_failed: u64,
    /// News fetches started since start.
    pub news_fetches: u64,
    /// Calls begun but not yet applied.
    pub in_flight: usize,
    /// The auto-save transcript path, if set.
    pub transcript_path: Option<PathBuf>,
}

/// Owns the conversation history and renders it to a [`Surface`].
pub struct ConversationController<B: Backend + 'static, S: Surface> {
    backend: Arc<B>,
    surface: S,
    history: ConversationHistory,
    panel: Markup,
    transcript_path: Option<PathBuf>,
    questions_submitted: u64,
    questions_failed: u64,
    news_fetches: u64,
    in_flight: usize,
}

impl<B: Backend + 'static, S: Surface> ConversationController<B, S> {
    /// Creates a controller with an empty history.
    pub fn new(backend: B, surface: S) -> Self {
        Self::with_shared_backend(Arc::new(backend), surface)
    }

    /// Creates a controller over a backend that is shared with other owners.
    pub fn with_shared_backend(backend: Arc<B>, surface: S) -> Self {
        Self {
            backend,
            surface,
            history: ConversationHistory::new(),
            panel: Markup::empty(),
            transcript_path: None,
            questions_submitted: 0,
            questions_failed: 0,
            news_fetches: 0,
            in_flight: 0,
        }
    }

    /// Rewrite the transcript at `path` whenever history changes.
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        self.transcript_path = path;
        self
    }

    /// The conversation history.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// The surface the controller renders into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface the controller renders into, for mutation.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The markup most recently rendered to the panel.
    pub fn panel(&self) -> &Markup {
        &self.panel
    }

    /// The auto-save transcript path, if set.
    pub fn transcript_path(&self) -> Option<&Path> {
        self.transcript_path.as_deref()
    }

    /// Sets or clears the auto-save transcript path.
    pub fn set_transcript_path(&mut self, path: Option<PathBuf>) {
        self.transcript_path = path;
    }

    /// Calls begun but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> ControllerStats {
        ControllerStats {
            history_len: self.history.len(),
            questions_submitted: self.questions_submitted,
            questions_failed: self.questions_failed,
            news_fetches: self.news_fetches,
            in_flight: self.in_flight,
            transcript_path: self.transcript_path.clone(),
        }
    }

    ///////////////////////////////////////// questions /////////////////////////////////////////

    /// Validates a question and shows the loading placeholder.
    ///
    /// Returns `None`, after alerting the user, when the trimmed input is
    /// empty.  Nothing else changes in that case.
    pub fn begin_question(
        &mut self,
        input: &str,
        prompter: &mut dyn Prompter,
    ) -> Option<PendingQuestion> {
        let question = input.trim();
        if question.is_empty() {
            QUESTIONS_REJECTED.click();
            prompter.alert(EMPTY_QUESTION_ALERT);
            return None;
        }
        QUESTIONS_SUBMITTED.click();
        let pending = PendingQuestion {
            question: question.to_string(),
            sequence: self.questions_submitted,
        };
        self.questions_submitted += 1;
        self.in_flight += 1;
        tracing::debug!(sequence = pending.sequence, "question submitted");
        self.show(placeholder_markup(LOADING_PLACEHOLDER));
        Some(pending)
    }

    /// Returns a future that asks the backend and yields the completion.
    pub fn dispatch_question(&self, pending: PendingQuestion) -> BoxFuture<'static, Completion> {
        let backend = Arc::clone(&self.backend);
        async move {
            let outcome = backend.ask_question(pending.question()).await;
            Completion::Question(pending, outcome)
        }
        .boxed()
    }

    /// Appends the entry for a finished question and re-renders the history.
    ///
    /// A failed call is recorded with the answer `Error: <message>`.  The
    /// only error returned is a failure to auto-save the transcript; the
    /// entry is appended regardless.
    pub fn complete_question(
        &mut self,
        pending: PendingQuestion,
        outcome: Result<AskResponse>,
    ) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let answer = match outcome {
            Ok(response) => {
                QUESTIONS_ANSWERED.click();
                response.into_answer_text()
            }
            Err(err) => {
                QUESTIONS_FAILED.click();
                self.questions_failed += 1;
                tracing::warn!(sequence = pending.sequence, error = %err, "question failed");
                format!("Error: {}", err.message())
            }
        };
        self.history.push(QaEntry::new(pending.question, answer));
        self.show_history();
        self.auto_save_transcript()
    }

    /// Submits a question and waits for its answer.
    ///
    /// Returns `Ok(false)` when the input was rejected as empty.
    pub async fn submit_question(
        &mut self,
        input: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<bool> {
        let Some(pending) = self.begin_question(input, prompter) else {
            return Ok(false);
        };
        let completion = self.dispatch_question(pending).await;
        self.apply(completion)?;
        Ok(true)
    }

    ///////////////////////////////////////// news /////////////////////////////////////////

    /// Hides the panel behind the loading indicator.
    pub fn begin_news(&mut self) -> PendingNews {
        NEWS_FETCHES.click();
        let pending = PendingNews {
            sequence: self.news_fetches,
        };
        self.news_fetches += 1;
        self.in_flight += 1;
        tracing::debug!(sequence = pending.sequence, "news fetch started");
        self.surface.set_loading(true);
        pending
    }

    /// Returns a future that fetches the news and yields the completion.
    pub fn dispatch_news(&self, pending: PendingNews) -> BoxFuture<'static, Completion> {
        let backend = Arc::clone(&self.backend);
        async move {
            let outcome = backend.get_news().await;
            Completion::News(pending, outcome)
        }
        .boxed()
    }

    /// Renders a finished news fetch in place of whatever the panel showed,
    /// then clears the loading indicator.
    pub fn complete_news(&mut self, pending: PendingNews, outcome: Result<NewsResponse>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let markup = match outcome {
            Ok(response) => {
                match response.articles() {
                    Some(articles) => NEWS_ARTICLES.add(articles.len() as f64),
                    None => NEWS_FAILURES.click(),
                }
                news_markup(&response)
            }
            Err(err) => {
                NEWS_FAILURES.click();
                tracing::warn!(sequence = pending.sequence, error = %err, "news fetch failed");
                error_markup(&format!("Error: {}", err.message()))
            }
        };
        self.show(markup);
        self.surface.set_loading(false);
    }

    /// Fetches and renders the news.
    pub async fn fetch_news(&mut self) {
        let pending = self.begin_news();
        let completion = self.dispatch_news(pending).await;
        // News completions never fail to apply.
        let _ = self.apply(completion);
    }

    ///////////////////////////////////////// shared /////////////////////////////////////////

    /// Applies a finished call.
    pub fn apply(&mut self, completion: Completion) -> Result<()> {
        match completion {
            Completion::Question(pending, outcome) => self.complete_question(pending, outcome),
            Completion::News(pending, outcome) => {
                self.complete_news(pending, outcome);
                Ok(())
            }
        }
    }

    /// Clears the history after the user confirms.
    ///
    /// Returns true if the history was cleared.
    pub fn clear_history(&mut self, prompter: &mut dyn Prompter) -> Result<bool> {
        if !prompter.confirm(CLEAR_CONFIRMATION) {
            return Ok(false);
        }
        HISTORY_CLEARS.click();
        self.history.clear();
        self.show(Markup::empty());
        self.auto_save_transcript()?;
        Ok(true)
    }

    /// Renders the full history and scrolls to its end.
    pub fn show_history(&mut self) {
        self.show(history_markup(&self.history));
        self.surface.scroll_to_bottom(SCROLL_SETTLE_DELAY);
    }

    fn show(&mut self, markup: Markup) {
        self.surface.show(&markup);
        self.panel = markup;
    }

    fn auto_save_transcript(&self) -> Result<()> {
        if let Some(path) = &self.transcript_path {
            self.history.save_transcript_to(path)
        } else {
            Ok(())
        }
    }
}
