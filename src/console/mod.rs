//! Interactive terminal front end for the assistant backend.
//!
//! This module provides the pieces the `finsight` binary is assembled from:
//!
//! - A conversation controller that owns the question/answer history
//! - Slash commands standing in for the page's buttons
//! - Blocking dialogs for alerts and confirmations
//!
//! # Architecture
//!
//! - [`controller`]: History ownership, the two backend calls, and rendering
//! - [`commands`]: Slash command parsing
//! - [`config`]: CLI argument parsing and configuration
//! - [`prompt`]: The [`Prompter`] trait

mod commands;
mod config;
mod controller;
mod prompt;

pub use crate::render::{HtmlSurface, Surface, TerminalSurface};
pub use commands::{ConsoleCommand, help_text, parse_command};
pub use config::{ConsoleArgs, ConsoleConfig};
pub use controller::{
    CLEAR_CONFIRMATION, Completion, ControllerStats, ConversationController, EMPTY_QUESTION_ALERT,
    PendingNews, PendingQuestion,
};
pub use prompt::{Prompter, is_affirmative};
