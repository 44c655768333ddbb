//! Rendering of the response panel.
//!
//! The functions in this module are pure: they map view state (the history,
//! a news response, an error message) to a [`Markup`] tree.  A [`Surface`]
//! then displays the tree.  Two surfaces are provided: [`TerminalSurface`]
//! prints styled text to stdout, and [`HtmlSurface`] keeps the panel as HTML
//! in memory.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crate::history::ConversationHistory;
use crate::markup::{Element, Markup};
use crate::types::{NewsArticle, NewsResponse, QaEntry};

/// Placeholder shown while a question is in flight.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Delay before scrolling the panel to the bottom, so layout can settle.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// ANSI escape code for bold text (used for Q:/A: labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for placeholders and separators).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for green text (used for positive sentiment).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for negative sentiment and errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for yellow text (used for neutral sentiment).
const ANSI_YELLOW: &str = "\x1b[33m";

/// Width of the separator rule printed between history entries.
const RULE_WIDTH: usize = 40;

///////////////////////////////////////// Markup /////////////////////////////////////////

/// Renders the whole history, oldest entry first.
///
/// An empty history renders as an empty panel.
pub fn history_markup(history: &ConversationHistory) -> Markup {
    Markup::Fragment(history.iter().map(entry_markup).collect())
}

fn entry_markup(entry: &QaEntry) -> Markup {
    Element::new("div")
        .class("qa-entry")
        .child(
            Element::new("p")
                .class("question")
                .child(Element::new("strong").text("Q:"))
                .text(" ")
                .text(entry.question()),
        )
        .child(
            Element::new("p")
                .class("answer")
                .child(Element::new("strong").text("A:"))
                .text(" ")
                .text(entry.answer()),
        )
        .child(Element::new("hr"))
        .into()
}

/// Renders a news response: an error paragraph, or one list item per
/// article with a sentiment pill.
pub fn news_markup(response: &NewsResponse) -> Markup {
    match response {
        NewsResponse::Error { error } => error_markup(&format!("Error: {error}")),
        NewsResponse::Articles(articles) => Element::new("ul")
            .class("news-list")
            .children(articles.iter().map(article_markup))
            .into(),
    }
}

fn article_markup(article: &NewsArticle) -> Markup {
    let mut item = Element::new("li")
        .class("news-item")
        .child(Element::new("span").class("headline").text(&article.headline))
        .text(" ")
        .child(
            Element::new("span")
                .class("sentiment")
                .class(article.sentiment_class())
                .text(article.sentiment_label()),
        );
    if let Some(score) = article.vader_score {
        item = item
            .text(" ")
            .child(Element::new("span").class("score").text(format!("({score:+.2})")));
    }
    if let Some(textblob) = article.textblob_label() {
        item = item.text(" ").child(
            Element::new("span")
                .class("textblob")
                .text(format!("TextBlob: {textblob}")),
        );
    }
    item.into()
}

/// Renders a single error paragraph.
pub fn error_markup(message: &str) -> Markup {
    Element::new("p").class("error").text(message).into()
}

/// Renders the transient placeholder shown while waiting for an answer.
pub fn placeholder_markup(text: &str) -> Markup {
    Element::new("p").class("placeholder").text(text).into()
}

///////////////////////////////////////// Surfaces /////////////////////////////////////////

/// A display target for the response panel.
///
/// Every call to [`Surface::show`] replaces what was displayed before.
pub trait Surface: Send {
    /// Replace the panel contents.
    fn show(&mut self, content: &Markup);

    /// Toggle the whole-panel loading indicator.
    ///
    /// While loading, the content panel is hidden.
    fn set_loading(&mut self, loading: bool);

    /// Scroll the panel to its end once `delay` has elapsed.
    fn scroll_to_bottom(&mut self, delay: Duration) {
        _ = delay;
    }
}

/// Renders markup as terminal text, with optional ANSI styling.
pub fn terminal_text(content: &Markup, use_color: bool) -> String {
    let mut out = String::new();
    write_terminal(content, use_color, &mut out);
    out
}

fn write_terminal(node: &Markup, use_color: bool, out: &mut String) {
    match node {
        Markup::Text(text) => out.push_str(text),
        Markup::Fragment(nodes) => {
            for node in nodes {
                write_terminal(node, use_color, out);
            }
        }
        Markup::Element(element) => write_element(element, use_color, out),
    }
}

fn write_element(element: &Element, use_color: bool, out: &mut String) {
    let style = element_style(element);
    match element.tag() {
        "hr" => {
            if use_color {
                out.push_str(ANSI_DIM);
            }
            out.push_str(&"-".repeat(RULE_WIDTH));
            if use_color {
                out.push_str(ANSI_RESET);
            }
            out.push('\n');
            return;
        }
        "li" => out.push_str("  * "),
        _ => {}
    }
    let pill = element.has_class("sentiment");
    if use_color && let Some(style) = style {
        out.push_str(style);
    }
    if pill {
        out.push('[');
    }
    for child in element.child_nodes() {
        write_terminal(child, use_color, out);
    }
    if pill {
        out.push(']');
    }
    if use_color && style.is_some() {
        out.push_str(ANSI_RESET);
    }
    if matches!(element.tag(), "p" | "li") {
        out.push('\n');
    }
}

fn element_style(element: &Element) -> Option<&'static str> {
    if element.has_class("sentiment") {
        if element.has_class("positive") {
            Some(ANSI_GREEN)
        } else if element.has_class("negative") {
            Some(ANSI_RED)
        } else {
            Some(ANSI_YELLOW)
        }
    } else if element.has_class("error") {
        Some(ANSI_RED)
    } else if element.has_class("placeholder")
        || element.has_class("score")
        || element.has_class("textblob")
    {
        Some(ANSI_DIM)
    } else if element.tag() == "strong" {
        Some(ANSI_BOLD)
    } else {
        None
    }
}

/// Surface that prints the panel to stdout.
///
/// A terminal has no panel to replace, so each `show` prints the new
/// contents below the old ones.
pub struct TerminalSurface {
    stdout: Stdout,
    use_color: bool,
    loading: bool,
}

impl TerminalSurface {
    /// Creates a new TerminalSurface with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new TerminalSurface with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            loading: false,
        }
    }

    /// Prints an informational line outside the panel.
    pub fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    /// Prints an error line outside the panel.
    pub fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn show(&mut self, content: &Markup) {
        if content.is_empty() {
            println!("(empty)");
        } else {
            print!("{}", terminal_text(content, self.use_color));
        }
        self.flush();
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            if self.use_color {
                println!("{ANSI_DIM}Fetching news...{ANSI_RESET}");
            } else {
                println!("Fetching news...");
            }
            self.flush();
        }
        self.loading = loading;
    }
}

/// Surface that keeps the panel as an HTML string.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    content: Option<Markup>,
    loading: bool,
    scroll_requests: usize,
}

impl HtmlSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel contents as HTML.  Empty while loading, because the panel
    /// is hidden.
    pub fn html(&self) -> String {
        if self.loading {
            return String::new();
        }
        self.content
            .as_ref()
            .map(Markup::to_html)
            .unwrap_or_default()
    }

    /// The markup most recently shown.
    pub fn markup(&self) -> Option<&Markup> {
        self.content.as_ref()
    }

    /// Returns true while the loading indicator is visible.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true when the content panel is visible.
    pub fn is_content_visible(&self) -> bool {
        !self.loading
    }

    /// How many times the panel was asked to scroll to the bottom.
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }
}

impl Surface for HtmlSurface {
    fn show(&mut self, content: &Markup) {
        self.content = Some(content.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn scroll_to_bottom(&mut self, _: Duration) {
        self.scroll_requests += 1;
    }
}
