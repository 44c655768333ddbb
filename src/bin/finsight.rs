//! Interactive terminal front end for the financial assistant backend.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default port
//! finsight
//!
//! # Point at another backend and keep a transcript on disk
//! finsight --base-url http://assistant.internal:5000 --transcript chat.json
//!
//! # Disable colors (useful for piping output)
//! finsight --no-color
//! ```
//!
//! Type a question to ask it.  `/news` fetches the headlines, `/clear` clears
//! the history, `/help` lists the rest.
//!
//! Questions and news fetches run in the background; their results are
//! rendered as they arrive, so a later question can be answered first.

use std::sync::mpsc as std_mpsc;
use std::thread;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

use finsight::AssistantClient;
use finsight::console::{
    Completion, ConsoleArgs, ConsoleCommand, ConsoleConfig, ConversationController, Prompter,
    TerminalSurface, help_text, is_affirmative, parse_command,
};

const PROMPT: &str = "You: ";

/// One result of reading a line on the editor thread.
enum Input {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// Owns the line editor on a dedicated thread.
///
/// The editor blocks, so it cannot run on the runtime.  Each prompt request
/// produces exactly one [`Input`].
struct LineReader {
    prompts: std_mpsc::Sender<String>,
    inputs: mpsc::UnboundedReceiver<Input>,
}

impl LineReader {
    fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let mut rl = DefaultEditor::new()?;
        let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        thread::spawn(move || {
            for prompt in prompt_rx {
                let input = match rl.readline(&prompt) {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if !trimmed.is_empty() {
                            let _ = rl.add_history_entry(trimmed);
                        }
                        Input::Line(line)
                    }
                    Err(ReadlineError::Interrupted) => Input::Interrupted,
                    Err(ReadlineError::Eof) => Input::Eof,
                    Err(err) => Input::Failed(err.to_string()),
                };
                if input_tx.send(input).is_err() {
                    break;
                }
            }
        });
        Ok(Self {
            prompts: prompt_tx,
            inputs: input_rx,
        })
    }

    fn request(&self, prompt: &str) {
        let _ = self.prompts.send(prompt.to_string());
    }
}

/// Dialogs answered on the terminal.
struct TerminalPrompter<'a> {
    reader: &'a mut LineReader,
}

impl Prompter for TerminalPrompter<'_> {
    fn alert(&mut self, message: &str) {
        println!("{message}");
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.reader.request(&format!("{question} [y/N] "));
        let answer = tokio::task::block_in_place(|| self.reader.inputs.blocking_recv());
        matches!(answer, Some(Input::Line(line)) if is_affirmative(&line))
    }
}

/// Main entry point for the finsight application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let (args, _) = ConsoleArgs::from_command_line_relaxed("finsight [OPTIONS]");
    let config = ConsoleConfig::from(args);

    let client = AssistantClient::with_options(config.base_url.clone(), config.timeout)?;
    println!("{} (backend: {})", config.title, client.base_url());
    println!("Type a question, /news for headlines, /help for commands, /quit to exit\n");

    let surface = TerminalSurface::with_color(config.use_color);
    let mut controller = ConversationController::new(client, surface)
        .with_transcript_path(config.transcript_path.clone());

    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<Completion>();
    let mut reader = LineReader::spawn()?;
    reader.request(PROMPT);

    loop {
        tokio::select! {
            Some(completion) = completion_rx.recv() => {
                println!();
                if let Err(err) = controller.apply(completion) {
                    controller
                        .surface_mut()
                        .print_error(&format!("Failed to save transcript: {err}"));
                }
            }
            input = reader.inputs.recv() => {
                let line = match input {
                    Some(Input::Line(line)) => line,
                    Some(Input::Interrupted) => {
                        // Ctrl+C at prompt - soft interrupt
                        reader.request(PROMPT);
                        continue;
                    }
                    Some(Input::Eof) | None => {
                        println!("\nGoodbye!");
                        break;
                    }
                    Some(Input::Failed(err)) => {
                        controller.surface_mut().print_error(&format!("Input error: {err}"));
                        break;
                    }
                };

                match parse_command(&line) {
                    ConsoleCommand::Quit => {
                        if controller.in_flight() > 0 {
                            println!(
                                "Abandoning {} unanswered request(s).",
                                controller.in_flight()
                            );
                        }
                        println!("Goodbye!");
                        break;
                    }
                    ConsoleCommand::Ask(text) => {
                        let mut prompter = TerminalPrompter { reader: &mut reader };
                        if let Some(pending) = controller.begin_question(&text, &mut prompter) {
                            spawn_completion(controller.dispatch_question(pending), &completion_tx);
                        }
                    }
                    ConsoleCommand::News => {
                        let pending = controller.begin_news();
                        spawn_completion(controller.dispatch_news(pending), &completion_tx);
                    }
                    ConsoleCommand::Clear => {
                        let mut prompter = TerminalPrompter { reader: &mut reader };
                        match controller.clear_history(&mut prompter) {
                            Ok(true) => controller.surface_mut().print_info("Conversation cleared."),
                            Ok(false) => {}
                            Err(err) => controller
                                .surface_mut()
                                .print_error(&format!("Failed to save transcript: {err}")),
                        }
                    }
                    ConsoleCommand::History => controller.show_history(),
                    ConsoleCommand::Save(path) => match controller.history().save_transcript_to(&path) {
                        Ok(()) => controller
                            .surface_mut()
                            .print_info(&format!("Transcript saved to {path}")),
                        Err(err) => controller
                            .surface_mut()
                            .print_error(&format!("Failed to save transcript: {err}")),
                    },
                    ConsoleCommand::Export(path) => {
                        match finsight::page::export_to(&path, &config.title, controller.panel()) {
                            Ok(()) => controller
                                .surface_mut()
                                .print_info(&format!("Panel exported to {path}")),
                            Err(err) => controller
                                .surface_mut()
                                .print_error(&format!("Failed to export panel: {err}")),
                        }
                    }
                    ConsoleCommand::Stats => print_stats(&controller),
                    ConsoleCommand::Help => {
                        for line in help_text().lines() {
                            println!("    {}", line);
                        }
                    }
                    ConsoleCommand::Invalid(message) => {
                        controller.surface_mut().print_error(&message);
                    }
                }
                reader.request(PROMPT);
            }
        }
    }

    Ok(())
}

fn spawn_completion(
    call: futures::future::BoxFuture<'static, Completion>,
    completions: &mpsc::UnboundedSender<Completion>,
) {
    let completions = completions.clone();
    tokio::spawn(async move {
        let _ = completions.send(call.await);
    });
}

fn print_stats(controller: &ConversationController<AssistantClient, TerminalSurface>) {
    let stats = controller.stats();
    println!("    Session Statistics:");
    println!("      History entries: {}", stats.history_len);
    println!("      Questions asked: {}", stats.questions_submitted);
    println!("      Failed answers: {}", stats.questions_failed);
    println!("      News fetches: {}", stats.news_fetches);
    println!("      In flight: {}", stats.in_flight);
    match stats.transcript_path {
        Some(ref path) => println!("      Transcript file: {}", path.display()),
        None => println!("      Transcript file: (disabled)"),
    }
}
