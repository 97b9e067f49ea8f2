mod command;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use aqua_application::{ChatWidget, NewsletterService, RestoreOutcome, WidgetVisibility};
use aqua_core::chat::{ChatMessage, MessageRole};
use aqua_core::error::ChatError;
use aqua_core::newsletter::SubscribeOptions;
use aqua_core::session::SessionStore;
use aqua_infrastructure::{ConfigService, FileSessionStore};
use aqua_interaction::{ApiClient, HttpChatApi, HttpNewsletterApi};

use command::{COMMANDS, Input};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_message(widget: &ChatWidget, message: &ChatMessage) {
    let label = format!("[{}]", widget.role_label(message.role));
    let label = match message.role {
        MessageRole::User => label.green(),
        MessageRole::Assistant => label.bright_magenta(),
        MessageRole::System => label.bright_black(),
    };
    println!("{}", label);
    for line in message.content.lines() {
        match message.role {
            MessageRole::Assistant => println!("{}", line.bright_blue()),
            _ => println!("{}", line),
        }
    }
    println!();
}

fn print_error(error: &ChatError) {
    if let Some(message) = error.user_message() {
        eprintln!("{}", message.red());
    }
}

async fn print_transcript(widget: &ChatWidget) {
    let snapshot = widget.snapshot().await;
    if snapshot.messages.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for message in &snapshot.messages {
        print_message(widget, message);
    }
}

async fn report_restore(widget: &ChatWidget, outcome: Result<RestoreOutcome, ChatError>) {
    match outcome {
        Ok(RestoreOutcome::Restored { count }) => {
            println!(
                "{}",
                format!("Restored {} previous messages.", count).bright_black()
            );
            print_transcript(widget).await;
        }
        Ok(RestoreOutcome::Skipped) => {}
        Err(e) => print_error(&e),
    }
}

/// The Aqua chat REPL.
///
/// Wires the HTTP clients, the session file and the widget controller
/// together, then reads lines until `/quit` or EOF. Plain lines are sent as
/// chat messages; slash commands drive the widget.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // ===== Backend Initialization =====
    let config = ConfigService::new()?.load()?;
    let brand = config.brand;
    if config.api_base.is_empty() {
        tracing::warn!("[Bootstrap] No API base configured; set AQUA_API_BASE or api_base in the config file");
    }

    let client = ApiClient::from_config(&config)?;
    let chat_api = Arc::new(HttpChatApi::new(client.clone()));
    let newsletter = NewsletterService::new(Arc::new(HttpNewsletterApi::new(client)));

    let store: Arc<dyn SessionStore> = match &config.storage_path {
        Some(path) => Arc::new(FileSessionStore::with_path(
            path.clone(),
            brand.session_storage_key(),
        )),
        None => Arc::new(FileSessionStore::new(brand)?),
    };

    let widget = ChatWidget::new(brand, chat_api, store, WidgetVisibility::default());

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!(
        "{}",
        format!("=== {} chat ===", brand.display_name())
            .bright_magenta()
            .bold()
    );
    println!(
        "{}",
        "Type a message to chat. Commands: /open /close /toggle /reset /history /status /subscribe <email> /quit"
            .bright_black()
    );
    println!();

    let opened = widget.open().await;
    report_restore(&widget, opened).await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match Input::parse(trimmed) {
                    Input::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Open => {
                        let outcome = widget.open().await;
                        report_restore(&widget, outcome).await;
                    }
                    Input::Close => {
                        widget.close();
                        println!("{}", "Chat closed. Type /open to continue.".bright_black());
                    }
                    Input::Toggle => {
                        let outcome = widget.toggle().await;
                        let state = if widget.visibility().is_open() { "open" } else { "closed" };
                        println!("{}", format!("Chat {}.", state).bright_black());
                        report_restore(&widget, outcome).await;
                    }
                    Input::Reset => {
                        if widget.snapshot().await.can_reset {
                            widget.reset().await;
                            println!("{}", "Started a new conversation.".bright_green());
                        } else {
                            println!("{}", "Nothing to reset.".bright_black());
                        }
                    }
                    Input::History => print_transcript(&widget).await,
                    Input::Status => {
                        let snapshot = widget.snapshot().await;
                        println!(
                            "{}",
                            format!(
                                "open: {}, session: {}, messages: {}",
                                snapshot.is_open,
                                snapshot.session_id.as_deref().unwrap_or("none"),
                                snapshot.messages.len()
                            )
                            .bright_black()
                        );
                        if let Some(error) = snapshot.error {
                            eprintln!("{}", error.red());
                        }
                    }
                    Input::Subscribe(email) => {
                        match newsletter.subscribe(&email, SubscribeOptions::default()).await {
                            Ok(_) => println!("{}", "Thanks for subscribing!".bright_green()),
                            Err(e) => eprintln!("{}", e.to_string().red()),
                        }
                    }
                    Input::Unknown(command) => {
                        println!("{}", format!("Unknown command: {}", command).bright_black());
                    }
                    Input::Message(text) => {
                        if !widget.visibility().is_open() {
                            println!("{}", "Chat is closed. Type /open first.".yellow());
                            continue;
                        }
                        println!("{}", format!("{} is typing...", brand.assistant_name()).bright_black());
                        match widget.submit(&text).await {
                            Ok(success) => {
                                let reply = ChatMessage::new(MessageRole::Assistant, success.reply);
                                print_message(&widget, &reply);
                            }
                            Err(e) => print_error(&e),
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    widget.teardown().await;

    Ok(())
}
