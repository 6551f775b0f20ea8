use crate::cli::parser::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::config::Settings;
use crate::conversation::Conversation;
use crate::core::error::ChatError;
use crate::display;
use crate::fallback::FallbackDispatcher;
use crate::input;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use tracing::{debug, info};

pub struct Application {
    pub args: Args,
    pub settings: Settings,
    pub dispatcher: FallbackDispatcher,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(
        args: Args,
        settings: Settings,
        dispatcher: FallbackDispatcher,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        Self {
            args,
            settings,
            dispatcher,
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), ChatError> {
        info!(
            models = self.dispatcher.models().len(),
            max_attempts = self.dispatcher.max_attempts(),
            "starting session"
        );

        if self.args.chat {
            return self.handle_continuous_chat_mode().await;
        }

        let context = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ChatError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        self.handle_chat_mode(context).await
    }

    async fn handle_chat_mode(&self, context: Option<String>) -> Result<(), ChatError> {
        let final_query = build_query(self.args.query.as_deref(), context)?;
        let conversation = Conversation::new(&self.settings.greeting);

        match self
            .dispatcher
            .attempt(
                &final_query,
                conversation.messages(),
                self.settings.start_index,
                display::display_model_selected,
            )
            .await
        {
            Ok(reply) => {
                display::display_reply(&reply);
                Ok(())
            }
            Err(e) => {
                display::display_exhausted();
                Err(e)
            }
        }
    }

    async fn handle_continuous_chat_mode(&mut self) -> Result<(), ChatError> {
        let mut state = ChatState::new(self.settings.models.clone(), &self.settings.greeting);

        println!(
            "Entering chat mode. Type '/help' for available commands. Press Ctrl+D or type /quit to exit."
        );
        if let Some(greeting) = state.conversation.last() {
            display::display_reply(&greeting.content);
        }

        let mut editor = input::create_editor(self.command_dispatcher.clone())?;

        while state.should_continue {
            let input = match input::read_input(&mut editor)? {
                Some(input) => input,
                None => break,
            };

            let input = match classify_input(&input) {
                ChatInput::Blank => continue,
                ChatInput::Command(line) => {
                    if let Some(result) = self.command_dispatcher.execute_line(line, &mut state) {
                        match result {
                            Ok(Some(output)) => println!("{}", output),
                            Ok(None) => {}
                            Err(e) => {
                                display::display_error(&format!("Error executing command: {}", e))
                            }
                        }
                    }
                    continue;
                }
                ChatInput::Message(text) => text,
            };

            let mut selected = None;
            let result = self
                .dispatcher
                .attempt(
                    &input,
                    state.conversation.messages(),
                    self.settings.start_index,
                    |model| {
                        display::display_model_selected(model);
                        selected = Some(model.to_string());
                    },
                )
                .await;

            if let Some(model) = selected {
                state.current_model = model;
            }

            match result {
                Ok(reply) => {
                    display::display_reply(&reply);
                    state.conversation.record_exchange(&input, Some(reply));
                }
                Err(e) => {
                    debug!(error = %e, "fallback chain exhausted");
                    display::display_exhausted();
                    state.conversation.record_exchange(&input, None);
                }
            }
        }

        input::save_history(&mut editor)?;

        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Blank,
    /// Trimmed `/command` line.
    Command(&'a str),
    /// Message text exactly as typed.
    Message(&'a str),
}

/// Trimming only decides what a line is; messages keep their raw text.
fn classify_input(line: &str) -> ChatInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ChatInput::Blank
    } else if trimmed.starts_with('/') {
        ChatInput::Command(trimmed)
    } else {
        ChatInput::Message(line)
    }
}

/// Combines the query argument with piped stdin.
fn build_query(query: Option<&str>, context: Option<String>) -> Result<String, ChatError> {
    let context = context.filter(|c| !c.trim().is_empty());
    match (query, context) {
        (Some(arg_q), Some(stdin_ctx)) => Ok(format!("<pipe>{}</pipe>\n\n{}", stdin_ctx, arg_q)),
        (None, Some(stdin_ctx)) => Ok(format!("<pipe>{}</pipe>", stdin_ctx)),
        (Some(arg_q), None) if !arg_q.trim().is_empty() => Ok(arg_q.to_string()),
        _ => Err(ChatError::Input(
            "No query provided (pass one, pipe stdin, or use --chat)".to_string(),
        )),
    }
}
