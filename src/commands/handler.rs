use super::ChatState;
use crate::core::error::ChatError;
use crate::models::short_name;
use crate::providers::Role;

use console::style;

pub trait CommandHandler {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, ChatError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ModelCommand;
pub struct HistoryCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, ChatError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = [
            title.to_string(),
            HelpCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            ModelCommand.help().to_string(),
            QuitCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        let mut lines = vec![format!(
            "Current model: {} ({})",
            state.current_model,
            short_name(&state.current_model)
        )];
        lines.push("Fallback order:".to_string());
        for (i, model) in state.models.iter().enumerate() {
            let marker = if model == state.current_model { "*" } else { " " };
            lines.push(format!("{} {}. {}", marker, i + 1, model));
        }
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/model - Show the current model and the fallback order"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        if state.conversation.is_empty() {
            return Ok(Some("No messages yet.".to_string()));
        }

        let lines: Vec<String> = state
            .conversation
            .messages()
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::User => "You",
                    Role::Assistant => "Assistant",
                };
                format!("{}: {}", role, msg.content)
            })
            .collect();
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/history - Show this session's messages"
    }
}
