use crate::providers::Message;

pub const EXHAUSTED_REPLY: &str =
    "Sorry, I encountered an error with all available models. Please try again later.";

/// In-memory message log for one session. Messages are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a session with the assistant's greeting.
    pub fn new(greeting: &str) -> Self {
        let mut conversation = Self::default();
        if !greeting.is_empty() {
            conversation.messages.push(Message::assistant(greeting));
        }
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Records a finished exchange; `reply` is `None` when every model failed.
    pub fn record_exchange(&mut self, input: &str, reply: Option<String>) {
        self.push_user(input);
        self.push_assistant(reply.unwrap_or_else(|| EXHAUSTED_REPLY.to_string()));
    }
}
