pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::conversation::Conversation;
use crate::models::ModelChain;
pub use dispatcher::create_command_registry;

pub struct ChatState {
    pub conversation: Conversation,
    pub models: ModelChain,
    /// Last model selected by the fallback chain.
    pub current_model: String,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(models: ModelChain, greeting: &str) -> Self {
        Self {
            conversation: Conversation::new(greeting),
            current_model: models.first().to_string(),
            models,
            should_continue: true,
        }
    }
}
