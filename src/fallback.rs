use crate::core::error::ChatError;
use crate::models::ModelChain;
use crate::providers::{CompletionProvider, Message};
use tracing::{debug, error};

/// Tries each model of a [`ModelChain`] in order until one answers.
///
/// Attempts are strictly sequential and any failure moves on to the next
/// model, whatever its cause. The number of attempts per request is bounded
/// by `max_attempts`, which defaults to the chain length.
pub struct FallbackDispatcher {
    provider: Box<dyn CompletionProvider>,
    models: ModelChain,
    max_attempts: usize,
}

impl FallbackDispatcher {
    pub fn new(provider: Box<dyn CompletionProvider>, models: ModelChain) -> Self {
        let max_attempts = models.len();
        Self {
            provider,
            models,
            max_attempts,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn models(&self) -> &ModelChain {
        &self.models
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Completes `history` followed by `input` as a user turn.
    ///
    /// Starts at `start_index` in the chain. `on_model_selected` is called
    /// with each model right before it is tried. Fails with
    /// [`ChatError::Exhausted`] once the chain or the attempt budget runs out.
    pub async fn attempt<F>(
        &self,
        input: &str,
        history: &[Message],
        start_index: usize,
        mut on_model_selected: F,
    ) -> Result<String, ChatError>
    where
        F: FnMut(&str),
    {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend(history.iter().cloned());
        messages.push(Message::user(input));

        let budget = self
            .max_attempts
            .min(self.models.len().saturating_sub(start_index));

        let mut last_error = None;
        for (attempt, index) in (start_index..start_index + budget).enumerate() {
            let Some(model) = self.models.get(index) else {
                break;
            };
            on_model_selected(model);

            match self.provider.complete(model, &messages).await {
                Ok(content) => {
                    debug!(model, attempt = attempt + 1, "completion received");
                    return Ok(content);
                }
                Err(e) => {
                    debug!(model, attempt = attempt + 1, error = %e, "model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        error!(attempts = budget, start_index, "all models failed to respond");
        Err(ChatError::exhausted(budget, last_error))
    }
}
