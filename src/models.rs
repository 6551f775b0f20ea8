use crate::core::error::ChatError;

/// Free OpenRouter models, in the order they are tried.
pub const DEFAULT_MODELS: &[&str] = &[
    "nousresearch/deephermes-3-mistral-24b-preview:free",
    "meta-llama/llama-3.3-8b-instruct:free",
    "google/gemma-3n-e4b-it:free",
    "mistralai/devstral-small:free",
    "sarvamai/sarvam-m:free",
    "deepseek/deepseek-r1-0528:free",
];

/// Ordered, immutable list of model identifiers. Position is priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChain {
    models: Vec<String>,
}

impl ModelChain {
    pub fn new(models: Vec<String>) -> Result<Self, ChatError> {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        if models.is_empty() {
            return Err(ChatError::Config(
                "At least one model must be configured".to_string(),
            ));
        }
        Ok(Self { models })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.models.get(index).map(String::as_str)
    }

    pub fn first(&self) -> &str {
        &self.models[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(String::as_str)
    }
}

impl Default for ModelChain {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Vendor part of an identifier, e.g. `google` for `google/gemma-3n-e4b-it:free`.
pub fn short_name(model: &str) -> &str {
    model.split('/').next().unwrap_or(model)
}
