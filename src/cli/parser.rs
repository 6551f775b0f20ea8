use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Chat with hosted models, falling back down a model list on failure", long_about = None)]
pub struct Args {
    /// Question to send (piped stdin is appended as context)
    pub query: Option<String>,

    /// Start an interactive chat session
    #[arg(short, long)]
    pub chat: bool,

    /// Model to try, in order; repeat to build the fallback chain
    #[arg(short, long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// Position in the model chain to start from
    #[arg(long, default_value_t = 0)]
    pub start_index: usize,

    /// Maximum number of models to try per message
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Override the completion API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log every fallback attempt to stderr
    #[arg(short, long)]
    pub debug: bool,
}
